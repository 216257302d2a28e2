use super::entities::{CostBreakdown, EurRate, Money, RateConfig, ResaleAnalysis, ResaleInput};

/// Profit on resale and the price needed to hit the desired margin.
///
/// `rate.dzd_per_eur` must be positive.
pub fn analyze_resale(
    total_dzd: Money,
    resale_price_dzd: Money,
    desired_profit_dzd: Money,
    rate: EurRate,
) -> ResaleAnalysis {
    let computed_profit = resale_price_dzd - total_dzd;
    let minimum_required_resale_price = total_dzd + desired_profit_dzd;

    ResaleAnalysis {
        resale_price: resale_price_dzd,
        desired_profit: desired_profit_dzd,
        computed_profit,
        minimum_required_resale_price,
        meets_desired_profit: resale_price_dzd >= minimum_required_resale_price,
        eur_rate: rate,
        computed_profit_eur: computed_profit / rate.dzd_per_eur,
        minimum_required_resale_price_eur: minimum_required_resale_price / rate.dzd_per_eur,
    }
}

pub fn analyze_for_costs(
    costs: &CostBreakdown,
    input: &ResaleInput,
    rates: &RateConfig,
) -> ResaleAnalysis {
    analyze_resale(
        costs.total_dzd,
        input.resale_price,
        input.desired_profit,
        rates.eur_rate(input.rate_source),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ResaleRateSource;
    use rust_decimal_macros::dec;

    fn official(rate: Money) -> EurRate {
        RateConfig::new(rate).eur_rate(ResaleRateSource::Official)
    }

    #[test]
    fn profitable_resale() {
        let analysis = analyze_resale(dec!(1428000), dec!(1700000), dec!(200000), official(dec!(150)));
        assert_eq!(analysis.computed_profit, dec!(272000));
        assert_eq!(analysis.minimum_required_resale_price, dec!(1628000));
        assert!(analysis.meets_desired_profit);
        assert_eq!(analysis.minimum_required_resale_price_eur, dec!(1628000) / dec!(150));
    }

    #[test]
    fn exact_minimum_price_meets_the_target() {
        let analysis = analyze_resale(dec!(1428000), dec!(1628000), dec!(200000), official(dec!(150)));
        assert!(analysis.meets_desired_profit);
        assert_eq!(analysis.computed_profit, dec!(200000));

        let analysis = analyze_resale(
            dec!(1428000),
            dec!(1627999.99),
            dec!(200000),
            official(dec!(150)),
        );
        assert!(!analysis.meets_desired_profit);
    }

    #[test]
    fn loss_is_reported_as_negative_profit() {
        let analysis = analyze_resale(dec!(1428000), dec!(1300000), dec!(0), official(dec!(200)));
        assert_eq!(analysis.computed_profit, dec!(-128000));
        assert_eq!(analysis.computed_profit_eur, dec!(-640));
        assert!(!analysis.meets_desired_profit);
    }

    #[test]
    fn parallel_market_rate_is_used_when_selected() {
        let rates = RateConfig::new(dec!(150)).with_parallel_market_rate(dec!(240));
        let costs_total = dec!(2400000);
        let input = ResaleInput {
            resale_price: dec!(2880000),
            desired_profit: dec!(240000),
            rate_source: ResaleRateSource::ParallelMarket,
        };

        let analysis = analyze_resale(
            costs_total,
            input.resale_price,
            input.desired_profit,
            rates.eur_rate(input.rate_source),
        );
        assert_eq!(analysis.eur_rate.dzd_per_eur, dec!(240));
        assert_eq!(analysis.computed_profit_eur, dec!(2000));
        assert_eq!(analysis.minimum_required_resale_price_eur, dec!(11000));
    }
}
