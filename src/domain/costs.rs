//! Landed-cost chain: net price → customs duty → TIC → fees → VAT → totals.
//!
//! VAT is levied on the pre-VAT subtotal (net price plus duty, TIC and
//! ancillary fees). All rates are plain percentages.

use rust_decimal_macros::dec;

use super::entities::{
    CostBreakdown, Currency, Money, Percent, PriceInput, RateConfig, TaxBasis, VehicleProfile,
};
use super::rules::RuleSet;

/// Tax-exclusive purchase price in dinars.
///
/// Only obtainable from a [`PriceInput`], so origin VAT can be stripped at
/// most once per computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetPriceDzd(Money);

impl NetPriceDzd {
    pub fn normalize(price: &PriceInput, rates: &RateConfig) -> Self {
        let mut amount = match price.currency {
            Currency::Dzd => price.amount,
            Currency::Eur => price.amount * rates.conversion_rate,
        };
        if price.tax_basis == TaxBasis::TaxInclusive && price.origin_vat_included {
            amount /= Money::ONE + price.origin_vat_rate / dec!(100);
        }
        Self(amount)
    }

    pub fn amount(&self) -> Money {
        self.0
    }
}

pub fn percent_of(rate: Percent, base: Money) -> Money {
    base * rate / dec!(100)
}

pub fn compute(profile: &VehicleProfile, price: &PriceInput, rates: &RateConfig) -> CostBreakdown {
    compute_with(&RuleSet::CURRENT, profile, price, rates)
}

/// `rates.conversion_rate` must be positive; the request boundary enforces it.
pub fn compute_with(
    rules: &RuleSet,
    profile: &VehicleProfile,
    price: &PriceInput,
    rates: &RateConfig,
) -> CostBreakdown {
    let net = NetPriceDzd::normalize(price, rates);
    compute_from_net(rules, profile, net, rates)
}

pub fn compute_from_net(
    rules: &RuleSet,
    profile: &VehicleProfile,
    net: NetPriceDzd,
    rates: &RateConfig,
) -> CostBreakdown {
    let net_price_dzd = net.amount();

    let customs_duty_rate = rules.customs_duty_rate(profile.fuel_type, profile.displacement_cc);
    let consumption_tax_rate =
        rules.consumption_tax_rate(profile.fuel_type, profile.displacement_cc);

    let customs_duty_amount = percent_of(customs_duty_rate, net_price_dzd);
    let consumption_tax_amount = percent_of(consumption_tax_rate, net_price_dzd);
    let ancillary_fees = rules.ancillary_fees;

    let pre_vat_subtotal =
        net_price_dzd + customs_duty_amount + consumption_tax_amount + ancillary_fees;
    let vat_amount = percent_of(rates.vat_rate_percent, pre_vat_subtotal);
    let total_dzd = pre_vat_subtotal + vat_amount;
    let total_eur = total_dzd / rates.conversion_rate;

    CostBreakdown {
        rule_set_version: rules.version,
        net_price_dzd,
        customs_duty_rate,
        customs_duty_amount,
        consumption_tax_rate,
        consumption_tax_amount,
        ancillary_fees,
        pre_vat_subtotal,
        vat_rate: rates.vat_rate_percent,
        vat_amount,
        total_dzd,
        total_eur,
    }
}
