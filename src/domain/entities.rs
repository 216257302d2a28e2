use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use super::rules::{DEFAULT_ORIGIN_VAT_RATE_PERCENT, DEFAULT_VAT_RATE_PERCENT};

/// Monetary amount. Decimal keeps tax arithmetic exact.
pub type Money = Decimal;

/// Plain percentage as displayed to the user (`19` means 19 %).
pub type Percent = Decimal;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FuelType {
    Gasoline,
    Diesel,
}

/// Roadworthiness reported by the conformity inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionState {
    Good,
    MinorDefect,
    MajorDefect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImporterStatus {
    ResidentIndividual,
    /// Dual nationals living abroad.
    NonResidentIndividual,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "DZD", alias = "dzd")]
    Dzd,
    #[serde(rename = "EUR", alias = "eur")]
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Dzd => "DZD",
            Currency::Eur => "EUR",
        }
    }
}

/// Whether the entered price already contains the origin country's VAT.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaxBasis {
    #[default]
    TaxExclusive,
    TaxInclusive,
}

/// Month of first registration as printed on the foreign registration papers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufactureDate {
    pub year: i32,
    pub month: u8,
}

impl ManufactureDate {
    /// Full years elapsed between the manufacture month and `today`.
    /// Negative when the date lies in the future.
    pub fn age_at(&self, today: Date) -> i64 {
        let mut years = i64::from(today.year()) - i64::from(self.year);
        if u8::from(today.month()) < self.month {
            years -= 1;
        }
        years
    }
}

/// Vehicle attributes the rule set looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleProfile {
    pub age_years: u32,
    pub fuel_type: FuelType,
    pub displacement_cc: u32,
    pub condition: ConditionState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInput {
    pub amount: Money,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub tax_basis: TaxBasis,
    #[serde(default)]
    pub origin_vat_included: bool,
    #[serde(default = "default_origin_vat_rate")]
    pub origin_vat_rate: Percent,
}

impl PriceInput {
    /// Tax-exclusive price in dinars.
    pub fn dzd(amount: Money) -> Self {
        Self {
            amount,
            currency: Currency::Dzd,
            tax_basis: TaxBasis::TaxExclusive,
            origin_vat_included: false,
            origin_vat_rate: DEFAULT_ORIGIN_VAT_RATE_PERCENT,
        }
    }

    /// Tax-exclusive price in euros.
    pub fn eur(amount: Money) -> Self {
        Self {
            currency: Currency::Eur,
            ..Self::dzd(amount)
        }
    }

    /// Marks the amount as containing origin VAT at `rate` percent.
    pub fn with_origin_vat(mut self, rate: Percent) -> Self {
        self.tax_basis = TaxBasis::TaxInclusive;
        self.origin_vat_included = true;
        self.origin_vat_rate = rate;
        self
    }
}

fn default_origin_vat_rate() -> Percent {
    DEFAULT_ORIGIN_VAT_RATE_PERCENT
}

fn default_vat_rate() -> Percent {
    DEFAULT_VAT_RATE_PERCENT
}

/// Which DZD/EUR rate converts resale figures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResaleRateSource {
    #[default]
    Official,
    /// Square (informal) market rate.
    ParallelMarket,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    /// Dinars per euro at the official bank rate.
    pub conversion_rate: Money,
    #[serde(default = "default_vat_rate")]
    pub vat_rate_percent: Percent,
    #[serde(default)]
    pub parallel_market_rate: Option<Money>,
}

impl RateConfig {
    pub fn new(conversion_rate: Money) -> Self {
        Self {
            conversion_rate,
            vat_rate_percent: DEFAULT_VAT_RATE_PERCENT,
            parallel_market_rate: None,
        }
    }

    pub fn with_parallel_market_rate(mut self, rate: Money) -> Self {
        self.parallel_market_rate = Some(rate);
        self
    }

    /// Parallel market rate, falling back to the official one.
    pub fn parallel_rate(&self) -> Money {
        self.parallel_market_rate.unwrap_or(self.conversion_rate)
    }

    pub fn eur_rate(&self, source: ResaleRateSource) -> EurRate {
        let dzd_per_eur = match source {
            ResaleRateSource::Official => self.conversion_rate,
            ResaleRateSource::ParallelMarket => self.parallel_rate(),
        };
        EurRate {
            source,
            dzd_per_eur,
        }
    }
}

/// A DZD/EUR divisor together with where it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EurRate {
    pub source: ResaleRateSource,
    pub dzd_per_eur: Money,
}

/// Every tax and fee for one input snapshot. Built only by the cost calculator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub rule_set_version: &'static str,
    pub net_price_dzd: Money,
    pub customs_duty_rate: Percent,
    pub customs_duty_amount: Money,
    pub consumption_tax_rate: Percent,
    pub consumption_tax_amount: Money,
    pub ancillary_fees: Money,
    pub pre_vat_subtotal: Money,
    pub vat_rate: Percent,
    pub vat_amount: Money,
    pub total_dzd: Money,
    pub total_eur: Money,
}

/// What the buyer wants out of reselling the imported vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResaleInput {
    pub resale_price: Money,
    #[serde(default)]
    pub desired_profit: Money,
    #[serde(default)]
    pub rate_source: ResaleRateSource,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResaleAnalysis {
    pub resale_price: Money,
    pub desired_profit: Money,
    pub computed_profit: Money,
    pub minimum_required_resale_price: Money,
    pub meets_desired_profit: bool,
    pub eur_rate: EurRate,
    pub computed_profit_eur: Money,
    pub minimum_required_resale_price_eur: Money,
}
