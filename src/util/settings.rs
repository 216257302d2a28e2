use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::{ConsumptionTaxPolicyKind, Money, RateConfig};
use crate::presentation::Locale;

/// Official DZD/EUR rate used until the user configures one.
pub const DEFAULT_CONVERSION_RATE: Money = dec!(150);

/// User preferences kept between runs. Past calculations are never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_rates")]
    pub rates: RateConfig,
    #[serde(default)]
    pub consumption_tax: ConsumptionTaxPolicyKind,
    /// Overrides the vPIC endpoint, mostly for mirrors.
    #[serde(default)]
    pub lookup_base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            rates: default_rates(),
            consumption_tax: ConsumptionTaxPolicyKind::default(),
            lookup_base_url: None,
        }
    }
}

fn default_rates() -> RateConfig {
    RateConfig::new(DEFAULT_CONVERSION_RATE)
}
