//! Canonical, versioned rule table for eligibility, customs duty and the
//! domestic consumption tax (TIC).
//!
//! Every constant the calculators need lives here so a regulatory change is
//! a new `RuleSet` value rather than edits scattered over the code.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::entities::{FuelType, Money, Percent};

pub const DEFAULT_VAT_RATE_PERCENT: Percent = dec!(19);

/// Rate assumed for VAT paid in the country of purchase (EU average).
pub const DEFAULT_ORIGIN_VAT_RATE_PERCENT: Percent = dec!(20);

/// Customs broker, port handling and registration paperwork, in DZD.
pub const ANCILLARY_FEES_DZD: Money = dec!(50000);

/// Flat 60 % on diesel engines between 2000 and 3000 cc.
pub const DEFAULT_CONSUMPTION_TAX_POLICY: ConsumptionTaxPolicy = ConsumptionTaxPolicy::Flat {
    rate_percent: dec!(60),
};

/// Graduated alternative to the flat TIC rate.
pub const TIERED_CONSUMPTION_TAX_BANDS: [DisplacementBand; 3] = [
    DisplacementBand {
        up_to_cc: 2500,
        rate_percent: dec!(2),
    },
    DisplacementBand {
        up_to_cc: 2800,
        rate_percent: dec!(5),
    },
    DisplacementBand {
        up_to_cc: 3000,
        rate_percent: dec!(10),
    },
];

/// Rate applying to displacements up to and including `up_to_cc`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplacementBand {
    pub up_to_cc: u32,
    pub rate_percent: Percent,
}

/// Customs duty: one rate up to `limit_cc`, another above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DutySchedule {
    pub limit_cc: u32,
    pub within_limit: Percent,
    pub above_limit: Percent,
}

impl DutySchedule {
    pub fn rate_for(&self, displacement_cc: u32) -> Percent {
        if displacement_cc <= self.limit_cc {
            self.within_limit
        } else {
            self.above_limit
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuelRule {
    /// Largest engine an individual may import.
    pub max_eligible_cc: u32,
    pub duty: DutySchedule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsumptionTaxPolicy {
    Flat { rate_percent: Percent },
    Tiered(&'static [DisplacementBand]),
}

impl ConsumptionTaxPolicy {
    /// Rate for an engine already known to fall inside the taxed window.
    fn rate_within_window(&self, displacement_cc: u32) -> Percent {
        match self {
            ConsumptionTaxPolicy::Flat { rate_percent } => *rate_percent,
            ConsumptionTaxPolicy::Tiered(bands) => bands
                .iter()
                .find(|band| displacement_cc <= band.up_to_cc)
                .map(|band| band.rate_percent)
                .unwrap_or(Percent::ZERO),
        }
    }
}

/// Persistable selector for the TIC policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsumptionTaxPolicyKind {
    #[default]
    Flat,
    Tiered,
}

impl ConsumptionTaxPolicyKind {
    pub fn policy(&self) -> ConsumptionTaxPolicy {
        match self {
            ConsumptionTaxPolicyKind::Flat => DEFAULT_CONSUMPTION_TAX_POLICY,
            ConsumptionTaxPolicyKind::Tiered => {
                ConsumptionTaxPolicy::Tiered(&TIERED_CONSUMPTION_TAX_BANDS)
            }
        }
    }
}

/// Diesel engines in `(above_cc, up_to_cc]` pay the TIC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsumptionTaxWindow {
    pub above_cc: u32,
    pub up_to_cc: u32,
}

impl ConsumptionTaxWindow {
    pub fn contains(&self, displacement_cc: u32) -> bool {
        displacement_cc > self.above_cc && displacement_cc <= self.up_to_cc
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleSet {
    pub version: &'static str,
    pub resident_max_age_years: u32,
    pub gasoline: FuelRule,
    pub diesel: FuelRule,
    pub consumption_tax_window: ConsumptionTaxWindow,
    pub consumption_tax: ConsumptionTaxPolicy,
    pub ancillary_fees: Money,
}

impl RuleSet {
    pub const CURRENT: RuleSet = RuleSet {
        version: "2024.1",
        resident_max_age_years: 3,
        gasoline: FuelRule {
            max_eligible_cc: 1800,
            duty: DutySchedule {
                limit_cc: 1800,
                within_limit: dec!(15),
                above_limit: dec!(25),
            },
        },
        diesel: FuelRule {
            max_eligible_cc: 2000,
            duty: DutySchedule {
                limit_cc: 2000,
                within_limit: dec!(20),
                above_limit: dec!(30),
            },
        },
        consumption_tax_window: ConsumptionTaxWindow {
            above_cc: 2000,
            up_to_cc: 3000,
        },
        consumption_tax: DEFAULT_CONSUMPTION_TAX_POLICY,
        ancillary_fees: ANCILLARY_FEES_DZD,
    };

    pub const fn with_consumption_tax(mut self, policy: ConsumptionTaxPolicy) -> Self {
        self.consumption_tax = policy;
        self
    }

    pub fn fuel(&self, fuel_type: FuelType) -> &FuelRule {
        match fuel_type {
            FuelType::Gasoline => &self.gasoline,
            FuelType::Diesel => &self.diesel,
        }
    }

    pub fn customs_duty_rate(&self, fuel_type: FuelType, displacement_cc: u32) -> Percent {
        self.fuel(fuel_type).duty.rate_for(displacement_cc)
    }

    pub fn consumption_tax_rate(&self, fuel_type: FuelType, displacement_cc: u32) -> Percent {
        if fuel_type != FuelType::Diesel || !self.consumption_tax_window.contains(displacement_cc) {
            return Percent::ZERO;
        }
        self.consumption_tax.rate_within_window(displacement_cc)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::CURRENT
    }
}
