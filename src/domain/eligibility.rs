use std::fmt;

use serde::Serialize;

use super::entities::{ConditionState, FuelType, ImporterStatus, VehicleProfile};
use super::rules::RuleSet;

/// A rule the vehicle breaks. Locale-independent; see `presentation` for
/// translated sentences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "code", rename_all = "camelCase")]
pub enum IneligibilityReason {
    AgeExceedsResidentLimit { max_age_years: u32 },
    DieselDisplacementExceeded { max_cc: u32 },
    GasolineDisplacementExceeded { max_cc: u32 },
    ConditionNotGood,
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibilityReason::AgeExceedsResidentLimit { max_age_years } => write!(
                f,
                "age exceeds {max_age_years} years for resident individuals."
            ),
            IneligibilityReason::DieselDisplacementExceeded { max_cc } => {
                write!(f, "displacement exceeds {max_cc}cc limit for diesel.")
            }
            IneligibilityReason::GasolineDisplacementExceeded { max_cc } => {
                write!(f, "displacement exceeds {max_cc}cc limit for gasoline.")
            }
            IneligibilityReason::ConditionNotGood => {
                write!(f, "vehicle must be in good working condition.")
            }
        }
    }
}

/// Advisory notes that never make a vehicle ineligible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "code", rename_all = "camelCase")]
pub enum EligibilityWarning {
    /// No age rule is encoded for non-resident importers yet.
    NonResidentPolicyUnimplemented,
}

impl fmt::Display for EligibilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityWarning::NonResidentPolicyUnimplemented => write!(
                f,
                "no age rule is enforced for non-resident importers; check current regulations."
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    pub eligible: bool,
    /// In rule-evaluation order.
    pub reasons: Vec<IneligibilityReason>,
    pub warnings: Vec<EligibilityWarning>,
}

pub fn evaluate(profile: &VehicleProfile, status: ImporterStatus) -> Eligibility {
    evaluate_with(&RuleSet::CURRENT, profile, status)
}

/// Applies every rule independently; violations accumulate.
pub fn evaluate_with(
    rules: &RuleSet,
    profile: &VehicleProfile,
    status: ImporterStatus,
) -> Eligibility {
    let mut reasons = Vec::new();
    let mut warnings = Vec::new();

    match status {
        ImporterStatus::ResidentIndividual => {
            if profile.age_years > rules.resident_max_age_years {
                reasons.push(IneligibilityReason::AgeExceedsResidentLimit {
                    max_age_years: rules.resident_max_age_years,
                });
            }
        }
        ImporterStatus::NonResidentIndividual => {
            warnings.push(EligibilityWarning::NonResidentPolicyUnimplemented);
        }
    }

    let max_cc = rules.fuel(profile.fuel_type).max_eligible_cc;
    if profile.displacement_cc > max_cc {
        reasons.push(match profile.fuel_type {
            FuelType::Diesel => IneligibilityReason::DieselDisplacementExceeded { max_cc },
            FuelType::Gasoline => IneligibilityReason::GasolineDisplacementExceeded { max_cc },
        });
    }

    if profile.condition != ConditionState::Good {
        reasons.push(IneligibilityReason::ConditionNotGood);
    }

    Eligibility {
        eligible: reasons.is_empty(),
        reasons,
        warnings,
    }
}
