//! Import rules and cost arithmetic live here. Nothing in this module does I/O.

pub mod costs;
pub mod eligibility;
pub mod entities;
pub mod request;
pub mod resale;
pub mod rules;
pub mod simulation;

pub use costs::{compute, compute_with, NetPriceDzd};
pub use eligibility::{
    evaluate, evaluate_with, Eligibility, EligibilityWarning, IneligibilityReason,
};
pub use entities::{
    ConditionState, CostBreakdown, Currency, EurRate, FuelType, ImporterStatus, ManufactureDate,
    Money, Percent, PriceInput, RateConfig, ResaleAnalysis, ResaleInput, ResaleRateSource,
    TaxBasis, VehicleProfile,
};
pub use request::{
    CalculationRequest, InputError, RateOverrides, ValidatedRequest, VehicleInput,
    MAX_AGE_YEARS, MAX_AMOUNT, MAX_DISPLACEMENT_CC, MAX_RATE, MIN_RATE,
};
pub use resale::{analyze_for_costs, analyze_resale};
pub use rules::{
    ConsumptionTaxPolicy, ConsumptionTaxPolicyKind, RuleSet, ANCILLARY_FEES_DZD,
    DEFAULT_CONSUMPTION_TAX_POLICY, DEFAULT_VAT_RATE_PERCENT,
};
pub use simulation::{simulate, CalculationReport};
