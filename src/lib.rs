//! Eligibility and landed-cost simulator for importing used vehicles into
//! Algeria.
//!
//! `domain` holds the rule table and the pure calculators, `infra` the
//! make/model lookup and report exports, `presentation` the localized text.

pub mod domain;
pub mod infra;
pub mod presentation;
pub mod util;

pub use domain::{simulate, CalculationReport, CalculationRequest, InputError, RuleSet};
