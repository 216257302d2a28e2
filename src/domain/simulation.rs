use serde::Serialize;
use tracing::debug;

use super::costs::compute_with;
use super::eligibility::{evaluate_with, Eligibility};
use super::entities::{CostBreakdown, ResaleAnalysis};
use super::request::ValidatedRequest;
use super::resale::analyze_for_costs;
use super::rules::RuleSet;

/// Everything a renderer or exporter needs; nothing has to be re-derived.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationReport {
    pub eligibility: Eligibility,
    pub costs: CostBreakdown,
    pub resale: Option<ResaleAnalysis>,
}

/// Runs eligibility, the cost chain and the optional resale analysis on one
/// validated snapshot.
pub fn simulate(request: &ValidatedRequest, rules: &RuleSet) -> CalculationReport {
    let eligibility = evaluate_with(rules, &request.profile, request.status);
    let costs = compute_with(rules, &request.profile, &request.price, &request.rates);
    let resale = request
        .resale
        .as_ref()
        .map(|input| analyze_for_costs(&costs, input, &request.rates));

    debug!(
        eligible = eligibility.eligible,
        reasons = eligibility.reasons.len(),
        total_dzd = %costs.total_dzd,
        rules = rules.version,
        "simulation finished"
    );

    CalculationReport {
        eligibility,
        costs,
        resale,
    }
}
