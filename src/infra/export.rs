//! Report exports: pretty JSON for other tools, one-row CSV for spreadsheets.
//!
//! A failed export never touches the report it was given.

use std::{fs, io, path::Path};

use rust_decimal::RoundingStrategy;
use thiserror::Error;
use tracing::info;

use crate::domain::{CalculationReport, Money};
use crate::presentation::{column_label, Column, Locale};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to encode report as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write spreadsheet: {0}")]
    Csv(#[from] csv::Error),
}

const CSV_COLUMNS: [Column; 10] = [
    Column::CustomsDutyRate,
    Column::CustomsDutyAmount,
    Column::VatRate,
    Column::VatAmount,
    Column::ConsumptionTaxRate,
    Column::ConsumptionTaxAmount,
    Column::AncillaryFees,
    Column::TotalDzd,
    Column::TotalEur,
    Column::Eligible,
];

pub fn write_json(report: &CalculationReport, path: &Path) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    info!("[export] wrote JSON report to {}", path.display());
    Ok(())
}

pub fn write_csv(report: &CalculationReport, locale: Locale, path: &Path) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_COLUMNS.iter().map(|column| column_label(*column, locale)))?;
    writer.write_record(csv_row(report))?;
    writer.flush()?;
    info!("[export] wrote spreadsheet to {}", path.display());
    Ok(())
}

fn csv_row(report: &CalculationReport) -> Vec<String> {
    let costs = &report.costs;
    CSV_COLUMNS
        .iter()
        .map(|column| match column {
            Column::CustomsDutyRate => plain(costs.customs_duty_rate),
            Column::CustomsDutyAmount => plain(costs.customs_duty_amount),
            Column::VatRate => plain(costs.vat_rate),
            Column::VatAmount => plain(costs.vat_amount),
            Column::ConsumptionTaxRate => plain(costs.consumption_tax_rate),
            Column::ConsumptionTaxAmount => plain(costs.consumption_tax_amount),
            Column::AncillaryFees => plain(costs.ancillary_fees),
            Column::TotalDzd => plain(costs.total_dzd),
            Column::TotalEur => plain(costs.total_eur),
            Column::Eligible => report.eligibility.eligible.to_string(),
        })
        .collect()
}

/// Spreadsheet cells: two decimals, no grouping.
fn plain(value: Money) -> String {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

fn ensure_parent(path: &Path) -> Result<(), io::Error> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        compute, evaluate, ConditionState, FuelType, ImporterStatus, PriceInput, RateConfig,
        VehicleProfile,
    };
    use rust_decimal_macros::dec;

    fn report() -> CalculationReport {
        let profile = VehicleProfile {
            age_years: 2,
            fuel_type: FuelType::Gasoline,
            displacement_cc: 1800,
            condition: ConditionState::Good,
        };
        CalculationReport {
            eligibility: evaluate(&profile, ImporterStatus::ResidentIndividual),
            costs: compute(
                &profile,
                &PriceInput::dzd(dec!(1000000)),
                &RateConfig::new(dec!(150)),
            ),
            resale: None,
        }
    }

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("dz-import-sim-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn csv_row_matches_the_breakdown() {
        assert_eq!(
            csv_row(&report()),
            vec!["15", "150000", "19", "228000", "0", "0", "50000", "1428000", "9520", "true"]
        );

        let mut midpoint = report();
        midpoint.costs.total_eur = dec!(9520.005);
        midpoint.costs.vat_amount = dec!(228000.125);
        let row = csv_row(&midpoint);
        assert_eq!(row[3], "228000.13");
        assert_eq!(row[8], "9520.01");
    }

    #[test]
    fn writes_spreadsheet_with_localized_header() {
        let path = scratch("rapport.csv");
        write_csv(&report(), Locale::Fr, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("Droits de Douane (%),"));
        assert!(lines.next().unwrap().ends_with(",1428000,9520,true"));
    }

    #[test]
    fn writes_json_with_record_field_names() {
        let path = scratch("report.json");
        write_json(&report(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let decimal = |field: &str| -> Money {
            value["costs"][field].as_str().unwrap().parse().unwrap()
        };
        assert_eq!(decimal("totalDzd"), dec!(1428000));
        assert_eq!(decimal("customsDutyRate"), dec!(15));
        assert_eq!(value["eligibility"]["eligible"], true);
        assert!(value["resale"].is_null());
    }

    #[test]
    fn unwritable_target_is_reported() {
        let dir = scratch("occupied");
        fs::create_dir_all(&dir).unwrap();
        let result = write_json(&report(), &dir);
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
