//! Plain-text rendering of a calculation report.

use super::format::{format_dzd, format_eur, format_millions, format_percent};
use super::locale::{
    column_label, condition_label, fuel_label, phrase, rate_source_label, reason_text,
    required_documents, restrictions, status_label, warning_text, Column, Locale, Phrase,
};
use crate::domain::{CalculationReport, ImporterStatus, VehicleProfile};

pub fn render_vehicle(profile: &VehicleProfile, status: ImporterStatus, locale: Locale) -> String {
    let years = match locale {
        Locale::Fr => "ans",
        Locale::En => "years",
    };
    block([
        format!(
            "{}: {}, {} cm³, {}, {} ({years})",
            phrase(Phrase::Vehicle, locale),
            fuel_label(profile.fuel_type, locale),
            profile.displacement_cc,
            condition_label(profile.condition, locale),
            profile.age_years,
        ),
        format!(
            "{}: {}",
            phrase(Phrase::Importer, locale),
            status_label(status, locale)
        ),
    ])
}

pub fn render_summary(report: &CalculationReport, locale: Locale) -> String {
    let mut lines = Vec::new();

    let eligibility = &report.eligibility;
    if eligibility.eligible {
        lines.push(phrase(Phrase::Eligible, locale).to_string());
    } else {
        lines.push(phrase(Phrase::Ineligible, locale).to_string());
        lines.extend(
            eligibility
                .reasons
                .iter()
                .map(|reason| format!("- {}", reason_text(reason, locale))),
        );
    }
    if !eligibility.warnings.is_empty() {
        lines.push(phrase(Phrase::Warnings, locale).to_string());
        lines.extend(
            eligibility
                .warnings
                .iter()
                .map(|warning| format!("- {}", warning_text(warning, locale))),
        );
    }

    let costs = &report.costs;
    lines.push(String::new());
    lines.push(format!(
        "{} ({} {})",
        phrase(Phrase::CostsHeading, locale),
        phrase(Phrase::RuleSetVersion, locale),
        costs.rule_set_version
    ));
    lines.push(format!(
        "{}: {}",
        phrase(Phrase::NetPrice, locale),
        format_dzd(costs.net_price_dzd, locale)
    ));
    lines.push(format!(
        "{} ({}): {}",
        short_label(Column::CustomsDutyAmount, locale),
        format_percent(costs.customs_duty_rate),
        format_dzd(costs.customs_duty_amount, locale)
    ));
    lines.push(format!(
        "{} ({}): {}",
        short_label(Column::ConsumptionTaxAmount, locale),
        format_percent(costs.consumption_tax_rate),
        format_dzd(costs.consumption_tax_amount, locale)
    ));
    lines.push(format!(
        "{}: {}",
        short_label(Column::AncillaryFees, locale),
        format_dzd(costs.ancillary_fees, locale)
    ));
    lines.push(format!(
        "{}: {}",
        phrase(Phrase::PreVatSubtotal, locale),
        format_dzd(costs.pre_vat_subtotal, locale)
    ));
    lines.push(format!(
        "{} ({}): {}",
        short_label(Column::VatAmount, locale),
        format_percent(costs.vat_rate),
        format_dzd(costs.vat_amount, locale)
    ));
    lines.push(format!(
        "{}: {} ({}) / {}",
        short_label(Column::TotalDzd, locale),
        format_dzd(costs.total_dzd, locale),
        format_millions(costs.total_dzd, locale),
        format_eur(costs.total_eur, locale)
    ));

    if let Some(resale) = &report.resale {
        let verdict = if resale.meets_desired_profit {
            Phrase::TargetMet
        } else {
            Phrase::TargetMissed
        };
        lines.extend([
            String::new(),
            phrase(Phrase::ResaleHeading, locale).to_string(),
            format!(
                "{}: {}",
                phrase(Phrase::ResalePrice, locale),
                format_dzd(resale.resale_price, locale)
            ),
            format!(
                "{}: {}",
                phrase(Phrase::DesiredProfit, locale),
                format_dzd(resale.desired_profit, locale)
            ),
            format!(
                "{}: {} / {}",
                phrase(Phrase::Profit, locale),
                format_dzd(resale.computed_profit, locale),
                format_eur(resale.computed_profit_eur, locale)
            ),
            format!(
                "{}: {} / {}",
                phrase(Phrase::MinimumResalePrice, locale),
                format_dzd(resale.minimum_required_resale_price, locale),
                format_eur(resale.minimum_required_resale_price_eur, locale)
            ),
            format!(
                "{}: {} DZD/EUR ({})",
                phrase(Phrase::RateUsed, locale),
                resale.eur_rate.dzd_per_eur.normalize(),
                rate_source_label(resale.eur_rate.source, locale)
            ),
            phrase(verdict, locale).to_string(),
        ]);
    }

    block(lines)
}

pub fn render_guidance(locale: Locale) -> String {
    let mut lines = vec![phrase(Phrase::DocumentsHeading, locale).to_string()];
    lines.extend(
        required_documents(locale)
            .iter()
            .enumerate()
            .map(|(idx, document)| format!("{}. {document}", idx + 1)),
    );
    lines.push(String::new());
    lines.push(phrase(Phrase::RestrictionsHeading, locale).to_string());
    lines.extend(
        restrictions(locale)
            .iter()
            .map(|restriction| format!("- {restriction}")),
    );
    block(lines)
}

pub fn render_models(make: &str, models: &[String], locale: Locale) -> String {
    let listing = if models.is_empty() {
        phrase(Phrase::NoModels, locale).to_string()
    } else {
        models.join(", ")
    };
    format!("{} ({make}): {listing}\n", phrase(Phrase::ModelsHeading, locale))
}

/// Joins lines, each terminated by a newline.
fn block(lines: impl IntoIterator<Item = String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Column label without the trailing unit, e.g. `TVA` from `TVA (DZD)`.
fn short_label(column: Column, locale: Locale) -> &'static str {
    let label = column_label(column, locale);
    label
        .rsplit_once(" (")
        .map(|(head, _)| head)
        .unwrap_or(label)
}
