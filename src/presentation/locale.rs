//! Display strings for every locale. The domain never sees these; enums are
//! mapped to text only here.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{
    ConditionState, EligibilityWarning, FuelType, ImporterStatus, IneligibilityReason,
    ResaleRateSource,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}' (expected fr or en)")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fr" | "fr-dz" | "fr-fr" => Ok(Locale::Fr),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            _ => Err(UnknownLocale(value.to_string())),
        }
    }
}

/// Fixed interface text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phrase {
    Title,
    Vehicle,
    Importer,
    Eligible,
    Ineligible,
    Warnings,
    CostsHeading,
    NetPrice,
    PreVatSubtotal,
    ResaleHeading,
    ResalePrice,
    DesiredProfit,
    Profit,
    MinimumResalePrice,
    TargetMet,
    TargetMissed,
    RateUsed,
    ModelsHeading,
    NoModels,
    DocumentsHeading,
    RestrictionsHeading,
    RuleSetVersion,
}

pub fn phrase(phrase: Phrase, locale: Locale) -> &'static str {
    match locale {
        Locale::Fr => match phrase {
            Phrase::Title => "Simulateur d'Importation de Véhicules en Algérie",
            Phrase::Vehicle => "Véhicule",
            Phrase::Importer => "Importateur",
            Phrase::Eligible => "Le véhicule est éligible à l'importation.",
            Phrase::Ineligible => {
                "Le véhicule n'est pas éligible à l'importation pour les raisons suivantes :"
            }
            Phrase::Warnings => "Avertissements :",
            Phrase::CostsHeading => "Résumé des Coûts et Taxes",
            Phrase::NetPrice => "Prix hors taxes",
            Phrase::PreVatSubtotal => "Sous-total avant TVA",
            Phrase::ResaleHeading => "Analyse de Revente",
            Phrase::ResalePrice => "Prix de revente",
            Phrase::DesiredProfit => "Bénéfice souhaité",
            Phrase::Profit => "Bénéfice",
            Phrase::MinimumResalePrice => "Prix de revente minimum",
            Phrase::TargetMet => "Objectif de bénéfice atteint.",
            Phrase::TargetMissed => "Objectif de bénéfice non atteint.",
            Phrase::RateUsed => "Taux utilisé",
            Phrase::ModelsHeading => "Modèles disponibles",
            Phrase::NoModels => "Aucun modèle trouvé, saisissez les caractéristiques manuellement.",
            Phrase::DocumentsHeading => "Documents Requis pour le Dédouanement",
            Phrase::RestrictionsHeading => "Restrictions Supplémentaires",
            Phrase::RuleSetVersion => "Barème",
        },
        Locale::En => match phrase {
            Phrase::Title => "Algeria Vehicle Import Simulator",
            Phrase::Vehicle => "Vehicle",
            Phrase::Importer => "Importer",
            Phrase::Eligible => "The vehicle is eligible for import.",
            Phrase::Ineligible => "The vehicle is not eligible for import:",
            Phrase::Warnings => "Warnings:",
            Phrase::CostsHeading => "Costs and Taxes",
            Phrase::NetPrice => "Net price",
            Phrase::PreVatSubtotal => "Subtotal before VAT",
            Phrase::ResaleHeading => "Resale Analysis",
            Phrase::ResalePrice => "Resale price",
            Phrase::DesiredProfit => "Desired profit",
            Phrase::Profit => "Profit",
            Phrase::MinimumResalePrice => "Minimum resale price",
            Phrase::TargetMet => "Profit target met.",
            Phrase::TargetMissed => "Profit target missed.",
            Phrase::RateUsed => "Rate used",
            Phrase::ModelsHeading => "Available models",
            Phrase::NoModels => "No models found, enter the vehicle details manually.",
            Phrase::DocumentsHeading => "Documents Required for Customs Clearance",
            Phrase::RestrictionsHeading => "Additional Restrictions",
            Phrase::RuleSetVersion => "Rule set",
        },
    }
}

/// Report columns shared by the summary and the spreadsheet export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    CustomsDutyRate,
    CustomsDutyAmount,
    VatRate,
    VatAmount,
    ConsumptionTaxRate,
    ConsumptionTaxAmount,
    AncillaryFees,
    TotalDzd,
    TotalEur,
    Eligible,
}

pub fn column_label(column: Column, locale: Locale) -> &'static str {
    match locale {
        Locale::Fr => match column {
            Column::CustomsDutyRate => "Droits de Douane (%)",
            Column::CustomsDutyAmount => "Droits de Douane (DZD)",
            Column::VatRate => "TVA (%)",
            Column::VatAmount => "TVA (DZD)",
            Column::ConsumptionTaxRate => "TIC (%)",
            Column::ConsumptionTaxAmount => "TIC (DZD)",
            Column::AncillaryFees => "Frais Annexes (DZD)",
            Column::TotalDzd => "Total Estimé (DZD)",
            Column::TotalEur => "Total Estimé (EUR)",
            Column::Eligible => "Éligible",
        },
        Locale::En => match column {
            Column::CustomsDutyRate => "Customs duty (%)",
            Column::CustomsDutyAmount => "Customs duty (DZD)",
            Column::VatRate => "VAT (%)",
            Column::VatAmount => "VAT (DZD)",
            Column::ConsumptionTaxRate => "Consumption tax (%)",
            Column::ConsumptionTaxAmount => "Consumption tax (DZD)",
            Column::AncillaryFees => "Ancillary fees (DZD)",
            Column::TotalDzd => "Estimated total (DZD)",
            Column::TotalEur => "Estimated total (EUR)",
            Column::Eligible => "Eligible",
        },
    }
}

pub fn fuel_label(fuel_type: FuelType, locale: Locale) -> &'static str {
    match (fuel_type, locale) {
        (FuelType::Gasoline, Locale::Fr) => "Essence",
        (FuelType::Gasoline, Locale::En) => "Gasoline",
        (FuelType::Diesel, _) => "Diesel",
    }
}

pub fn condition_label(condition: ConditionState, locale: Locale) -> &'static str {
    match (condition, locale) {
        (ConditionState::Good, Locale::Fr) => "Bon état de marche",
        (ConditionState::MinorDefect, Locale::Fr) => "Défaut mineur",
        (ConditionState::MajorDefect, Locale::Fr) => "Défaut majeur",
        (ConditionState::Good, Locale::En) => "Good working order",
        (ConditionState::MinorDefect, Locale::En) => "Minor defect",
        (ConditionState::MajorDefect, Locale::En) => "Major defect",
    }
}

pub fn status_label(status: ImporterStatus, locale: Locale) -> &'static str {
    match (status, locale) {
        (ImporterStatus::ResidentIndividual, Locale::Fr) => "Particulier Résident",
        (ImporterStatus::NonResidentIndividual, Locale::Fr) => {
            "Particulier Non-Résident (Binational)"
        }
        (ImporterStatus::ResidentIndividual, Locale::En) => "Resident individual",
        (ImporterStatus::NonResidentIndividual, Locale::En) => {
            "Non-resident individual (dual national)"
        }
    }
}

pub fn rate_source_label(source: ResaleRateSource, locale: Locale) -> &'static str {
    match (source, locale) {
        (ResaleRateSource::Official, Locale::Fr) => "taux officiel",
        (ResaleRateSource::ParallelMarket, Locale::Fr) => "marché parallèle",
        (ResaleRateSource::Official, Locale::En) => "official rate",
        (ResaleRateSource::ParallelMarket, Locale::En) => "parallel market",
    }
}

pub fn reason_text(reason: &IneligibilityReason, locale: Locale) -> String {
    match locale {
        Locale::En => reason.to_string(),
        Locale::Fr => match reason {
            IneligibilityReason::AgeExceedsResidentLimit { max_age_years } => format!(
                "Le véhicule doit avoir moins de {max_age_years} ans pour les particuliers résidents."
            ),
            IneligibilityReason::DieselDisplacementExceeded { max_cc } => {
                format!("La cylindrée maximale pour les moteurs diesel est de {max_cc} cm³.")
            }
            IneligibilityReason::GasolineDisplacementExceeded { max_cc } => {
                format!("La cylindrée maximale pour les moteurs à essence est de {max_cc} cm³.")
            }
            IneligibilityReason::ConditionNotGood => {
                "Le véhicule doit être en bon état de marche, sans défaut majeur ou critique."
                    .to_string()
            }
        },
    }
}

pub fn warning_text(warning: &EligibilityWarning, locale: Locale) -> String {
    match (warning, locale) {
        (EligibilityWarning::NonResidentPolicyUnimplemented, Locale::Fr) => {
            "Aucune condition d'âge n'est encore appliquée aux particuliers non-résidents ; \
             vérifiez la réglementation en vigueur."
                .to_string()
        }
        (_, Locale::En) => warning.to_string(),
    }
}

pub fn required_documents(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::Fr => &[
            "Copie de la pièce d'identité ou carte de résident.",
            "Certificat de résidence.",
            "Certificat d'immatriculation du véhicule à l'étranger.",
            "Facture d'achat ou contrat de vente.",
            "Document attestant le bon état de marche du véhicule (datant de moins de trois mois).",
            "Rapport d'expertise de conformité établi par un expert agréé.",
        ],
        Locale::En => &[
            "Copy of the identity card or residence card.",
            "Certificate of residence.",
            "Foreign vehicle registration certificate.",
            "Purchase invoice or sales contract.",
            "Proof of good working order (issued less than three months ago).",
            "Conformity inspection report from an approved expert.",
        ],
    }
}

pub fn restrictions(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::Fr => &[
            "Durée d'incessibilité : le véhicule importé ne peut être cédé avant trois ans suivant son importation.",
            "Normes environnementales : les véhicules doivent respecter les normes d'émissions en vigueur en Algérie.",
        ],
        Locale::En => &[
            "Non-transferability: the imported vehicle cannot be sold within three years of import.",
            "Environmental standards: vehicles must meet the emission standards in force in Algeria.",
        ],
    }
}
