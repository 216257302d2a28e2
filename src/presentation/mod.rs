//! Locale text, number formatting and the plain-text summary. Only this
//! layer knows about languages.

pub mod format;
pub mod locale;
pub mod summary;

pub use format::{format_amount, format_dzd, format_eur, format_millions, format_percent};
pub use locale::{
    column_label, condition_label, fuel_label, phrase, reason_text, required_documents,
    restrictions, status_label, warning_text, Column, Locale, Phrase, UnknownLocale,
};
pub use summary::{render_guidance, render_models, render_summary, render_vehicle};
