use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;
use tracing::{info, warn};

use super::settings::Settings;

const APP_QUALIFIER: &str = "dz";
const APP_ORG: &str = "ImportSimulator";
const APP_NAME: &str = "dz-import-simulator";

pub fn settings_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("settings.json"))
}

/// Stored settings, or defaults when nothing usable is on disk.
pub fn load_settings() -> Settings {
    settings_file()
        .and_then(|path| load_settings_from(&path))
        .unwrap_or_default()
}

pub fn load_settings_from(path: &Path) -> Option<Settings> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            warn!("[settings] failed to read {}: {err}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&data) {
        Ok(settings) => Some(settings),
        Err(err) => {
            warn!("[settings] ignoring unparsable {}: {err}", path.display());
            None
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<PathBuf, SettingsError> {
    let path = settings_file().ok_or(SettingsError::StorageUnavailable)?;
    save_settings_to(&path, settings)?;
    Ok(path)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[settings] saved to {}", path.display());
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConsumptionTaxPolicyKind;
    use crate::presentation::Locale;
    use rust_decimal_macros::dec;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("dz-import-sim-settings-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn saved_settings_load_back() {
        let path = scratch("roundtrip.json");
        let mut settings = Settings::default();
        settings.locale = Locale::En;
        settings.rates = settings.rates.with_parallel_market_rate(dec!(245));
        settings.consumption_tax = ConsumptionTaxPolicyKind::Tiered;

        save_settings_to(&path, &settings).unwrap();
        assert_eq!(load_settings_from(&path), Some(settings));
    }

    #[test]
    fn partial_file_is_completed_with_defaults() {
        let path = scratch("partial.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"locale": "en", "rates": {"conversionRate": "146.2"}}"#).unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.locale, Locale::En);
        assert_eq!(settings.rates.conversion_rate, dec!(146.2));
        assert_eq!(settings.rates.vat_rate_percent, dec!(19));
        assert_eq!(settings.consumption_tax, ConsumptionTaxPolicyKind::Flat);
    }

    #[test]
    fn missing_or_broken_file_yields_none() {
        assert_eq!(load_settings_from(&scratch("absent.json")), None);

        let path = scratch("broken.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();
        assert_eq!(load_settings_from(&path), None);
    }
}
