//! Meter settings persistence
//!
//! Settings live in relink-types; this module only knows where they are
//! stored. Nothing in the engine reads them implicitly: callers load once and
//! pass the values they need.

use std::path::{Path, PathBuf};

use relink_types::MeterSettings;

use super::ConfigError;

const APP_NAME: &str = "relink";
const CONFIG_NAME: &str = "config";

/// Extension trait for MeterSettings persistence
pub trait MeterSettingsExt: Sized {
    /// Load the stored settings, falling back to defaults on any error.
    fn load() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
}

impl MeterSettingsExt for MeterSettings {
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Using default meter settings");
            Self::default()
        })
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Ok(confy::load_path(path)?)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Locate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relink_types::MeterColumn;

    #[test]
    fn load_from_reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "smoothing_window = 5\nsort_column = \"dps\"\n").unwrap();

        let settings = MeterSettings::load_from(&path).unwrap();

        assert_eq!(settings.smoothing_window, 5);
        assert_eq!(settings.sort_column, MeterColumn::Dps);
        assert_eq!(settings.dps_interval_secs, 3);
    }

    #[test]
    fn load_from_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "smoothing_window = \"five\"\n").unwrap();

        let err = MeterSettings::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
