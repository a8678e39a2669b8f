mod config;
mod error;
mod log_files;
mod resources;

pub use config::MeterSettingsExt;
pub use error::{ConfigError, LogError};
pub use log_files::{load_encounter_log, parse_encounter_log};
pub use resources::{load_catalog, load_skill_groups};
