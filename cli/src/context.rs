use relink_core::context::{MeterSettingsExt, load_catalog, load_skill_groups};
use relink_core::{Catalog, SkillGroupTable};
use relink_types::{EncounterLog, MeterColumn, MeterSettings, SortDirection};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An encounter log read from disk.
pub struct LoadedLog {
    pub path: PathBuf,
    pub log: EncounterLog,
}

/// Shared handle to the loaded log.
pub type LogHandle = Arc<LoadedLog>;

/// Lookup data named by the settings, reloaded when they change.
#[derive(Default)]
pub struct Resources {
    pub table: Option<SkillGroupTable>,
    pub catalog: Catalog,
}

impl Resources {
    pub fn from_settings(settings: &MeterSettings) -> Self {
        Self {
            table: load_skill_groups(settings),
            catalog: load_catalog(settings),
        }
    }
}

/// Current meter sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: MeterColumn,
    pub direction: SortDirection,
}

impl SortState {
    pub fn from_settings(settings: &MeterSettings) -> Self {
        Self {
            column: settings.sort_column,
            direction: settings.sort_direction,
        }
    }

    /// Header click: the selected column flips direction, any other column
    /// becomes selected in ascending order.
    pub fn select(&mut self, column: MeterColumn) {
        if self.column == column {
            self.direction = self.direction.reversed();
        } else {
            self.column = column;
            self.direction = SortDirection::Asc;
        }
    }
}

/// Holds all shared state for the CLI application.
#[derive(Clone)]
pub struct CliContext {
    pub settings: Arc<RwLock<MeterSettings>>,
    pub resources: Arc<RwLock<Resources>>,
    pub sort: Arc<RwLock<SortState>>,
    /// None until a log is loaded
    log: Arc<RwLock<Option<LogHandle>>>,
}

impl CliContext {
    pub fn new() -> Self {
        Self::with_settings(MeterSettings::load())
    }

    pub fn with_settings(settings: MeterSettings) -> Self {
        Self {
            resources: Arc::new(RwLock::new(Resources::from_settings(&settings))),
            sort: Arc::new(RwLock::new(SortState::from_settings(&settings))),
            settings: Arc::new(RwLock::new(settings)),
            log: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_log(&self, loaded: LoadedLog) -> LogHandle {
        let handle = Arc::new(loaded);
        *self.log.write().await = Some(Arc::clone(&handle));
        handle
    }

    pub async fn log(&self) -> Option<LogHandle> {
        self.log.read().await.clone()
    }

    /// Re-read settings from disk and reload the resources they name.
    pub async fn reload_settings(&self) {
        let settings = MeterSettings::load();
        *self.resources.write().await = Resources::from_settings(&settings);
        *self.sort.write().await = SortState::from_settings(&settings);
        *self.settings.write().await = settings;
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_same_column_flips_direction() {
        let mut sort = SortState {
            column: MeterColumn::TotalDamage,
            direction: SortDirection::Desc,
        };

        sort.select(MeterColumn::TotalDamage);
        assert_eq!(sort.direction, SortDirection::Asc);
        sort.select(MeterColumn::TotalDamage);
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn selecting_new_column_resets_to_ascending() {
        let mut sort = SortState {
            column: MeterColumn::TotalDamage,
            direction: SortDirection::Desc,
        };

        sort.select(MeterColumn::Dps);
        assert_eq!(sort.column, MeterColumn::Dps);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[tokio::test]
    async fn loaded_log_is_shared() {
        let ctx = CliContext::with_settings(MeterSettings::default());
        assert!(ctx.log().await.is_none());

        ctx.set_log(LoadedLog {
            path: PathBuf::from("a.json"),
            log: EncounterLog::default(),
        })
        .await;

        let other = ctx.clone();
        assert_eq!(other.log().await.map(|l| l.path.clone()), Some(PathBuf::from("a.json")));
    }
}
