//! Optional resources named by the settings
//!
//! A missing or broken resource never stops the meter: the failure is logged
//! and the engine runs without it (pattern grouping, untranslated keys).

use relink_types::MeterSettings;

use crate::i18n::Catalog;
use crate::skills::SkillGroupTable;

pub fn load_skill_groups(settings: &MeterSettings) -> Option<SkillGroupTable> {
    let path = settings.skill_groups_path.as_deref()?;
    match SkillGroupTable::load(path) {
        Ok(table) => Some(table),
        Err(err) => {
            tracing::warn!(error = %err, "Skill group table unavailable, grouping by name");
            None
        }
    }
}

pub fn load_catalog(settings: &MeterSettings) -> Catalog {
    let Some(path) = settings.locale_path.as_deref() else {
        return Catalog::new();
    };
    Catalog::load(path).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Translation catalog unavailable");
        Catalog::new()
    })
}
