pub mod context;
pub mod encounter;
pub mod i18n;
pub mod series;
pub mod skills;
pub mod summary;

// Re-exports for convenience
pub use context::{
    ConfigError, LogError, MeterSettingsExt, load_catalog, load_encounter_log, load_skill_groups,
    parse_encounter_log,
};
pub use encounter::{
    PlayerBreakdown, build_breakdowns, compute_computed_players, order_party, player_percentage,
    primary_target, skill_percentage, skill_total, sort_players,
};
pub use i18n::{
    Catalog, CatalogError, Translator, character_label, entry_label, player_name, skill_label,
    target_label,
};
pub use series::{SeriesConfig, build_damage_series, build_gauge_series};
pub use skills::{CondenseStrategy, SkillGroupTable, TableError, condense_skills, short_key};
pub use summary::{SummaryContext, format_full_summary, format_simple_summary};

pub use relink_types::*;
