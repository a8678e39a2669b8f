//! Shared encounter types for the Relink meter
//!
//! This crate contains the serializable data model that flows between the
//! snapshot producer, the analytics engine (relink-core) and its front-ends.
//! Field names follow the producer's camelCase wire format; the original
//! log field names are accepted as aliases so stored logs keep loading.

pub mod formatting;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Opaque Type Tags
// ─────────────────────────────────────────────────────────────────────────────

/// Character type of a party member or skill owner.
///
/// Either a known symbolic tag (`"Pl1000"`) or the raw type hash the producer
/// could not map (`{"Unknown": 4115588116}`). Never parsed by the engine; only
/// compared and used to build lookup keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawTypeTag", into = "RawTypeTag")]
pub enum CharacterType {
    Known(String),
    Unknown(u32),
}

/// Enemy types share the character wire shape.
pub type EnemyType = CharacterType;

impl CharacterType {
    pub fn known(tag: impl Into<String>) -> Self {
        Self::Known(tag.into())
    }

    /// The tag used to build translation and table keys.
    /// Unknown hashes are rendered as 8-digit lowercase hex.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(tag) => f.write_str(tag),
            Self::Unknown(hash) => write!(f, "{:08x}", hash),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawTypeTag {
    Tag(String),
    Hash {
        #[serde(rename = "Unknown")]
        unknown: u32,
    },
}

impl From<RawTypeTag> for CharacterType {
    fn from(raw: RawTypeTag) -> Self {
        match raw {
            RawTypeTag::Tag(tag) => Self::Known(tag),
            RawTypeTag::Hash { unknown } => Self::Unknown(unknown),
        }
    }
}

impl From<CharacterType> for RawTypeTag {
    fn from(value: CharacterType) -> Self {
        match value {
            CharacterType::Known(tag) => RawTypeTag::Tag(tag),
            CharacterType::Unknown(unknown) => RawTypeTag::Hash { unknown },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Action Kinds
// ─────────────────────────────────────────────────────────────────────────────

/// What kind of action produced a skill record.
///
/// Any tag this build does not recognise deserializes to `Unknown` instead of
/// failing, so a newer producer never breaks the live display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawActionKind")]
pub enum ActionKind {
    LinkAttack,
    #[serde(rename = "SBA")]
    SkyboundArt,
    SupplementaryAttack(u32),
    DamageOverTime(u32),
    Normal(u32),
    Unknown,
}

impl ActionKind {
    /// Skill id for the `Normal` variant, the only one condensation groups.
    pub fn normal_id(&self) -> Option<u32> {
        match self {
            Self::Normal(id) => Some(*id),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawActionKind {
    Known(KnownActionKind),
    Other(serde::de::IgnoredAny),
}

#[derive(Deserialize)]
enum KnownActionKind {
    LinkAttack,
    #[serde(rename = "SBA", alias = "SkyboundArt")]
    SkyboundArt,
    #[serde(alias = "SupplementaryDamage")]
    SupplementaryAttack(u32),
    DamageOverTime(u32),
    Normal(u32),
}

impl From<RawActionKind> for ActionKind {
    fn from(raw: RawActionKind) -> Self {
        match raw {
            RawActionKind::Known(KnownActionKind::LinkAttack) => Self::LinkAttack,
            RawActionKind::Known(KnownActionKind::SkyboundArt) => Self::SkyboundArt,
            RawActionKind::Known(KnownActionKind::SupplementaryAttack(id)) => {
                Self::SupplementaryAttack(id)
            }
            RawActionKind::Known(KnownActionKind::DamageOverTime(id)) => Self::DamageOverTime(id),
            RawActionKind::Known(KnownActionKind::Normal(id)) => Self::Normal(id),
            RawActionKind::Other(_) => Self::Unknown,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot Types (produced upstream, never mutated here)
// ─────────────────────────────────────────────────────────────────────────────

/// Per-skill damage totals for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecord {
    #[serde(alias = "actionType")]
    pub action_kind: ActionKind,
    /// Owner of the skill when it differs from the player (pets, transformations).
    /// Absent means the player's own character type.
    #[serde(default, alias = "childCharacterType")]
    pub owner_character_type: Option<CharacterType>,
    pub hits: u32,
    #[serde(default)]
    pub min_damage: Option<u64>,
    #[serde(default)]
    pub max_damage: Option<u64>,
    pub total_damage: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Stable for the whole encounter
    #[serde(alias = "index")]
    pub id: u32,
    pub character_type: CharacterType,
    pub total_damage: u64,
    #[serde(default)]
    pub dps: f64,
    /// Skybound gauge, 0-1000 (tenths of a percent)
    #[serde(default, alias = "sba")]
    pub gauge: f64,
    /// Epoch milliseconds
    #[serde(default)]
    pub last_damage_time: i64,
    #[serde(default, alias = "skillBreakdown")]
    pub skills: Vec<SkillRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncounterStatus {
    #[default]
    Waiting,
    InProgress,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRecord {
    pub index: u32,
    pub target_type: EnemyType,
    pub total_damage: u64,
}

/// One full-replacement encounter update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSnapshot {
    pub total_damage: u64,
    #[serde(default)]
    pub dps: f64,
    /// Epoch milliseconds of the first damage instance
    pub start_time: i64,
    /// Epoch milliseconds of the last known damage instance
    pub end_time: i64,
    #[serde(default)]
    pub status: EncounterStatus,
    #[serde(default, alias = "party")]
    pub players: HashMap<u32, PlayerRecord>,
    #[serde(default)]
    pub targets: HashMap<u32, TargetRecord>,
}

impl EncounterSnapshot {
    pub fn duration_ms(&self) -> i64 {
        (self.end_time - self.start_time).max(0)
    }
}

/// Party roster entry for a slot (display name, character).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyMember {
    pub actor_index: u32,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub character_name: String,
    pub character_type: CharacterType,
}

/// A stored encounter as delivered by the log fetch: the snapshot plus the
/// per-player bucket arrays for the charts and the party roster.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterLog {
    pub encounter_state: EncounterSnapshot,
    /// Damage increments per bucket, keyed by player id
    #[serde(default)]
    pub dps_chart: BTreeMap<u32, Vec<f64>>,
    /// Gauge samples (0-1000) per one-second bucket, keyed by player id
    #[serde(default)]
    pub sba_chart: BTreeMap<u32, Vec<f64>>,
    #[serde(default)]
    pub chart_len: usize,
    #[serde(default)]
    pub sba_chart_len: usize,
    /// Party slots; `None` for empty slots
    #[serde(default)]
    pub players: Vec<Option<PartyMember>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Computed Types (derived on every recomputation)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedPlayer {
    #[serde(flatten)]
    pub player: PlayerRecord,
    /// Share of the encounter total, 0-100
    pub percentage: f64,
    /// Position by ascending player id, independent of display order
    pub party_slot: usize,
}

/// A display row in a skill breakdown: either a single skill record or a
/// named group of merged records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedSkillGroup {
    pub label: String,
    /// Group name for merged rows, `None` for a single record
    pub group: Option<String>,
    /// Action kind of a single record; first member's kind for a group
    pub action_kind: ActionKind,
    pub owner_character_type: Option<CharacterType>,
    pub member_action_kinds: Vec<ActionKind>,
    pub hits: u32,
    pub total_damage: u64,
    pub min_damage: Option<u64>,
    pub max_damage: Option<u64>,
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<ComputedSkillGroup>,
}

impl ComputedSkillGroup {
    pub fn is_group(&self) -> bool {
        self.group.is_some()
    }

    /// Average damage per hit, 0 when there were no hits.
    pub fn average_hit(&self) -> f64 {
        if self.hits == 0 {
            0.0
        } else {
            self.total_damage as f64 / self.hits as f64
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sorting
// ─────────────────────────────────────────────────────────────────────────────

/// Sortable meter columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeterColumn {
    PartySlot,
    Dps,
    #[default]
    TotalDamage,
    Percentage,
    Gauge,
}

impl MeterColumn {
    pub const ALL: [MeterColumn; 5] = [
        MeterColumn::PartySlot,
        MeterColumn::Dps,
        MeterColumn::TotalDamage,
        MeterColumn::Percentage,
        MeterColumn::Gauge,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::PartySlot => "party-slot",
            Self::Dps => "dps",
            Self::TotalDamage => "total-damage",
            Self::Percentage => "percentage",
            Self::Gauge => "gauge",
        }
    }

    /// Parse a column key, accepting the short names used by the meter UI.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "party-slot" | "slot" | "party" => Some(Self::PartySlot),
            "dps" => Some(Self::Dps),
            "total-damage" | "damage" | "dmg" => Some(Self::TotalDamage),
            "percentage" | "damage-percentage" | "pct" => Some(Self::Percentage),
            "gauge" | "sba" => Some(Self::Gauge),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Time Series
// ─────────────────────────────────────────────────────────────────────────────

/// One bucket of the damage-rate chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageSeriesPoint {
    pub timestamp_ms: i64,
    /// `MM:SS` from encounter start
    pub timestamp: String,
    /// Sum of the smoothed per-player rates in this bucket
    pub party: i64,
    /// Smoothed damage per second, keyed by player id
    pub players: BTreeMap<u32, i64>,
}

/// One bucket of the gauge chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeSeriesPoint {
    pub timestamp_ms: i64,
    pub timestamp: String,
    /// Gauge percentage 0-100, keyed by player id
    pub players: BTreeMap<u32, f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Meter Settings
// ─────────────────────────────────────────────────────────────────────────────

/// User-facing meter settings. Passed explicitly into the engine; nothing in
/// relink-core reads them from global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterSettings {
    /// Merge related skills in breakdowns
    pub use_condensed_skills: bool,
    /// Prefer the account display name over the character name
    pub show_display_names: bool,
    /// Width of a damage chart bucket in seconds
    pub dps_interval_secs: u32,
    /// Number of buckets averaged per chart point, including the current one
    pub smoothing_window: usize,
    pub sort_column: MeterColumn,
    pub sort_direction: SortDirection,
    /// Skill group table (JSON or TOML). Pattern grouping is used without it.
    pub skill_groups_path: Option<PathBuf>,
    /// Translation catalog (JSON)
    pub locale_path: Option<PathBuf>,
}

impl Default for MeterSettings {
    fn default() -> Self {
        Self {
            use_condensed_skills: false,
            show_display_names: true,
            dps_interval_secs: 3,
            smoothing_window: 6,
            sort_column: MeterColumn::TotalDamage,
            sort_direction: SortDirection::Desc,
            skill_groups_path: None,
            locale_path: None,
        }
    }
}
