//! Encounter-level derivations
//!
//! Every function here is a pure re-derivation from one snapshot:
//! - **party**: stable party slots from ascending player id
//! - **percentage**: guarded share-of-total for players and skills
//! - **sort**: stable column sort of computed players

mod party;
mod percentage;
mod sort;


pub use party::order_party;
pub use percentage::{player_percentage, share_of, skill_percentage, skill_total};
pub use sort::{column_value, sort_players};

use relink_types::{
    ComputedPlayer, ComputedSkillGroup, EncounterSnapshot, MeterColumn, SortDirection,
    TargetRecord,
};

use crate::skills::{CondenseStrategy, condense_skills};

/// Party-ordered players with their share of the encounter total.
pub fn compute_computed_players(snapshot: &EncounterSnapshot) -> Vec<ComputedPlayer> {
    let mut players = order_party(&snapshot.players);
    for computed in &mut players {
        computed.percentage = player_percentage(&computed.player, snapshot.total_damage);
    }
    players
}

/// A sorted player with the rows of their skill breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBreakdown {
    pub player: ComputedPlayer,
    pub skills: Vec<ComputedSkillGroup>,
}

/// Full display pipeline: party order, percentages, sort, then condensation
/// per player.
pub fn build_breakdowns(
    snapshot: &EncounterSnapshot,
    column: MeterColumn,
    direction: SortDirection,
    strategy: &CondenseStrategy<'_>,
) -> Vec<PlayerBreakdown> {
    let players = compute_computed_players(snapshot);
    sort_players(&players, column, direction)
        .into_iter()
        .map(|player| {
            let skills = condense_skills(&player.player, strategy);
            PlayerBreakdown { player, skills }
        })
        .collect()
}

/// The target that took the most damage. Ties go to the lowest index.
pub fn primary_target(snapshot: &EncounterSnapshot) -> Option<&TargetRecord> {
    snapshot
        .targets
        .values()
        .max_by(|a, b| {
            a.total_damage
                .cmp(&b.total_damage)
                .then_with(|| b.index.cmp(&a.index))
        })
}

/// Local wall-clock time of an epoch-millisecond timestamp, `YYYY-MM-DD HH:MM`.
/// Out-of-range input yields an empty string.
pub fn local_time(epoch_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms)
        .map(|utc| {
            utc.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_default()
}
