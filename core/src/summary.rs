//! Plain-text encounter summaries for the clipboard
//!
//! Comma-separated lines, header first. Both formats return `None` when the
//! encounter has no damage, leaving "nothing to copy" to the caller.

use relink_types::formatting::{format_elapsed, format_pct2};
use relink_types::{ComputedPlayer, ComputedSkillGroup, EncounterSnapshot, PartyMember};

use crate::encounter::PlayerBreakdown;
use crate::i18n::{Translator, entry_label, player_name};

const ENCOUNTER_HEADER: &str = "Encounter Time, Total Damage, Total DPS";
const PLAYER_HEADER: &str = "Name, DMG, DPS, %";
const SKILL_HEADER: &str = "Skill, Hits, Total, Min, Max, Avg, %";

/// What the formatter needs to name players.
pub struct SummaryContext<'a> {
    pub translator: &'a dyn Translator,
    pub roster: &'a [Option<PartyMember>],
    pub show_display_names: bool,
}

impl SummaryContext<'_> {
    fn name_of(&self, player: &ComputedPlayer) -> String {
        player_name(self.translator, self.roster, player, self.show_display_names)
    }
}

fn encounter_lines(snapshot: &EncounterSnapshot) -> [String; 2] {
    [
        ENCOUNTER_HEADER.to_string(),
        format!(
            "{}, {}, {}",
            format_elapsed(snapshot.duration_ms()),
            snapshot.total_damage,
            snapshot.dps.round() as i64
        ),
    ]
}

fn player_line(ctx: &SummaryContext<'_>, player: &ComputedPlayer) -> String {
    format!(
        "{}, {}, {}, {}",
        ctx.name_of(player),
        player.player.total_damage,
        player.player.dps.round() as i64,
        format_pct2(player.percentage)
    )
}

fn skill_line(ctx: &SummaryContext<'_>, player: &ComputedPlayer, row: &ComputedSkillGroup) -> String {
    let opt = |v: Option<u64>| v.map(|v| v.to_string()).unwrap_or_default();
    format!(
        "{}, {}, {}, {}, {}, {}, {}",
        entry_label(ctx.translator, &player.player.character_type, row),
        row.hits,
        row.total_damage,
        opt(row.min_damage),
        opt(row.max_damage),
        row.average_hit().round() as u64,
        format_pct2(row.percentage)
    )
}

/// Encounter line plus one line per player, in the order given.
pub fn format_simple_summary(
    snapshot: &EncounterSnapshot,
    players: &[ComputedPlayer],
    ctx: &SummaryContext<'_>,
) -> Option<String> {
    if snapshot.total_damage == 0 {
        return None;
    }

    let mut lines: Vec<String> = encounter_lines(snapshot).into();
    lines.push(PLAYER_HEADER.to_string());
    lines.extend(players.iter().map(|p| player_line(ctx, p)));
    Some(lines.join("\n"))
}

/// Encounter line, then for each player their line and skill table.
pub fn format_full_summary(
    snapshot: &EncounterSnapshot,
    breakdowns: &[PlayerBreakdown],
    ctx: &SummaryContext<'_>,
) -> Option<String> {
    if snapshot.total_damage == 0 {
        return None;
    }

    let mut lines: Vec<String> = encounter_lines(snapshot).into();
    for breakdown in breakdowns {
        lines.push(PLAYER_HEADER.to_string());
        lines.push(player_line(ctx, &breakdown.player));
        lines.push(SKILL_HEADER.to_string());
        lines.extend(
            breakdown
                .skills
                .iter()
                .map(|row| skill_line(ctx, &breakdown.player, row)),
        );
    }
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use relink_types::{
        ActionKind, CharacterType, EncounterStatus, MeterColumn, PlayerRecord, SkillRecord,
        SortDirection,
    };

    use super::*;
    use crate::encounter::{build_breakdowns, compute_computed_players, sort_players};
    use crate::i18n::Catalog;
    use crate::skills::{CondenseStrategy, SkillGroupTable};

    fn snapshot() -> EncounterSnapshot {
        let gran = PlayerRecord {
            id: 0,
            character_type: CharacterType::known("Pl0000"),
            total_damage: 700_000,
            dps: 11_666.6,
            gauge: 0.0,
            last_damage_time: 0,
            skills: vec![
                SkillRecord {
                    action_kind: ActionKind::Normal(100),
                    owner_character_type: None,
                    hits: 3,
                    min_damage: Some(100_000),
                    max_damage: Some(300_000),
                    total_damage: 600_000,
                },
                SkillRecord {
                    action_kind: ActionKind::Normal(110),
                    owner_character_type: None,
                    hits: 2,
                    min_damage: None,
                    max_damage: None,
                    total_damage: 0,
                },
                SkillRecord {
                    action_kind: ActionKind::LinkAttack,
                    owner_character_type: None,
                    hits: 1,
                    min_damage: Some(100_000),
                    max_damage: Some(100_000),
                    total_damage: 100_000,
                },
            ],
        };
        let io = PlayerRecord {
            id: 3,
            character_type: CharacterType::known("Pl0500"),
            total_damage: 300_000,
            dps: 5_000.4,
            gauge: 0.0,
            last_damage_time: 0,
            skills: Vec::new(),
        };

        EncounterSnapshot {
            total_damage: 1_000_000,
            dps: 16_666.7,
            start_time: 1_000,
            end_time: 61_000,
            status: EncounterStatus::Stopped,
            players: HashMap::from([(0, gran), (3, io)]),
            targets: HashMap::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new()
            .with("characters.Pl0000", "Gran")
            .with("characters.Pl0500", "Io")
            .with("skills.default.link-attack", "Link Attack")
            .with("skills.default.normal-attack", "Normal Attack")
    }

    fn roster() -> Vec<Option<PartyMember>> {
        vec![Some(PartyMember {
            actor_index: 0,
            display_name: "Alice".to_string(),
            character_name: "Gran".to_string(),
            character_type: CharacterType::known("Pl0000"),
        })]
    }

    #[test]
    fn simple_summary_lists_sorted_players() {
        let snap = snapshot();
        let catalog = catalog();
        let roster = roster();
        let ctx = SummaryContext {
            translator: &catalog,
            roster: &roster,
            show_display_names: true,
        };
        let players = sort_players(
            &compute_computed_players(&snap),
            MeterColumn::TotalDamage,
            SortDirection::Asc,
        );

        let text = format_simple_summary(&snap, &players, &ctx).unwrap();

        assert_eq!(
            text,
            "Encounter Time, Total Damage, Total DPS\n\
             01:00, 1000000, 16667\n\
             Name, DMG, DPS, %\n\
             [Guest] Io, 300000, 5000, 30.00%\n\
             [1] Alice (Gran), 700000, 11667, 70.00%"
        );
    }

    #[test]
    fn full_summary_includes_skill_tables() {
        let snap = snapshot();
        let catalog = catalog();
        let roster = roster();
        let ctx = SummaryContext {
            translator: &catalog,
            roster: &roster,
            show_display_names: false,
        };
        let table = SkillGroupTable::new().with_group("Pl0000", "normal-attack", [100, 110]);
        let breakdowns = build_breakdowns(
            &snap,
            MeterColumn::TotalDamage,
            SortDirection::Desc,
            &CondenseStrategy::Table(&table),
        );

        let text = format_full_summary(&snap, &breakdowns, &ctx).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[2], "Name, DMG, DPS, %");
        assert_eq!(lines[3], "[1] Gran, 700000, 11667, 70.00%");
        assert_eq!(lines[4], "Skill, Hits, Total, Min, Max, Avg, %");
        assert_eq!(lines[5], "Normal Attack, 5, 600000, 100000, 300000, 120000, 85.71%");
        assert_eq!(lines[6], "Link Attack, 1, 100000, 100000, 100000, 100000, 14.29%");
        assert_eq!(lines[7], "Name, DMG, DPS, %");
        assert_eq!(lines[8], "[Guest] Io, 300000, 5000, 30.00%");
        assert_eq!(lines[9], "Skill, Hits, Total, Min, Max, Avg, %");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn empty_encounter_has_nothing_to_copy() {
        let snap = EncounterSnapshot::default();
        let catalog = Catalog::new();
        let ctx = SummaryContext {
            translator: &catalog,
            roster: &[],
            show_display_names: true,
        };

        assert!(format_simple_summary(&snap, &[], &ctx).is_none());
        assert!(format_full_summary(&snap, &[], &ctx).is_none());
    }
}
