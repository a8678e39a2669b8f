//! Skill breakdown condensation
//!
//! A player's skill records become display rows. Only `Normal` records are
//! ever merged; every other action kind passes through as its own row.
//! Condensation never creates or destroys damage: the row totals always sum
//! to the player's skill total.

mod error;
mod pattern;
mod table;


pub use error::TableError;
pub use pattern::{group_by_pattern, short_key};
pub use table::{SkillGroupDef, SkillGroupTable, group_by_table};

use relink_types::{CharacterType, ComputedSkillGroup, PlayerRecord, SkillRecord};

use crate::encounter::{skill_percentage, skill_total};
use crate::i18n::{Translator, fallback_label, skill_label};

/// How related skills are merged into one row.
#[derive(Clone, Copy)]
pub enum CondenseStrategy<'a> {
    /// One row per record
    Flat,
    /// Groups from a static [`SkillGroupTable`]
    Table(&'a SkillGroupTable),
    /// Groups by shared label prefix, labels resolved through the translator
    Pattern(&'a dyn Translator),
}

impl<'a> CondenseStrategy<'a> {
    /// Table grouping when a table is loaded, pattern grouping otherwise.
    /// `Flat` when condensed skills are switched off.
    pub fn select(
        enabled: bool,
        table: Option<&'a SkillGroupTable>,
        translator: &'a dyn Translator,
    ) -> Self {
        match (enabled, table) {
            (false, _) => Self::Flat,
            (true, Some(table)) => Self::Table(table),
            (true, None) => Self::Pattern(translator),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Table(_) => "table",
            Self::Pattern(_) => "pattern",
        }
    }
}

impl std::fmt::Debug for CondenseStrategy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Condense one player's skill records into display rows, sorted by total
/// damage descending. Ties keep record order; group members are sorted the
/// same way.
pub fn condense_skills(player: &PlayerRecord, strategy: &CondenseStrategy<'_>) -> Vec<ComputedSkillGroup> {
    let total = skill_total(player);
    let entries: Vec<ComputedSkillGroup> = player
        .skills
        .iter()
        .map(|skill| {
            let label = match strategy {
                CondenseStrategy::Pattern(translator) => {
                    skill_label(*translator, &player.character_type, skill)
                }
                _ => fallback_label(skill.action_kind),
            };
            singleton(skill, label, skill_percentage(skill, total))
        })
        .collect();

    let mut rows = match strategy {
        CondenseStrategy::Flat => entries,
        CondenseStrategy::Table(table) => group_by_table(entries, &player.character_type, table),
        CondenseStrategy::Pattern(_) => group_by_pattern(entries),
    };

    for row in &mut rows {
        sort_by_damage(&mut row.members);
    }
    sort_by_damage(&mut rows);

    tracing::trace!(
        player = player.id,
        strategy = strategy.name(),
        records = player.skills.len(),
        rows = rows.len(),
        "Condensed skill breakdown"
    );
    rows
}

fn sort_by_damage(rows: &mut [ComputedSkillGroup]) {
    rows.sort_by(|a, b| b.total_damage.cmp(&a.total_damage));
}

fn singleton(skill: &SkillRecord, label: String, percentage: f64) -> ComputedSkillGroup {
    ComputedSkillGroup {
        label,
        group: None,
        action_kind: skill.action_kind,
        owner_character_type: skill.owner_character_type.clone(),
        member_action_kinds: vec![skill.action_kind],
        hits: skill.hits,
        total_damage: skill.total_damage,
        min_damage: skill.min_damage,
        max_damage: skill.max_damage,
        percentage,
        members: Vec::new(),
    }
}

/// New group row seeded with its first member.
pub(crate) fn start_group(
    name: String,
    owner: Option<CharacterType>,
    first: ComputedSkillGroup,
) -> ComputedSkillGroup {
    ComputedSkillGroup {
        label: name.clone(),
        group: Some(name),
        action_kind: first.action_kind,
        owner_character_type: owner,
        member_action_kinds: vec![first.action_kind],
        hits: first.hits,
        total_damage: first.total_damage,
        min_damage: first.min_damage,
        max_damage: first.max_damage,
        percentage: first.percentage,
        members: vec![first],
    }
}

/// Fold `member` into `group`. Absent min/max values are ignored.
pub(crate) fn absorb(group: &mut ComputedSkillGroup, member: ComputedSkillGroup) {
    group.hits = group.hits.saturating_add(member.hits);
    group.total_damage = group.total_damage.saturating_add(member.total_damage);
    group.percentage += member.percentage;
    group.min_damage = merge_opt(group.min_damage, member.min_damage, u64::min);
    group.max_damage = merge_opt(group.max_damage, member.max_damage, u64::max);
    group.member_action_kinds.push(member.action_kind);
    group.members.push(member);
}

fn merge_opt(a: Option<u64>, b: Option<u64>, pick: fn(u64, u64) -> u64) -> Option<u64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (a, None) => a,
        (None, b) => b,
    }
}
