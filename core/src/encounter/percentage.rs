use relink_types::{PlayerRecord, SkillRecord};

/// `part / total * 100`, or 0 when the total is not positive.
pub fn share_of(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

/// A player's share of the encounter total.
pub fn player_percentage(player: &PlayerRecord, encounter_total: u64) -> f64 {
    share_of(player.total_damage as f64, encounter_total as f64)
}

/// A skill's share of its player's skill total.
///
/// The denominator is [`skill_total`], not `PlayerRecord::total_damage`: the
/// snapshot total may include damage that has no skill record.
pub fn skill_percentage(skill: &SkillRecord, player_skill_total: u64) -> f64 {
    share_of(skill.total_damage as f64, player_skill_total as f64)
}

/// Sum of the player's own skill records.
pub fn skill_total(player: &PlayerRecord) -> u64 {
    player
        .skills
        .iter()
        .fold(0u64, |acc, s| acc.saturating_add(s.total_damage))
}
