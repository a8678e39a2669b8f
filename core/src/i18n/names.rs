use relink_types::{
    ActionKind, CharacterType, ComputedPlayer, ComputedSkillGroup, EnemyType, PartyMember,
    SkillRecord,
};

use super::Translator;

fn skill_keys(owner: &CharacterType, kind: ActionKind, child: Option<&CharacterType>) -> Vec<String> {
    // Unset child type means the player's own skill.
    let child = child.unwrap_or(owner);
    match kind {
        ActionKind::LinkAttack => vec![
            format!("skills.{}.link-attack", owner),
            "skills.default.link-attack".to_string(),
        ],
        ActionKind::SkyboundArt => vec![
            format!("skills.{}.skybound-arts", owner),
            "skills.default.skybound-arts".to_string(),
        ],
        ActionKind::SupplementaryAttack(_) => vec!["skills.default.supplementary-damage".to_string()],
        ActionKind::DamageOverTime(_) => vec![
            format!("skills.{}.damage-over-time", child),
            format!("skills.{}.damage-over-time", owner),
            "skills.default.damage-over-time".to_string(),
        ],
        ActionKind::Normal(id) => vec![
            format!("skills.{}.{}", child, id),
            format!("skills.{}.{}", owner, id),
            format!("skills.default.{}", id),
            "skills.default.unknown-skill".to_string(),
        ],
        ActionKind::Unknown => vec!["ui.unknown".to_string()],
    }
}

/// Display label for one skill record of a player of type `owner`.
pub fn skill_label(translator: &dyn Translator, owner: &CharacterType, skill: &SkillRecord) -> String {
    kind_label(translator, owner, skill.action_kind, skill.owner_character_type.as_ref())
}

fn kind_label(
    translator: &dyn Translator,
    owner: &CharacterType,
    kind: ActionKind,
    child: Option<&CharacterType>,
) -> String {
    let keys = skill_keys(owner, kind, child);
    match kind {
        ActionKind::Normal(id) => translator.translate(&keys, &[("id", id.to_string())]),
        _ => translator.translate(&keys, &[]),
    }
}

/// Label used when no translator is involved.
pub fn fallback_label(kind: ActionKind) -> String {
    match kind {
        ActionKind::LinkAttack => "Link Attack".to_string(),
        ActionKind::SkyboundArt => "Skybound Art".to_string(),
        ActionKind::SupplementaryAttack(_) => "Supplementary Damage".to_string(),
        ActionKind::DamageOverTime(_) => "Damage Over Time".to_string(),
        ActionKind::Normal(id) => format!("Skill {}", id),
        ActionKind::Unknown => "Unknown".to_string(),
    }
}

/// Label for a named skill group. The group name itself is the last resort.
pub fn group_label(translator: &dyn Translator, owner: Option<&CharacterType>, group: &str) -> String {
    let mut keys = Vec::with_capacity(3);
    if let Some(owner) = owner {
        keys.push(format!("skills.{}.{}", owner, group));
    }
    keys.push(format!("skills.default.{}", group));
    keys.push(group.to_string());
    translator.translate(&keys, &[])
}

/// Label for a condensed row: groups resolve by name, singletons by their
/// own action kind.
pub fn entry_label(translator: &dyn Translator, owner: &CharacterType, entry: &ComputedSkillGroup) -> String {
    match &entry.group {
        Some(group) => group_label(translator, entry.owner_character_type.as_ref(), group),
        None => kind_label(
            translator,
            owner,
            entry.action_kind,
            entry.owner_character_type.as_ref(),
        ),
    }
}

pub fn character_label(translator: &dyn Translator, character: &CharacterType) -> String {
    translator.translate(
        &[
            format!("characters.{}", character),
            format!("ui.characters.{}", character),
            character.key(),
        ],
        &[],
    )
}

pub fn target_label(translator: &dyn Translator, target: &EnemyType) -> String {
    match target {
        CharacterType::Known(tag) => translator.translate(
            &[format!("enemies.{}", tag), "enemies.unknown-type".to_string()],
            &[],
        ),
        CharacterType::Unknown(_) => {
            let hash = target.key();
            translator.translate(
                &[
                    format!("enemies.unknown.{}", hash),
                    "enemies.unknown-type".to_string(),
                ],
                &[("id", hash.clone())],
            )
        }
    }
}

/// Index of the roster slot holding `actor_index`.
pub fn party_slot_of(roster: &[Option<PartyMember>], actor_index: u32) -> Option<usize> {
    roster
        .iter()
        .position(|slot| slot.as_ref().is_some_and(|m| m.actor_index == actor_index))
}

/// `[slot] Display Name (Character)` for party members, `[Guest] Character`
/// for players without a roster slot.
pub fn player_name(
    translator: &dyn Translator,
    roster: &[Option<PartyMember>],
    player: &ComputedPlayer,
    show_display_names: bool,
) -> String {
    let character = character_label(translator, &player.player.character_type);
    let member = party_slot_of(roster, player.player.id)
        .and_then(|slot| roster[slot].as_ref().map(|m| (slot, m)));

    match member {
        Some((slot, member)) => {
            if show_display_names && !member.display_name.is_empty() {
                format!("[{}] {} ({})", slot + 1, member.display_name, character)
            } else {
                format!("[{}] {}", slot + 1, character)
            }
        }
        None => format!("[Guest] {}", character),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use relink_types::PlayerRecord;

    fn normal(id: u32, child: Option<&str>) -> SkillRecord {
        SkillRecord {
            action_kind: ActionKind::Normal(id),
            owner_character_type: child.map(CharacterType::known),
            hits: 1,
            min_damage: Some(10),
            max_damage: Some(10),
            total_damage: 10,
        }
    }

    fn computed(id: u32, character: &str) -> ComputedPlayer {
        ComputedPlayer {
            player: PlayerRecord {
                id,
                character_type: CharacterType::known(character),
                total_damage: 0,
                dps: 0.0,
                gauge: 0.0,
                last_damage_time: 0,
                skills: Vec::new(),
            },
            percentage: 0.0,
            party_slot: 0,
        }
    }

    #[test]
    fn normal_skill_prefers_child_owner() {
        let catalog = Catalog::new()
            .with("skills.Pl2000.100", "Summon Strike")
            .with("skills.Pl0100.100", "Slash")
            .with("skills.default.unknown-skill", "Unknown Skill ({{id}})");
        let owner = CharacterType::known("Pl0100");

        assert_eq!(skill_label(&catalog, &owner, &normal(100, Some("Pl2000"))), "Summon Strike");
        assert_eq!(skill_label(&catalog, &owner, &normal(100, None)), "Slash");
        assert_eq!(skill_label(&catalog, &owner, &normal(999, None)), "Unknown Skill (999)");
    }

    #[test]
    fn unknown_action_kind_uses_ui_unknown() {
        let catalog = Catalog::new().with("ui.unknown", "???");
        let mut skill = normal(1, None);
        skill.action_kind = ActionKind::Unknown;
        assert_eq!(skill_label(&catalog, &CharacterType::known("Pl0100"), &skill), "???");
    }

    #[test]
    fn group_label_falls_back_to_name() {
        let catalog = Catalog::new().with("skills.default.normal-attack", "Normal Attack");
        let owner = CharacterType::known("Pl0100");
        assert_eq!(group_label(&catalog, Some(&owner), "normal-attack"), "Normal Attack");
        assert_eq!(group_label(&catalog, Some(&owner), "Charged Shots"), "Charged Shots");
    }

    #[test]
    fn player_names_follow_roster() {
        let catalog = Catalog::new().with("characters.Pl0100", "Gran");
        let roster = vec![
            None,
            Some(PartyMember {
                actor_index: 7,
                display_name: "Alice".to_string(),
                character_name: "Gran".to_string(),
                character_type: CharacterType::known("Pl0100"),
            }),
        ];

        assert_eq!(player_name(&catalog, &roster, &computed(7, "Pl0100"), true), "[2] Alice (Gran)");
        assert_eq!(player_name(&catalog, &roster, &computed(7, "Pl0100"), false), "[2] Gran");
        assert_eq!(player_name(&catalog, &roster, &computed(9, "Pl0100"), true), "[Guest] Gran");
    }

    #[test]
    fn unknown_targets_use_hash() {
        let catalog = Catalog::new().with("enemies.unknown-type", "Unknown Enemy ({{id}})");
        assert_eq!(
            target_label(&catalog, &CharacterType::Unknown(0xABC)),
            "Unknown Enemy (00000abc)"
        );
        assert_eq!(
            target_label(&catalog, &CharacterType::known("Em7000")),
            "Unknown Enemy ({{id}})"
        );
    }
}
