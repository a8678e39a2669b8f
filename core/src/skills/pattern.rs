use std::sync::LazyLock;

use hashbrown::HashMap;
use regex::Regex;

use relink_types::ComputedSkillGroup;

use super::{absorb, start_group};

static SHORT_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)(?:\b\d\b|Lvl \d+|\()").unwrap());

/// Group key of a skill label: the trimmed text before the first standalone
/// digit, `Lvl <n>` or `(`. Labels without a match, or whose prefix is
/// empty, key as themselves.
///
/// `"Rapid Slash 2"` and `"Rapid Slash (Charged)"` both key as `"Rapid Slash"`.
pub fn short_key(label: &str) -> String {
    SHORT_KEY
        .captures(label)
        .and_then(|caps| caps.get(1))
        .map(|prefix| prefix.as_str().trim())
        .filter(|prefix| !prefix.is_empty())
        .unwrap_or(label)
        .to_string()
}

/// Merge `Normal` entries whose labels share a short key.
///
/// Merged rows report min/max over the members' total damage rather than
/// their per-hit min/max. Keys claimed by one entry stay singletons.
pub fn group_by_pattern(entries: Vec<ComputedSkillGroup>) -> Vec<ComputedSkillGroup> {
    let keys: Vec<Option<String>> = entries
        .iter()
        .map(|e| e.action_kind.normal_id().map(|_| short_key(&e.label)))
        .collect();

    let mut claims: HashMap<&str, usize> = HashMap::new();
    for key in keys.iter().flatten() {
        *claims.entry(key.as_str()).or_default() += 1;
    }

    let mut out: Vec<ComputedSkillGroup> = Vec::with_capacity(entries.len());
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (entry, key) in entries.into_iter().zip(keys.iter()) {
        let Some(key) = key.as_deref().filter(|k| claims.get(k).copied().unwrap_or(0) > 1) else {
            out.push(entry);
            continue;
        };

        match index.get(key) {
            Some(&pos) => absorb(&mut out[pos], entry),
            None => {
                index.insert(key, out.len());
                let owner = entry.owner_character_type.clone();
                out.push(start_group(key.to_string(), owner, entry));
            }
        }
    }

    for row in out.iter_mut().filter(|row| row.is_group()) {
        row.min_damage = row.members.iter().map(|m| m.total_damage).min();
        row.max_damage = row.members.iter().map(|m| m.total_damage).max();
    }

    out
}
