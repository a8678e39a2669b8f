//! Static skill group table and table-driven grouping
//!
//! Two on-disk formats are accepted:
//! - JSON, the meter's asset shape: `{"Pl0100": {"normal-attack": {"skills": [100, 110]}}}`
//! - TOML, an array of tables per character: `[[Pl0100]] name = "normal-attack" skills = [100, 110]`
//!
//! Group order inside a character is preserved in both, since the first
//! group containing a skill id claims it.

use std::collections::HashMap as StdHashMap;
use std::fmt;
use std::path::Path;

use hashbrown::{HashMap, HashSet};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use relink_types::{CharacterType, ComputedSkillGroup};

use super::{TableError, absorb, start_group};

/// One named group of skill ids.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillGroupDef {
    pub name: String,
    pub skills: HashSet<u32>,
}

impl SkillGroupDef {
    pub fn new(name: impl Into<String>, skills: impl IntoIterator<Item = u32>) -> Self {
        Self {
            name: name.into(),
            skills: skills.into_iter().collect(),
        }
    }
}

/// `CharacterType -> ordered groups`. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct SkillGroupTable {
    groups: HashMap<CharacterType, Vec<SkillGroupDef>>,
}

impl SkillGroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group for `character`, after any existing ones.
    pub fn insert_group(&mut self, character: CharacterType, group: SkillGroupDef) {
        self.groups.entry(character).or_default().push(group);
    }

    pub fn with_group(
        mut self,
        character: impl Into<String>,
        name: impl Into<String>,
        skills: impl IntoIterator<Item = u32>,
    ) -> Self {
        self.insert_group(CharacterType::known(character), SkillGroupDef::new(name, skills));
        self
    }

    pub fn groups_for(&self, character: &CharacterType) -> &[SkillGroupDef] {
        self.groups.get(character).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Name of the first group of `character` that contains `skill_id`.
    pub fn group_of(&self, character: &CharacterType, skill_id: u32) -> Option<&str> {
        self.groups_for(character)
            .iter()
            .find(|g| g.skills.contains(&skill_id))
            .map(|g| g.name.as_str())
    }

    pub fn character_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let raw: StdHashMap<String, JsonGroups> = serde_json::from_str(content)?;
        let mut table = Self::new();
        for (character, JsonGroups(groups)) in raw {
            let character = CharacterType::known(character);
            for group in groups {
                table.insert_group(character.clone(), group);
            }
        }
        Ok(table)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let raw: StdHashMap<String, Vec<TomlGroup>> = toml::from_str(content)?;
        let mut table = Self::new();
        for (character, groups) in raw {
            let character = CharacterType::known(character);
            for group in groups {
                table.insert_group(character.clone(), SkillGroupDef::new(group.name, group.skills));
            }
        }
        Ok(table)
    }

    /// Load a table file; `.toml` files are read as TOML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path).map_err(|source| TableError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let table = if is_toml {
            Self::from_toml_str(&content).map_err(|source| TableError::ParseToml {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::from_json_str(&content).map_err(|source| TableError::ParseJson {
                path: path.to_path_buf(),
                source,
            })?
        };

        tracing::debug!(
            path = %path.display(),
            characters = table.character_count(),
            groups = table.group_count(),
            "Loaded skill group table"
        );
        Ok(table)
    }
}

#[derive(Deserialize)]
struct TomlGroup {
    name: String,
    #[serde(default)]
    skills: Vec<u32>,
}

#[derive(Deserialize)]
struct JsonGroupBody {
    #[serde(default)]
    skills: Vec<u32>,
}

/// Group map of one character, kept in document order.
struct JsonGroups(Vec<SkillGroupDef>);

impl<'de> Deserialize<'de> for JsonGroups {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = JsonGroups;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of group name to {\"skills\": [ids]}")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, body)) = map.next_entry::<String, JsonGroupBody>()? {
                    groups.push(SkillGroupDef::new(name, body.skills));
                }
                Ok(JsonGroups(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

/// Merge `Normal` entries claimed by a table group.
///
/// The owner is the entry's own character type, or the player's when absent.
/// Groups merge on `(group name, owner)`, so identically named groups of
/// different owners stay apart. Unclaimed entries pass through in place.
/// A player of unknown type still groups entries whose owner is known.
pub fn group_by_table(
    entries: Vec<ComputedSkillGroup>,
    player_type: &CharacterType,
    table: &SkillGroupTable,
) -> Vec<ComputedSkillGroup> {
    let mut out: Vec<ComputedSkillGroup> = Vec::with_capacity(entries.len());
    let mut index: HashMap<(String, CharacterType), usize> = HashMap::new();

    for entry in entries {
        let Some(id) = entry.action_kind.normal_id() else {
            out.push(entry);
            continue;
        };

        let owner = entry
            .owner_character_type
            .clone()
            .unwrap_or_else(|| player_type.clone());

        let Some(name) = table.group_of(&owner, id) else {
            out.push(entry);
            continue;
        };

        let key = (name.to_string(), owner);
        match index.get(&key) {
            Some(&pos) => absorb(&mut out[pos], entry),
            None => {
                index.insert(key.clone(), out.len());
                out.push(start_group(key.0, Some(key.1), entry));
            }
        }
    }

    out
}
