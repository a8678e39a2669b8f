use std::path::Path;

use hashbrown::HashMap;
use serde_json::Value;

use super::{CatalogError, Translator};

/// In-memory translation table keyed by dotted paths (`skills.default.100`).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder form of [`Catalog::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a JSON resource file. Nested objects are flattened into dotted
    /// keys; numbers and booleans are stored as their text.
    pub fn from_json_str(content: &str, path: &Path) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(content).map_err(|source| CatalogError::ParseJson {
            path: path.to_path_buf(),
            source,
        })?;
        let Value::Object(map) = root else {
            return Err(CatalogError::NotAnObject {
                path: path.to_path_buf(),
            });
        };

        let mut catalog = Self::new();
        for (key, value) in map {
            catalog.flatten(key, value);
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content, path)?;
        tracing::debug!(path = %path.display(), entries = catalog.len(), "Loaded translation catalog");
        Ok(catalog)
    }

    fn flatten(&mut self, prefix: String, value: Value) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    self.flatten(format!("{}.{}", prefix, key), child);
                }
            }
            Value::String(s) => self.insert(prefix, s),
            Value::Null | Value::Array(_) => {}
            other => self.insert(prefix, other.to_string()),
        }
    }
}

fn interpolate(template: &str, params: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (name, value) in params {
        out = out.replace(&format!("{{{{{}}}}}", name), value);
    }
    out
}

impl Translator for Catalog {
    fn translate(&self, keys: &[String], params: &[(&str, String)]) -> String {
        keys.iter()
            .find_map(|key| self.get(key))
            .map(|template| interpolate(template, params))
            .or_else(|| keys.last().cloned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn first_known_key_wins() {
        let catalog = Catalog::new()
            .with("skills.default.link-attack", "Link Attack")
            .with("skills.Pl0100.link-attack", "Djeeta Link");

        let label = catalog.translate(
            &keys(&["skills.Pl0100.link-attack", "skills.default.link-attack"]),
            &[],
        );
        assert_eq!(label, "Djeeta Link");
    }

    #[test]
    fn missing_keys_return_last_key() {
        let catalog = Catalog::new();
        assert_eq!(catalog.translate(&keys(&["a.b", "c.d"]), &[]), "c.d");
        assert_eq!(catalog.translate(&[], &[]), "");
    }

    #[test]
    fn params_are_interpolated() {
        let catalog = Catalog::new().with("skills.default.unknown-skill", "Unknown Skill ({{id}})");
        let label = catalog.translate(
            &keys(&["skills.default.unknown-skill"]),
            &[("id", "113".to_string())],
        );
        assert_eq!(label, "Unknown Skill (113)");
    }

    #[test]
    fn nested_json_is_flattened() {
        let json = r#"{"skills": {"default": {"100": "Slash", "hits": 3}}, "ui": {"unknown": "???"}}"#;
        let catalog = Catalog::from_json_str(json, Path::new("en.json")).unwrap();
        assert_eq!(catalog.get("skills.default.100"), Some("Slash"));
        assert_eq!(catalog.get("skills.default.hits"), Some("3"));
        assert_eq!(catalog.get("ui.unknown"), Some("???"));
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = Catalog::from_json_str("[1, 2]", Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, CatalogError::NotAnObject { .. }));
    }
}
