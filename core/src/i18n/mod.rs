//! Label resolution through a translation collaborator
//!
//! The engine never owns localized strings. Callers hand in a [`Translator`];
//! this module only knows which keys to ask for and in what fallback order.
//! [`Catalog`] is a minimal key map translator for the CLI and tests.

mod catalog;
mod error;
mod names;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use names::{
    character_label, entry_label, fallback_label, group_label, party_slot_of, player_name,
    skill_label, target_label,
};

/// Resolves the first known key of a fallback chain.
///
/// Mirrors i18next semantics: `{{name}}` placeholders are filled from
/// `params`, and when no key is known the last key is returned verbatim.
pub trait Translator {
    fn translate(&self, keys: &[String], params: &[(&str, String)]) -> String;
}

impl<F> Translator for F
where
    F: Fn(&[String], &[(&str, String)]) -> String,
{
    fn translate(&self, keys: &[String], params: &[(&str, String)]) -> String {
        self(keys, params)
    }
}
