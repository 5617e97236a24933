use serde::{Deserialize, Serialize};

/// Equivalence rules applied to both documents before they are compared.
///
/// The transforms compose in a fixed order: key removal first, then array
/// sorting, then key sorting, so that removed keys can never influence the
/// sort position of what remains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiffOptions {
    /// Normalize object key ordering away. Objects already compare by key
    /// membership, so this only affects the textual representation.
    pub ignore_key_order: bool,

    /// Sort arrays into a canonical order so that two arrays holding the
    /// same multiset of elements compare equal.
    pub ignore_array_order: bool,

    /// Key names pruned from both documents, at every nesting depth.
    pub ignore_keys: Vec<String>,

    /// Alphabetically reorder object keys in the output.
    pub sort_keys: bool,
}

impl DiffOptions {
    pub(crate) fn sorts_object_keys(&self) -> bool {
        self.sort_keys || self.ignore_key_order
    }

    /// True when normalization would be the identity transform.
    pub fn is_noop(&self) -> bool {
        !self.ignore_key_order
            && !self.ignore_array_order
            && !self.sort_keys
            && self.ignore_keys.is_empty()
    }
}
