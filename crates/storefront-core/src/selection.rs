//! # Selection
//!
//! The shopper's current choice of value per option. May be partial.
//!
//! A `Selection` is a plain value owned by the caller. The resolver never
//! stores one; every transition returns a new selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Option name → chosen value.
///
/// Serializes as a JSON object: `{ "Color": "Red", "Size": "M" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Selection(BTreeMap<String, String>);

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Selection(BTreeMap::new())
    }

    /// Returns the chosen value for an option.
    pub fn get(&self, option_name: &str) -> Option<&str> {
        self.0.get(option_name).map(String::as_str)
    }

    pub fn contains(&self, option_name: &str) -> bool {
        self.0.contains_key(option_name)
    }

    /// Sets one option in place, replacing any previous value.
    pub fn set(&mut self, option_name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(option_name.into(), value.into());
    }

    /// Returns a copy with one option set; `self` is left untouched.
    ///
    /// ```rust
    /// use storefront_core::Selection;
    ///
    /// let before = Selection::new().with("Color", "Red");
    /// let after = before.with("Size", "M");
    /// assert_eq!(before.len(), 1);
    /// assert_eq!(after.get("Color"), Some("Red"));
    /// assert_eq!(after.get("Size"), Some("M"));
    /// ```
    #[must_use]
    pub fn with(&self, option_name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.set(option_name, value);
        next
    }

    /// Removes an option, returning its previous value.
    pub fn remove(&mut self, option_name: &str) -> Option<String> {
        self.0.remove(option_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(option name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Selection
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Selection(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
