//! Scan configuration
//!
//! Supplied per scan; nothing here is global. JSON shape:
//!
//! ```json
//! { "ariaPairs": { ".js-menu-target": ["aria-expanded", "aria-haspopup"] },
//!   "hookClassPrefix": "js-" }
//! ```
//!
//! Object key order in `ariaPairs` is the order rules are evaluated in.

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;
use crate::locator::DEFAULT_HOOK_PREFIX;

/// Selector and the attributes every match must carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AriaPair {
    pub selector: String,
    pub required: Vec<String>,
}

/// Ordered selector -> required attributes table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AriaPairs {
    pairs: Vec<AriaPair>,
}

impl AriaPairs {
    /// Pairs for the common `js-` widget hooks
    pub const RECOMMENDED: &'static [(&'static str, &'static [&'static str])] = &[
        (".js-menu-target", &["aria-expanded", "aria-haspopup"]),
        (".js-details-target", &["aria-expanded"]),
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// The `RECOMMENDED` table as an owned value
    pub fn recommended() -> Self {
        Self::RECOMMENDED
            .iter()
            .map(|(selector, required)| (*selector, required.to_vec()))
            .collect()
    }

    /// Add a pair. An existing selector keeps its position and takes the new list.
    pub fn insert(&mut self, selector: impl Into<String>, required: Vec<String>) {
        let selector = selector.into();
        if let Some(pair) = self.pairs.iter_mut().find(|p| p.selector == selector) {
            pair.required = required;
            return;
        }
        self.pairs.push(AriaPair { selector, required });
    }

    /// Append every pair of `other`, overriding shared selectors
    pub fn extend(&mut self, other: AriaPairs) {
        for pair in other.pairs {
            self.insert(pair.selector, pair.required);
        }
    }

    pub fn get(&self, selector: &str) -> Option<&[String]> {
        self.pairs
            .iter()
            .find(|p| p.selector == selector)
            .map(|p| p.required.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AriaPair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> IntoIterator for &'a AriaPairs {
    type Item = &'a AriaPair;
    type IntoIter = std::slice::Iter<'a, AriaPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl<S, A> FromIterator<(S, Vec<A>)> for AriaPairs
where
    S: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, Vec<A>)>>(iter: I) -> Self {
        let mut pairs = AriaPairs::new();
        for (selector, required) in iter {
            pairs.insert(selector, required.into_iter().map(Into::into).collect());
        }
        pairs
    }
}

impl Serialize for AriaPairs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for pair in &self.pairs {
            map.serialize_entry(&pair.selector, &pair.required)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AriaPairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AriaPairsVisitor)
    }
}

struct AriaPairsVisitor;

impl<'de> Visitor<'de> for AriaPairsVisitor {
    type Value = AriaPairs;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of selector to attribute names")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<AriaPairs, M::Error> {
        let mut pairs = AriaPairs::new();
        while let Some((selector, required)) = access.next_entry::<String, Vec<String>>()? {
            pairs.insert(selector, required);
        }
        Ok(pairs)
    }
}

/// Per-scan configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Attribute-pair rules, evaluated in order after the built-in rules
    pub aria_pairs: AriaPairs,
    /// Classes with this prefix appear in locator paths
    pub hook_class_prefix: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            aria_pairs: AriaPairs::new(),
            hook_class_prefix: DEFAULT_HOOK_PREFIX.to_string(),
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aria_pairs(mut self, aria_pairs: AriaPairs) -> Self {
        self.aria_pairs = aria_pairs;
        self
    }

    pub fn with_hook_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.hook_class_prefix = prefix.into();
        self
    }

    /// Parse from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            aria_pairs = config.aria_pairs.len(),
            "Loaded scan config"
        );
        Ok(config)
    }
}
