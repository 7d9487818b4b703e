//! Name-keyed rule collections
//!
//! Both sides of a comparison are a [`StateMapping`]; the comparison result
//! is a [`Divergence`]. Neither exposes mutators: a mapping is built once,
//! from one source, and then only read.

use std::collections::BTreeMap;

use serde::Serialize;

/// Identifier of a virtual server, unique within one mapping
pub type ResourceName = String;

/// iRules in processing order; duplicates are kept where they occur
pub type RuleSequence = Vec<String>;

/// Mapping from resource name to its ordered iRules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StateMapping {
    entries: BTreeMap<ResourceName, RuleSequence>,
}

impl StateMapping {
    /// Rules for `name`, if present
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resource names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    pub(crate) fn into_entries(self) -> BTreeMap<ResourceName, RuleSequence> {
        self.entries
    }
}

/// Later entries replace earlier ones with the same name.
impl FromIterator<(ResourceName, RuleSequence)> for StateMapping {
    fn from_iter<I: IntoIterator<Item = (ResourceName, RuleSequence)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Resources whose device rules disagree with the declaration.
///
/// Values are always the device-side rules, in device order. Serializes as
/// a plain object: `{"checkout": ["/Common/b", "/Common/a"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Divergence {
    entries: BTreeMap<ResourceName, RuleSequence>,
}

impl Divergence {
    pub(crate) fn record(&mut self, name: ResourceName, actual: RuleSequence) {
        self.entries.insert(name, actual);
    }

    /// Device rules for a divergent resource
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    pub fn into_map(self) -> BTreeMap<ResourceName, RuleSequence> {
        self.entries
    }
}
