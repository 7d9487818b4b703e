//! Actual state from device records
//!
//! The device is the source of truth for ordering, so rules are copied
//! verbatim: no renaming, filtering, or sorting.

use serde::{Deserialize, Serialize};

use crate::state::StateMapping;

/// A virtual server as reported by the device
pub trait RemoteResource {
    fn name(&self) -> &str;

    /// Attached iRules in the order the device applies them
    fn rules(&self) -> &[String];
}

/// Plain record for callers that already hold device data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<String>,
}

impl RemoteRecord {
    pub fn new(name: impl Into<String>, rules: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }
}

impl RemoteResource for RemoteRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn rules(&self) -> &[String] {
        &self.rules
    }
}

/// Key device records by name
pub fn actual_state<'a, R, I>(records: I) -> StateMapping
where
    R: RemoteResource + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .map(|record| (record.name().to_owned(), record.rules().to_vec()))
        .collect()
}
