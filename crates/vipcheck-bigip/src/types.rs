//! iControl REST payloads

use serde::{Deserialize, Serialize};
use vipcheck_core::RemoteResource;

/// A virtual server from `GET /mgmt/tm/ltm/virtual`.
///
/// Only the fields reconciliation needs are decoded; everything else in
/// the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualServer {
    /// Name without partition, e.g. `checkout`
    pub name: String,
    pub partition: Option<String>,
    /// Partition-qualified name, e.g. `/Common/checkout`
    pub full_path: Option<String>,
    /// Attached iRules in execution order; absent when none are attached
    #[serde(default)]
    pub rules: Vec<String>,
}

impl RemoteResource for VirtualServer {
    fn name(&self) -> &str {
        &self.name
    }

    fn rules(&self) -> &[String] {
        &self.rules
    }
}

/// Collection envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VirtualServerList {
    #[serde(default)]
    pub items: Vec<VirtualServer>,
}
