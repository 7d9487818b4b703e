//! Comparison of declared and actual iRule ordering

use tracing::debug;

use crate::error::{Error, Result};
use crate::state::{Divergence, StateMapping};

/// Compare declared rule lists against the device.
///
/// Only declared names are visited; resources that exist only on the
/// device are ignored. A declared name missing from `actual` aborts the
/// comparison. A resource diverges when its lists differ in length or at
/// any position, and is then recorded with the device's rules.
///
/// Declared names are visited in sorted order, so with several missing
/// resources the error always names the same one.
pub fn reconcile(actual: StateMapping, declared: StateMapping) -> Result<Divergence> {
    let mut actual = actual.into_entries();
    let mut divergence = Divergence::default();

    for (name, declared_rules) in declared.into_entries() {
        let Some(actual_rules) = actual.remove(&name) else {
            return Err(Error::MissingRemoteResource { name });
        };

        if actual_rules.len() != declared_rules.len() {
            debug!(
                resource = %name,
                declared = declared_rules.len(),
                actual = actual_rules.len(),
                "Rule count differs"
            );
            divergence.record(name, actual_rules);
            continue;
        }

        if let Some(index) = declared_rules
            .iter()
            .zip(&actual_rules)
            .position(|(want, have)| want != have)
        {
            debug!(resource = %name, index, "Rule order differs");
            divergence.record(name, actual_rules);
        }
    }

    Ok(divergence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn state(entries: &[(&str, &[&str])]) -> StateMapping {
        entries
            .iter()
            .map(|(name, rules)| {
                (
                    name.to_string(),
                    rules.iter().map(|r| r.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_identical_state_has_no_divergence() {
        let declared = state(&[("vip-1", &["ruleA", "ruleB"])]);
        let actual = state(&[("vip-1", &["ruleA", "ruleB"])]);

        let divergence = reconcile(actual, declared).unwrap();
        assert!(divergence.is_empty());
    }

    #[test]
    fn test_swapped_order_diverges() {
        let declared = state(&[("vip-1", &["ruleA", "ruleB"])]);
        let actual = state(&[("vip-1", &["ruleB", "ruleA"])]);

        let divergence = reconcile(actual, declared).unwrap();
        assert_eq!(
            divergence.into_map(),
            BTreeMap::from([(
                "vip-1".to_string(),
                vec!["ruleB".to_string(), "ruleA".to_string()]
            )])
        );
    }

    #[test]
    fn test_missing_resource_is_fatal() {
        let declared = state(&[("vip-1", &["ruleA"])]);
        let actual = state(&[]);

        match reconcile(actual, declared) {
            Err(Error::MissingRemoteResource { name }) => assert_eq!(name, "vip-1"),
            other => panic!("expected MissingRemoteResource, got {:?}", other),
        }
    }

    #[test]
    fn test_length_mismatch_records_actual() {
        let declared = state(&[("vip-1", &["ruleA"])]);
        let actual = state(&[("vip-1", &["ruleA", "ruleB"])]);

        let divergence = reconcile(actual, declared).unwrap();
        assert_eq!(divergence.get("vip-1").unwrap(), &["ruleA", "ruleB"]);
    }

    #[test]
    fn test_device_only_resources_are_ignored() {
        let declared = state(&[("vip-1", &["ruleA"])]);
        let actual = state(&[("vip-1", &["ruleA"]), ("legacy", &["whatever"])]);

        let divergence = reconcile(actual, declared).unwrap();
        assert!(divergence.is_empty());
    }

    #[test]
    fn test_empty_declared_rules_match_empty_actual() {
        let declared = state(&[("plain", &[])]);
        let actual = state(&[("plain", &[])]);

        assert!(reconcile(actual, declared).unwrap().is_empty());
    }

    #[test]
    fn test_missing_error_is_deterministic() {
        let declared = state(&[("zeta", &[]), ("alpha", &[]), ("mid", &[])]);

        for _ in 0..5 {
            let err = reconcile(StateMapping::default(), declared.clone()).unwrap_err();
            assert!(matches!(err, Error::MissingRemoteResource { ref name } if name == "alpha"));
        }
    }
}
