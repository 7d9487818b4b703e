//! Shared test utilities for the vipcheck workspace.
//!
//! Dev-dependency only. Provides temporary declaration directories and
//! canned Terraform sources so crate test suites do not each hand-write
//! HCL.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;

/// HCL source for one `bigip_ltm_virtual_server` resource
pub fn terraform_virtual_server(label: &str, name: &str, irules: &[&str]) -> String {
    let rules = irules
        .iter()
        .map(|r| format!("\"{}\"", r))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"resource "bigip_ltm_virtual_server" "{label}" {{
  name                       = "{name}"
  destination                = "10.10.0.20"
  port                       = 443
  pool                       = "/Common/{label}-pool"
  source_address_translation = "automap"
  irules                     = [{rules}]
}}
"#
    )
}

/// Terraform JSON source for one `bigip_ltm_virtual_server` resource
pub fn terraform_json_virtual_server(label: &str, name: &str, irules: &[&str]) -> String {
    let mut resources = serde_json::Map::new();
    resources.insert(
        label.to_string(),
        json!({
            "name": name,
            "destination": "10.10.0.20",
            "port": 443,
            "irules": irules,
        }),
    );
    let document = json!({"resource": {"bigip_ltm_virtual_server": resources}});
    serde_json::to_string_pretty(&document).unwrap()
}

/// A temporary directory of declaration files
pub struct DeclarationDir {
    temp_dir: TempDir,
}

impl Default for DeclarationDir {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a raw file and return its path.
    pub fn write(&self, file: &str, content: &str) -> PathBuf {
        let path = self.path().join(file);
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("DeclarationDir::write: {}: {}", path.display(), e));
        path
    }

    /// Write `<label>.tf` declaring `/Common/<label>` with the given iRules.
    pub fn virtual_server(&self, label: &str, irules: &[&str]) -> PathBuf {
        let name = format!("/Common/{label}");
        self.write(
            &format!("{label}.tf"),
            &terraform_virtual_server(label, &name, irules),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_server_writes_file() {
        let dir = DeclarationDir::new();
        let path = dir.virtual_server("checkout", &["/Common/a"]);

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("name                       = \"/Common/checkout\""));
        assert!(content.contains("irules                     = [\"/Common/a\"]"));
    }
}
