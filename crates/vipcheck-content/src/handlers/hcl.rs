//! HCL handler for Terraform `*.tf` files

use crate::error::{Error, Result};
use crate::format::{DeclarationFormat, FormatHandler, canonical_json};

/// Handler for HCL declarations.
///
/// Blocks become nested objects keyed by block type and labels, so
/// `resource "bigip_ltm_virtual_server" "web" { ... }` reads as
/// `{"resource": {"bigip_ltm_virtual_server": {"web": {...}}}}`.
/// Non-literal expressions are kept as `${...}` strings.
#[derive(Debug, Default)]
pub struct HclHandler;

impl HclHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for HclHandler {
    fn format(&self) -> DeclarationFormat {
        DeclarationFormat::Hcl
    }

    fn canonicalize(&self, source: &str) -> Result<String> {
        let value: hcl::Value =
            hcl::from_str(source).map_err(|e| Error::parse("HCL", e.to_string()))?;
        let tree = serde_json::to_value(&value)?;
        canonical_json(&tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VIRTUAL_SERVER: &str = r#"
resource "bigip_ltm_virtual_server" "checkout" {
  name        = "/Common/checkout"
  destination = "10.0.0.10"
  port        = 443
  irules      = ["/Common/redirect", "/Common/headers"]
}
"#;

    #[test]
    fn test_hcl_normalize_blocks_to_objects() {
        let handler = HclHandler::new();
        let tree = handler.normalize(VIRTUAL_SERVER).unwrap();

        let vs = &tree["resource"]["bigip_ltm_virtual_server"]["checkout"];
        assert_eq!(vs["name"], json!("/Common/checkout"));
        assert_eq!(vs["irules"], json!(["/Common/redirect", "/Common/headers"]));
        assert_eq!(vs["port"], json!(443));
    }

    #[test]
    fn test_hcl_canonical_form_sorts_keys() {
        let handler = HclHandler::new();
        let reordered = r#"
resource "bigip_ltm_virtual_server" "checkout" {
  irules      = ["/Common/redirect", "/Common/headers"]
  port        = 443
  destination = "10.0.0.10"
  name        = "/Common/checkout"
}
"#;
        assert_eq!(
            handler.canonicalize(VIRTUAL_SERVER).unwrap(),
            handler.canonicalize(reordered).unwrap()
        );
    }

    #[test]
    fn test_hcl_parse_error() {
        let handler = HclHandler::new();
        let err = handler.canonicalize("resource \"x\" {\n  name = \n").unwrap_err();
        assert!(matches!(err, Error::ParseError { ref format, .. } if format == "HCL"));
    }
}
