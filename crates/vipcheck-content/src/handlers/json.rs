//! Terraform JSON syntax handler

use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::{DeclarationFormat, FormatHandler, canonical_json};

/// Handler for `*.tf.json` declarations
#[derive(Debug, Default)]
pub struct JsonHandler;

impl JsonHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for JsonHandler {
    fn format(&self) -> DeclarationFormat {
        DeclarationFormat::Json
    }

    fn canonicalize(&self, source: &str) -> Result<String> {
        let value: Value =
            serde_json::from_str(source).map_err(|e| Error::parse("JSON", e.to_string()))?;
        canonical_json(&value)
    }
}
