//! Format detection and handler trait

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::handlers::{HclHandler, JsonHandler};

/// Supported declaration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationFormat {
    /// HashiCorp configuration language (`*.tf`)
    Hcl,
    /// Terraform JSON syntax (`*.tf.json`)
    Json,
}

impl DeclarationFormat {
    /// Detect format from file extension.
    ///
    /// Only `json` is recognised; every other extension, including none,
    /// is treated as HCL.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Hcl,
        }
    }

    /// Detect format from a file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Hcl, Self::from_extension)
    }

    /// Get the handler for this format
    pub fn handler(&self) -> &'static dyn FormatHandler {
        match self {
            Self::Hcl => &HclHandler,
            Self::Json => &JsonHandler,
        }
    }

    /// Human-readable format name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hcl => "HCL",
            Self::Json => "JSON",
        }
    }
}

/// Trait for format-specific handlers
pub trait FormatHandler: Send + Sync {
    /// Format identifier
    fn format(&self) -> DeclarationFormat;

    /// Parse source into a generic tree and serialize it as canonical JSON
    /// (compact, object keys sorted recursively).
    fn canonicalize(&self, source: &str) -> Result<String>;

    /// Canonicalize and read the result back as a JSON tree
    fn normalize(&self, source: &str) -> Result<Value> {
        let canonical = self.canonicalize(source)?;
        Ok(serde_json::from_str(&canonical)?)
    }
}

/// Recursively sort object keys so that serialization is independent of
/// the source's key order.
pub(crate) fn sort_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted = Map::new();
            let mut keys: Vec<_> = map.keys().collect();
            keys.sort();
            for key in keys {
                if let Some(v) = map.get(key) {
                    sorted.insert(key.clone(), sort_value(v));
                }
            }
            Value::Object(sorted)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        other => other.clone(),
    }
}

/// Serialize a tree in canonical form
pub(crate) fn canonical_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(&sort_value(value))?)
}
