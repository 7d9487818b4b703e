//! Declaration parsing and rule extraction for vipcheck
//!
//! Turns one declarative configuration file into the two fields the
//! reconciler needs: the resource name and its ordered iRule list.
//!
//! The pipeline never binds to a schema:
//!
//! ```text
//! source text -> tagged tree (hcl::Value / serde_json::Value)
//!             -> canonical JSON text (sorted keys)
//!             -> serde_json::Value
//!             -> Tokens (document order)
//!             -> extract() -> Declaration
//! ```

pub mod error;
pub mod extract;
pub mod format;
pub mod handlers;
pub mod token;

pub use error::{Error, Result};
pub use extract::{Declaration, extract};
pub use format::{DeclarationFormat, FormatHandler};
pub use handlers::{HclHandler, JsonHandler};
pub use token::{Token, Tokens};

/// Parse `source` in the given format and extract its declaration.
///
/// Convenience wrapper over [`FormatHandler::normalize`] and [`extract`].
pub fn read_declaration(format: DeclarationFormat, source: &str) -> Result<Declaration> {
    let tree = format.handler().normalize(source)?;
    Ok(extract(Tokens::new(&tree)))
}
