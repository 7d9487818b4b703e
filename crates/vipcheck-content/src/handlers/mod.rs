//! Format handlers

mod hcl;
mod json;

pub use self::hcl::HclHandler;
pub use self::json::JsonHandler;
