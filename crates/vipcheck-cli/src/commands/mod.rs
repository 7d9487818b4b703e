//! Command implementations for vipcheck-cli

pub mod check;
pub mod declared;

pub use check::run_check;
pub use declared::run_declared;

use vipcheck_core::ConfigLayer;

use crate::cli::SourceArgs;
use crate::error::Result;

/// Outcome of a command that completed without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Declarations and device agree, or nothing to compare
    Clean,
    /// At least one virtual server differs
    Diverged,
}

/// Config file layer named by `--config`, or an empty layer
fn file_layer(source: &SourceArgs) -> Result<ConfigLayer> {
    match &source.config {
        Some(path) => Ok(ConfigLayer::load(path)?),
        None => Ok(ConfigLayer::default()),
    }
}
