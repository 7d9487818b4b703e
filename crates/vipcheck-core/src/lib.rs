//! Declared-versus-actual iRule reconciliation
//!
//! This crate holds the comparison core of vipcheck:
//!
//! - **Data model**: [`StateMapping`] for each side, [`Divergence`] for the result
//! - **Declared state**: [`DeclarationLoader`] reads a directory of declarations
//! - **Actual state**: [`actual_state`] keys device records by name
//! - **Reconciliation**: [`reconcile`] reports resources whose rule order differs
//! - **Configuration**: [`ValidatorConfig`], validated before any I/O
//!
//! # Architecture
//!
//! ```text
//!   declarations dir           device records
//!         |                          |
//!  DeclarationLoader           actual_state()
//!         |                          |
//!   StateMapping (declared)   StateMapping (actual)
//!          \                        /
//!               reconcile()
//!                   |
//!               Divergence
//! ```
//!
//! Nothing here terminates the process; every failure is returned as an
//! [`Error`] for the caller to report.

pub mod config;
pub mod error;
pub mod loader;
pub mod reconcile;
pub mod remote;
pub mod state;

pub use config::{ConfigLayer, NameConvention, ValidatorConfig, ValidatorConfigBuilder};
pub use error::{Error, Result};
pub use loader::{DeclarationLoader, declaration_files};
pub use reconcile::reconcile;
pub use remote::{RemoteRecord, RemoteResource, actual_state};
pub use state::{Divergence, ResourceName, RuleSequence, StateMapping};
