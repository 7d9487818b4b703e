//! BIG-IP device access for vipcheck
//!
//! Fetches the virtual servers that form the actual side of a comparison.
//! [`VirtualServer`] implements [`vipcheck_core::RemoteResource`], so a
//! fetched list feeds straight into [`vipcheck_core::actual_state`].

pub mod client;
pub mod error;
pub mod types;

pub use client::{BigIpClient, VIRTUAL_SERVERS_PATH, base_url};
pub use error::{Error, Result};
pub use types::{VirtualServer, VirtualServerList};
