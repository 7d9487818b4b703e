//! Declared command implementation
//!
//! Prints what the loader extracted from the Terraform files, without
//! contacting the device.

use vipcheck_core::{DeclarationLoader, Error};

use super::{Outcome, file_layer};
use crate::cli::SourceArgs;
use crate::error::Result;

/// Run the declared command
pub fn run_declared(source: &SourceArgs) -> Result<Outcome> {
    let file = file_layer(source)?;
    let flags = source.layer();

    let naming = match flags.naming()? {
        Some(naming) => naming,
        None => file.naming()?.unwrap_or_default(),
    };
    let dir = flags
        .terraform_dir
        .or(file.terraform_dir)
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or(Error::MissingConfiguration {
            item: "terraform directory",
        })?;

    let declared = DeclarationLoader::new(naming).load(&dir)?;
    println!("{}", serde_json::to_string_pretty(&declared)?);

    Ok(Outcome::Clean)
}
