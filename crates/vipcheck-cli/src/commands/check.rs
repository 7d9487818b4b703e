//! Check command implementation
//!
//! Loads the declared state, fetches the device's virtual servers, and
//! reports every declared virtual server whose iRule order differs.

use colored::Colorize;
use serde_json::json;
use tracing::info;

use vipcheck_bigip::BigIpClient;
use vipcheck_core::{
    DeclarationLoader, Divergence, ValidatorConfig, actual_state, reconcile,
};

use super::{Outcome, file_layer};
use crate::cli::{DeviceArgs, SourceArgs};
use crate::error::Result;

/// Run the check command
pub fn run_check(device: &DeviceArgs, source: &SourceArgs, json: bool) -> Result<Outcome> {
    let config = resolve_config(device, source)?;
    let divergence = compare(&config)?;

    if json {
        let output = json!({
            "in_sync": divergence.is_empty(),
            "divergences": divergence,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&divergence)?;
    }

    Ok(if divergence.is_empty() {
        Outcome::Clean
    } else {
        Outcome::Diverged
    })
}

/// Merge config file, flags, and environment into a validated config.
///
/// Runs before any file or network access.
pub fn resolve_config(device: &DeviceArgs, source: &SourceArgs) -> Result<ValidatorConfig> {
    let config = ValidatorConfig::builder()
        .layer(file_layer(source)?)?
        .layer(source.layer())?
        .layer(device.layer())?
        .password_from_env()
        .build()?;
    Ok(config)
}

/// Load both sides and reconcile them
fn compare(config: &ValidatorConfig) -> Result<Divergence> {
    let declared = DeclarationLoader::from_config(config).load(&config.declarations_dir)?;

    let client = BigIpClient::new(config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let servers = runtime.block_on(client.virtual_servers())?;
    let actual = actual_state(&servers);

    info!(
        declared = declared.len(),
        actual = actual.len(),
        "Reconciling declared state against {}",
        client.base_url()
    );
    Ok(reconcile(actual, declared)?)
}

/// Print human-readable output
fn print_report(divergence: &Divergence) -> Result<()> {
    if divergence.is_empty() {
        println!(
            "{} The device and the Terraform declarations match; no iRules need to change.",
            "OK".green().bold()
        );
        return Ok(());
    }

    println!(
        "{} {} virtual server(s) have iRules that differ from Terraform.",
        "Diverged".red().bold(),
        divergence.len()
    );
    println!("{}", "Device iRule order, per virtual server:".bold());
    println!("{}", serde_json::to_string_pretty(divergence)?);
    Ok(())
}
