//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vipcheck_core::ConfigLayer;

/// vipcheck - Compare Terraform iRule ordering against a BIG-IP device
#[derive(Parser, Debug)]
#[command(name = "vipcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Compare declared iRule order with the device
    ///
    /// Exits 0 when every declared virtual server matches, 1 when some
    /// differ (the device's rule lists are printed), 2 on any error.
    ///
    /// The device password is read from F5_PASSWORD.
    ///
    /// Examples:
    ///   vipcheck check --host 10.1.1.245 --username admin --terraform-dir ./vips
    ///   vipcheck check -c vipcheck.toml --json
    Check {
        #[command(flatten)]
        device: DeviceArgs,

        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON for CI/CD integration
        #[arg(long)]
        json: bool,
    },

    /// Print the declared state extracted from the Terraform files
    Declared {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Where declarations come from and how their names are read
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Directory of Terraform virtual server files
    #[arg(long, alias = "terraformDir", env = "VIPCHECK_TERRAFORM_DIR")]
    pub terraform_dir: Option<PathBuf>,

    /// TOML config file; flags and environment take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Literal prefix stripped from declared names (e.g. "ltm_vs_")
    #[arg(long, conflicts_with = "name_prefix_len")]
    pub name_prefix: Option<String>,

    /// Number of leading characters stripped from declared names [default: 8]
    #[arg(long)]
    pub name_prefix_len: Option<usize>,
}

/// Device connection settings
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceArgs {
    /// Device host name or address
    #[arg(long, alias = "f5Host", env = "F5_HOST")]
    pub host: Option<String>,

    /// Device API user
    #[arg(short, long, env = "F5_USERNAME")]
    pub username: Option<String>,

    /// Timeout for device API calls, in seconds [default: 500]
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Accept an invalid or self-signed device certificate
    #[arg(long)]
    pub insecure: bool,
}

impl SourceArgs {
    /// Flag values as a configuration layer
    pub fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            terraform_dir: self.terraform_dir.clone(),
            name_prefix: self.name_prefix.clone(),
            name_prefix_len: self.name_prefix_len,
            ..Default::default()
        }
    }
}

impl DeviceArgs {
    /// Flag values as a configuration layer
    pub fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            host: self.host.clone(),
            username: self.username.clone(),
            timeout_secs: self.timeout_secs,
            insecure: self.insecure.then_some(true),
            ..Default::default()
        }
    }
}
