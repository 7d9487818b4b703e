//! Run configuration
//!
//! [`ValidatorConfig`] is the validated record every component is built
//! from. It is assembled by [`ValidatorConfigBuilder`] from layers (config
//! file, then environment and flags) and checked once, before any I/O.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Characters stripped by default: the length of the `/Common/` partition
/// prefix that Terraform names carry and device names do not.
pub const DEFAULT_PREFIX_CHARS: usize = 8;

/// Device API call timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(500);

/// Environment variable holding the device password
pub const PASSWORD_ENV: &str = "F5_PASSWORD";

/// Lower-case spelling accepted for compatibility with existing pipelines
pub const PASSWORD_ENV_LEGACY: &str = "f5_password";

/// How a declared resource name maps to the name on the device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameConvention {
    /// Drop a fixed number of leading characters
    StripChars(usize),
    /// Drop a literal prefix, which must be present
    StripPrefix(String),
}

impl Default for NameConvention {
    fn default() -> Self {
        Self::StripChars(DEFAULT_PREFIX_CHARS)
    }
}

impl NameConvention {
    /// Map a declared name to a device name.
    ///
    /// Returns `None` when the name is too short or lacks the prefix, or
    /// when nothing would remain after stripping.
    pub fn resource_name<'a>(&self, declared: &'a str) -> Option<&'a str> {
        let stripped = match self {
            Self::StripChars(count) => declared
                .char_indices()
                .nth(*count)
                .map(|(offset, _)| &declared[offset..]),
            Self::StripPrefix(prefix) => declared.strip_prefix(prefix.as_str()),
        };
        stripped.filter(|name| !name.is_empty())
    }
}

impl fmt::Display for NameConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StripChars(count) => write!(f, "strip the first {count} characters"),
            Self::StripPrefix(prefix) => write!(f, "strip the prefix '{prefix}'"),
        }
    }
}

/// Validated configuration for one run
#[derive(Clone)]
pub struct ValidatorConfig {
    /// Device host name or address, optionally with a scheme
    pub host: String,
    /// Device API user
    pub username: String,
    password: String,
    /// Directory holding one declaration per entry
    pub declarations_dir: PathBuf,
    pub naming: NameConvention,
    /// Timeout for device API calls
    pub timeout: Duration,
    /// Accept invalid TLS certificates from the device
    pub insecure: bool,
}

impl ValidatorConfig {
    pub fn builder() -> ValidatorConfigBuilder {
        ValidatorConfigBuilder::default()
    }

    /// Device password
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for ValidatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("declarations_dir", &self.declarations_dir)
            .field("naming", &self.naming)
            .field("timeout", &self.timeout)
            .field("insecure", &self.insecure)
            .finish()
    }
}

/// One source of configuration values; unset fields defer to other layers.
///
/// This is also the schema of the optional TOML config file. The password
/// is deliberately not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub host: Option<String>,
    pub username: Option<String>,
    pub terraform_dir: Option<PathBuf>,
    pub name_prefix: Option<String>,
    pub name_prefix_len: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub insecure: Option<bool>,
}

impl ConfigLayer {
    /// Parse a layer from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::invalid_config(e.to_string()))
    }

    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::unreadable(path, e))?;
        toml::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("{}: {}", path.display(), e)))
    }

    /// Naming convention selected by this layer, if any
    pub fn naming(&self) -> Result<Option<NameConvention>> {
        match (&self.name_prefix, self.name_prefix_len) {
            (Some(_), Some(_)) => Err(Error::invalid_config(
                "name_prefix and name_prefix_len are mutually exclusive",
            )),
            (Some(prefix), None) => Ok(Some(NameConvention::StripPrefix(prefix.clone()))),
            (None, Some(count)) => Ok(Some(NameConvention::StripChars(count))),
            (None, None) => Ok(None),
        }
    }
}

/// Builder collecting layers into a [`ValidatorConfig`]
#[derive(Default)]
pub struct ValidatorConfigBuilder {
    host: Option<String>,
    username: Option<String>,
    password: Option<String>,
    declarations_dir: Option<PathBuf>,
    naming: Option<NameConvention>,
    timeout: Option<Duration>,
    insecure: Option<bool>,
}

impl ValidatorConfigBuilder {
    /// Apply a layer; its set fields override earlier layers
    pub fn layer(mut self, layer: ConfigLayer) -> Result<Self> {
        if let Some(naming) = layer.naming()? {
            self.naming = Some(naming);
        }
        self.host = layer.host.or(self.host);
        self.username = layer.username.or(self.username);
        self.declarations_dir = layer.terraform_dir.or(self.declarations_dir);
        self.timeout = layer.timeout_secs.map(Duration::from_secs).or(self.timeout);
        self.insecure = layer.insecure.or(self.insecure);
        Ok(self)
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Read the password from the environment, if set
    pub fn password_from_env(mut self) -> Self {
        self.password = std::env::var(PASSWORD_ENV)
            .or_else(|_| std::env::var(PASSWORD_ENV_LEGACY))
            .ok()
            .or(self.password);
        self
    }

    pub fn declarations_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.declarations_dir = Some(dir.into());
        self
    }

    pub fn naming(mut self, naming: NameConvention) -> Self {
        self.naming = Some(naming);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = Some(insecure);
        self
    }

    /// Validate required items in the order host, username, password,
    /// directory and produce the final record.
    pub fn build(self) -> Result<ValidatorConfig> {
        let host = required(self.host, "host")?;
        let username = required(self.username, "username")?;
        let password = required(self.password, "password")?;
        let declarations_dir = self
            .declarations_dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or(Error::MissingConfiguration {
                item: "terraform directory",
            })?;

        let naming = self.naming.unwrap_or_default();
        if matches!(&naming, NameConvention::StripPrefix(prefix) if prefix.is_empty()) {
            return Err(Error::invalid_config("name prefix must not be empty"));
        }

        Ok(ValidatorConfig {
            host,
            username,
            password,
            declarations_dir,
            naming,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            insecure: self.insecure.unwrap_or(false),
        })
    }
}

fn required(value: Option<String>, item: &'static str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(Error::MissingConfiguration { item })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn complete() -> ValidatorConfigBuilder {
        ValidatorConfig::builder()
            .host("bigip.example.net")
            .username("admin")
            .password("secret")
            .declarations_dir("terraform/vips")
    }

    #[rstest]
    #[case(NameConvention::StripChars(8), "/Common/checkout", Some("checkout"))]
    #[case(NameConvention::StripChars(8), "/Common/", None)]
    #[case(NameConvention::StripChars(8), "short", None)]
    #[case(NameConvention::StripChars(0), "checkout", Some("checkout"))]
    #[case(NameConvention::StripPrefix("ltm_vs_".into()), "ltm_vs_checkout", Some("checkout"))]
    #[case(NameConvention::StripPrefix("ltm_vs_".into()), "pool_checkout", None)]
    #[case(NameConvention::StripChars(2), "éécafé", Some("café"))]
    fn test_resource_name(
        #[case] naming: NameConvention,
        #[case] declared: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(naming.resource_name(declared), expected);
    }

    #[test]
    fn test_build_defaults() {
        let config = complete().build().unwrap();
        assert_eq!(config.naming, NameConvention::StripChars(DEFAULT_PREFIX_CHARS));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(!config.insecure);
        assert_eq!(config.password(), "secret");
    }

    #[rstest]
    #[case(ValidatorConfig::builder(), "host")]
    #[case(ValidatorConfig::builder().host("h"), "username")]
    #[case(ValidatorConfig::builder().host("h").username("u"), "password")]
    #[case(ValidatorConfig::builder().host("h").username("u").password("p"), "terraform directory")]
    #[case(ValidatorConfig::builder().host("  ").username("u").password("p"), "host")]
    fn test_build_reports_first_missing_item(
        #[case] builder: ValidatorConfigBuilder,
        #[case] expected: &str,
    ) {
        match builder.build() {
            Err(Error::MissingConfiguration { item }) => assert_eq!(item, expected),
            other => panic!("expected MissingConfiguration, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = complete().build().unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_later_layer_overrides() {
        let file = ConfigLayer::parse(
            r#"
host = "file-host"
username = "file-user"
terraform_dir = "from/file"
timeout_secs = 30
"#,
        )
        .unwrap();
        let flags = ConfigLayer {
            host: Some("flag-host".into()),
            ..Default::default()
        };

        let config = ValidatorConfig::builder()
            .layer(file)
            .unwrap()
            .layer(flags)
            .unwrap()
            .password("p")
            .build()
            .unwrap();

        assert_eq!(config.host, "flag-host");
        assert_eq!(config.username, "file-user");
        assert_eq!(config.declarations_dir, PathBuf::from("from/file"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_layer_rejects_password_key() {
        let result = ConfigLayer::parse("password = \"nope\"\n");
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_layer_rejects_conflicting_naming() {
        let layer = ConfigLayer {
            name_prefix: Some("ltm_vs_".into()),
            name_prefix_len: Some(7),
            ..Default::default()
        };
        assert!(ValidatorConfig::builder().layer(layer).is_err());
    }

    #[test]
    fn test_empty_literal_prefix_is_rejected() {
        let result = complete()
            .naming(NameConvention::StripPrefix(String::new()))
            .build();
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }
}
