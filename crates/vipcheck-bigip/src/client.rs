//! HTTP client for the BIG-IP management API

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use vipcheck_core::ValidatorConfig;

use crate::error::{Error, Result};
use crate::types::{VirtualServer, VirtualServerList};

/// Collection endpoint for LTM virtual servers
pub const VIRTUAL_SERVERS_PATH: &str = "/mgmt/tm/ltm/virtual";

/// Client for the iControl REST API, authenticating with HTTP basic auth
pub struct BigIpClient {
    http_client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl BigIpClient {
    /// Create a client for the device named in `config`
    pub fn new(config: &ValidatorConfig) -> Result<Self> {
        Self::with_base_url(
            base_url(&config.host),
            config.username.clone(),
            config.password().to_owned(),
            config.timeout,
            config.insecure,
        )
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
        insecure: bool,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(insecure)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            username: username.into(),
            password: password.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every LTM virtual server with its attached iRules
    ///
    /// Endpoint: GET {base_url}/mgmt/tm/ltm/virtual
    pub async fn virtual_servers(&self) -> Result<Vec<VirtualServer>> {
        let url = format!("{}{}", self.base_url, VIRTUAL_SERVERS_PATH);
        debug!("Fetching virtual servers from {}", url);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Status { status, url, body });
        }

        let list: VirtualServerList = serde_json::from_str(&body)?;
        debug!(count = list.items.len(), "Fetched virtual servers");
        Ok(list.items)
    }
}

/// Base URL for a configured host; bare hosts are addressed over HTTPS
pub fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_owned()
    } else {
        format!("https://{host}")
    }
}
