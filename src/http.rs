//! HTTP client construction
//!
//! The index and the data host are separate services with separate trust
//! anchors, so each gets its own [`reqwest::Client`]. When a certificate
//! directory is configured, a client trusts exactly `<dir>/<host>.pem` for its
//! endpoint and nothing else.

use crate::config::{ClientConfig, Config, parse_base_url};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// A configured client bound to one endpoint
#[derive(Clone, Debug)]
pub struct Endpoint {
    /// Base URL requests are resolved against
    pub base_url: Url,
    /// Client carrying the user agent and the endpoint's trust anchor
    pub client: reqwest::Client,
}

impl Endpoint {
    /// Build a client for `base_url` using the identity and trust settings in `client_config`
    ///
    /// # Errors
    /// [`Error::Config`] if the URL is unusable, the certificate file is missing
    /// or not valid PEM, or the TLS backend rejects the settings.
    pub fn new(key: &str, base_url: &str, client_config: &ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(key, base_url)?;

        let mut builder = reqwest::Client::builder().user_agent(client_config.user_agent.clone());

        if let Some(timeout) = client_config.request_timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(dir) = &client_config.certificate_dir {
            let host = base_url
                .host_str()
                .ok_or_else(|| Error::config(key, format!("URL '{}' has no host", base_url)))?;
            let certificate = load_certificate(&certificate_path(dir, host))?;
            builder = builder
                .tls_built_in_root_certs(false)
                .add_root_certificate(certificate);
        }

        let client = builder
            .build()
            .map_err(|e| Error::config(key, format!("failed to create HTTP client: {}", e)))?;

        debug!(endpoint = %base_url, pinned = client_config.certificate_dir.is_some(), "HTTP client ready");

        Ok(Self { base_url, client })
    }

    /// Resolve `path` below the base URL
    ///
    /// Archive file names contain slashes, so the path is appended segment by
    /// segment rather than joined (which would drop the base path).
    pub fn url_for(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url
    }
}

/// Index client and data client, built once per process
#[derive(Clone, Debug)]
pub struct HttpClients {
    /// Index query service
    pub index: Endpoint,
    /// Archive data host
    pub data: Endpoint,
}

impl HttpClients {
    /// Build both clients from the full configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            index: Endpoint::new("index_base_url", &config.crawl.index_base_url, &config.client)?,
            data: Endpoint::new("data_base_url", &config.crawl.data_base_url, &config.client)?,
        })
    }
}

/// `<dir>/<host>.pem`
pub fn certificate_path(dir: &Path, host: &str) -> PathBuf {
    dir.join(format!("{}.pem", host))
}

fn load_certificate(path: &Path) -> Result<reqwest::Certificate> {
    let pem = std::fs::read(path).map_err(|e| {
        Error::config(
            "certificate_dir",
            format!("cannot read certificate '{}': {}", path.display(), e),
        )
    })?;
    reqwest::Certificate::from_pem(&pem).map_err(|e| {
        Error::config(
            "certificate_dir",
            format!("invalid PEM certificate '{}': {}", path.display(), e),
        )
    })
}
