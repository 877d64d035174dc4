//! Configuration types for crawl-sampler

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Which crawl snapshot to query and where its services live
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Index snapshot identifier (default: "CC-MAIN-2026-04")
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// URL pattern passed to the index as the `url` query parameter (default: "*.de")
    ///
    /// Not validated locally; the index service interprets it.
    #[serde(default = "default_url_pattern")]
    pub url_pattern: String,

    /// Base URL of the index service (default: "https://index.commoncrawl.org")
    #[serde(default = "default_index_base_url")]
    pub index_base_url: String,

    /// Base URL of the archive data host (default: "https://data.commoncrawl.org")
    #[serde(default = "default_data_base_url")]
    pub data_base_url: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            index_name: default_index_name(),
            url_pattern: default_url_pattern(),
            index_base_url: default_index_base_url(),
            data_base_url: default_data_base_url(),
        }
    }
}

/// HTTP client identity and trust settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Directory holding one `<host>.pem` trust anchor per endpoint (default: "./.certificates")
    ///
    /// When set, each endpoint is verified only against its own certificate file.
    /// `None` falls back to the platform trust store.
    #[serde(default = "default_certificate_dir")]
    pub certificate_dir: Option<PathBuf>,

    /// Overall request timeout (None = whatever the HTTP transport does)
    #[serde(default, with = "optional_duration_serde")]
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            certificate_dir: default_certificate_dir(),
            request_timeout: None,
        }
    }
}

/// Target language and the registry the deny-list is derived from
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Exact `content` value that marks a page as being in the target language (default: "de")
    #[serde(default = "default_language_code")]
    pub code: String,

    /// Registry description fragment naming the target language (default: "German")
    ///
    /// Registry entries whose description contains this text never end up in the deny-list.
    #[serde(default = "default_language_name")]
    pub name: String,

    /// Value of the `name` attribute on the language `<meta>` element (default: "language")
    #[serde(default = "default_meta_name")]
    pub meta_name: String,

    /// Shortest registry tag admitted to the deny-list (default: 5)
    ///
    /// Shorter tags never enter the deny-list, whatever their description.
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,

    /// Replacement registry file (`description<TAB>tag` per line); None uses the built-in table
    #[serde(default)]
    pub registry_path: Option<PathBuf>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            code: default_language_code(),
            name: default_language_name(),
            meta_name: default_meta_name(),
            min_token_len: default_min_token_len(),
            registry_path: None,
        }
    }
}

/// Batch sizing for a single run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of index records processed per run (default: 20)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Records fetched at the same time (default: 1, i.e. strictly sequential)
    ///
    /// Outcomes are always reported in index order regardless of this value.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            concurrency: default_concurrency(),
        }
    }
}

/// Main configuration for [`Pipeline`](crate::pipeline::Pipeline)
///
/// Every field has a default, so `Config::default()` reproduces the stock
/// "sample twenty German pages from `*.de`" run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Crawl snapshot and endpoints
    #[serde(default)]
    pub crawl: CrawlConfig,

    /// HTTP identity and TLS trust
    #[serde(default)]
    pub client: ClientConfig,

    /// Target language
    #[serde(default)]
    pub language: LanguageConfig,

    /// Batch sizing
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Check that the configuration is usable before any client is built
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("index_name", &self.crawl.index_name)?;
        require_non_empty("url_pattern", &self.crawl.url_pattern)?;
        require_non_empty("user_agent", &self.client.user_agent)?;
        require_non_empty("language.code", &self.language.code)?;
        require_non_empty("language.meta_name", &self.language.meta_name)?;

        parse_base_url("index_base_url", &self.crawl.index_base_url)?;
        parse_base_url("data_base_url", &self.crawl.data_base_url)?;

        if self.pipeline.batch_size == 0 {
            return Err(Error::config("batch_size", "batch_size must be at least 1"));
        }
        if self.pipeline.concurrency == 0 {
            return Err(Error::config(
                "concurrency",
                "concurrency must be at least 1",
            ));
        }

        Ok(())
    }

    /// Index query endpoint, e.g. `https://index.commoncrawl.org/CC-MAIN-2026-04-index`
    pub fn index_endpoint(&self) -> String {
        format!(
            "{}/{}-index",
            self.crawl.index_base_url.trim_end_matches('/'),
            self.crawl.index_name
        )
    }
}

fn require_non_empty(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::config(key, format!("{} must not be empty", key)));
    }
    Ok(())
}

/// Parse a base URL and make sure it names a host
pub(crate) fn parse_base_url(key: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| Error::config(key, format!("invalid URL '{}': {}", raw, e)))?;
    if url.host_str().is_none() {
        return Err(Error::config(key, format!("URL '{}' has no host", raw)));
    }
    Ok(url)
}

fn default_index_name() -> String {
    "CC-MAIN-2026-04".to_string()
}

fn default_url_pattern() -> String {
    "*.de".to_string()
}

fn default_index_base_url() -> String {
    "https://index.commoncrawl.org".to_string()
}

fn default_data_base_url() -> String {
    "https://data.commoncrawl.org".to_string()
}

fn default_user_agent() -> String {
    "cc-get-started/1.0 (Example data retrieval script; yourname@example.com)".to_string()
}

fn default_certificate_dir() -> Option<PathBuf> {
    Some(PathBuf::from(".certificates"))
}

fn default_language_code() -> String {
    "de".to_string()
}

fn default_language_name() -> String {
    "German".to_string()
}

fn default_meta_name() -> String {
    "language".to_string()
}

fn default_min_token_len() -> usize {
    5
}

fn default_batch_size() -> usize {
    20
}

fn default_concurrency() -> usize {
    1
}

// Optional Duration serialization helper (whole seconds)
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
