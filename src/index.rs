//! Index query client
//!
//! One GET against `<index>/<snapshot>-index?url=<pattern>&output=json`. The
//! body is line-delimited JSON, one capture per line, in the index's own sort
//! order. That order is kept.

use crate::error::Result;
use crate::http::Endpoint;
use crate::types::IndexRecord;
use tracing::{error, info, warn};

/// Client for the crawl's tabular index service
#[derive(Clone, Debug)]
pub struct IndexClient {
    endpoint: Endpoint,
    index_name: String,
}

impl IndexClient {
    /// Create a client for snapshot `index_name` on `endpoint`
    pub fn new(endpoint: Endpoint, index_name: impl Into<String>) -> Self {
        Self {
            endpoint,
            index_name: index_name.into(),
        }
    }

    /// Snapshot this client queries
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Query the index for captures matching `url_pattern`
    ///
    /// A non-success status is logged and yields an empty list; it is not an error.
    ///
    /// # Errors
    /// [`Error::Network`](crate::Error::Network) if the request cannot be sent or the
    /// body cannot be read.
    pub async fn query(&self, url_pattern: &str) -> Result<Vec<IndexRecord>> {
        let url = self.endpoint.url_for(&format!("{}-index", self.index_name));
        info!(%url, url_pattern, "querying crawl index");

        let response = self
            .endpoint
            .client
            .get(url)
            .query(&[("url", url_pattern), ("output", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "failed to fetch index");
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        let records = parse_index_lines(&body);

        info!(count = records.len(), "received {} records from the crawl index", records.len());

        Ok(records)
    }
}

/// Parse a line-delimited JSON index body, keeping line order
///
/// Blank lines are ignored. A line that does not deserialize into an
/// [`IndexRecord`] is logged and dropped; the rest are kept.
pub fn parse_index_lines(body: &str) -> Vec<IndexRecord> {
    body.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(number, line)| match serde_json::from_str::<IndexRecord>(line) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(line = number + 1, error = %e, "skipping malformed index line");
                None
            }
        })
        .collect()
}
