//! Range fetcher and archive extractor
//!
//! Downloads the byte range of one captured page from the archive data host and
//! pulls the page out of the WARC container as the bytes stream in. Every
//! unsuccessful outcome short of a transport or decoding failure is reported as
//! `Ok(None)`; nothing is retried.

pub mod container;
pub mod payload;


use crate::error::{Error, Result};
use crate::http::Endpoint;
use crate::types::{ByteRange, LocationRecord};
use futures::TryStreamExt;
use reqwest::StatusCode;
use reqwest::header::RANGE;
use tokio_util::io::{StreamReader, SyncIoBridge};
use tracing::{debug, error, info};

/// Fetches single pages out of archive files by byte range
#[derive(Clone, Debug)]
pub struct RangeFetcher {
    endpoint: Endpoint,
}

impl RangeFetcher {
    /// Create a fetcher bound to the archive data host
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// Fetch the page a location record points at
    ///
    /// # Returns
    /// * `Ok(Some(bytes))` - entity body of the first `response` record
    /// * `Ok(None)` - non-success status, no 206, or no response record in the range
    ///
    /// # Errors
    /// * [`Error::InvalidRecord`] - the offset/length pair is not a valid range
    /// * [`Error::Network`] - the request could not be sent
    /// * [`Error::Container`] - the body is not well-formed gzip/WARC
    pub async fn fetch(&self, location: &LocationRecord) -> Result<Option<Vec<u8>>> {
        let range = location.byte_range()?;
        self.fetch_range(&location.url_key, &location.file_name, range)
            .await
    }

    /// Fetch `range` of `file_name`, tagging log lines with `url_key`
    pub async fn fetch_range(
        &self,
        url_key: &str,
        file_name: &str,
        range: ByteRange,
    ) -> Result<Option<Vec<u8>>> {
        let url = self.endpoint.url_for(file_name);
        info!(url_key, %url, %range, "downloading archive range");

        let response = self
            .endpoint
            .client
            .get(url)
            .header(RANGE, range.header_value())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(url_key, status = status.as_u16(), "failed to fetch data");
            return Ok(None);
        }

        if status != StatusCode::PARTIAL_CONTENT {
            info!(
                url_key,
                status = status.as_u16(),
                "range request not honoured, no valid WARC record found"
            );
            return Ok(None);
        }

        match first_response_from_body(response).await? {
            Some(page) => {
                debug!(url_key, bytes = page.len(), "extracted page from WARC response record");
                Ok(Some(page))
            }
            None => {
                info!(url_key, "no valid WARC record found in the given records");
                Ok(None)
            }
        }
    }
}

/// Decode the streamed body on a blocking thread, stopping at the first response record
async fn first_response_from_body(response: reqwest::Response) -> Result<Option<Vec<u8>>> {
    let stream = Box::pin(response.bytes_stream().map_err(std::io::Error::other));
    let reader = SyncIoBridge::new(StreamReader::new(stream));

    tokio::task::spawn_blocking(move || container::first_response_payload(reader))
        .await
        .map_err(|e| Error::Container(format!("decoder task failed: {}", e)))?
}
