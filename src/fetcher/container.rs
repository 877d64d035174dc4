//! Streaming WARC decoding
//!
//! The body of a range request is one or more gzip members, each wrapping a
//! WARC record. Records are read one at a time straight off the reader; the
//! scan stops at the first `response` record so nothing past it is pulled
//! from the network.

use super::payload;
use crate::error::{Error, Result};
use flate2::read::MultiGzDecoder;
use std::io::{BufRead, BufReader, Read};
use tracing::trace;
use warc::{WarcHeader, WarcReader};

/// `WARC-Type` of records that capture an HTTP response
pub const RESPONSE_RECORD_TYPE: &str = "response";

/// Decode gzip-compressed WARC bytes and return the entity body of the first response record
///
/// # Errors
/// [`Error::Container`] if the gzip or WARC framing is broken before a response
/// record is found.
pub fn first_response_payload<R: Read>(compressed: R) -> Result<Option<Vec<u8>>> {
    let reader = BufReader::new(MultiGzDecoder::new(compressed));
    Ok(first_response_block(reader)?.map(|block| payload::entity_body(&block)))
}

/// Raw block (HTTP headers + body) of the first `response` record in an uncompressed WARC stream
pub fn first_response_block<R: BufRead>(reader: R) -> Result<Option<Vec<u8>>> {
    let mut warc = WarcReader::new(reader);
    let mut records = warc.stream_records();
    let mut index = 0usize;

    while let Some(item) = records.next_item() {
        let record = item.map_err(|e| Error::Container(format!("record {}: {}", index, e)))?;

        let is_response = record
            .header(WarcHeader::WarcType)
            .map(|value| value == RESPONSE_RECORD_TYPE)
            .unwrap_or(false);

        // Buffering the body is also what advances the stream to the next record
        let buffered = record
            .into_buffered()
            .map_err(|e| Error::Container(format!("record {} body: {}", index, e)))?;

        if is_response {
            trace!(record = index, bytes = buffered.body().len(), "found response record");
            return Ok(Some(buffered.body().to_vec()));
        }

        trace!(record = index, "skipping non-response record");
        index += 1;
    }

    Ok(None)
}
