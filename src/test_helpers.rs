//! Shared fixtures for unit tests: WARC builders and mock-server configs.

use crate::config::Config;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

/// One uncompressed WARC record with the mandatory headers
pub(crate) fn warc_record(warc_type: &str, id: u32, block: &[u8]) -> Vec<u8> {
    let mut out = format!(
        "WARC/1.0\r\n\
         WARC-Type: {}\r\n\
         WARC-Record-ID: <urn:uuid:00000000-0000-0000-0000-{:012}>\r\n\
         WARC-Date: 2026-01-15T12:00:00Z\r\n\
         WARC-Target-URI: https://example.de/\r\n\
         Content-Type: application/http; msgtype={}\r\n\
         Content-Length: {}\r\n\r\n",
        warc_type,
        id,
        warc_type,
        block.len()
    )
    .into_bytes();
    out.extend_from_slice(block);
    out.extend_from_slice(b"\r\n\r\n");
    out
}

/// One gzip member per record, the way crawl archives store them
pub(crate) fn gzip_members(records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    for record in records {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(record).unwrap();
        out.extend(encoder.finish().unwrap());
    }
    out
}

/// Captured HTTP/1.1 200 response carrying `body` as HTML
pub(crate) fn http_response(body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    )
    .into_bytes()
}

/// HTML page with an optional `<meta name="language">` element
pub(crate) fn html_page(language_meta: Option<&str>) -> String {
    let meta = language_meta.unwrap_or("");
    format!(
        "<!DOCTYPE html><html><head><title>Seite</title>{}</head><body><p>Hallo Welt</p></body></html>",
        meta
    )
}

/// Gzipped request + response + metadata triple around `page`
pub(crate) fn archived_page(page: &str) -> Vec<u8> {
    gzip_members(&[
        warc_record("request", 1, b"GET / HTTP/1.1\r\nHost: example.de\r\n\r\n"),
        warc_record("response", 2, &http_response(page)),
        warc_record("metadata", 3, b"fetchTimeMs: 87\r\n"),
    ])
}

/// Config pointing both endpoints at `base` with no certificate pinning
pub(crate) fn mock_config(base: &str) -> Config {
    let mut config = Config::default();
    config.crawl.index_base_url = base.to_string();
    config.crawl.data_base_url = base.to_string();
    config.client.certificate_dir = None;
    config
}
