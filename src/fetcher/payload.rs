//! HTTP entity body extraction from a captured response block
//!
//! A WARC `response` record holds the raw HTTP message as it came off the
//! wire: status line, headers, blank line, body. Only the body is wanted, with
//! transfer and content encodings undone. Anything that cannot be undone is
//! passed through as-is; some archives rewrite the encoding headers after
//! decoding the body themselves.

use flate2::read::{DeflateDecoder, MultiGzDecoder, ZlibDecoder};
use std::io::Read;
use tracing::debug;

/// Split a captured HTTP message into its header block and body
///
/// Returns `None` if no blank line terminates the header block.
pub fn split_http_message(block: &[u8]) -> Option<(&[u8], &[u8])> {
    if let Some(pos) = find(block, b"\r\n\r\n") {
        return Some((&block[..pos], &block[pos + 4..]));
    }
    find(block, b"\n\n").map(|pos| (&block[..pos], &block[pos + 2..]))
}

/// Value of the first header named `name` (case-insensitive) in a raw header block
pub fn header_value(head: &[u8], name: &str) -> Option<String> {
    String::from_utf8_lossy(head)
        .lines()
        .skip(1) // status line
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim().to_string())
}

/// Entity body of a captured HTTP response, decoded
///
/// Without a header terminator the whole block is returned unchanged.
pub fn entity_body(block: &[u8]) -> Vec<u8> {
    let Some((head, body)) = split_http_message(block) else {
        return block.to_vec();
    };

    let mut body = body.to_vec();

    let transfer_encoding = header_value(head, "transfer-encoding").unwrap_or_default();
    if transfer_encoding.to_ascii_lowercase().contains("chunked") {
        match dechunk(&body) {
            Some(decoded) => body = decoded,
            None => debug!("chunked body is malformed, keeping raw bytes"),
        }
    }

    if let Some(encoding) = header_value(head, "content-encoding") {
        match decompress(&body, &encoding.to_ascii_lowercase()) {
            Some(decoded) => body = decoded,
            None => debug!(%encoding, "content encoding not undone, keeping raw bytes"),
        }
    }

    body
}

/// Undo `Transfer-Encoding: chunked`; `None` on malformed framing
pub fn dechunk(mut input: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len());
    loop {
        let line_end = find(input, b"\r\n")?;
        let size_line = std::str::from_utf8(&input[..line_end]).ok()?;
        // chunk extensions follow a ';'
        let size_hex = size_line.split(';').next()?.trim();
        let size = usize::from_str_radix(size_hex, 16).ok()?;
        input = &input[line_end + 2..];

        if size == 0 {
            return Some(out);
        }

        if input.len() < size {
            return None;
        }
        out.extend_from_slice(&input[..size]);
        input = &input[size..];
        input = input.strip_prefix(b"\r\n")?;
    }
}

fn decompress(body: &[u8], encoding: &str) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    match encoding {
        "identity" | "" => return Some(body.to_vec()),
        "gzip" | "x-gzip" => MultiGzDecoder::new(body).read_to_end(&mut out).ok()?,
        // "deflate" is meant to be zlib-wrapped, but raw deflate is common in the wild
        "deflate" => match ZlibDecoder::new(body).read_to_end(&mut out) {
            Ok(n) => n,
            Err(_) => {
                out.clear();
                DeflateDecoder::new(body).read_to_end(&mut out).ok()?
            }
        },
        _ => return None,
    };
    Some(out)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
