//! Core types for crawl-sampler

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of the index's line-delimited JSON response
///
/// Offset and length arrive as decimal strings and stay that way until
/// [`IndexRecord::location`] converts them, so a bad value only costs that record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// SURT-form URL key, used to tag every log line about this record
    #[serde(rename = "urlkey")]
    pub url_key: String,

    /// Archive file path on the data host
    #[serde(rename = "filename")]
    pub file_name: String,

    /// Byte offset of the record inside the archive file (decimal text)
    pub offset: String,

    /// Compressed length of the record (decimal text)
    pub length: String,

    /// Capture timestamp (`YYYYMMDDhhmmss`)
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Original URL
    #[serde(default)]
    pub url: Option<String>,

    /// MIME type reported by the server
    #[serde(default)]
    pub mime: Option<String>,

    /// HTTP status of the capture (decimal text)
    #[serde(default)]
    pub status: Option<String>,

    /// Detected content languages, comma-separated ISO-639-3 codes
    #[serde(default)]
    pub languages: Option<String>,

    /// Payload digest
    #[serde(default)]
    pub digest: Option<String>,
}

impl IndexRecord {
    /// Convert the textual offset/length into a [`LocationRecord`]
    ///
    /// # Errors
    /// [`Error::InvalidRecord`] if either field is not a base-10 unsigned integer.
    pub fn location(&self) -> Result<LocationRecord> {
        Ok(LocationRecord {
            url_key: self.url_key.clone(),
            file_name: self.file_name.clone(),
            offset: parse_decimal(&self.url_key, "offset", &self.offset)?,
            length: parse_decimal(&self.url_key, "length", &self.length)?,
        })
    }
}

fn parse_decimal(url_key: &str, field: &str, raw: &str) -> Result<u64> {
    // u64::from_str accepts a leading '+', which the index never emits
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidRecord {
            url_key: url_key.to_string(),
            reason: format!("{} {:?} is not a base-10 integer", field, raw),
        });
    }
    raw.parse::<u64>().map_err(|e| Error::InvalidRecord {
        url_key: url_key.to_string(),
        reason: format!("{} {:?} is out of range: {}", field, raw, e),
    })
}

/// Where a captured page lives inside an archive file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationRecord {
    /// SURT-form URL key
    pub url_key: String,
    /// Archive file path on the data host
    pub file_name: String,
    /// Byte offset of the record
    pub offset: u64,
    /// Byte length of the record
    pub length: u64,
}

impl LocationRecord {
    /// Inclusive byte range `[offset, offset + length - 1]`
    ///
    /// # Errors
    /// [`Error::InvalidRecord`] for a zero length or a range past `u64::MAX`.
    pub fn byte_range(&self) -> Result<ByteRange> {
        ByteRange::from_offset_length(self.offset, self.length).ok_or_else(|| {
            Error::InvalidRecord {
                url_key: self.url_key.clone(),
                reason: format!(
                    "offset {} with length {} does not describe a byte range",
                    self.offset, self.length
                ),
            }
        })
    }
}

/// Inclusive byte range for an HTTP `Range` header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte
    pub start: u64,
    /// Last byte (inclusive)
    pub end: u64,
}

impl ByteRange {
    /// Build a range from an offset and a positive length
    pub fn from_offset_length(offset: u64, length: u64) -> Option<Self> {
        if length == 0 {
            return None;
        }
        let end = offset.checked_add(length - 1)?;
        Some(Self { start: offset, end })
    }

    /// Number of bytes covered
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always false; a range covers at least one byte
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Value for the `Range` request header, e.g. `bytes=100-149`
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Why the pre-filter turned a record down
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "token")]
pub enum SkipReason {
    /// The capture is a robots.txt file
    RobotsFile,
    /// The filename contains a deny-listed language tag
    DeniedLanguage(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::RobotsFile => write!(f, "robots.txt capture"),
            SkipReason::DeniedLanguage(token) => write!(f, "deny-listed language tag {}", token),
        }
    }
}

/// Final verdict for one index record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict")]
pub enum Verdict {
    /// Page fetched and marked as the target language
    Matched,
    /// Page fetched but not confirmed as the target language
    NotMatched,
    /// Rejected by the pre-filter; nothing was downloaded
    Skipped {
        /// Which rule rejected it
        reason: SkipReason,
    },
    /// Range request answered, but no page payload came back
    NotFound,
    /// Hard per-record failure (bad offset/length, transport or container error)
    Failed {
        /// Machine-readable error code
        code: String,
        /// Human-readable message
        message: String,
    },
}

impl Verdict {
    pub(crate) fn failed(error: &Error) -> Self {
        Verdict::Failed {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Verdict for one record, tagged with its URL key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOutcome {
    /// URL key of the index record
    pub url_key: String,
    /// What happened to it
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Tally of one pipeline run, outcomes in index order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Records returned by the index (before the batch cap)
    pub records_received: usize,
    /// Per-record outcomes, in the order the index returned them
    pub outcomes: Vec<PageOutcome>,
}

impl RunSummary {
    /// Pages confirmed as the target language
    pub fn matched(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Matched))
    }

    /// Pages fetched but not confirmed
    pub fn not_matched(&self) -> usize {
        self.count(|v| matches!(v, Verdict::NotMatched))
    }

    /// Records rejected before download
    pub fn skipped(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Skipped { .. }))
    }

    /// Records whose range request produced no page
    pub fn not_found(&self) -> usize {
        self.count(|v| matches!(v, Verdict::NotFound))
    }

    /// Records abandoned on a hard error
    pub fn failed(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Failed { .. }))
    }

    /// URL keys of matching pages, in index order
    pub fn matched_keys(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.verdict == Verdict::Matched)
            .map(|o| o.url_key.as_str())
    }

    fn count(&self, pred: impl Fn(&Verdict) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.verdict)).count()
    }
}
