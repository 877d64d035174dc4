//! # crawl-sampler
//!
//! Samples pages from a public web-crawl archive and reports which of them
//! declare a target language.
//!
//! ## How a run works
//!
//! 1. Query the crawl's index service for captures matching a URL pattern
//! 2. Drop captures whose archive path looks like a robots file or names a
//!    language tag that cannot be the target (the deny-list)
//! 3. Fetch each remaining capture with a single HTTP range request and pull
//!    the first `response` record out of the compressed WARC bytes
//! 4. Look for `<meta name="language" content="...">` and compare it with the
//!    target code
//!
//! Non-success HTTP statuses never abort a run; they show up as per-record
//! outcomes in the [`RunSummary`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use crawl_sampler::{Config, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.crawl.url_pattern = "*.at".to_string();
//!     config.pipeline.batch_size = 50;
//!
//!     let summary = Pipeline::new(config)?.run().await?;
//!     println!("{} of {} pages matched", summary.matched(), summary.outcomes.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Meta-tag language classification
pub mod classifier;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Byte-range fetching and WARC extraction
pub mod fetcher;
/// HTTP clients and certificate pinning
pub mod http;
/// Crawl index queries
pub mod index;
/// End-to-end sampling runs
pub mod pipeline;
/// Robots-file and language-tag pre-filter
pub mod prefilter;
/// Core record and outcome types
pub mod types;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use classifier::{LanguageClassifier, LanguageHint};
pub use config::{ClientConfig, Config, CrawlConfig, LanguageConfig, PipelineConfig};
pub use error::{Error, Result};
pub use fetcher::RangeFetcher;
pub use index::IndexClient;
pub use pipeline::Pipeline;
pub use prefilter::{DenyList, LanguageRegistry, PreFilter};
pub use types::{
    ByteRange, IndexRecord, LocationRecord, PageOutcome, RunSummary, SkipReason, Verdict,
};
