//! Sampling pipeline
//!
//! Index query → pre-filter → range fetch → classify, one record at a time in
//! index order. With `concurrency > 1` several records are in flight at once,
//! but outcomes are still collected in index order.
//!
//! # Example
//!
//! ```no_run
//! use crawl_sampler::{Config, Pipeline};
//!
//! # async fn example() -> crawl_sampler::Result<()> {
//! let pipeline = Pipeline::new(Config::default())?;
//! let summary = pipeline.run().await?;
//! for key in summary.matched_keys() {
//!     println!("{key}");
//! }
//! # Ok(())
//! # }
//! ```

use crate::classifier::LanguageClassifier;
use crate::config::Config;
use crate::error::Result;
use crate::fetcher::RangeFetcher;
use crate::http::HttpClients;
use crate::index::IndexClient;
use crate::prefilter::{DenyList, PreFilter};
use crate::types::{IndexRecord, PageOutcome, RunSummary, Verdict};
use futures::StreamExt;
use tracing::{debug, error, info};

/// Everything one run needs, built once at startup
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    index: IndexClient,
    prefilter: PreFilter,
    fetcher: RangeFetcher,
    classifier: LanguageClassifier,
}

impl Pipeline {
    /// Validate `config` and build clients, deny-list and classifier
    ///
    /// # Errors
    /// Any misconfiguration: invalid values, missing certificate files, an
    /// unreadable registry file.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let clients = HttpClients::from_config(&config)?;
        let deny_list = DenyList::from_config(&config.language)?;
        let classifier = LanguageClassifier::new(&config.language.code, &config.language.meta_name)?;

        Ok(Self {
            index: IndexClient::new(clients.index, &config.crawl.index_name),
            prefilter: PreFilter::new(deny_list),
            fetcher: RangeFetcher::new(clients.data),
            classifier,
            config,
        })
    }

    /// Replace the pre-filter, e.g. with a hand-picked deny-list
    pub fn with_prefilter(mut self, prefilter: PreFilter) -> Self {
        self.prefilter = prefilter;
        self
    }

    /// Configuration this pipeline was built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Query the index and process the first `batch_size` records
    ///
    /// Per-record failures never abort the run; they show up as
    /// [`Verdict::Failed`] or [`Verdict::NotFound`] outcomes.
    ///
    /// # Errors
    /// Only a transport failure on the index query itself.
    pub async fn run(&self) -> Result<RunSummary> {
        let records = self.index.query(&self.config.crawl.url_pattern).await?;
        let records_received = records.len();

        let batch = &records[..records.len().min(self.config.pipeline.batch_size)];
        let outcomes: Vec<PageOutcome> = futures::stream::iter(batch.iter().map(|r| self.process(r)))
            .buffered(self.config.pipeline.concurrency)
            .collect()
            .await;

        let summary = RunSummary {
            records_received,
            outcomes,
        };

        info!(
            received = summary.records_received,
            processed = summary.outcomes.len(),
            matched = summary.matched(),
            not_matched = summary.not_matched(),
            skipped = summary.skipped(),
            not_found = summary.not_found(),
            failed = summary.failed(),
            "sampling run complete"
        );

        Ok(summary)
    }

    /// Take one index record through pre-filter, fetch and classification
    pub async fn process(&self, record: &IndexRecord) -> PageOutcome {
        PageOutcome {
            url_key: record.url_key.clone(),
            verdict: self.verdict(record).await,
        }
    }

    async fn verdict(&self, record: &IndexRecord) -> Verdict {
        let url_key = record.url_key.as_str();

        let location = match record.location() {
            Ok(location) => location,
            Err(e) => {
                error!(url_key, error = %e, "abandoning index record");
                return Verdict::failed(&e);
            }
        };

        if let Some(reason) = self.prefilter.rejection(&location.file_name) {
            debug!(url_key, %reason, "skipping download");
            return Verdict::Skipped { reason };
        }

        let page = match self.fetcher.fetch(&location).await {
            Ok(Some(page)) => page,
            Ok(None) => return Verdict::NotFound,
            Err(e) => {
                error!(url_key, error = %e, code = e.code(), "fetch failed");
                return Verdict::failed(&e);
            }
        };

        if self.classifier.classify(&page, url_key) {
            info!(url_key, language = self.classifier.target(), "page is marked as target language");
            Verdict::Matched
        } else {
            Verdict::NotMatched
        }
    }
}
