//! One sampling run against the live crawl archive
//!
//! Usage: cargo run --release --example sample_run [path/to/config.json]
//!
//! Without a config file the defaults apply: 20 captures matching `*.de` from
//! the default snapshot, certificates pinned from `.certificates/`. Log level
//! comes from `RUST_LOG` (default `info`).

use crawl_sampler::{Config, Pipeline, Verdict};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str::<Config>(&std::fs::read_to_string(path)?)?,
        None => Config::default(),
    };

    println!("═══════════════════════════════════════════════════════════");
    println!("  crawl-sampler");
    println!("═══════════════════════════════════════════════════════════");
    println!("  Index:    {}", config.index_endpoint());
    println!("  Pattern:  {}", config.crawl.url_pattern);
    println!("  Language: {} ({})", config.language.name, config.language.code);
    println!("  Batch:    {}", config.pipeline.batch_size);
    println!("═══════════════════════════════════════════════════════════");

    let pipeline = Pipeline::new(config)?;
    let summary = pipeline.run().await?;

    for outcome in &summary.outcomes {
        let label = match &outcome.verdict {
            Verdict::Matched => "match".to_string(),
            Verdict::NotMatched => "no match".to_string(),
            Verdict::Skipped { reason } => format!("skipped ({})", reason),
            Verdict::NotFound => "not found".to_string(),
            Verdict::Failed { code, message } => format!("failed [{}] {}", code, message),
        };
        println!("  {:<50} {}", outcome.url_key, label);
    }

    println!("───────────────────────────────────────────────────────────");
    println!("  Received:    {}", summary.records_received);
    println!("  Processed:   {}", summary.outcomes.len());
    println!("  Matched:     {}", summary.matched());
    println!("  Not matched: {}", summary.not_matched());
    println!("  Skipped:     {}", summary.skipped());
    println!("  Not found:   {}", summary.not_found());
    println!("  Failed:      {}", summary.failed());

    Ok(())
}
