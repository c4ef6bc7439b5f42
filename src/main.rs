//! # Movie Dataset
//!
//! A one-shot ETL pipeline that scrapes movie metadata from public web
//! sources and writes a flat CSV dataset:
//!
//! - Top-ten box-office tables from Wikipedia's yearly "{year} in film"
//!   pages (one request per year of the 2010s)
//! - Academy Award Best Picture nominees from the award-history page
//! - Rotten Tomatoes critic and audience scores, looked up per title
//!
//! ## Usage
//!
//! ```sh
//! movie_dataset               # writes movies_2010s.csv
//! movie_dataset out/2010s.csv
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Extraction**: Scrape `(title, year)` rows from both Wikipedia sources
//! 2. **Merge**: Union, classify provenance, deduplicate
//! 3. **Enrichment**: Look up scores per title (bounded concurrency,
//!    one year-suffixed retry per miss)
//! 4. **Output**: Serialize the final table to the CSV file
//!
//! Extraction failures abort the run; per-title rating misses degrade to
//! empty score cells.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod slug;
mod utils;

use cli::Cli;
use pipeline::SourceConfig;
use utils::{ensure_csv_path, ensure_writable_parent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("movie_dataset starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.output, "Parsed CLI arguments");

    // Early checks: both run before the first network call.
    if let Err(e) = ensure_csv_path(&args.output) {
        error!(path = %args.output, error = %e, "Refusing output path");
        return Err(e);
    }
    if let Err(e) = ensure_writable_parent(&args.output).await {
        error!(
            path = %args.output,
            error = %e,
            "Output destination is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = reqwest::Client::builder()
        .user_agent(concat!("movie_dataset/", env!("CARGO_PKG_VERSION")))
        .build()?;

    // ---- Run the pipeline ----
    let sources = SourceConfig::default();
    info!(
        wikipedia = %sources.wikipedia_base,
        ratings = %sources.ratings_base,
        years = ?sources.years,
        "Starting extraction"
    );
    let movies = pipeline::build_movie_table(&client, &sources).await?;
    info!(count = movies.len(), "Movie table built");

    // ---- Write output ----
    outputs::csv::write_table(&movies, &args.output).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        rows = movies.len(),
        "Execution complete"
    );

    Ok(())
}
