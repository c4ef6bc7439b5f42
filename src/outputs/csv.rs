//! CSV output for the movie dataset.
//!
//! Serializes the final table with the header
//! `title,year,type,critics_score,audience_score`. Absent scores become
//! empty cells and titles containing commas are quoted by the writer.

use crate::models::MovieRecord;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Column order, used to emit a header even for an empty table.
const HEADER: [&str; 5] = ["title", "year", "type", "critics_score", "audience_score"];

/// Serialize records to CSV text, header row included.
pub fn to_csv(records: &[MovieRecord]) -> Result<String, Box<dyn Error>> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    if records.is_empty() {
        // The writer only emits the header alongside the first record.
        wtr.write_record(HEADER)?;
    }
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

/// Serialize `records` and overwrite the file at `path`.
#[instrument(level = "info", skip(records), fields(rows = records.len()))]
pub async fn write_table(records: &[MovieRecord], path: &str) -> Result<(), Box<dyn Error>> {
    let text = to_csv(records)?;
    fs::write(path, text).await?;
    info!(path, "Wrote movie dataset");
    Ok(())
}
