//! Helpers for validating the output destination before any work starts.
//!
//! The run is a one-shot batch job with roughly a dozen network round
//! trips before the first byte of output, so both checks here run up
//! front: the extension contract, and a probe write to catch an
//! unwritable destination early instead of after the scrape.

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Reject output paths that do not end in `.csv`.
///
/// The dataset is only ever written as CSV; accepting another extension
/// would just mislabel the file.
pub fn ensure_csv_path(path: &str) -> Result<(), Box<dyn Error>> {
    if path.ends_with(".csv") {
        Ok(())
    } else {
        Err(format!("output file must end in .csv, got '{}'", path).into())
    }
}

/// Ensure the output file's directory exists and is writable.
///
/// Creates the directory if needed, then performs a write test by
/// creating and immediately deleting a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_parent(path: &str) -> Result<(), Box<dyn Error>> {
    let parent = match Path::new(path).parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };

    if let Err(e) = fs::create_dir_all(&parent).await {
        return Err(Box::new(e));
    }
    let probe_path = parent.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
