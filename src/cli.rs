//! Command-line interface definition.
//!
//! The surface is deliberately tiny: zero or one positional argument
//! naming the output file. Everything else about a run is fixed.

use clap::Parser;

/// Command-line arguments for the movie dataset builder.
///
/// # Examples
///
/// ```sh
/// # Write to the default movies_2010s.csv
/// movie_dataset
///
/// # Write somewhere else
/// movie_dataset /data/movies.csv
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output CSV file path (must end in .csv)
    #[arg(default_value = "movies_2010s.csv")]
    pub output: String,
}
