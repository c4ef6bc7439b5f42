//! Title-to-slug normalization for rating lookups.
//!
//! The review aggregator addresses movie pages as `/m/{slug}` where the slug
//! is a lowercased, punctuation-stripped, underscore-joined form of the
//! title. The rewrite rules live in one table below so the whole convention
//! can be read (and changed) in one place. Anything not covered by a rule
//! passes through unchanged, so slugs for titles with unusual numerals or
//! non-ASCII characters are best-effort; a slug that misses simply yields no
//! rating downstream.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters the aggregator drops from titles entirely.
static STRIPPED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:.,()'’\u{2013}-]").unwrap());

/// Runs of underscores left behind by adjacent replacements.
static UNDERSCORE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// Build the URL slug for a movie title.
///
/// Applies, in order: lowercasing, `&` -> `and`, removal of
/// `: . , ( ) ' – -`, spaces -> `_`, and collapsing of underscore runs.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(for_title("Fast & Furious 6"), "fast_and_furious_6");
/// assert_eq!(for_title("Spider-Man: Far From Home"), "spiderman_far_from_home");
/// ```
pub fn for_title(title: &str) -> String {
    let lowered = title.to_lowercase().replace('&', "and");
    let stripped = STRIPPED.replace_all(&lowered, "");
    let joined = stripped.trim().replace(' ', "_");
    UNDERSCORE_RUNS.replace_all(&joined, "_").into_owned()
}

/// Build the year-suffixed fallback slug used when the plain slug misses.
///
/// Two different films sharing a title are disambiguated on the aggregator
/// by appending the release year, e.g. `the_lion_king_2019`.
pub fn with_year(slug: &str, year: i32) -> String {
    format!("{}_{}", slug, year)
}
