//! Data models for scraped movie rows and the final dataset records.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`TitleYear`]: A raw `(title, year)` row produced by the Wikipedia extractors
//! - [`Provenance`]: Which source(s) a title was seen in
//! - [`MovieRecord`]: A finished dataset row, ready for CSV serialization
//!
//! The `Provenance` variants serialize to the exact strings the output format
//! uses (`top_ten_box_office_hit`, `oscar_nomination`, `both`), and the
//! `kind` field is renamed to `type` on the wire so the CSV header reads
//! `title,year,type,critics_score,audience_score`.

use serde::Serialize;

/// A raw extraction row: one movie title attributed to one year.
///
/// Both Wikipedia extractors produce these before any merging or
/// enrichment happens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TitleYear {
    /// The movie title as scraped from the source table.
    pub title: String,
    /// The release (or ceremony-eligibility) year the source attributes.
    pub year: i32,
}

/// Which source(s) produced a given title.
///
/// A title found in both the box-office tables and the nominee table is
/// retagged [`Provenance::Both`] on every one of its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Charted in a yearly top-ten box-office table.
    TopTenBoxOfficeHit,
    /// Listed as an Academy Award Best Picture nominee.
    OscarNomination,
    /// Present in both sources.
    Both,
}

/// A finished dataset row.
///
/// Scores are integer percentages (0-100); `None` means the rating lookup
/// returned fewer than two usable values and serializes as an empty CSV cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MovieRecord {
    /// The movie title.
    pub title: String,
    /// The year the title was attributed to by its source.
    pub year: i32,
    /// Provenance classification, written to the `type` column.
    #[serde(rename = "type")]
    pub kind: Provenance,
    /// Critic score percentage, if found.
    pub critics_score: Option<u8>,
    /// Audience score percentage, if found.
    pub audience_score: Option<u8>,
}
