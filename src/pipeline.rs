//! Pipeline orchestration: merge, classify, deduplicate, enrich.
//!
//! [`build_movie_table`] runs the full extract-transform sequence:
//!
//! 1. Extract box-office hits and Best Picture nominees from Wikipedia
//! 2. Tag provenance; titles present in both sources become `both`
//! 3. Drop fully identical rows
//! 4. Enrich every remaining row with Rotten Tomatoes scores, retrying
//!    once with a year-suffixed slug before settling for "no rating"
//!
//! Extraction failures abort the run; per-title rating failures degrade to
//! absent scores. Lookups run through an ordered bounded-concurrency
//! stream, so output order follows extraction order regardless of which
//! request answers first.

use crate::models::{MovieRecord, Provenance, TitleYear};
use crate::scrapers::{box_office, oscars, ratings};
use crate::slug;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use std::collections::HashSet;
use std::error::Error;
use std::ops::RangeInclusive;
use tracing::{debug, info, instrument, warn};

/// In-flight rating lookups. The aggregator tolerates this comfortably and
/// it keeps a hung response from stalling every other title.
const RATING_CONCURRENCY: usize = 8;

/// Where the pipeline scrapes from.
///
/// The bases are swappable so tests can point the pipeline at a local
/// server; production runs use [`SourceConfig::default`].
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL of the Wikipedia instance.
    pub wikipedia_base: String,
    /// Base URL of the review aggregator.
    pub ratings_base: String,
    /// The decade of interest.
    pub years: RangeInclusive<i32>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            wikipedia_base: "https://en.wikipedia.org".to_string(),
            ratings_base: "https://www.rottentomatoes.com".to_string(),
            years: 2010..=2019,
        }
    }
}

/// Run the whole pipeline and return the finished table.
///
/// # Errors
///
/// Propagates any extraction failure (network error, non-success status,
/// unexpected page structure) from the Wikipedia scrapers.
#[instrument(level = "info", skip_all)]
pub async fn build_movie_table(
    client: &reqwest::Client,
    sources: &SourceConfig,
) -> Result<Vec<MovieRecord>, Box<dyn Error>> {
    let hits = box_office::fetch_hits(client, &sources.wikipedia_base, sources.years.clone()).await?;
    let nominees = oscars::fetch_nominees(client, &sources.wikipedia_base, &sources.years).await?;
    info!(
        box_office = hits.len(),
        nominees = nominees.len(),
        "Extraction complete"
    );

    let merged = merge_and_classify(hits, nominees);
    info!(count = merged.len(), "Merged and deduplicated");

    let movies: Vec<MovieRecord> = stream::iter(merged)
        .map(|(row, kind)| {
            let client = client.clone();
            let ratings_base = sources.ratings_base.clone();
            async move {
                let (critics_score, audience_score) =
                    fetch_scores(&client, &ratings_base, &row).await;
                MovieRecord {
                    title: row.title,
                    year: row.year,
                    kind,
                    critics_score,
                    audience_score,
                }
            }
        })
        .buffered(RATING_CONCURRENCY)
        .collect()
        .await;

    let rated = movies.iter().filter(|m| m.critics_score.is_some()).count();
    info!(
        total = movies.len(),
        rated,
        unrated = movies.len() - rated,
        "Enrichment complete"
    );
    Ok(movies)
}

/// Union both source sets, classify provenance, and drop identical rows.
///
/// A title appearing in both sources is tagged [`Provenance::Both`] on every
/// one of its rows; the single-source tags only survive for titles seen in
/// exactly one source. Classification is by title, so a `both` title listed
/// under different years keeps one row per year.
pub fn merge_and_classify(
    hits: Vec<TitleYear>,
    nominees: Vec<TitleYear>,
) -> Vec<(TitleYear, Provenance)> {
    let hit_titles: HashSet<String> = hits.iter().map(|r| r.title.clone()).collect();
    let nominee_titles: HashSet<String> = nominees.iter().map(|r| r.title.clone()).collect();

    let classify = |row: &TitleYear, single: Provenance| {
        if hit_titles.contains(&row.title) && nominee_titles.contains(&row.title) {
            Provenance::Both
        } else {
            single
        }
    };

    hits.iter()
        .map(|row| (row.clone(), classify(row, Provenance::TopTenBoxOfficeHit)))
        .chain(
            nominees
                .iter()
                .map(|row| (row.clone(), classify(row, Provenance::OscarNomination))),
        )
        .unique()
        .collect()
}

/// Look up the score pair for one row, with the year-suffixed fallback.
///
/// Fewer than two values from the plain slug triggers one retry against
/// `{slug}_{year}`; fewer than two values after that means no usable
/// rating. Transport errors are logged and treated the same as absence.
async fn fetch_scores(
    client: &reqwest::Client,
    ratings_base: &str,
    row: &TitleYear,
) -> (Option<u8>, Option<u8>) {
    let plain = slug::for_title(&row.title);
    let mut scores = lookup_or_warn(client, ratings_base, &plain).await;

    if scores.len() < 2 {
        let suffixed = slug::with_year(&plain, row.year);
        debug!(slug = %suffixed, title = %row.title, "Retrying rating lookup with year suffix");
        let retry = lookup_or_warn(client, ratings_base, &suffixed).await;
        if !retry.is_empty() {
            scores = retry;
        }
    }

    if scores.len() < 2 {
        (None, None)
    } else {
        (Some(scores[0]), Some(scores[1]))
    }
}

/// One lookup attempt, degrading every failure mode to "no values".
async fn lookup_or_warn(client: &reqwest::Client, ratings_base: &str, slug: &str) -> Vec<u8> {
    match ratings::lookup(client, ratings_base, slug).await {
        Ok(Some(scores)) => scores,
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(error = %e, %slug, "Rating lookup failed; continuing without scores");
            Vec::new()
        }
    }
}
