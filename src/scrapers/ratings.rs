//! Rotten Tomatoes score lookup.
//!
//! Movie pages live at `/m/{slug}` and carry their Tomatometer and audience
//! score as the leading percentage elements of a known class, in that
//! order. A page that does not exist (or any non-200 response) means "no
//! rating": the aggregator serves 404s for unrecognized slugs and the slug
//! convention is only best-effort, so absence is not an error here.
//! Transport failures are returned to the caller, which decides whether to
//! degrade or abort.

use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, instrument};
use url::Url;

/// Fetch the score list for a title slug.
///
/// # Returns
///
/// - `Ok(Some(scores))`: the page loaded; `scores` holds every percentage
///   found in document order (critic score first, audience score second).
///   Fewer than two entries means the page did not carry a usable pair.
/// - `Ok(None)`: the aggregator answered with a non-200 status.
/// - `Err(_)`: the request itself failed.
#[instrument(level = "debug", skip(client, ratings_base))]
pub async fn lookup(
    client: &reqwest::Client,
    ratings_base: &str,
    slug: &str,
) -> Result<Option<Vec<u8>>, Box<dyn Error>> {
    let url = Url::parse(ratings_base)?.join(&format!("/m/{}", slug))?;
    let response = client.get(url.clone()).send().await?;

    if response.status() != reqwest::StatusCode::OK {
        debug!(%url, status = %response.status(), "No rating page for slug");
        return Ok(None);
    }

    let html = response.text().await?;
    let scores = parse_scores(&html);
    debug!(%url, count = scores.len(), "Parsed rating page");
    Ok(Some(scores))
}

/// Extract percentage values from a movie page, in document order.
///
/// Elements whose text does not parse as an integer percentage are skipped.
pub fn parse_scores(html: &str) -> Vec<u8> {
    let document = Html::parse_document(html);
    let score_selector = Selector::parse("span.mop-ratings-wrap__percentage")
        .expect("static selector must parse");

    document
        .select(&score_selector)
        .filter_map(|element| {
            let text = element.text().collect::<String>();
            text.trim().trim_end_matches('%').parse::<u8>().ok()
        })
        .collect()
}
