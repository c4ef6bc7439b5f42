//! Academy Award Best Picture nominee scraper.
//!
//! The award-history page lists every ceremony in per-decade tables. The
//! 2010s block is addressed by a hard-coded offset into the page's table
//! list ([`NOMINEE_TABLE_INDEX`]); there is no id or caption stable enough
//! to select on, so an edit that adds or removes a table anywhere above the
//! block silently shifts the index. The constant lives here, next to the
//! parse, so it can be corrected without touching the merge logic.
//!
//! Within the table, ceremony years appear as their own rows interleaved
//! with nominee rows. A row is a year header when the first four characters
//! of its leading cell parse as a year inside the target decade; nominee
//! rows inherit the most recently seen year (forward-fill).

use crate::models::TitleYear;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use std::ops::RangeInclusive;
use tracing::{debug, info, instrument};
use url::Url;

/// Position of the 2010s block in the page's `<table>` list.
const NOMINEE_TABLE_INDEX: usize = 11;

/// Fetch and parse the Best Picture nominees for the target decade.
///
/// Issues a single request against
/// `{wikipedia_base}/wiki/Academy_Award_for_Best_Picture`.
///
/// # Errors
///
/// Fails on any request error, on a missing table at the expected index,
/// and when no nominee rows could be resolved; in every case the page no
/// longer matches the expected structure.
#[instrument(level = "info", skip(client, wikipedia_base))]
pub async fn fetch_nominees(
    client: &reqwest::Client,
    wikipedia_base: &str,
    years: &RangeInclusive<i32>,
) -> Result<Vec<TitleYear>, Box<dyn Error>> {
    let url = Url::parse(wikipedia_base)?.join("/wiki/Academy_Award_for_Best_Picture")?;
    debug!(%url, "Fetching award history page");
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let nominees = parse_nominees(&html, years)?;
    if nominees.is_empty() {
        return Err("award history table yielded no nominee rows".into());
    }

    info!(count = nominees.len(), "Indexed Best Picture nominees");
    Ok(nominees)
}

/// Parse nominee rows out of the decade table at [`NOMINEE_TABLE_INDEX`].
///
/// Year-header rows update the carried year and are never emitted; rows
/// seen before the first year header have no year to inherit and are
/// discarded.
pub fn parse_nominees(
    html: &str,
    years: &RangeInclusive<i32>,
) -> Result<Vec<TitleYear>, Box<dyn Error>> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table")?;
    let row_selector = Selector::parse("tr")?;
    let cell_selector = Selector::parse("th, td")?;

    let table = document
        .select(&table_selector)
        .nth(NOMINEE_TABLE_INDEX)
        .ok_or_else(|| {
            format!(
                "award history page has no table at index {}",
                NOMINEE_TABLE_INDEX
            )
        })?;

    let mut carried_year: Option<i32> = None;
    let mut discarded = 0usize;
    let mut nominees = Vec::new();

    for row in table.select(&row_selector) {
        let Some(first_cell) = row.select(&cell_selector).next() else {
            continue;
        };
        let text = cell_text(&first_cell);
        if text.is_empty() {
            continue;
        }

        if let Some(year) = leading_year(&text, years) {
            carried_year = Some(year);
            continue;
        }

        match carried_year {
            Some(year) => nominees.push(TitleYear { title: text, year }),
            None => discarded += 1,
        }
    }

    if discarded > 0 {
        debug!(discarded, "Dropped rows preceding the first year header");
    }
    Ok(nominees)
}

/// Year encoded in the first four characters of a header cell, if any.
///
/// Header cells read like `2015 (88th)`; anything whose leading four
/// characters parse to a year inside the decade is a header.
fn leading_year(text: &str, years: &RangeInclusive<i32>) -> Option<i32> {
    let prefix: String = text.chars().take(4).collect();
    let year = prefix.parse::<i32>().ok()?;
    years.contains(&year).then_some(year)
}

/// Concatenated, whitespace-normalized text of a table cell.
fn cell_text(cell: &ElementRef) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECADE: RangeInclusive<i32> = 2010..=2019;

    /// An award-history page with `NOMINEE_TABLE_INDEX` filler tables ahead
    /// of the decade table, mirroring the live page layout.
    fn award_page(decade_rows: &[&str]) -> String {
        let mut html = String::from("<html><body>");
        for _ in 0..NOMINEE_TABLE_INDEX {
            html.push_str("<table><tr><td>filler</td></tr></table>");
        }
        html.push_str("<table>");
        for row in decade_rows {
            html.push_str(&format!(
                "<tr><td>{}</td><td>Producers</td><td></td></tr>",
                row
            ));
        }
        html.push_str("</table></body></html>");
        html
    }

    #[test]
    fn test_forward_fill_assigns_nearest_preceding_year() {
        let html = award_page(&[
            "2014 (87th)",
            "Birdman",
            "Boyhood",
            "2015 (88th)",
            "Spotlight",
        ]);
        let nominees = parse_nominees(&html, &DECADE).unwrap();

        assert_eq!(
            nominees,
            vec![
                TitleYear { title: "Birdman".to_string(), year: 2014 },
                TitleYear { title: "Boyhood".to_string(), year: 2014 },
                TitleYear { title: "Spotlight".to_string(), year: 2015 },
            ]
        );
    }

    #[test]
    fn test_year_headers_are_never_emitted() {
        let html = award_page(&["2015 (88th)", "Spotlight"]);
        let nominees = parse_nominees(&html, &DECADE).unwrap();
        assert!(nominees.iter().all(|n| !n.title.starts_with("2015")));
    }

    #[test]
    fn test_rows_before_first_header_are_discarded() {
        let html = award_page(&["The Artist", "2015 (88th)", "Spotlight"]);
        let nominees = parse_nominees(&html, &DECADE).unwrap();
        assert_eq!(nominees.len(), 1);
        assert_eq!(nominees[0].title, "Spotlight");
    }

    #[test]
    fn test_out_of_decade_header_is_not_a_header() {
        // A 2009 header is outside the decade, so the row neither updates
        // the carried year nor gets emitted with one.
        let html = award_page(&["2009 (82nd)", "Avatar", "2015 (88th)", "Spotlight"]);
        let nominees = parse_nominees(&html, &DECADE).unwrap();
        assert_eq!(nominees.len(), 1);
        assert_eq!(nominees[0].title, "Spotlight");
        assert_eq!(nominees[0].year, 2015);
    }

    #[test]
    fn test_missing_table_index_is_an_error() {
        let html = "<html><body><table><tr><td>only one</td></tr></table></body></html>";
        assert!(parse_nominees(html, &DECADE).is_err());
    }

    #[tokio::test]
    async fn test_fetch_nominees() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/wiki/Academy_Award_for_Best_Picture")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(award_page(&["2015 (88th)", "Spotlight", "The Big Short"]))
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let nominees = fetch_nominees(&client, &server.url(), &DECADE).await.unwrap();

        assert_eq!(nominees.len(), 2);
        assert_eq!(nominees[0].title, "Spotlight");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_nominees_empty_table_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/wiki/Academy_Award_for_Best_Picture")
            .with_status(200)
            .with_body(award_page(&["no headers here"]))
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let result = fetch_nominees(&client, &server.url(), &DECADE).await;
        assert!(result.is_err());
    }
}
