//! Yearly box-office table scraper.
//!
//! Wikipedia's "{year} in film" pages each carry a "highest-grossing films"
//! table whose shape has been stable for the 2010s: 11 rows (header
//! included) by 4 columns. That shape is the only thing identifying the
//! table (it has no id or distinguishing class), so the extractor scans
//! every `<table>` on the page and demands exactly one match. Zero matches
//! or more than one means the page has drifted from the expected structure,
//! and the run aborts rather than guessing which table was meant.

use crate::models::TitleYear;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use std::ops::RangeInclusive;
use tracing::{debug, info, instrument};
use url::Url;

/// Expected table shape: rows including the header row, and columns in the
/// header row. Rechecked against the live pages before changing.
const EXPECTED_ROWS: usize = 11;
const EXPECTED_COLS: usize = 4;

/// Fetch the top-ten box-office table for every year in `years`.
///
/// Issues one request per year against `{wikipedia_base}/wiki/{year}_in_film`
/// and concatenates the parsed rows, each tagged with its source year.
///
/// # Errors
///
/// Any request failure, non-success status, or structural parse failure
/// (see [`parse_top_films`]) aborts the whole extraction.
#[instrument(level = "info", skip(client, wikipedia_base))]
pub async fn fetch_hits(
    client: &reqwest::Client,
    wikipedia_base: &str,
    years: RangeInclusive<i32>,
) -> Result<Vec<TitleYear>, Box<dyn Error>> {
    let base_url = Url::parse(wikipedia_base)?;

    let mut hits = Vec::new();
    for year in years {
        let url = base_url.join(&format!("/wiki/{}_in_film", year))?;
        debug!(%url, "Fetching yearly film page");
        let html = client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let mut rows = parse_top_films(&html, year)?;
        debug!(year, count = rows.len(), "Parsed top-films table");
        hits.append(&mut rows);
    }

    info!(count = hits.len(), "Indexed box-office hits");
    Ok(hits)
}

/// Parse the one table matching the expected shape out of a yearly page.
///
/// The matching table's first row is treated as the header; its cells are
/// lower-cased to locate the `title` column. Every remaining row yields a
/// [`TitleYear`] tagged with `year`.
pub fn parse_top_films(html: &str, year: i32) -> Result<Vec<TitleYear>, Box<dyn Error>> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table")?;
    let row_selector = Selector::parse("tr")?;
    let cell_selector = Selector::parse("th, td")?;

    let mut matches: Vec<Vec<ElementRef>> = Vec::new();
    for table in document.select(&table_selector) {
        let rows: Vec<ElementRef> = table.select(&row_selector).collect();
        if rows.len() != EXPECTED_ROWS {
            continue;
        }
        let header_cols = rows[0].select(&cell_selector).count();
        if header_cols == EXPECTED_COLS {
            matches.push(rows);
        }
    }

    if matches.len() > 1 {
        return Err(format!(
            "{} tables match the {}x{} shape on the {} film page, expected exactly one",
            matches.len(),
            EXPECTED_ROWS,
            EXPECTED_COLS,
            year
        )
        .into());
    }
    let rows = matches.pop().ok_or_else(|| {
        format!(
            "no {}x{} table found on the {} film page",
            EXPECTED_ROWS, EXPECTED_COLS, year
        )
    })?;

    let header: Vec<String> = rows[0]
        .select(&cell_selector)
        .map(|cell| cell_text(&cell).to_lowercase())
        .collect();
    let title_idx = header
        .iter()
        .position(|name| name == "title")
        .ok_or_else(|| format!("no title column in the {} top-films table", year))?;

    let mut out = Vec::new();
    for row in &rows[1..] {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        let title_cell = cells.get(title_idx).ok_or_else(|| {
            format!("row in the {} top-films table is missing the title column", year)
        })?;
        out.push(TitleYear {
            title: cell_text(title_cell),
            year,
        });
    }
    Ok(out)
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

    fn top_films_table(rows: &[(&str, &str)]) -> String {
        let mut html = String::from(
            "<table><tr><th>Rank</th><th>Title</th><th>Distributor</th><th>Gross</th></tr>",
        );
        for (i, (title, gross)) in rows.iter().enumerate() {
            html.push_str(&format!(
                "<tr><td>{}</td><td><i><a href=\"#\">{}</a></i></td><td>Studio</td><td>{}</td></tr>",
                i + 1,
                title,
                gross
            ));
        }
        html.push_str("</table>");
        html
    }

    fn ten_rows() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Jurassic World", "$1.6b"),
            ("Furious 7", "$1.5b"),
            ("Avengers: Age of Ultron", "$1.4b"),
            ("Minions", "$1.1b"),
            ("Spectre", "$880m"),
            ("Inside Out", "$857m"),
            ("Mission: Impossible - Rogue Nation", "$682m"),
            ("The Hunger Games: Mockingjay", "$653m"),
            ("The Martian", "$630m"),
            ("Cinderella", "$542m"),
        ]
    }

    #[test]
    fn test_parse_top_films_drops_header_and_tags_year() {
        let html = format!("<html><body>{}</body></html>", top_films_table(&ten_rows()));
        let rows = parse_top_films(&html, 2015).unwrap();

        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].title, "Jurassic World");
        assert!(rows.iter().all(|r| r.year == 2015));
        assert!(rows.iter().all(|r| r.title != "Title"));
    }

    #[test]
    fn test_parse_ignores_other_shapes() {
        let decoy = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";
        let html = format!(
            "<html><body>{}{}</body></html>",
            decoy,
            top_films_table(&ten_rows())
        );
        let rows = parse_top_films(&html, 2015).unwrap();
        assert_eq!(rows.len(), 10);
    }

    #[test]
    fn test_parse_errors_when_no_table_matches() {
        let html = "<html><body><table><tr><td>x</td></tr></table></body></html>";
        let err = parse_top_films(html, 2015).unwrap_err();
        assert!(err.to_string().contains("no 11x4 table"));
    }

    #[test]
    fn test_parse_errors_when_multiple_tables_match() {
        let table = top_films_table(&ten_rows());
        let html = format!("<html><body>{}{}</body></html>", table, table);
        let err = parse_top_films(&html, 2015).unwrap_err();
        assert!(err.to_string().contains("expected exactly one"));
    }

    #[tokio::test]
    async fn test_fetch_hits_single_year() {
        let mut server = mockito::Server::new_async().await;
        let page = format!("<html><body>{}</body></html>", top_films_table(&ten_rows()));
        let mock = server
            .mock("GET", "/wiki/2015_in_film")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(page)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let hits = fetch_hits(&client, &server.url(), 2015..=2015).await.unwrap();

        assert_eq!(hits.len(), 10);
        assert_eq!(
            hits[0],
            TitleYear {
                title: "Jurassic World".to_string(),
                year: 2015
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_hits_propagates_http_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/wiki/2015_in_film")
            .with_status(500)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let result = fetch_hits(&client, &server.url(), 2015..=2015).await;
        assert!(result.is_err());
    }
}
