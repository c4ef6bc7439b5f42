//! Source scrapers for the movie dataset pipeline.
//!
//! This module contains submodules for scraping the external sources that
//! feed the dataset. Each scraper keeps its network entry point separate
//! from a synchronous parse function, so page-structure assumptions stay in
//! one narrow place and parsing is testable without a server.
//!
//! # Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Wikipedia "{year} in film" | [`box_office`] | HTML table scraping | One request per year in the decade |
//! | Wikipedia Best Picture history | [`oscars`] | HTML table scraping | Single page, fixed table index |
//! | Rotten Tomatoes | [`ratings`] | HTML scraping | One request per title slug |
//!
//! # Failure policy
//!
//! The two Wikipedia extractors are bulk extraction: any network or
//! structural parse failure propagates and aborts the run. Rating lookups
//! degrade to "no rating" per title instead.

pub mod box_office;
pub mod oscars;
pub mod ratings;
