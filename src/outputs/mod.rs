//! Output generation for the finished dataset.
//!
//! # Submodules
//!
//! - [`csv`]: Serializes [`crate::models::MovieRecord`] rows to the
//!   comma-separated output file
//!
//! The output file is fully overwritten on every run; there is no append
//! or merge behavior.

pub mod csv;
