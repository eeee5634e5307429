//! Shared utilities for DICOM metadata crates.
//!
//! This crate provides the Polars helpers used across the workspace to read
//! row identifiers and cell values as text.

pub mod polars;

pub use polars::{any_to_optional_string, column_strings};
