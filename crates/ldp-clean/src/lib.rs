//! Cleaning transformations for the library data pipeline.
//!
//! - **dates**: ambiguous date normalization and column standardization
//! - **identifiers**: ISBN formatting strip and column standardization
//! - **dedupe**: keep-first duplicate removal on key columns
//! - **missing**: drop / fill / forward-fill handling of null cells
//!
//! Column operations take a [`ldp_model::Diagnostics`] sink scoped to the
//! current run; per-value failures never abort a batch.

pub mod dates;
pub mod dedupe;
pub mod identifiers;
pub mod missing;

pub use dates::{DateShapeError, normalize_date, reorder_date_text, standardize_dates};
pub use dedupe::remove_duplicates;
pub use identifiers::{standardize_identifiers, strip_identifier_formatting};
pub use missing::{MissingValueStrategy, handle_missing_values};
