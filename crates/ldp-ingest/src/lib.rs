//! Bronze-layer ingestion for the library data pipeline.
//!
//! Loads raw CSV, JSON and plain-text sources into in-memory tables and
//! writes cleaned tables back out as flat CSV. All tabular data is a polars
//! `DataFrame`; per-value access goes through the `AnyValue` helpers in
//! [`polars_utils`].

pub mod csv_ingest;
pub mod error;
pub mod json_ingest;
pub mod output;
pub mod polars_utils;
pub mod text_ingest;

pub use csv_ingest::{load_csv, load_csv_text};
pub use error::{IngestError, Result};
pub use json_ingest::load_json;
pub use output::write_csv;
pub use polars_utils::{
    any_to_cell, any_to_f64, any_to_string, column_cell, column_text, column_texts,
    format_numeric, parse_f64,
};
pub use text_ingest::load_text;
