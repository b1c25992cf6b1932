//! Shared data model for the library data pipeline.
//!
//! - **value**: the `CellValue` tagged union used for per-value cleaning
//! - **diag**: the run-scoped diagnostics sink passed into column operations

pub mod diag;
pub mod value;

pub use diag::{Diagnostic, Diagnostics, Severity};
pub use value::CellValue;
