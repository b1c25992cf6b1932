//! Record validation for the library data pipeline.
//!
//! Currently one check: the ISBN-13 shape validation applied to catalogue
//! identifiers.

pub mod isbn;

pub use isbn::{flag_valid_identifiers, is_valid_identifier, is_valid_isbn13_shape};
