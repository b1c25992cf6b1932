//! ISBN-13 shape validation.
//!
//! A shape check only: hyphens are non-significant, the remainder must be
//! exactly 13 decimal digits. The weighted check-digit verification of the
//! real ISBN-13 standard is intentionally not performed; existing callers
//! and cleaned outputs rely on the looser verdict.

use anyhow::{Result, bail};
use polars::prelude::{DataFrame, NamedFrom, Series};

use ldp_ingest::column_cell;
use ldp_model::CellValue;

/// Check whether a string has valid ISBN-13 shape.
pub fn is_valid_isbn13_shape(raw: &str) -> bool {
    let digits: String = raw.chars().filter(|ch| *ch != '-').collect();
    digits.len() == 13 && digits.chars().all(|ch| ch.is_ascii_digit())
}

/// Check whether a cell holds a structurally valid identifier.
///
/// Null, empty text, and non-text cells are invalid.
pub fn is_valid_identifier(value: &CellValue) -> bool {
    match value {
        CellValue::Text(s) if !s.is_empty() => is_valid_isbn13_shape(s),
        _ => false,
    }
}

/// Append a boolean column flagging valid identifiers per row.
///
/// Returns the number of invalid values. A missing source column is an
/// unrecoverable input.
pub fn flag_valid_identifiers(
    df: &mut DataFrame,
    column: &str,
    flag_column: &str,
) -> Result<usize> {
    if df.column(column).is_err() {
        bail!("identifier column '{column}' not found");
    }

    let mut flags = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        flags.push(is_valid_identifier(&column_cell(df, column, idx)));
    }
    let invalid = flags.iter().filter(|valid| !**valid).count();

    df.with_column(Series::new(flag_column.into(), flags))?;
    tracing::debug!(column = %column, invalid, "flagged identifier validity");
    Ok(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn valid_and_invalid_shapes() {
        assert!(is_valid_identifier(&text("978-0-123456-78-9")));
        assert!(is_valid_identifier(&text("9780123456789")));
        assert!(!is_valid_identifier(&text("invalid")));
        assert!(!is_valid_identifier(&text("123")));
        assert!(!is_valid_identifier(&text("")));
        assert!(!is_valid_identifier(&CellValue::Null));
    }

    #[test]
    fn hyphens_do_not_count_toward_length() {
        // 13 characters including hyphens but only 11 digits
        assert!(!is_valid_isbn13_shape("978-0-12345-6"));
        // any number of hyphens in any position is fine
        assert!(is_valid_isbn13_shape("-9-7-8-0-1-2-3-4-5-6-7-8-9-"));
    }

    #[test]
    fn non_digits_fail_even_at_13_chars() {
        assert!(!is_valid_isbn13_shape("978012345678X"));
        assert!(!is_valid_isbn13_shape("97801234567 9"));
    }

    #[test]
    fn no_checksum_is_applied() {
        // both check digits accepted: shape only
        assert!(is_valid_isbn13_shape("9780306406157"));
        assert!(is_valid_isbn13_shape("9780306406158"));
    }

    #[test]
    fn non_text_cells_are_invalid() {
        assert!(!is_valid_identifier(&CellValue::Number(9780123456789.0)));
    }
}
