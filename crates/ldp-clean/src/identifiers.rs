//! Identifier formatting for ISBN-like columns.
//!
//! Normalization here is deliberately decoupled from validation: stripping
//! always succeeds and stores a plain string, whether or not the result
//! would pass the shape check in `ldp-validate`.

use anyhow::{Result, bail};
use polars::prelude::{DataFrame, NamedFrom, Series};

use ldp_ingest::{column_cell, format_numeric};
use ldp_model::{CellValue, Diagnostics};

const STAGE: &str = "standardize_identifiers";

/// Coerce a cell to plain identifier text with all hyphens removed.
///
/// Null becomes an empty string; numbers are formatted without trailing
/// zeros; dates are coerced through their ISO text form first.
pub fn strip_identifier_formatting(value: &CellValue) -> String {
    let text = match value {
        CellValue::Null => String::new(),
        CellValue::Text(s) => s.trim().to_string(),
        CellValue::Number(n) => format_numeric(*n),
        CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
    };
    if !text.contains('-') {
        return text;
    }
    text.chars().filter(|ch| *ch != '-').collect()
}

/// Replace an identifier column with its stripped text form.
///
/// A missing column is an unrecoverable input and fails the operation.
pub fn standardize_identifiers(
    df: &mut DataFrame,
    column: &str,
    diags: &mut Diagnostics,
) -> Result<()> {
    if df.column(column).is_err() {
        bail!("identifier column '{column}' not found");
    }

    let mut values: Vec<Option<String>> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let stripped = strip_identifier_formatting(&column_cell(df, column, idx));
        values.push(if stripped.is_empty() {
            None
        } else {
            Some(stripped)
        });
    }

    df.with_column(Series::new(column.into(), values))?;
    tracing::debug!(column = %column, "identifier formatting stripped");
    diags.info(STAGE, Some(column), "identifier formatting stripped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn strips_hyphens_preserving_digit_order() {
        assert_eq!(
            strip_identifier_formatting(&CellValue::Text("978-01-155-42290-0".into())),
            "97801155422900"
        );
    }

    #[test]
    fn strips_regardless_of_validity() {
        assert_eq!(
            strip_identifier_formatting(&CellValue::Text("978-1".into())),
            "9781"
        );
        assert_eq!(
            strip_identifier_formatting(&CellValue::Text("invalid".into())),
            "invalid"
        );
    }

    #[test]
    fn coerces_non_text_cells() {
        assert_eq!(strip_identifier_formatting(&CellValue::Null), "");
        assert_eq!(
            strip_identifier_formatting(&CellValue::Number(9780252112487.0)),
            "9780252112487"
        );
        let date = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        assert_eq!(
            strip_identifier_formatting(&CellValue::Date(date)),
            "20251101"
        );
    }
}
