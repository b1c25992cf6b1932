//! Date normalization for ambiguously formatted source dates.
//!
//! Raw library exports carry dates in several separator and field-order
//! conventions (`2025-11-01`, `01/11/2025`, `11_25_2025`). Normalization
//! infers the most likely original field order and re-emits the value in
//! canonical Year-Month-Day order with one preferred separator; a generic
//! calendar parse then turns the canonical text into a real date.
//!
//! # Disambiguation rules
//!
//! - A 4-digit first part is a year: the value is already year-first and
//!   only its separators are rewritten. A second part that is not a valid
//!   month is left uncorrected.
//! - A 1-2 digit first part with a second part <= 12 is read as
//!   Day-Month-Year; with a second part > 12 as Month-Day-Year. Both are
//!   re-emitted year-first.
//! - Anything else is not decomposable; separators are rewritten, order is
//!   left alone.
//!
//! Components are not zero-padded or range-checked here; a misclassified
//! month 13 simply fails the calendar parse downstream and becomes null.

use anyhow::Result;
use chrono::NaiveDate;
use polars::prelude::{DataFrame, NamedFrom, Series};
use thiserror::Error;

use ldp_ingest::column_texts;
use ldp_model::{CellValue, Diagnostics};

/// Separator scan order; the first one present in the value wins.
const SEPARATOR_PRIORITY: [char; 3] = ['-', '_', '/'];

const STAGE: &str = "standardize_dates";

/// Errors from decomposing a separated date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateShapeError {
    /// The value has a separator but does not split into exactly three parts.
    #[error("malformed date shape: expected 3 separated parts, got {parts}")]
    MalformedShape { parts: usize },
}

/// Normalize one date value into canonical Year-Month-Day text.
///
/// Total over its input: non-text cells pass through unchanged, as does
/// text with no recognized separator or with a malformed part count.
pub fn normalize_date(value: &CellValue, preferred_sep: char) -> CellValue {
    match value {
        CellValue::Text(raw) => match reorder_date_text(raw, preferred_sep) {
            Ok(Some(normalized)) => CellValue::Text(normalized),
            Ok(None) | Err(_) => value.clone(),
        },
        _ => value.clone(),
    }
}

/// Reorder a separated date string into year-first form with the preferred
/// separator.
///
/// Returns `Ok(None)` when the text carries none of the recognized
/// separators and cannot be decomposed. Returns [`DateShapeError`] when a
/// separator is present but the part count is not exactly three.
pub fn reorder_date_text(
    raw: &str,
    preferred_sep: char,
) -> std::result::Result<Option<String>, DateShapeError> {
    let Some(sep) = active_separator(raw) else {
        return Ok(None);
    };

    let parts: Vec<&str> = raw.split(sep).collect();
    if parts.len() != 3 {
        return Err(DateShapeError::MalformedShape { parts: parts.len() });
    }

    let reseparated = || raw.replace(sep, &preferred_sep.to_string());

    if is_year_part(parts[0]) {
        // Already year-first. A second part that is not a readable month is
        // left in place rather than guessed at.
        return Ok(Some(reseparated()));
    }

    if is_day_or_month_part(parts[0]) {
        return Ok(Some(match numeric_part(parts[1]) {
            // Second part is a plausible month: read as Day-Month-Year.
            Some(month) if month <= 12 => format!(
                "{y}{sep}{m}{sep}{d}",
                y = parts[2],
                m = parts[1],
                d = parts[0],
                sep = preferred_sep
            ),
            // Second part can only be a day: read as Month-Day-Year.
            Some(_) => format!(
                "{y}{sep}{m}{sep}{d}",
                y = parts[2],
                m = parts[0],
                d = parts[1],
                sep = preferred_sep
            ),
            // No readable month; do not reorder.
            None => reseparated(),
        }));
    }

    // First part is neither a year nor a day/month; not decomposable.
    Ok(Some(reseparated()))
}

fn active_separator(raw: &str) -> Option<char> {
    SEPARATOR_PRIORITY
        .iter()
        .copied()
        .find(|sep| raw.contains(*sep))
}

fn is_year_part(part: &str) -> bool {
    part.len() == 4 && part.chars().all(|ch| ch.is_ascii_digit())
}

fn is_day_or_month_part(part: &str) -> bool {
    (1..=2).contains(&part.len()) && part.chars().all(|ch| ch.is_ascii_digit())
}

fn numeric_part(part: &str) -> Option<u32> {
    if part.is_empty() || !part.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// The chrono pattern for canonical dates with the given separator.
fn canonical_pattern(sep: char) -> String {
    format!("%Y{sep}%m{sep}%d")
}

/// Parse normalized date text as a calendar date.
pub fn parse_normalized(text: &str, preferred_sep: char) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, &canonical_pattern(preferred_sep)).ok()
}

/// Format a calendar date back into canonical zero-padded text.
pub fn format_canonical(date: NaiveDate, preferred_sep: char) -> String {
    date.format(&canonical_pattern(preferred_sep)).to_string()
}

/// Standardize date columns in place: normalize each value, parse it as a
/// calendar date, and replace the column with a typed date column.
///
/// Per-value failures become nulls. A missing column is skipped with a
/// warning. If the bulk column replacement itself fails the column is left
/// unprocessed and an error diagnostic is recorded; remaining columns still
/// run.
pub fn standardize_dates(
    df: &mut DataFrame,
    date_columns: &[String],
    preferred_sep: char,
    diags: &mut Diagnostics,
) -> Result<()> {
    for name in date_columns {
        let Some(values) = column_texts(df, name) else {
            tracing::warn!(column = %name, "date column not found");
            diags.warning(STAGE, Some(name), "column not found, skipped");
            continue;
        };

        let mut malformed = 0usize;
        let mut unparseable = 0usize;
        let mut dates: Vec<Option<NaiveDate>> = Vec::with_capacity(values.len());
        for raw in &values {
            if raw.is_empty() {
                dates.push(None);
                continue;
            }
            let normalized = match reorder_date_text(raw, preferred_sep) {
                Ok(Some(text)) => text,
                Ok(None) => raw.clone(),
                Err(DateShapeError::MalformedShape { .. }) => {
                    malformed += 1;
                    dates.push(None);
                    continue;
                }
            };
            match parse_normalized(&normalized, preferred_sep) {
                Some(date) => dates.push(Some(date)),
                None => {
                    unparseable += 1;
                    dates.push(None);
                }
            }
        }

        if malformed > 0 {
            diags.warning(
                STAGE,
                Some(name),
                format!("{malformed} value(s) with malformed date shape set to null"),
            );
        }
        if unparseable > 0 {
            diags.info(
                STAGE,
                Some(name),
                format!("{unparseable} value(s) failed calendar parse, set to null"),
            );
        }

        let column = Series::new(name.as_str().into(), dates);
        if let Err(e) = df.with_column(column) {
            tracing::error!(column = %name, error = %e, "bulk date replacement failed");
            diags.error(STAGE, Some(name), format!("column left unprocessed: {e}"));
            continue;
        }
        tracing::debug!(column = %name, "standardized dates");
    }
    Ok(())
}
