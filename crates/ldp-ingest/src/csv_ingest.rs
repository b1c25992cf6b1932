//! CSV loading for bronze-layer sources.
//!
//! Two read paths: [`load_csv`] lets polars infer column types and is used
//! for numeric-friendly sources, [`load_csv_text`] keeps every column as
//! text, which matters for identifier columns (a bare ISBN would otherwise
//! be inferred as an integer and lose leading zeros).

use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{Column, CsvReadOptions, DataFrame, NamedFrom, SerReader, Series};

use crate::error::{IngestError, Result};

/// Verify the path carries the expected extension (case-insensitive).
pub(crate) fn check_extension(path: &Path, expected: &'static str) -> Result<()> {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected));
    if matches {
        Ok(())
    } else {
        Err(IngestError::UnsupportedExtension {
            path: path.to_path_buf(),
            expected,
        })
    }
}

/// Verify the file exists, mapping NotFound to a dedicated error.
pub(crate) fn check_exists(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(IngestError::FileAccess {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Load a CSV file into a DataFrame with polars type inference.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    check_extension(path, "csv")?;
    check_exists(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::info!(path = %path.display(), rows = df.height(), columns = df.width(), "loaded CSV");
    Ok(df)
}

/// Load a CSV file with every column kept as text.
///
/// Empty cells become nulls.
pub fn load_csv_text(path: &Path) -> Result<DataFrame> {
    check_extension(path, "csv")?;
    check_exists(path)?;

    let mut reader =
        ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| IngestError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        for (idx, column) in columns.iter_mut().enumerate() {
            let raw = record.get(idx).unwrap_or("").trim();
            column.push(if raw.is_empty() {
                None
            } else {
                Some(raw.to_string())
            });
        }
    }

    let series: Vec<Column> = headers
        .iter()
        .zip(columns)
        .map(|(name, values)| Series::new(name.as_str().into(), values).into())
        .collect();
    let df = DataFrame::new(series).map_err(|e| IngestError::Frame {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::info!(path = %path.display(), rows = df.height(), columns = df.width(), "loaded CSV as text");
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn load_csv_reads_rows_and_headers() {
        let (_dir, path) = write_temp("circulation.csv", "transaction_id,member\n1,alice\n2,bob\n");
        let df = load_csv(&path).unwrap();
        assert_eq!(df.height(), 2);
        assert!(df.column("transaction_id").is_ok());
    }

    #[test]
    fn load_csv_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn load_csv_wrong_extension() {
        let (_dir, path) = write_temp("catalogue.xlsx", "a,b\n1,2\n");
        let err = load_csv(&path).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedExtension { .. }));
    }

    #[test]
    fn load_csv_text_keeps_identifiers_as_text_and_nulls_empties() {
        let (_dir, path) = write_temp("catalogue.csv", "isbn,title\n9780123456789,\n978-1,Rust\n");
        let df = load_csv_text(&path).unwrap();
        let isbn = df.column("isbn").unwrap();
        assert_eq!(isbn.dtype(), &polars::prelude::DataType::String);
        assert_eq!(df.column("title").unwrap().null_count(), 1);
    }
}
