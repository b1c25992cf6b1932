//! Keep-first duplicate removal.

use std::collections::BTreeSet;

use anyhow::{Result, bail};
use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};

use ldp_ingest::column_text;
use ldp_model::Diagnostics;

const STAGE: &str = "remove_duplicates";

/// Remove duplicate rows, keeping the first occurrence.
///
/// Rows are compared on a composite key built from the `subset` columns
/// (every column when `None`). Null key cells take part in the key as empty
/// text, so rows whose keys are all missing also deduplicate against each
/// other. Naming a subset column the frame does not have is an
/// unrecoverable input.
pub fn remove_duplicates(
    df: &DataFrame,
    subset: Option<&[String]>,
    diags: &mut Diagnostics,
) -> Result<DataFrame> {
    if df.height() == 0 {
        return Ok(df.clone());
    }

    let keys: Vec<String> = match subset {
        Some(columns) => {
            for name in columns {
                if df.column(name).is_err() {
                    bail!("dedup key column '{name}' not found");
                }
            }
            columns.to_vec()
        }
        None => df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect(),
    };

    let mut seen = BTreeSet::new();
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut composite = String::new();
        for (pos, name) in keys.iter().enumerate() {
            if pos > 0 {
                composite.push('|');
            }
            composite.push_str(&column_text(df, name, idx));
        }
        keep.push(seen.insert(composite));
    }

    let removed = keep.iter().filter(|kept| !**kept).count();
    if removed > 0 {
        tracing::info!(removed, "removed duplicate rows");
        diags.info(STAGE, None, format!("removed {removed} duplicate row(s)"));
    }

    let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
    Ok(df.filter(&mask)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, NamedFrom, Series};

    fn frame(ids: Vec<&str>, names: Vec<&str>) -> DataFrame {
        let cols: Vec<Column> = vec![
            Series::new("id".into(), ids).into(),
            Series::new("name".into(), names).into(),
        ];
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn keeps_first_occurrence_per_key() {
        let df = frame(
            vec!["1", "2", "2", "3", "3", "3"],
            vec!["Alice", "Bob", "Bob", "Charlie", "Charlie", "Charlie"],
        );
        let mut diags = Diagnostics::new();
        let out = remove_duplicates(&df, Some(&["id".to_string()]), &mut diags).unwrap();

        assert_eq!(out.height(), 3);
        assert_eq!(column_text(&out, "id", 0), "1");
        assert_eq!(column_text(&out, "id", 2), "3");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn unique_frame_is_unchanged_and_silent() {
        let df = frame(vec!["1", "2", "3"], vec!["A", "B", "C"]);
        let mut diags = Diagnostics::new();
        let out = remove_duplicates(&df, Some(&["id".to_string()]), &mut diags).unwrap();

        assert_eq!(out.height(), 3);
        assert!(diags.is_empty());
    }

    #[test]
    fn all_columns_used_when_no_subset() {
        let df = frame(vec!["1", "1", "1"], vec!["A", "A", "B"]);
        let mut diags = Diagnostics::new();
        let out = remove_duplicates(&df, None, &mut diags).unwrap();
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn null_keys_compare_equal() {
        let cols: Vec<Column> = vec![
            Series::new("id".into(), vec![None::<&str>, None, Some("1")]).into(),
        ];
        let df = DataFrame::new(cols).unwrap();
        let mut diags = Diagnostics::new();
        let out = remove_duplicates(&df, Some(&["id".to_string()]), &mut diags).unwrap();
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn missing_key_column_is_an_error() {
        let df = frame(vec!["1"], vec!["A"]);
        let mut diags = Diagnostics::new();
        assert!(remove_duplicates(&df, Some(&["nope".to_string()]), &mut diags).is_err());
    }

    #[test]
    fn empty_frame_is_a_no_op() {
        let cols: Vec<Column> = vec![Series::new("id".into(), Vec::<String>::new()).into()];
        let df = DataFrame::new(cols).unwrap();
        let mut diags = Diagnostics::new();
        let out = remove_duplicates(&df, None, &mut diags).unwrap();
        assert_eq!(out.height(), 0);
    }
}
