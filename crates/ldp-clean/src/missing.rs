//! Missing-value handling.

use anyhow::{Result, bail};
use polars::prelude::{
    AnyValue, BooleanChunked, DataFrame, DataType, FillNullStrategy, NamedFrom, NewChunkedArray,
    Series,
};

use ldp_ingest::{any_to_f64, any_to_string, format_numeric};
use ldp_model::{CellValue, Diagnostics};

const STAGE: &str = "handle_missing_values";

/// What to do with null cells in the target columns.
#[derive(Debug, Clone, PartialEq)]
pub enum MissingValueStrategy {
    /// Drop every row with a null in any target column.
    Drop,
    /// Replace nulls with a constant value.
    Fill(CellValue),
    /// Propagate the last seen value forward.
    ForwardFill,
}

/// Apply a missing-value strategy over the target columns (every column
/// when `None`). Naming an absent column is an unrecoverable input.
pub fn handle_missing_values(
    df: &DataFrame,
    strategy: &MissingValueStrategy,
    columns: Option<&[String]>,
    diags: &mut Diagnostics,
) -> Result<DataFrame> {
    let targets: Vec<String> = match columns {
        Some(names) => {
            for name in names {
                if df.column(name).is_err() {
                    bail!("target column '{name}' not found");
                }
            }
            names.to_vec()
        }
        None => df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect(),
    };

    match strategy {
        MissingValueStrategy::Drop => drop_null_rows(df, &targets, diags),
        MissingValueStrategy::Fill(value) => fill_nulls(df, &targets, value, diags),
        MissingValueStrategy::ForwardFill => forward_fill(df, &targets, diags),
    }
}

fn drop_null_rows(df: &DataFrame, targets: &[String], diags: &mut Diagnostics) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];
    for name in targets {
        let column = df.column(name)?;
        for (idx, flag) in keep.iter_mut().enumerate() {
            if matches!(column.get(idx), Ok(AnyValue::Null)) {
                *flag = false;
            }
        }
    }

    let dropped = keep.iter().filter(|kept| !**kept).count();
    if dropped > 0 {
        tracing::info!(dropped, "dropped rows with missing values");
        diags.info(
            STAGE,
            None,
            format!("dropped {dropped} row(s) with missing values"),
        );
    }

    let mask = BooleanChunked::from_slice("missing".into(), &keep);
    Ok(df.filter(&mask)?)
}

fn fill_nulls(
    df: &DataFrame,
    targets: &[String],
    value: &CellValue,
    diags: &mut Diagnostics,
) -> Result<DataFrame> {
    let mut out = df.clone();
    let mut filled_total = 0usize;

    for name in targets {
        let column = out.column(name)?.clone();
        let nulls = column.null_count();
        if nulls == 0 {
            continue;
        }
        filled_total += nulls;

        let replacement: Series = if is_numeric_dtype(column.dtype())
            && let CellValue::Number(fill) = value
        {
            // Numeric column with a numeric fill keeps its dtype.
            let values: Vec<f64> = (0..out.height())
                .map(|idx| {
                    any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)).unwrap_or(*fill)
                })
                .collect();
            Series::new(name.as_str().into(), values)
        } else {
            // Everything else is coerced to text.
            let fill_text = cell_fill_text(value);
            let values: Vec<String> = (0..out.height())
                .map(|idx| match column.get(idx) {
                    Ok(AnyValue::Null) | Err(_) => fill_text.clone(),
                    Ok(present) => any_to_string(present),
                })
                .collect();
            Series::new(name.as_str().into(), values)
        };
        out.with_column(replacement)?;
    }

    if filled_total > 0 {
        tracing::info!(filled = filled_total, "filled missing values");
        diags.info(STAGE, None, format!("filled {filled_total} missing value(s)"));
    }
    Ok(out)
}

fn forward_fill(df: &DataFrame, targets: &[String], diags: &mut Diagnostics) -> Result<DataFrame> {
    let mut out = df.clone();
    let mut filled_total = 0usize;

    for name in targets {
        let column = out.column(name)?;
        let nulls = column.null_count();
        if nulls == 0 {
            continue;
        }
        let series = column
            .as_materialized_series()
            .fill_null(FillNullStrategy::Forward(None))?;
        // Leading nulls have nothing to propagate and stay null.
        filled_total += nulls - series.null_count();
        out.with_column(series)?;
    }

    if filled_total > 0 {
        tracing::info!(filled = filled_total, "forward filled missing values");
        diags.info(
            STAGE,
            None,
            format!("forward filled {filled_total} missing value(s)"),
        );
    }
    Ok(out)
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn cell_fill_text(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) => format_numeric(*n),
        CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldp_ingest::column_text;
    use polars::prelude::Column;

    fn frame_with_nulls() -> DataFrame {
        let cols: Vec<Column> = vec![
            Series::new("id".into(), vec![Some(1i64), Some(2), Some(3), Some(4)]).into(),
            Series::new(
                "name".into(),
                vec![Some("Alice"), None, Some("Charlie"), Some("David")],
            )
            .into(),
            Series::new("value".into(), vec![Some(10.0f64), Some(20.0), None, Some(40.0)]).into(),
        ];
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn drop_removes_rows_with_any_null_target() {
        let df = frame_with_nulls();
        let mut diags = Diagnostics::new();
        let out =
            handle_missing_values(&df, &MissingValueStrategy::Drop, None, &mut diags).unwrap();

        assert_eq!(out.height(), 2);
        assert_eq!(out.column("name").unwrap().null_count(), 0);
        assert_eq!(out.column("value").unwrap().null_count(), 0);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn drop_scoped_to_columns() {
        let df = frame_with_nulls();
        let mut diags = Diagnostics::new();
        let out = handle_missing_values(
            &df,
            &MissingValueStrategy::Drop,
            Some(&["name".to_string()]),
            &mut diags,
        )
        .unwrap();

        // Only the row with a null name goes; the null value stays.
        assert_eq!(out.height(), 3);
        assert_eq!(out.column("value").unwrap().null_count(), 1);
    }

    #[test]
    fn fill_preserves_row_count_and_numeric_dtype() {
        let df = frame_with_nulls();
        let mut diags = Diagnostics::new();
        let out = handle_missing_values(
            &df,
            &MissingValueStrategy::Fill(CellValue::Number(0.0)),
            None,
            &mut diags,
        )
        .unwrap();

        assert_eq!(out.height(), 4);
        assert_eq!(out.column("value").unwrap().null_count(), 0);
        assert_eq!(out.column("value").unwrap().dtype(), &DataType::Float64);
        assert_eq!(column_text(&out, "value", 2), "0");
        // text column coerced fill
        assert_eq!(column_text(&out, "name", 1), "0");
    }

    #[test]
    fn forward_fill_propagates_last_value() {
        let cols: Vec<Column> = vec![
            Series::new("name".into(), vec![Some("A"), None, None, Some("B"), None]).into(),
        ];
        let df = DataFrame::new(cols).unwrap();
        let mut diags = Diagnostics::new();
        let out =
            handle_missing_values(&df, &MissingValueStrategy::ForwardFill, None, &mut diags)
                .unwrap();

        assert_eq!(column_text(&out, "name", 1), "A");
        assert_eq!(column_text(&out, "name", 2), "A");
        assert_eq!(column_text(&out, "name", 4), "B");
    }

    #[test]
    fn missing_target_column_is_an_error() {
        let df = frame_with_nulls();
        let mut diags = Diagnostics::new();
        let result = handle_missing_values(
            &df,
            &MissingValueStrategy::Drop,
            Some(&["nope".to_string()]),
            &mut diags,
        );
        assert!(result.is_err());
    }
}
