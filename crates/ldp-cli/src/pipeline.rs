//! Pipeline stages: one cleaning routine per bronze source.
//!
//! Each stage loads its raw export, applies the cleaning steps for that
//! source, and writes the silver CSV (unless dry-running). Stages are
//! independent; the command layer keeps running remaining stages when one
//! fails.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::info_span;

use ldp_clean::{
    MissingValueStrategy, handle_missing_values, remove_duplicates, standardize_dates,
    standardize_identifiers,
};
use ldp_ingest::{load_csv, load_csv_text, load_json, load_text, write_csv};
use ldp_model::Diagnostics;
use ldp_validate::flag_valid_identifiers;

use crate::feedback::{count_feedback_headers, parse_feedback_lines, summarize_entries};
use crate::types::StageSummary;

/// Shared inputs for every stage of one run.
#[derive(Debug)]
pub struct StageContext {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Preferred separator for normalized dates.
    pub separator: char,
    pub dry_run: bool,
}

impl StageContext {
    fn bronze(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    fn silver(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}

fn finish_stage(
    ctx: &StageContext,
    mut df: DataFrame,
    summary: &mut StageSummary,
    silver_name: &str,
) -> Result<()> {
    summary.rows_out = df.height();
    if ctx.dry_run {
        return Ok(());
    }
    let path = ctx.silver(silver_name);
    write_csv(&mut df, &path).with_context(|| format!("write {silver_name}"))?;
    summary.output = Some(path);
    Ok(())
}

/// Clean borrowing transactions: dedupe on the transaction identifier, drop
/// rows with missing values, standardize the date columns.
pub fn process_circulation(ctx: &StageContext, diags: &mut Diagnostics) -> Result<StageSummary> {
    let span = info_span!("stage", source = "circulation");
    let _guard = span.enter();
    let mut summary = StageSummary::new("circulation");

    let df = load_csv(&ctx.bronze("circulation_data.csv")).context("load circulation data")?;
    summary.rows_in = df.height();

    let deduped = remove_duplicates(&df, Some(&["transaction_id".to_string()]), diags)?;
    summary.duplicates_removed = summary.rows_in - deduped.height();

    let mut cleaned =
        handle_missing_values(&deduped, &MissingValueStrategy::Drop, None, diags)?;
    summary.rows_dropped_missing = deduped.height() - cleaned.height();

    standardize_dates(
        &mut cleaned,
        &["checkout_date".to_string(), "return_date".to_string()],
        ctx.separator,
        diags,
    )?;

    finish_stage(ctx, cleaned, &mut summary, "circulation_clean.csv")?;
    Ok(summary)
}

/// Clean library events: flatten the JSON export and drop incomplete rows.
pub fn process_events(ctx: &StageContext, diags: &mut Diagnostics) -> Result<StageSummary> {
    let span = info_span!("stage", source = "events");
    let _guard = span.enter();
    let mut summary = StageSummary::new("events");

    let df = load_json(&ctx.bronze("events_data.json")).context("load events data")?;
    summary.rows_in = df.height();

    let cleaned = handle_missing_values(&df, &MissingValueStrategy::Drop, None, diags)?;
    summary.rows_dropped_missing = summary.rows_in - cleaned.height();

    finish_stage(ctx, cleaned, &mut summary, "events_clean.csv")?;
    Ok(summary)
}

/// Clean the book catalogue: dedupe on ISBN, strip identifier formatting,
/// flag structurally invalid ISBNs.
pub fn process_catalogue(ctx: &StageContext, diags: &mut Diagnostics) -> Result<StageSummary> {
    let span = info_span!("stage", source = "catalogue");
    let _guard = span.enter();
    let mut summary = StageSummary::new("catalogue");

    // Text-typed load: a bare ISBN must stay a string, not become an integer.
    let df = load_csv_text(&ctx.bronze("catalogue.csv")).context("load catalogue data")?;
    summary.rows_in = df.height();

    let mut cleaned = remove_duplicates(&df, Some(&["isbn".to_string()]), diags)?;
    summary.duplicates_removed = summary.rows_in - cleaned.height();

    standardize_identifiers(&mut cleaned, "isbn", diags)?;
    let invalid = flag_valid_identifiers(&mut cleaned, "isbn", "isbn_valid")?;
    summary.invalid_identifiers = Some(invalid);
    if invalid > 0 {
        diags.warning(
            "validate_identifiers",
            Some("isbn"),
            format!("{invalid} structurally invalid ISBN(s)"),
        );
    }

    finish_stage(ctx, cleaned, &mut summary, "catalogue_clean.csv")?;
    Ok(summary)
}

/// Summarize branch feedback ratings from the unstructured text export.
pub fn process_feedback(ctx: &StageContext, diags: &mut Diagnostics) -> Result<StageSummary> {
    let span = info_span!("stage", source = "feedback");
    let _guard = span.enter();
    let mut summary = StageSummary::new("feedback");

    let lines = load_text(&ctx.bronze("feedback.txt")).context("load feedback data")?;
    summary.rows_in = count_feedback_headers(&lines);

    let entries = parse_feedback_lines(&lines);
    if entries.len() < summary.rows_in {
        diags.warning(
            "parse_feedback",
            None,
            format!(
                "{} feedback entr(ies) had no parseable branch rating",
                summary.rows_in - entries.len()
            ),
        );
    }

    let counts = summarize_entries(&entries);
    let mut branches = Vec::with_capacity(counts.len());
    let mut ratings: Vec<i64> = Vec::with_capacity(counts.len());
    let mut totals: Vec<i64> = Vec::with_capacity(counts.len());
    for ((branch, rating), count) in counts {
        branches.push(branch);
        ratings.push(i64::from(rating));
        totals.push(count as i64);
    }
    let columns: Vec<Column> = vec![
        Series::new("branch".into(), branches).into(),
        Series::new("rating".into(), ratings).into(),
        Series::new("count".into(), totals).into(),
    ];
    let df = DataFrame::new(columns).context("build feedback summary frame")?;

    finish_stage(ctx, df, &mut summary, "feedback_summary.csv")?;
    Ok(summary)
}

/// The bronze sources in processing order, with their stage functions.
pub fn stages() -> [(
    &'static str,
    fn(&StageContext, &mut Diagnostics) -> Result<StageSummary>,
); 4] {
    [
        ("circulation", process_circulation),
        ("events", process_events),
        ("catalogue", process_catalogue),
        ("feedback", process_feedback),
    ]
}

/// Human-readable description of each source's cleaning steps, for `ldp sources`.
pub fn source_descriptions() -> [(&'static str, &'static str, &'static str); 4] {
    [
        (
            "circulation",
            "circulation_data.csv",
            "dedupe on transaction_id, drop missing, standardize dates",
        ),
        (
            "events",
            "events_data.json",
            "flatten nested JSON, drop missing",
        ),
        (
            "catalogue",
            "catalogue.csv",
            "dedupe on isbn, strip ISBN formatting, flag invalid ISBNs",
        ),
        (
            "feedback",
            "feedback.txt",
            "parse branch ratings, aggregate counts",
        ),
    ]
}

/// Resolve the silver output directory for a run.
pub fn resolve_output_dir(data_dir: &Path, output_dir: Option<&Path>) -> PathBuf {
    output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data_dir.join("silver"))
}
