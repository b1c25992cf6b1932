use std::path::PathBuf;
use std::time::Duration;

use ldp_model::Diagnostics;

/// Per-source outcome of one cleaning stage.
#[derive(Debug)]
pub struct StageSummary {
    pub source: String,
    pub rows_in: usize,
    pub rows_out: usize,
    pub duplicates_removed: usize,
    pub rows_dropped_missing: usize,
    /// Invalid identifier count, for sources with an identifier column.
    pub invalid_identifiers: Option<usize>,
    /// Written silver file; `None` on dry runs.
    pub output: Option<PathBuf>,
}

impl StageSummary {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            rows_in: 0,
            rows_out: 0,
            duplicates_removed: 0,
            rows_dropped_missing: 0,
            invalid_identifiers: None,
            output: None,
        }
    }
}

/// Outcome of a whole pipeline run.
#[derive(Debug)]
pub struct PipelineResult {
    pub output_dir: PathBuf,
    pub stages: Vec<StageSummary>,
    pub errors: Vec<String>,
    pub diagnostics: Diagnostics,
    pub duration: Duration,
    pub has_errors: bool,
}
