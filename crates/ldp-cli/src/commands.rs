use std::time::Instant;

use anyhow::{Result, bail};
use comfy_table::Table;
use tracing::{info, warn};

use ldp_cli::pipeline::{StageContext, resolve_output_dir, source_descriptions, stages};
use ldp_cli::types::PipelineResult;
use ldp_model::Diagnostics;

use crate::cli::RunArgs;
use crate::summary::apply_table_style;

pub fn run_sources() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Source", "File", "Cleaning steps"]);
    apply_table_style(&mut table);
    for (source, file, steps) in source_descriptions() {
        table.add_row(vec![source, file, steps]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_pipeline(args: &RunArgs) -> Result<PipelineResult> {
    if !args.data_dir.is_dir() {
        bail!("data folder not found: {}", args.data_dir.display());
    }
    let output_dir = resolve_output_dir(&args.data_dir, args.output_dir.as_deref());
    let ctx = StageContext {
        data_dir: args.data_dir.clone(),
        output_dir: output_dir.clone(),
        separator: args.separator,
        dry_run: args.dry_run,
    };

    let mut diagnostics = Diagnostics::new();
    let mut summaries = Vec::new();
    let mut errors = Vec::new();
    let start = Instant::now();

    // Stages are independent; a failed source must not block the others.
    for (source, stage) in stages() {
        match stage(&ctx, &mut diagnostics) {
            Ok(summary) => {
                info!(
                    source,
                    rows_in = summary.rows_in,
                    rows_out = summary.rows_out,
                    "stage complete"
                );
                summaries.push(summary);
            }
            Err(error) => {
                warn!(source, %error, "stage failed");
                diagnostics.error(source, None, format!("{error:#}"));
                errors.push(format!("{source}: {error:#}"));
            }
        }
    }

    let has_errors = !errors.is_empty() || diagnostics.error_count() > 0;
    Ok(PipelineResult {
        output_dir,
        stages: summaries,
        errors,
        diagnostics,
        duration: start.elapsed(),
        has_errors,
    })
}
