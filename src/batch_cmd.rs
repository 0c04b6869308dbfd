//! Batch command: convert every model file in a directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, info_span, warn};

use recal_io::standard_calendar_file_name;

use crate::cli::BatchArgs;
use crate::config::RecalConfig;
use crate::convert;
use crate::convert_cmd::Pipeline;

/// Files in `dir` with extension `ext`, sorted by name.
fn list_inputs(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list input directory: {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list input directory: {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|e| e == ext) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Files at positions `[start, stop)`, with `stop` capped at the end.
fn select(files: &[PathBuf], start: usize, stop: Option<usize>) -> Result<&[PathBuf]> {
    let stop = stop.unwrap_or(files.len()).min(files.len());
    if start > stop {
        bail!("start index {start} is past stop index {stop}");
    }
    Ok(&files[start..stop])
}

/// Run the batch conversion, stopping at the first failure.
pub fn run(args: BatchArgs) -> Result<()> {
    let _cmd = info_span!("batch").entered();

    let mut config = RecalConfig::load(args.conversion.config.as_deref())?;
    convert::apply_overrides(&mut config, &args.conversion);
    if let Some(dir) = args.input_dir {
        config.io.input_dir = Some(dir);
    }
    if let Some(dir) = args.output_dir {
        config.io.output_dir = Some(dir);
    }
    if let Some(i) = args.start_index {
        config.batch.start_index = i;
    }
    if let Some(i) = args.stop_index {
        config.batch.stop_index = Some(i);
    }

    let input_dir = config.io.input_dir.as_ref().ok_or_else(|| {
        anyhow!("no input directory: set [io].input_dir in config or use --input-dir")
    })?;
    let output_dir = config.io.output_dir.as_ref().ok_or_else(|| {
        anyhow!("no output directory: set [io].output_dir in config or use --output-dir")
    })?;
    let pipeline = Pipeline::from_config(&config)?;

    let files = list_inputs(input_dir, &config.io.extension)?;
    let selected = select(&files, config.batch.start_index, config.batch.stop_index)?;
    info!(
        dir = %input_dir.display(),
        found = files.len(),
        selected = selected.len(),
        "batch inputs"
    );
    if selected.is_empty() {
        warn!("no files selected");
    }

    for (i, input) in selected.iter().enumerate() {
        let file_name = input
            .file_name()
            .ok_or_else(|| anyhow!("input has no file name: {}", input.display()))?;
        let output = standard_calendar_file_name(&output_dir.join(file_name));
        pipeline
            .run_file(input, &output)
            .with_context(|| format!("batch stopped at file {} of {}", i + 1, selected.len()))?;
    }

    info!(converted = selected.len(), "batch complete");
    Ok(())
}
