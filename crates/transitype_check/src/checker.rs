use anyhow::Result;
use log::{debug, info};
use rayon::prelude::*;
use std::{io::Write, path::Path};

use transitype_core::{Manifest, SourceTrace, WalkFilter, find_ts_files, read_manifest, trace_sources};

use crate::{
    classifier::classify,
    config::Config,
    prompt::{FilePrompt, prompt_for_files},
    reporter::Reporter,
    tracer::{TraceOutcome, trace_files},
    types::CheckResult,
};

pub fn run_transitive_check<W: Write>(
    mut cfg: Config,
    prompt: &mut dyn FilePrompt,
    reporter: &mut Reporter<W>,
) -> Result<CheckResult> {
    info!("Starting transitive type dependency check");

    cfg.initialize()?;
    let root = cfg.root()?.clone();
    let manifest = read_manifest(&root)?;
    let compiler = cfg.compiler()?;

    let files = files_to_trace(&cfg, &root, &manifest, prompt, reporter)?;
    if files.is_empty() {
        writeln!(reporter.writer())?;
        reporter.failure("No files provided to trace")?;
        return Ok(CheckResult::NoFiles);
    }
    debug!("Tracing {} files", files.len());

    match trace_files(&root, &compiler, &files)? {
        TraceOutcome::TypeErrors { output } => {
            reporter.trace_failure(&files, &output)?;
            Ok(CheckResult::TypeErrors { files })
        }
        TraceOutcome::Listed(listed) => {
            let flagged = classify(&manifest, &listed);
            info!("Check complete. Flagged {} packages", flagged.len());
            reporter.flagged(&flagged)?;
            Ok(CheckResult::Checked { flagged, files_listed: listed.len() })
        }
    }
}

/// Provided files win; otherwise trace the manifest's entry points, falling
/// back to asking the operator.
fn files_to_trace<W: Write>(
    cfg: &Config,
    root: &Path,
    manifest: &Manifest,
    prompt: &mut dyn FilePrompt,
    reporter: &mut Reporter<W>,
) -> Result<Vec<String>> {
    if !cfg.files.is_empty() {
        reporter.info(&format!("Using provided files: {}", cfg.files.join(", ")))?;
        return Ok(cfg.files.clone());
    }

    let entries = manifest.entry_points();
    if entries.is_empty() {
        reporter.info("No main/module found in package.json.")?;
        return ask_for_files(root, prompt, reporter);
    }
    reporter.info(&format!("Found entry points: {}", entries.join(", ")))?;

    let traces: Vec<SourceTrace> =
        entries.par_iter().map(|entry| trace_sources(root, entry)).collect();

    let mut files = Vec::new();
    for (entry, trace) in entries.iter().zip(traces) {
        reporter.source_trace(entry, &trace)?;
        files.extend(trace.files().iter().map(|p| p.to_string_lossy().into_owned()));
    }

    if files.is_empty() {
        reporter.untraceable_entries()?;
        return ask_for_files(root, prompt, reporter);
    }
    Ok(files)
}

fn ask_for_files<W: Write>(
    root: &Path,
    prompt: &mut dyn FilePrompt,
    reporter: &mut Reporter<W>,
) -> Result<Vec<String>> {
    let candidates = find_ts_files(root, &WalkFilter::default());
    debug!("Offering {} candidate files", candidates.len());
    prompt_for_files(prompt, &candidates, reporter)
}
