//! Diff command
//!
//! Usage: structdiff <PREVIOUS> <CURRENT> [--options <FILE>] [--array-policy <POLICY>]
//! [--array-equality <EQUALITY>] [--skip-key <KEY>]... [--no-track-cycles]

use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;
use structdiff_core::errors::{DiffError, ExError};
use structdiff_core::model::Container;
use structdiff_core::options::{ArrayEquality, ArrayPolicy, DiffOptions};
use structdiff_core::{diff, log_op_end, log_op_error, log_op_start, render_human_summary};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Previous JSON document
    pub previous: PathBuf,

    /// Current JSON document
    pub current: PathBuf,

    /// Options file (.json or .toml); flags below override it
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// How array pairs are compared: diff, atomic or ignore
    #[arg(long, value_name = "POLICY")]
    pub array_policy: Option<ArrayPolicy>,

    /// Whole-array equality under the atomic policy: reference or shallow
    #[arg(long, value_name = "EQUALITY")]
    pub array_equality: Option<ArrayEquality>,

    /// Object key to exclude at every depth (repeatable)
    #[arg(long = "skip-key", value_name = "KEY")]
    pub skip_keys: Vec<String>,

    /// Disable circular reference tracking
    #[arg(long)]
    pub no_track_cycles: bool,
}

/// Rendered result of one diff run
#[derive(Debug)]
pub struct DiffOutcome {
    pub summary: String,
    pub difference_count: usize,
}

/// Execute the diff command
pub fn execute(args: &DiffArgs) -> Result<DiffOutcome, ExError> {
    let options = resolve_options(args)?;
    let previous = load_document(&args.previous)?;
    let current = load_document(&args.current)?;

    let results = diff(&previous, &current, &options);

    Ok(DiffOutcome {
        summary: render_human_summary(&results),
        difference_count: results.len(),
    })
}

/// Options file first, then flag overrides
fn resolve_options(args: &DiffArgs) -> Result<DiffOptions, ExError> {
    let mut options = match &args.options {
        Some(path) => load_options(path)?,
        None => DiffOptions::default(),
    };

    if let Some(policy) = args.array_policy {
        options = options.with_array_policy(policy);
    }
    if let Some(equality) = args.array_equality {
        options = options.with_array_equality(equality);
    }
    if args.no_track_cycles {
        options = options.with_track_circular_references(false);
    }
    Ok(options.with_keys_to_skip(args.skip_keys.iter().cloned()))
}

fn load_options(path: &Path) -> Result<DiffOptions, ExError> {
    let start = Instant::now();
    log_op_start!("load_options", path = %path.display());

    match DiffOptions::load(path) {
        Ok(options) => {
            log_op_end!(
                "load_options",
                duration_ms = start.elapsed().as_millis() as u64
            );
            Ok(options)
        }
        Err(err) => {
            log_op_error!(
                "load_options",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(ExError::from(err).with_path(path.display().to_string()))
        }
    }
}

fn load_document(path: &Path) -> Result<Container, ExError> {
    let start = Instant::now();
    let source = path.display().to_string();
    log_op_start!("load_document", path = %source);

    let loaded = std::fs::read_to_string(path)
        .map_err(|e| DiffError::ReadFile {
            path: source.clone(),
            reason: e.to_string(),
        })
        .and_then(|text| Container::from_json_str(&source, &text));

    match loaded {
        Ok(container) => {
            log_op_end!(
                "load_document",
                duration_ms = start.elapsed().as_millis() as u64
            );
            Ok(container)
        }
        Err(err) => {
            log_op_error!(
                "load_document",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(ExError::from(err).with_path(source))
        }
    }
}
