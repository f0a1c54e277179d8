//! Converting every chapter in a directory.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::BatchConfig;
use crate::error::{Error, Result};

use super::{convert_file, write_notebook};

/// A chapter that converted successfully.
#[derive(Debug)]
pub struct Converted {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub cells: usize,
}

/// A chapter that could not be converted.
#[derive(Debug)]
pub struct Failed {
    pub input: PathBuf,
    pub error: Error,
}

/// Outcome of a directory conversion.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<Converted>,
    pub failed: Vec<Failed>,
}

impl BatchReport {
    /// True when no chapter failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// Chapter files directly inside `dir`, sorted by file name.
///
/// Only an unreadable `dir` is an error. An entry that cannot be inspected
/// (a dangling symlink, say) is skipped with a warning, unless its name marks
/// it as a chapter: then it is returned so that converting it fails and is
/// reported like any other unreadable chapter.
pub fn discover_inputs(dir: &Path, config: &BatchConfig) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                match err.path() {
                    Some(path) if is_chapter_file(path, config) => {
                        inputs.push(path.to_path_buf());
                    }
                    _ => warn!("skipping unreadable entry: {err}"),
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if is_chapter_file(entry.path(), config) {
            inputs.push(entry.into_path());
        }
    }

    Ok(inputs)
}

fn is_chapter_file(path: &Path, config: &BatchConfig) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    name.starts_with(&config.file_prefix) && config.extensions.iter().any(|e| e == ext)
}

/// Convert every chapter in `dir`.
///
/// A chapter that fails to read, parse or write is logged and recorded in
/// the report; the remaining chapters are still converted. Only a failure
/// to list the directory itself is returned as an error.
pub fn convert_dir(dir: &Path, config: &BatchConfig) -> Result<BatchReport> {
    let inputs = discover_inputs(dir, config)?;
    if inputs.is_empty() {
        warn!(
            "no {}*.{{{}}} files in {}",
            config.file_prefix,
            config.extensions.join(","),
            dir.display()
        );
    }

    let mut report = BatchReport::default();
    for input in inputs {
        match convert_one(&input, config) {
            Ok(converted) => {
                info!(
                    "{} -> {} ({} cells)",
                    input.display(),
                    converted.output.display(),
                    converted.cells
                );
                report.converted.push(converted);
            }
            Err(error) => {
                warn!("skipping {}: {error}", input.display());
                report.failed.push(Failed { input, error });
            }
        }
    }

    Ok(report)
}

fn convert_one(input: &Path, config: &BatchConfig) -> Result<Converted> {
    let (notebook, output) = convert_file(input, &config.convert)?;
    if !config.dry_run {
        write_notebook(&notebook, &output)?;
    }
    Ok(Converted {
        input: input.to_path_buf(),
        output,
        title: notebook.title().to_string(),
        cells: notebook.cells().count(),
    })
}
