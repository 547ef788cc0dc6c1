//! Directory comparison
//!
//! Pairs job exports across two directory trees by relative path and
//! compares every pair independently on the rayon thread pool.

use crate::compare::{compare_files, FileComparison};
use crate::config::DiffConfig;
use crate::error::Result;
use crate::progress::ProgressReporter;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of job export files
pub const JOB_FILE_EXTENSION: &str = "json";

/// A job file located by relative path on either side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub relative: PathBuf,
    pub old: Option<PathBuf>,
    pub new: Option<PathBuf>,
}

/// Collect job files from both trees, sorted by relative path
pub fn pair_job_files(old_dir: &Path, new_dir: &Path) -> Result<Vec<FilePair>> {
    let mut pairs: BTreeMap<PathBuf, FilePair> = BTreeMap::new();

    for (relative, path) in list_job_files(old_dir)? {
        pairs
            .entry(relative.clone())
            .or_insert_with(|| empty_pair(relative))
            .old = Some(path);
    }
    for (relative, path) in list_job_files(new_dir)? {
        pairs
            .entry(relative.clone())
            .or_insert_with(|| empty_pair(relative))
            .new = Some(path);
    }

    Ok(pairs.into_values().collect())
}

fn empty_pair(relative: PathBuf) -> FilePair {
    FilePair {
        relative,
        old: None,
        new: None,
    }
}

fn list_job_files(root: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(JOB_FILE_EXTENSION) {
            continue;
        }
        if let Ok(relative) = path.strip_prefix(root) {
            files.push((relative.to_path_buf(), path.to_path_buf()));
        }
    }

    log::debug!("Found {} job file(s) under {}", files.len(), root.display());
    Ok(files)
}

/// Compare every job file pair of two directories.
///
/// `make_progress` receives the number of pairs found. Results come back in
/// relative-path order regardless of scheduling.
pub fn compare_directories<F>(
    old_dir: &Path,
    new_dir: &Path,
    config: &DiffConfig,
    make_progress: F,
) -> Result<Vec<FileComparison>>
where
    F: FnOnce(u64) -> ProgressReporter,
{
    let pairs = pair_job_files(old_dir, new_dir)?;
    log::info!(
        "Comparing {} job file(s) between {} and {}",
        pairs.len(),
        old_dir.display(),
        new_dir.display()
    );

    let mut progress = make_progress(pairs.len() as u64);
    let comparisons = compare_pairs(&pairs, config, &progress)?;
    progress.finish("Comparison complete");
    Ok(comparisons)
}

/// Compare already-paired files in parallel, preserving `pairs` order
fn compare_pairs(
    pairs: &[FilePair],
    config: &DiffConfig,
    progress: &ProgressReporter,
) -> Result<Vec<FileComparison>> {
    pairs
        .par_iter()
        .map(|pair| {
            let label = pair.relative.display().to_string();
            let comparison = compare_files(
                label.clone(),
                pair.old.as_deref(),
                pair.new.as_deref(),
                config,
            );
            progress.inc(&label);
            comparison
        })
        .collect()
}
