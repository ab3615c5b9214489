//! Discovery of template files under the stores directory.
//!
//! `walkdir` is synchronous, so async callers go through [`scan`], which runs
//! [`collect_raw_records`] on the blocking thread pool.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LayoutConfig;
use crate::core::InsightsError;
use crate::graph::RawFileRecord;
use crate::utils::{page_dir, page_path_from};

/// Walk `stores_dir` and return one record per template file, in walk order.
///
/// Entries are visited sorted by file name and symlinks are not followed.
/// Entries that cannot be read are logged and skipped.
///
/// # Errors
///
/// Returns [`InsightsError::StoresDirNotFound`] if `stores_dir` is not a
/// directory, or an error if it cannot be canonicalized.
pub fn collect_raw_records(stores_dir: &Path, layout: &LayoutConfig) -> Result<Vec<RawFileRecord>> {
    if !stores_dir.is_dir() {
        return Err(InsightsError::StoresDirNotFound {
            path: stores_dir.display().to_string(),
        }
        .into());
    }

    let base = stores_dir
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize path: {}", stores_dir.display()))?;
    debug!("Walking {}", base.display());

    let mut records = Vec::new();
    for entry in WalkDir::new(&base).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !layout.is_template_file(&name) {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => records.push(record_for(entry.path(), &name, &metadata)),
            Err(e) => warn!("Skipping {}: {e}", entry.path().display()),
        }
    }

    info!("Found {} template file(s) under {}", records.len(), base.display());
    Ok(records)
}

/// Async wrapper around [`collect_raw_records`].
///
/// # Errors
///
/// Same as [`collect_raw_records`], plus a join error if the blocking task panics.
pub async fn scan(stores_dir: PathBuf, layout: LayoutConfig) -> Result<Vec<RawFileRecord>> {
    tokio::task::spawn_blocking(move || collect_raw_records(&stores_dir, &layout))
        .await
        .context("Directory walk task failed")?
}

fn record_for(path: &Path, name: &str, metadata: &Metadata) -> RawFileRecord {
    let path = page_path_from(path);
    RawFileRecord {
        root: page_dir(&path),
        name: name.to_string(),
        path,
        size: metadata.len(),
        modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        created: metadata.created().ok().map(DateTime::<Utc>::from),
    }
}
