//! Batch discovery and summarizing of audio files
//!
//! Roots may be single files or directories. Unreadable entries and files
//! that fail to summarize are logged and skipped, never fatal.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::audio::is_audio_file;
use crate::track::TrackSummary;

/// Collect supported audio files under `roots`, de-duplicated and sorted
pub fn scan_paths<P: AsRef<Path>>(roots: &[P], follow_links: bool) -> Vec<PathBuf> {
    let mut files = BTreeSet::new();

    for root in roots {
        let root = root.as_ref();
        if !root.exists() {
            log::warn!("Skipping missing path: {}", root.display());
            continue;
        }

        for entry in WalkDir::new(root).follow_links(follow_links).into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && is_audio_file(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    log::debug!("Found {} audio files", files.len());
    files.into_iter().collect()
}

/// Summarize every path, returning the summaries and how many files failed
pub fn read_summaries<P: AsRef<Path>>(
    paths: &[P],
    source: Option<&str>,
) -> (Vec<TrackSummary>, usize) {
    let mut summaries = Vec::with_capacity(paths.len());
    let mut failed = 0;

    for path in paths {
        let path = path.as_ref();
        match TrackSummary::from_path(path, source) {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                log::warn!("Skipping {}: {:#}", path.display(), e);
                failed += 1;
            }
        }
    }

    (summaries, failed)
}
