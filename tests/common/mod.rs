/*!
 * Common test utilities for the subedit test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use subedit::{CueCollection, CueId};

pub const SAMPLE_SRT: &str = "1\n00:00:01,000 --> 00:00:03,500\nHello world\n\n2\n00:00:04,000 --> 00:00:06,000\nSecond line\n";

pub const SAMPLE_VTT: &str = "WEBVTT\n\n00:00:01.000 --> 00:00:03.500\nHello world\n\n00:00:04.000 --> 00:00:06.000\nSecond line\n";

/// Route library logs through env_logger while tests run
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample SRT file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SRT)
}

/// Id of the cue stored at `position`
pub fn id_at(collection: &CueCollection, position: usize) -> CueId {
    collection.as_slice()[position].id.clone()
}

/// Assert that every cue's index is its rank in a stable start-time sort
pub fn assert_indices_follow_start_time(collection: &CueCollection) {
    let mut ranked: Vec<(usize, f64)> = collection.iter().enumerate().map(|(i, c)| (i, c.start_time)).collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (rank, (position, _)) in ranked.into_iter().enumerate() {
        assert_eq!(
            collection.as_slice()[position].index, rank,
            "cue at storage position {} should have index {}",
            position, rank
        );
    }
}
