//! Directory scanning for convertible raw frames.
//!
//! Produces the work list for [`crate::batch`]: every regular file in a
//! directory whose extension is `.cr2`, matched case-insensitively.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// One qualifying raw file found by the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFileEntry {
    path: PathBuf,
    name: String,
}

impl RawFileEntry {
    fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The base file name, as printed in status lines.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Lists the raw camera files in `dir`.
///
/// Entries whose metadata cannot be read are skipped. Only regular files
/// qualify; directories and symlinks are excluded. No ordering is
/// imposed beyond what the OS enumeration yields.
///
/// # Errors
///
/// - [`ConversionError::NotFound`] if `dir` does not exist.
/// - [`ConversionError::NotADirectory`] if `dir` is not a directory.
/// - [`ConversionError::IoError`] if the directory cannot be read.
pub fn scan_raw_files(dir: &Path) -> Result<Vec<RawFileEntry>> {
    if !dir.exists() {
        return Err(ConversionError::NotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ConversionError::NotADirectory(dir.to_path_buf()));
    }

    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(dir)? {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let metadata = match dir_entry.metadata() {
            Ok(m) => m,
            Err(_) => continue,
        };
        if !metadata.is_file() {
            continue;
        }
        let path = dir_entry.path();
        if !has_raw_extension(&path) {
            continue;
        }
        debug!("Found raw frame {}", path.display());
        entries.push(RawFileEntry::new(path));
    }

    Ok(entries)
}

fn has_raw_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("cr2"))
}
