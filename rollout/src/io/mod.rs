//! I/O helpers for rollout commands.

pub mod config;
pub mod config_store;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Write `contents` to `path` via a sibling temp file and rename.
///
/// Creates the parent directory if needed and replaces any existing file.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = parent.join(tmp_name);
    let written = fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))
        .and_then(|()| {
            fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))
        });
    if written.is_err() {
        // Best effort; report the original error.
        let _ = fs::remove_file(&tmp_path);
    }
    written
}
