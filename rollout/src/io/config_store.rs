//! Experiment config snapshots written as `<dir>/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::core::nested::Nested;
use crate::core::recursive_map::to_display_tree;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Render a config tree as pretty JSON (4-space indent, trailing newline).
///
/// Type references and named objects are replaced by their names first.
/// A leaf with no JSON form left after that (an unnamed object) fails.
pub fn render_config(config: &Nested) -> Result<String> {
    let display = to_display_tree(config).context("map config to display values")?;
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    display
        .serialize(&mut serializer)
        .context("serialize config json")?;
    let mut out = String::from_utf8(buf).context("config json is not utf-8")?;
    out.push('\n');
    Ok(out)
}

/// Save `config` to `<dir>/config.json`, creating `dir` if needed.
///
/// An existing `config.json` is replaced.
pub fn save_config(config: &Nested, dir: &Path) -> Result<PathBuf> {
    info!(dir = %dir.display(), "saving config");
    let rendered = render_config(config)?;
    let path = dir.join(CONFIG_FILE_NAME);
    super::write_atomic(&path, &rendered)?;
    Ok(path)
}
