//! Loop configuration and experiment config files (TOML).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::nested::{Mapping, Nested};

/// Control loop configuration (TOML).
///
/// Missing fields default to the values used by the teleoperation
/// experiments: 300 steps per trajectory, trials `0..500`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoopConfig {
    /// Steps per trajectory.
    pub horizon: u32,

    /// First trial index (inclusive).
    pub start_index: u32,

    /// Last trial index (exclusive).
    pub end_index: u32,

    /// Emit a debug event every `log_every` steps. `0` disables it.
    pub log_every: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            horizon: 300,
            start_index: 0,
            end_index: 500,
            log_every: 0,
        }
    }
}

impl LoopConfig {
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(anyhow!("horizon must be > 0"));
        }
        if self.start_index >= self.end_index {
            return Err(anyhow!(
                "start_index {} must be < end_index {}",
                self.start_index,
                self.end_index
            ));
        }
        Ok(())
    }
}

/// Load loop config from a TOML file.
///
/// If the file is missing, returns `LoopConfig::default()`.
pub fn load_config(path: &Path) -> Result<LoopConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "loop config missing, using defaults");
        let cfg = LoopConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LoopConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write loop config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &LoopConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}

/// Read an experiment config file into a [`Nested`] tree.
///
/// Tables become mappings in file order, arrays become lists. An empty file
/// yields an empty mapping.
pub fn read_config_tree(path: &Path) -> Result<Nested> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(Nested::Map(Mapping::new()));
    }
    let table: toml::Table =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(Nested::Map(table_to_mapping(table)))
}

fn table_to_mapping(table: toml::Table) -> Mapping {
    table
        .into_iter()
        .map(|(key, value)| (key, toml_to_nested(value)))
        .collect()
}

fn toml_to_nested(value: toml::Value) -> Nested {
    match value {
        toml::Value::String(v) => Nested::from(v),
        toml::Value::Integer(v) => Nested::from(v),
        toml::Value::Float(v) => Nested::from(v),
        toml::Value::Boolean(v) => Nested::from(v),
        toml::Value::Datetime(v) => Nested::from(v.to_string()),
        toml::Value::Array(items) => Nested::List(items.into_iter().map(toml_to_nested).collect()),
        toml::Value::Table(table) => Nested::Map(table_to_mapping(table)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, LoopConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("loop.toml");
        let cfg = LoopConfig {
            horizon: 40,
            start_index: 3,
            end_index: 7,
            log_every: 10,
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("loop.toml");
        fs::write(&path, "horizon = 25\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.horizon, 25);
        assert_eq!(cfg.end_index, 500);
    }

    #[test]
    fn rejects_empty_trial_range() {
        let cfg = LoopConfig {
            start_index: 5,
            end_index: 5,
            ..LoopConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("start_index"));
    }

    #[test]
    fn read_tree_keeps_file_order() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("conf.toml");
        fs::write(
            &path,
            "start_index = 0\nsave_format = [\"raw\"]\n\n[agent]\nT = 300\nvideo_format = \"mp4\"\n",
        )
        .expect("write");

        let tree = read_config_tree(&path).expect("read");
        let root = tree.as_mapping().expect("mapping");
        assert_eq!(
            root.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["start_index", "save_format", "agent"]
        );
        let agent = root.get("agent").and_then(Nested::as_mapping).expect("agent");
        assert_eq!(agent.get("T").and_then(Nested::as_i64), Some(300));
        assert_eq!(
            root.get("save_format"),
            Some(&Nested::List(vec![Nested::from("raw")]))
        );
    }

    #[test]
    fn read_tree_of_empty_file_is_empty_mapping() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("empty.toml");
        fs::write(&path, "\n").expect("write");
        assert_eq!(
            read_config_tree(&path).expect("read"),
            Nested::Map(Mapping::new())
        );
    }
}
