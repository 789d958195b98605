//! Roster configuration stored in `roster.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use super::store::CsvStore;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

/// Roster configuration (TOML).
///
/// Missing fields default to the values the tool has always used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RosterConfig {
    /// CSV file holding the student records.
    pub store_path: PathBuf,

    /// Rewrite the store through a temp file + rename after an email update.
    /// When false the store is truncated and written in place.
    pub atomic_rewrite: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("synthetic_students.csv"),
            atomic_rewrite: true,
        }
    }
}

impl RosterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.store_path.as_os_str().is_empty() {
            return Err(anyhow!("store_path must not be empty"));
        }
        Ok(())
    }

    /// Build the store this config describes.
    pub fn store(&self) -> CsvStore {
        CsvStore::new(&self.store_path).with_atomic_rewrite(self.atomic_rewrite)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RosterConfig::default()`.
pub fn load_config(path: &Path) -> Result<RosterConfig> {
    if !path.exists() {
        let cfg = RosterConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RosterConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RosterConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, buf)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, RosterConfig::default());
        assert_eq!(cfg.store_path, PathBuf::from("synthetic_students.csv"));
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("roster.toml");
        let cfg = RosterConfig {
            store_path: PathBuf::from("data/students.csv"),
            atomic_rewrite: false,
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("roster.toml");
        fs::write(&path, "store_path = \"other.csv\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.store_path, PathBuf::from("other.csv"));
        assert!(cfg.atomic_rewrite);
    }

    #[test]
    fn empty_store_path_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("roster.toml");
        fs::write(&path, "store_path = \"\"\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("store_path"));
    }
}
