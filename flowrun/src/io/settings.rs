//! Persisted tool settings (`settings.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::dialect::ShellDialect;
use crate::error::FlowError;
use crate::io::layout::StorageLayout;

/// Persisted settings record.
///
/// Loaded once per invocation and passed down to the operation that needs
/// it; never a process-wide global. Missing fields default so older files
/// keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root directory holding the registry file and generated scripts.
    pub storage_root: PathBuf,
    /// Dialect used to generate and run scripts: `bash`, `zsh`,
    /// `powershell` or `cmd`. Kept as a string and parsed at use so a bad
    /// value is reported as its own condition, not a settings parse error.
    pub script_dialect: String,
    /// Default offered for a new flow's working directory.
    pub default_flow_path: PathBuf,
    /// Directory with one subdirectory per flow (`storage_root/commands`).
    pub command_dir: PathBuf,
    /// Gate for every verb except `init` and `reset-settings`.
    pub initialized: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::new(),
            script_dialect: default_dialect_name().to_string(),
            default_flow_path: PathBuf::new(),
            command_dir: PathBuf::new(),
            initialized: false,
        }
    }
}

impl Settings {
    /// Parse the configured dialect.
    pub fn dialect(&self) -> Result<ShellDialect, FlowError> {
        ShellDialect::from_name(&self.script_dialect)
    }

    /// Storage paths derived from this settings record.
    pub fn layout(&self) -> StorageLayout {
        let mut layout = StorageLayout::new(&self.storage_root);
        if !self.command_dir.as_os_str().is_empty() {
            layout.commands_dir = self.command_dir.clone();
        }
        layout
    }
}

/// Dialect offered by default on this platform.
pub fn default_dialect_name() -> &'static str {
    if cfg!(windows) { "powershell" } else { "bash" }
}

/// Load settings from disk. A missing or malformed file is
/// [`FlowError::ConfigUnreadable`].
pub fn load_settings(path: &Path) -> Result<Settings> {
    debug!(path = %path.display(), "loading settings");
    let contents = fs::read_to_string(path).with_context(|| FlowError::ConfigUnreadable {
        path: path.to_path_buf(),
    })?;
    let settings: Settings = toml::from_str(&contents).with_context(|| FlowError::ConfigUnreadable {
        path: path.to_path_buf(),
    })?;
    Ok(settings)
}

/// Atomically write settings to disk (temp file + rename).
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    debug!(path = %path.display(), initialized = settings.initialized, "writing settings");
    let buf = toml::to_string_pretty(settings).with_context(|| FlowError::ConfigWriteFailed {
        path: path.to_path_buf(),
    })?;
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_failed = || FlowError::ConfigWriteFailed {
        path: path.to_path_buf(),
    };
    let parent = path
        .parent()
        .with_context(|| format!("settings path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(write_failed)?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents).with_context(write_failed)?;
    fs::rename(&tmp_path, path).with_context(write_failed)?;
    Ok(())
}

/// Load settings and check the `initialized` gate.
///
/// Returns `None` when the settings file does not exist yet or
/// `initialized` is false: callers print the not-initialized notice and
/// perform no work. The registry file is never touched on this path.
pub fn load_initialized(path: &Path) -> Result<Option<Settings>> {
    if !path.exists() {
        return Ok(None);
    }
    let settings = load_settings(path)?;
    if !settings.initialized {
        return Ok(None);
    }
    Ok(Some(settings))
}
