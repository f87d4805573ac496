//! Test-only helpers: scripted prompts and a disposable storage setup.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Result, anyhow};

use crate::io::layout::StorageLayout;
use crate::io::prompt::Prompter;
use crate::io::settings::{Settings, save_settings};

/// Initialized settings backed by a temp directory.
pub struct TestEnv {
    pub temp: tempfile::TempDir,
    pub settings_path: PathBuf,
    pub settings: Settings,
}

impl TestEnv {
    /// A ready-to-use setup: bash dialect, storage root and a working
    /// directory created under one temp dir.
    pub fn initialized() -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("store");
        let layout = StorageLayout::new(&root);
        std::fs::create_dir_all(&layout.commands_dir).expect("create commands dir");
        let workdir = temp.path().join("work");
        std::fs::create_dir_all(&workdir).expect("create workdir");

        let settings = Settings {
            storage_root: root,
            script_dialect: "bash".to_string(),
            default_flow_path: workdir,
            command_dir: layout.commands_dir,
            initialized: true,
        };
        let settings_path = temp.path().join("settings.toml");
        save_settings(&settings_path, &settings).expect("save settings");

        Self {
            temp,
            settings_path,
            settings,
        }
    }

    pub fn layout(&self) -> StorageLayout {
        self.settings.layout()
    }

    pub fn workdir(&self) -> PathBuf {
        self.settings.default_flow_path.clone()
    }
}

/// Prompter that replays scripted answers. An empty string means "accept
/// the default", mirroring a user pressing enter.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I>(answers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, label: &str, default: Option<&str>) -> Result<String> {
        let answer = self
            .answers
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer for '{label}'"))?;
        if answer.is_empty() {
            return default
                .map(str::to_string)
                .ok_or_else(|| anyhow!("no default to accept for '{label}'"));
        }
        Ok(answer)
    }

    fn choose(&mut self, label: &str, options: &[&str], default: usize) -> Result<usize> {
        let answer = self
            .answers
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer for '{label}'"))?;
        if answer.is_empty() {
            return Ok(default);
        }
        options
            .iter()
            .position(|option| *option == answer)
            .ok_or_else(|| anyhow!("'{answer}' is not an option for '{label}'"))
    }
}

/// Serializes tests that touch process-global state (the working
/// directory).
pub fn process_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
