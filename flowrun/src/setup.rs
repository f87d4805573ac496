//! Setup verbs: `init`, `reinit` and `reset-settings`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info};

use crate::core::dialect::ShellDialect;
use crate::io::layout::{COMMANDS_DIR, StorageLayout, default_storage_root};
use crate::io::prompt::Prompter;
use crate::io::registry::load_flows;
use crate::io::settings::{Settings, default_dialect_name, load_settings, save_settings};

/// Outcome of `init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// Settings were already initialized; nothing changed.
    AlreadyInitialized,
    /// Fresh settings collected and persisted.
    Initialized(Settings),
}

/// Outcome of `reinit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReinitOutcome {
    /// A new root was collected directly (no flows existed, or the old
    /// root was deleted first).
    Initialized(Settings),
    /// Existing flows were moved to a new root wholesale.
    Moved { from: PathBuf, settings: Settings },
    /// The user backed out; no state changed.
    Cancelled,
}

/// First-run setup. Collects the storage root, dialect and default flow
/// path, creates the storage directories, and persists the settings with
/// the initialized gate set. The registry file is not created here; it
/// appears with the first flow.
pub fn init(settings_path: &Path, prompter: &mut dyn Prompter) -> Result<InitOutcome> {
    if settings_path.exists() {
        let settings = load_settings(settings_path)?;
        if settings.initialized {
            return Ok(InitOutcome::AlreadyInitialized);
        }
    }
    let settings = collect_settings(prompter)?;
    save_settings(settings_path, &settings)?;
    info!(root = %settings.storage_root.display(), "initialized");
    Ok(InitOutcome::Initialized(settings))
}

/// Re-run setup over existing state.
///
/// With no flows this is plain collection. With flows the user picks what
/// happens to them: move the whole storage root, delete it, or cancel. A
/// failure after the move or delete has happened does not roll the
/// filesystem back; the error is surfaced instead.
pub fn reinitialize(settings_path: &Path, prompter: &mut dyn Prompter) -> Result<ReinitOutcome> {
    if !settings_path.exists() {
        let settings = collect_settings(prompter)?;
        save_settings(settings_path, &settings)?;
        return Ok(ReinitOutcome::Initialized(settings));
    }

    let settings = load_settings(settings_path)?;
    let flows = if settings.initialized {
        load_flows(&settings.layout().registry_path)?
    } else {
        Vec::new()
    };
    if flows.is_empty() {
        let settings = collect_settings(prompter)?;
        save_settings(settings_path, &settings)?;
        return Ok(ReinitOutcome::Initialized(settings));
    }

    match prompter.choose(
        "existing flows found; what should happen to them?",
        &["move", "delete", "cancel"],
        2,
    )? {
        0 => {
            let target = collect_storage_root(prompter)?;
            relocate_root(&settings.storage_root, &target)?;
            let mut updated = settings.clone();
            updated.storage_root = target.clone();
            updated.command_dir = target.join(COMMANDS_DIR);
            updated.initialized = true;
            save_settings(settings_path, &updated)?;
            info!(from = %settings.storage_root.display(), to = %target.display(), "storage root moved");
            Ok(ReinitOutcome::Moved {
                from: settings.storage_root,
                settings: updated,
            })
        }
        1 => {
            if settings.storage_root.exists() {
                fs::remove_dir_all(&settings.storage_root).with_context(|| {
                    format!(
                        "remove old storage root {}",
                        settings.storage_root.display()
                    )
                })?;
            }
            info!(root = %settings.storage_root.display(), "storage root deleted");
            let settings = collect_settings(prompter)?;
            save_settings(settings_path, &settings)?;
            Ok(ReinitOutcome::Initialized(settings))
        }
        _ => Ok(ReinitOutcome::Cancelled),
    }
}

/// Overwrite the settings file with defaults (`initialized = false`).
/// Flows on disk are untouched; works before `init` has ever run.
pub fn reset_settings(settings_path: &Path) -> Result<Settings> {
    let defaults = Settings::default();
    save_settings(settings_path, &defaults)?;
    info!("settings reset to defaults");
    Ok(defaults)
}

fn collect_settings(prompter: &mut dyn Prompter) -> Result<Settings> {
    let root = collect_storage_root(prompter)?;

    let names: Vec<&str> = ShellDialect::ALL.iter().map(|dialect| dialect.name()).collect();
    let default_index = names
        .iter()
        .position(|name| *name == default_dialect_name())
        .unwrap_or(0);
    let index = prompter.choose("script dialect", &names, default_index)?;
    let dialect = ShellDialect::ALL
        .get(index)
        .copied()
        .unwrap_or(ShellDialect::ALL[default_index]);

    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let home_hint = home.display().to_string();
    let default_flow_path = PathBuf::from(prompter.input(
        "default working directory for new flows",
        Some(&home_hint),
    )?);

    let layout = StorageLayout::new(&root);
    fs::create_dir_all(&layout.commands_dir)
        .with_context(|| format!("create command directory {}", layout.commands_dir.display()))?;

    Ok(Settings {
        storage_root: root,
        script_dialect: dialect.name().to_string(),
        default_flow_path,
        command_dir: layout.commands_dir,
        initialized: true,
    })
}

fn collect_storage_root(prompter: &mut dyn Prompter) -> Result<PathBuf> {
    let hint = default_storage_root().display().to_string();
    let answer = prompter.input("storage root for generated scripts", Some(&hint))?;
    // Script files are resolved against this root after a chdir, so it must
    // be absolute.
    std::path::absolute(Path::new(&answer))
        .with_context(|| format!("resolve storage root {answer}"))
}

/// Move the storage root wholesale, preserving its internal structure so
/// the registry's relative script paths stay valid. Falls back to
/// copy-then-remove when a plain rename fails (another filesystem).
fn relocate_root(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(anyhow!("target {} already exists", to.display()));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    if let Err(err) = fs::rename(from, to) {
        debug!(err = %err, "rename failed, copying instead");
        copy_dir_all(from, to)?;
        fs::remove_dir_all(from)
            .with_context(|| format!("remove old storage root {}", from.display()))?;
    }
    Ok(())
}

fn copy_dir_all(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to).with_context(|| format!("create directory {}", to.display()))?;
    let entries =
        fs::read_dir(from).with_context(|| format!("read directory {}", from.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry under {}", from.display()))?;
        let source = entry.path();
        let target = to.join(entry.file_name());
        if source.is_dir() {
            copy_dir_all(&source, &target)?;
        } else {
            fs::copy(&source, &target)
                .with_context(|| format!("copy {}", source.display()))?;
        }
    }
    Ok(())
}
