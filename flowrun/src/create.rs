//! Flow creation: validate, generate the script, then register.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::core::flow::{self, Flow};
use crate::core::script;
use crate::error::FlowError;
use crate::io::layout::{COMMANDS_DIR, StorageLayout};
use crate::io::prompt::Prompter;
use crate::io::registry::{load_flows, save_flows};
use crate::io::settings::Settings;

/// Values for a new flow; `None` fields are collected interactively.
#[derive(Debug, Default, Clone)]
pub struct CreateRequest {
    pub name: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub commands: Option<String>,
}

/// Register a new flow and write its script.
///
/// The uniqueness check and the append run against the same loaded
/// registry snapshot, and the registry write is the last step: a failed
/// directory or script write never leaves a record behind.
pub fn create_flow(
    settings: &Settings,
    request: CreateRequest,
    prompter: &mut dyn Prompter,
) -> Result<Flow> {
    let layout = settings.layout();
    let dialect = settings.dialect()?;
    let mut flows = load_flows(&layout.registry_path)?;

    let name = match request.name {
        Some(name) => {
            flow::validate_name(&name)?;
            ensure_unique(&flows, &name)?;
            name
        }
        None => collect_name(&flows, prompter)?,
    };
    let working_dir = match request.working_dir {
        Some(dir) => check_working_dir(&dir)?,
        None => collect_working_dir(settings, prompter)?,
    };
    let commands = match request.commands {
        Some(commands) => commands,
        None => prompter.input("commands (comma-separated)", None)?,
    };

    let source = script::generate(dialect, &commands);
    let flow_dir = layout.flow_dir(&name);
    fs::create_dir_all(&flow_dir)
        .with_context(|| format!("create flow directory {}", flow_dir.display()))?;
    let file_name = format!("script.{}", source.extension);
    let script_file = flow_dir.join(&file_name);
    fs::write(&script_file, &source.text)
        .with_context(|| format!("write script {}", script_file.display()))?;
    make_executable(&script_file)?;

    let script_path = relative_script_path(&layout, &name, &file_name);
    let flow = Flow {
        name,
        working_directory: working_dir,
        script_path,
    };
    flows.push(flow.clone());
    save_flows(&layout.registry_path, &flows)?;

    info!(name = %flow.name, script = %script_file.display(), "flow created");
    Ok(flow)
}

fn ensure_unique(flows: &[Flow], name: &str) -> Result<(), FlowError> {
    if flow::find_by_name(flows, name).is_some() {
        return Err(FlowError::DuplicateFlowName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn check_working_dir(dir: &Path) -> Result<PathBuf> {
    let resolved = fs::canonicalize(dir).map_err(|_| FlowError::WorkingDirInvalid {
        path: dir.to_path_buf(),
    })?;
    if !resolved.is_dir() {
        return Err(FlowError::WorkingDirInvalid {
            path: dir.to_path_buf(),
        }
        .into());
    }
    Ok(resolved)
}

fn collect_name(flows: &[Flow], prompter: &mut dyn Prompter) -> Result<String> {
    loop {
        let name = prompter.input("flow name", None)?;
        if let Err(err) = flow::validate_name(&name) {
            eprintln!("{err}");
            continue;
        }
        if flow::find_by_name(flows, &name).is_some() {
            eprintln!("a flow named '{name}' already exists");
            continue;
        }
        return Ok(name);
    }
}

fn collect_working_dir(settings: &Settings, prompter: &mut dyn Prompter) -> Result<PathBuf> {
    let hint = settings.default_flow_path.display().to_string();
    let default = if hint.is_empty() { None } else { Some(hint.as_str()) };
    loop {
        let answer = prompter.input("working directory", default)?;
        match check_working_dir(Path::new(&answer)) {
            Ok(dir) => return Ok(dir),
            Err(err) => eprintln!("{err:#}"),
        }
    }
}

/// Script location as stored in the registry: relative to the storage
/// root, so relocating the root keeps every record valid.
fn relative_script_path(layout: &StorageLayout, name: &str, file_name: &str) -> PathBuf {
    let commands = layout
        .commands_dir
        .strip_prefix(&layout.root)
        .unwrap_or_else(|_| Path::new(COMMANDS_DIR));
    commands.join(name).join(file_name)
}

#[cfg(unix)]
fn make_executable(script_file: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(script_file, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("set permissions on {}", script_file.display()))
}

#[cfg(not(unix))]
fn make_executable(_script_file: &Path) -> Result<()> {
    Ok(())
}
