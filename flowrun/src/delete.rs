//! Flow deletion: script files first, then the registry record.

use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::flow;
use crate::error::FlowError;
use crate::io::registry::{load_flows, save_flows};
use crate::io::settings::Settings;

/// Remove a flow's script directory and its registry record, in that
/// order. If file removal fails the registry is left untouched, so the
/// flow still exists and the delete can be retried.
pub fn delete_flow(settings: &Settings, name: &str) -> Result<()> {
    let layout = settings.layout();
    let mut flows = load_flows(&layout.registry_path)?;
    let index = flow::index_of_name(&flows, name).ok_or_else(|| FlowError::FlowNotFound {
        name: name.to_string(),
    })?;

    let removed = flows[index].clone();
    match removed.script_dir(&layout.root) {
        Some(dir) if dir.exists() => {
            fs::remove_dir_all(&dir)
                .with_context(|| format!("remove flow directory {}", dir.display()))?;
        }
        _ => {
            let file = removed.script_file(&layout.root);
            if file.exists() {
                fs::remove_file(&file)
                    .with_context(|| format!("remove script {}", file.display()))?;
            }
        }
    }

    flows.remove(index);
    save_flows(&layout.registry_path, &flows)?;
    info!(name = %removed.name, "flow deleted");
    Ok(())
}
