//! Flow registry persistence (`flows.json` under the storage root).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::flow::Flow;
use crate::error::FlowError;

/// Load the registered flows in creation order.
///
/// A missing file is first use, not an error: returns an empty list and
/// leaves the file uncreated. Malformed content is
/// [`FlowError::RegistryCorrupt`].
pub fn load_flows(path: &Path) -> Result<Vec<Flow>> {
    if !path.exists() {
        debug!(path = %path.display(), "no registry file yet");
        return Ok(Vec::new());
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("read registry {}", path.display()))?;
    let flows: Vec<Flow> =
        serde_json::from_str(&contents).with_context(|| FlowError::RegistryCorrupt {
            path: path.to_path_buf(),
        })?;
    debug!(count = flows.len(), "registry loaded");
    Ok(flows)
}

/// Atomically overwrite the registry (temp file + rename); no partial
/// write is ever left visible under the registry path.
pub fn save_flows(path: &Path, flows: &[Flow]) -> Result<()> {
    debug!(path = %path.display(), count = flows.len(), "writing registry");
    let write_failed = || FlowError::RegistryWriteFailed {
        path: path.to_path_buf(),
    };
    let mut buf = serde_json::to_string_pretty(flows).with_context(write_failed)?;
    buf.push('\n');

    let parent = path
        .parent()
        .with_context(|| format!("registry path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(write_failed)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &buf).with_context(write_failed)?;
    fs::rename(&tmp_path, path).with_context(write_failed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn flow(name: &str) -> Flow {
        Flow {
            name: name.to_string(),
            working_directory: PathBuf::from("/tmp"),
            script_path: PathBuf::from("commands").join(name).join("script.sh"),
        }
    }

    #[test]
    fn missing_registry_is_empty_and_stays_uncreated() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("flows.json");

        let flows = load_flows(&path).expect("load");
        assert!(flows.is_empty());
        assert!(!path.exists());
    }

    /// `save(load())` must be a byte-for-byte no-op.
    #[test]
    fn save_after_load_is_byte_identical() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("flows.json");
        let flows = vec![flow("a"), flow("b")];

        save_flows(&path, &flows).expect("save");
        let first = fs::read(&path).expect("read");

        let loaded = load_flows(&path).expect("load");
        assert_eq!(loaded, flows);
        save_flows(&path, &loaded).expect("save again");
        let second = fs::read(&path).expect("read again");
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_registry_is_registry_corrupt() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("flows.json");
        fs::write(&path, "{ not a list").expect("write");

        let err = load_flows(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FlowError>(),
            Some(FlowError::RegistryCorrupt { .. })
        ));
    }
}
