//! Flow records and name validation.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FlowError;

/// A named, directory-scoped script registered with the tool.
///
/// Immutable after creation: `edit` opens the generated script in an
/// editor, it never rewrites the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flow {
    /// Unique name, `[A-Za-z0-9_-]+`, matched case-sensitively.
    pub name: String,
    /// Directory the script runs in. Checked at creation time only.
    pub working_directory: PathBuf,
    /// Script location relative to the storage root, so the registry
    /// survives relocating the root wholesale.
    pub script_path: PathBuf,
}

impl Flow {
    /// Absolute path of the generated script under `storage_root`.
    pub fn script_file(&self, storage_root: &Path) -> PathBuf {
        storage_root.join(&self.script_path)
    }

    /// The private directory owning the script file, if there is one.
    pub fn script_dir(&self, storage_root: &Path) -> Option<PathBuf> {
        let parent = self.script_path.parent()?;
        if parent.as_os_str().is_empty() {
            return None;
        }
        Some(storage_root.join(parent))
    }
}

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("name pattern should be valid"));

/// Validate a candidate flow name against the allowed pattern.
pub fn validate_name(name: &str) -> Result<(), FlowError> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(FlowError::InvalidFlowName {
            name: name.to_string(),
        })
    }
}

/// Exact, case-sensitive lookup.
pub fn find_by_name<'a>(flows: &'a [Flow], name: &str) -> Option<&'a Flow> {
    flows.iter().find(|flow| flow.name == name)
}

/// Position of `name` in registry order.
pub fn index_of_name(flows: &[Flow], name: &str) -> Option<usize> {
    flows.iter().position(|flow| flow.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(name: &str) -> Flow {
        Flow {
            name: name.to_string(),
            working_directory: PathBuf::from("/tmp"),
            script_path: PathBuf::from("commands").join(name).join("script.sh"),
        }
    }

    #[test]
    fn accepts_letters_digits_dash_underscore() {
        for name in ["deploy", "build-all", "x", "A_2-b"] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_empty_and_punctuated_names() {
        for name in ["", "two words", "semi;colon", "dot.name", "ünïcode"] {
            let err = validate_name(name).unwrap_err();
            assert!(matches!(err, FlowError::InvalidFlowName { .. }), "{name}");
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let flows = vec![flow("deploy")];
        assert!(find_by_name(&flows, "deploy").is_some());
        assert!(find_by_name(&flows, "Deploy").is_none());
        assert_eq!(index_of_name(&flows, "deploy"), Some(0));
        assert_eq!(index_of_name(&flows, "DEPLOY"), None);
    }

    #[test]
    fn script_paths_resolve_under_the_root() {
        let flow = flow("greet");
        let root = Path::new("/data/flows");
        assert_eq!(
            flow.script_file(root),
            Path::new("/data/flows/commands/greet/script.sh")
        );
        assert_eq!(
            flow.script_dir(root),
            Some(PathBuf::from("/data/flows/commands/greet"))
        );
    }
}
