//! Error taxonomy for expected failure conditions.
//!
//! Operations return [`anyhow::Result`]; conditions the CLI reports
//! specially are attached to the chain as [`FlowError`] values so the
//! top-level handler can downcast for exit codes and rendering. Unexpected
//! filesystem or subprocess failures ride the same chain untranslated.

use std::path::PathBuf;

use thiserror::Error;

/// Expected failure conditions, reported as one human-readable line.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("cannot read settings file {}", .path.display())]
    ConfigUnreadable { path: PathBuf },

    #[error("cannot write settings file {}", .path.display())]
    ConfigWriteFailed { path: PathBuf },

    #[error("flow registry {} is corrupt", .path.display())]
    RegistryCorrupt { path: PathBuf },

    #[error("cannot write flow registry {}", .path.display())]
    RegistryWriteFailed { path: PathBuf },

    #[error("unsupported shell dialect '{name}' (expected bash, zsh, powershell or cmd)")]
    UnsupportedDialect { name: String },

    #[error("no flow named '{name}'")]
    FlowNotFound { name: String },

    #[error("a flow named '{name}' already exists")]
    DuplicateFlowName { name: String },

    #[error("invalid flow name '{name}' (letters, digits, '-' and '_' only)")]
    InvalidFlowName { name: String },

    #[error("'{}' is not an existing directory", .path.display())]
    WorkingDirInvalid { path: PathBuf },

    #[error("flow '{name}' failed with {}", exit_label(.code))]
    ExecutionFailed {
        name: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => String::from("a termination signal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_failed_names_the_exit_code() {
        let err = FlowError::ExecutionFailed {
            name: "deploy".to_string(),
            code: Some(3),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "flow 'deploy' failed with exit code 3");
    }

    #[test]
    fn execution_failed_without_code_mentions_signal() {
        let err = FlowError::ExecutionFailed {
            name: "deploy".to_string(),
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(err.to_string().contains("termination signal"));
    }
}
