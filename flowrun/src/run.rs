//! Flow execution inside the flow's working directory.

use std::process::Command;

use anyhow::Result;
use tracing::info;

use crate::core::flow;
use crate::error::FlowError;
use crate::io::process::run_captured;
use crate::io::registry::load_flows;
use crate::io::settings::Settings;
use crate::io::workdir::WorkingDirGuard;

/// Captured output of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Informational output of the script.
    pub stdout: String,
    /// Diagnostic output. Non-empty stderr is a warning, not a failure;
    /// plenty of well-behaved tools write progress there.
    pub stderr: String,
}

/// Run a flow's script through the configured dialect's interpreter.
///
/// The working directory is switched for the duration of the child and
/// restored on every exit path. The child blocks until it exits; there is
/// no timeout. A non-zero exit is [`FlowError::ExecutionFailed`] carrying
/// the captured output.
pub fn run_flow(settings: &Settings, name: &str) -> Result<RunOutcome> {
    let layout = settings.layout();
    let dialect = settings.dialect()?;
    let flows = load_flows(&layout.registry_path)?;
    let flow = flow::find_by_name(&flows, name).ok_or_else(|| FlowError::FlowNotFound {
        name: name.to_string(),
    })?;
    let script_file = flow.script_file(&layout.root);
    let (program, args) = dialect.interpreter();

    info!(name = %flow.name, workdir = %flow.working_directory.display(), "running flow");
    let output = {
        let _workdir = WorkingDirGuard::change_to(&flow.working_directory)?;
        let mut cmd = Command::new(program);
        cmd.args(args).arg(&script_file);
        run_captured(cmd)?
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() {
        return Err(FlowError::ExecutionFailed {
            name: flow.name.clone(),
            code: output.status.code(),
            stdout,
            stderr,
        }
        .into());
    }
    Ok(RunOutcome { stdout, stderr })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create::{CreateRequest, create_flow};
    use crate::test_support::{ScriptedPrompter, TestEnv, process_lock};

    fn add(env: &TestEnv, name: &str, commands: &str) {
        let request = CreateRequest {
            name: Some(name.to_string()),
            working_dir: Some(env.workdir()),
            commands: Some(commands.to_string()),
        };
        create_flow(&env.settings, request, &mut ScriptedPrompter::default()).expect("create");
    }

    #[test]
    fn run_captures_stdout_and_restores_directory() {
        let _lock = process_lock();
        let env = TestEnv::initialized();
        add(&env, "greet", "echo hello,pwd");
        let before = std::env::current_dir().expect("current dir");

        let outcome = run_flow(&env.settings, "greet").expect("run");
        assert!(outcome.stdout.contains("hello"));
        assert_eq!(std::env::current_dir().expect("current dir"), before);
    }

    #[test]
    fn script_runs_inside_the_flow_working_directory() {
        let _lock = process_lock();
        let env = TestEnv::initialized();
        add(&env, "where", "pwd");

        let outcome = run_flow(&env.settings, "where").expect("run");
        let expected = std::fs::canonicalize(env.workdir()).expect("canonicalize");
        assert_eq!(outcome.stdout.trim(), expected.display().to_string());
    }

    #[test]
    fn failing_script_reports_execution_failed_and_restores_directory() {
        let _lock = process_lock();
        let env = TestEnv::initialized();
        add(&env, "boom", "echo before,exit 3");
        let before = std::env::current_dir().expect("current dir");

        let err = run_flow(&env.settings, "boom").unwrap_err();
        match err.downcast_ref::<FlowError>() {
            Some(FlowError::ExecutionFailed { code, stdout, .. }) => {
                assert_eq!(*code, Some(3));
                assert!(stdout.contains("before"));
            }
            other => panic!("expected ExecutionFailed, got {other:?}"),
        }
        assert_eq!(std::env::current_dir().expect("current dir"), before);
    }

    #[test]
    fn unknown_flow_is_flow_not_found() {
        let env = TestEnv::initialized();
        let err = run_flow(&env.settings, "ghost").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FlowError>(),
            Some(FlowError::FlowNotFound { .. })
        ));
    }
}
