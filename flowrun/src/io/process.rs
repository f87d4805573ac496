//! Child process helpers for running scripts and launching editors.

use std::env;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Run a prepared command to completion, capturing stdout and stderr.
///
/// Blocks until the child exits; flows have no timeout or cancellation.
/// Stdin is closed so a script that reads it sees end-of-file instead of
/// hanging on the terminal.
pub fn run_captured(mut cmd: Command) -> Result<Output> {
    cmd.stdin(Stdio::null());
    debug!(command = ?cmd, "spawning child process");
    let output = cmd.output().context("run command")?;
    debug!(
        exit_code = ?output.status.code(),
        stdout_bytes = output.stdout.len(),
        stderr_bytes = output.stderr.len(),
        "command finished"
    );
    Ok(output)
}

/// Editor used by `edit`: `$VISUAL`, then `$EDITOR`, then a platform
/// default.
pub fn editor_command() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

fn default_editor() -> &'static str {
    if cfg!(windows) { "notepad" } else { "vi" }
}

/// Launch `editor` on `file`, inheriting the terminal, and wait for it to
/// close. Only spawn failures are errors; a non-zero editor exit is not.
pub fn launch_editor(editor: &str, file: &Path) -> Result<()> {
    debug!(editor, file = %file.display(), "launching editor");
    let status = Command::new(editor)
        .arg(file)
        .status()
        .with_context(|| format!("launch editor {editor}"))?;
    if !status.success() {
        warn!(editor, exit_code = ?status.code(), "editor exited non-zero");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_captured_collects_stdout() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo captured");
        let output = run_captured(cmd).expect("run");
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "captured\n");
    }

    #[test]
    fn run_captured_reports_exit_status() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("exit 7");
        let output = run_captured(cmd).expect("run");
        assert_eq!(output.status.code(), Some(7));
    }

    #[test]
    fn launch_editor_tolerates_nonzero_exit() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("script.sh");
        std::fs::write(&file, "#!/bin/bash\n").expect("write");
        launch_editor("false", &file).expect("non-zero exit is not an error");
    }

    #[test]
    fn launch_editor_surfaces_spawn_failure() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("script.sh");
        std::fs::write(&file, "#!/bin/bash\n").expect("write");
        assert!(launch_editor("definitely-not-an-editor-9b1c", &file).is_err());
    }
}
