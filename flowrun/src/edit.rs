//! Open a flow's script in the user's editor, scoped to its directory.

use anyhow::Result;
use tracing::info;

use crate::core::flow;
use crate::error::FlowError;
use crate::io::process::{editor_command, launch_editor};
use crate::io::registry::load_flows;
use crate::io::settings::Settings;
use crate::io::workdir::WorkingDirGuard;

/// Open the flow's script in `$VISUAL`/`$EDITOR`.
///
/// Same directory-scoping discipline as running the flow; the record is
/// never rewritten. Only editor spawn failures are surfaced.
pub fn edit_flow(settings: &Settings, name: &str) -> Result<()> {
    edit_flow_with(settings, name, &editor_command())
}

/// Like [`edit_flow`] with an explicit editor program.
pub fn edit_flow_with(settings: &Settings, name: &str, editor: &str) -> Result<()> {
    let layout = settings.layout();
    let flows = load_flows(&layout.registry_path)?;
    let flow = flow::find_by_name(&flows, name).ok_or_else(|| FlowError::FlowNotFound {
        name: name.to_string(),
    })?;
    let script_file = flow.script_file(&layout.root);

    info!(name = %flow.name, script = %script_file.display(), "editing flow");
    let _workdir = WorkingDirGuard::change_to(&flow.working_directory)?;
    launch_editor(editor, &script_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create::{CreateRequest, create_flow};
    use crate::test_support::{ScriptedPrompter, TestEnv, process_lock};

    #[test]
    fn edit_runs_the_editor_and_restores_directory() {
        let _lock = process_lock();
        let env = TestEnv::initialized();
        let request = CreateRequest {
            name: Some("greet".to_string()),
            working_dir: Some(env.workdir()),
            commands: Some("echo hi".to_string()),
        };
        create_flow(&env.settings, request, &mut ScriptedPrompter::default()).expect("create");
        let before = std::env::current_dir().expect("current dir");

        edit_flow_with(&env.settings, "greet", "true").expect("edit");
        assert_eq!(std::env::current_dir().expect("current dir"), before);
    }

    #[test]
    fn unknown_flow_is_flow_not_found() {
        let env = TestEnv::initialized();
        let err = edit_flow_with(&env.settings, "ghost", "true").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FlowError>(),
            Some(FlowError::FlowNotFound { .. })
        ));
    }
}
