//! Flow listing in registry (creation) order.

use anyhow::Result;

use crate::io::registry::load_flows;
use crate::io::settings::Settings;

/// Names of all registered flows, in creation order. No filtering, no
/// sorting.
pub fn list_flows(settings: &Settings) -> Result<Vec<String>> {
    let flows = load_flows(&settings.layout().registry_path)?;
    Ok(flows.into_iter().map(|flow| flow.name).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create::{CreateRequest, create_flow};
    use crate::test_support::{ScriptedPrompter, TestEnv};

    fn add(env: &TestEnv, name: &str) {
        let request = CreateRequest {
            name: Some(name.to_string()),
            working_dir: Some(env.workdir()),
            commands: Some("echo hi".to_string()),
        };
        create_flow(&env.settings, request, &mut ScriptedPrompter::default()).expect("create");
    }

    #[test]
    fn names_come_back_in_creation_order() {
        let env = TestEnv::initialized();
        add(&env, "zulu");
        add(&env, "alpha");

        let names = list_flows(&env.settings).expect("list");
        assert_eq!(names, vec!["zulu".to_string(), "alpha".to_string()]);
    }

    #[test]
    fn empty_registry_lists_nothing_and_creates_no_file() {
        let env = TestEnv::initialized();
        let names = list_flows(&env.settings).expect("list");
        assert!(names.is_empty());
        assert!(!env.layout().registry_path.exists());
    }
}
