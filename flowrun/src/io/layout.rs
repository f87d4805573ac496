//! Canonical locations for settings, the registry and per-flow scripts.

use std::env;
use std::path::PathBuf;

/// Settings file name.
pub const SETTINGS_FILE: &str = "settings.toml";
/// Registry file name under the storage root.
pub const REGISTRY_FILE: &str = "flows.json";
/// Command area under the storage root, one subdirectory per flow.
pub const COMMANDS_DIR: &str = "commands";

/// Paths owned by the tool under a storage root.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub root: PathBuf,
    pub commands_dir: PathBuf,
    pub registry_path: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            commands_dir: root.join(COMMANDS_DIR),
            registry_path: root.join(REGISTRY_FILE),
            root,
        }
    }

    /// The private directory for a flow's generated script.
    pub fn flow_dir(&self, name: &str) -> PathBuf {
        self.commands_dir.join(name)
    }
}

/// Default settings file location: `<config dir>/flowrun/settings.toml`.
///
/// `FLOWRUN_CONFIG_DIR` overrides the directory when set; without a
/// platform config dir the settings land in a local `.flowrun` directory.
pub fn default_settings_path() -> PathBuf {
    if let Ok(dir) = env::var("FLOWRUN_CONFIG_DIR") {
        return PathBuf::from(dir).join(SETTINGS_FILE);
    }
    match dirs::config_dir() {
        Some(dir) => dir.join("flowrun").join(SETTINGS_FILE),
        None => PathBuf::from(".flowrun").join(SETTINGS_FILE),
    }
}

/// Default storage root offered by `init`.
pub fn default_storage_root() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("flowrun"),
        None => PathBuf::from(".flowrun").join("data"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn layout_derives_paths_from_the_root() {
        let layout = StorageLayout::new("/data/flows");
        assert_eq!(layout.root, Path::new("/data/flows"));
        assert_eq!(layout.commands_dir, Path::new("/data/flows/commands"));
        assert_eq!(layout.registry_path, Path::new("/data/flows/flows.json"));
        assert_eq!(layout.flow_dir("greet"), Path::new("/data/flows/commands/greet"));
    }
}
