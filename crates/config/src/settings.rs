// Core settings
// Loaded from ~/.config/quire/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Store
    #[serde(rename = "store.path", skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,  // None = ~/.config/quire/state.json

    // Notifications
    #[serde(rename = "notifications.surfaceRemoteErrors")]
    pub surface_remote_errors: bool,

    // Catalog
    #[serde(rename = "catalog.fallbackToUserProjects")]
    pub catalog_fallback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: None,
            surface_remote_errors: true,
            catalog_fallback: true,
        }
    }
}

const DEFAULT_SETTINGS: &str = r#"{
    // Where the server registry (servers, sessions, cached projects) lives.
    // Omit to use the default location next to this file.
    // "store.path": "/path/to/state.json",

    // Show messages sent by the server when a remote call fails.
    // When false they are only written to the log.
    "notifications.surfaceRemoteErrors": true,

    // Retry project listing with the older per-user endpoint when the
    // primary listing fails.
    "catalog.fallbackToUserProjects": true
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        crate::config_dir().join("settings.json")
    }

    /// Load settings from the default path, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            create_default_file(&path);
            return Self::default();
        }
        Self::load_from(&path)
    }

    /// Load settings from `path`. Missing or invalid files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                log::warn!("Error parsing {}: {} (using default settings)", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Error reading {}: {}", path.display(), e);
                }
                Self::default()
            }
        }
    }

    /// Parse settings JSON, ignoring `//` comment lines.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Save current settings to the default path
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Effective path of the state store.
    pub fn state_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(crate::store::JsonFileStore::default_path)
    }
}

/// Write the commented default settings file
fn create_default_file(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            log::warn!("Error creating config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_SETTINGS) {
        log::warn!("Error writing default {}: {}", path.display(), e);
    }
}
