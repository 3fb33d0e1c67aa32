// Configuration and persistence

pub mod settings;
pub mod store;

pub use settings::Settings;
pub use store::{JsonFileStore, MemoryStore, Store, StoreError};

use std::path::PathBuf;

/// ~/.config/quire (or ./quire when the platform has no config dir)
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quire")
}
