//! The orchestrator: one explicit state object per process.
//!
//! Owns the registry and the injected collaborators (store, connector,
//! notifier). Operations are grouped by concern in sibling modules as
//! further `impl Orchestrator` blocks:
//! - session.rs: login / logout / authenticate
//! - catalog.rs: project listing and cache
//! - entities.rs: file tree operations
//! - compile.rs, sync.rs, live.rs

use std::sync::Arc;

use quire_client::{Connector, RemoteApi};
use quire_config::{JsonFileStore, Settings, Store, StoreError};
use quire_protocol::{Identity, RemoteError};

use crate::notify::Notifier;
use crate::registry::{Registry, ServerEntry, Write};

/// A registry entry paired with a client handle for its url.
pub struct ServerHandle {
    pub entry: ServerEntry,
    pub api: Arc<dyn RemoteApi>,
}

/// Snapshot of a logged-in server, taken at the start of an operation.
pub(crate) struct Bound {
    pub api: Arc<dyn RemoteApi>,
    pub user_id: String,
    pub identity: Identity,
}

/// Result of a read → remote call → write-back cycle run under a server lock.
/// Reported to the notifier only after the lock is released.
pub(crate) enum Locked<T> {
    /// A precondition did not hold; nothing to report.
    Skipped,
    Failed(RemoteError),
    Done(T, Write),
}

pub struct Orchestrator {
    pub(crate) registry: Registry,
    pub(crate) connector: Arc<dyn Connector>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) settings: Settings,
}

impl Orchestrator {
    /// Build over an injected store with default settings.
    ///
    /// Fails only if the stored registry cannot be read.
    pub fn new(
        store: Arc<dyn Store>,
        connector: Arc<dyn Connector>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StoreError> {
        Self::with_settings(store, connector, notifier, Settings::default())
    }

    pub fn with_settings(
        store: Arc<dyn Store>,
        connector: Arc<dyn Connector>,
        notifier: Arc<dyn Notifier>,
        settings: Settings,
    ) -> Result<Self, StoreError> {
        let registry = Registry::load(store)?;
        Ok(Self { registry, connector, notifier, settings })
    }

    /// Build over the JSON state file named by `settings`.
    pub fn open(
        settings: Settings,
        connector: Arc<dyn Connector>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StoreError> {
        let path = settings.state_path();
        log::info!("Opening server registry at {}", path.display());
        let store: Arc<dyn Store> = Arc::new(JsonFileStore::new(path));
        Self::with_settings(store, connector, notifier, settings)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ========================================================================
    // Server Registry
    // ========================================================================

    /// Every known server with a client handle for its url.
    pub fn servers(&self) -> Vec<ServerHandle> {
        self.registry
            .entries()
            .into_iter()
            .map(|entry| {
                let api = self.connector.api(&entry.url);
                ServerHandle { entry, api }
            })
            .collect()
    }

    pub fn server(&self, name: &str) -> Option<ServerEntry> {
        self.registry.get(name)
    }

    pub fn is_logged_in(&self, name: &str) -> bool {
        self.registry.get(name).is_some_and(|e| e.is_logged_in())
    }

    /// Register a server with no session. `false` if the name is taken.
    pub fn add_server(&self, name: &str, url: &str) -> bool {
        let write = {
            let lock = self.registry.server_lock(name);
            let _guard = lock.lock();
            self.registry.insert(ServerEntry::new(name, url))
        };

        let added = self.saved(write);
        if added {
            log::info!("Added server '{}' at {}", name, url);
        } else {
            log::info!("Server '{}' already exists", name);
        }
        added
    }

    /// Forget a server. Its session is dropped locally; the server is not
    /// told (no remote logout). `false` if unknown.
    pub fn remove_server(&self, name: &str) -> bool {
        let write = {
            let lock = self.registry.server_lock(name);
            let _guard = lock.lock();
            self.registry.remove(name)
        };
        self.registry.prune_lock(name);

        let removed = self.saved(write);
        if removed {
            log::info!("Removed server '{}'", name);
        }
        removed
    }

    // ========================================================================
    // Helpers shared by the operation modules
    // ========================================================================

    pub(crate) fn api(&self, url: &str) -> Arc<dyn RemoteApi> {
        self.connector.api(url)
    }

    /// Snapshot the session of `name`, or `None` if it is unknown or
    /// logged out (the operation is then skipped without a remote call).
    pub(crate) fn bind(&self, name: &str, op: &str) -> Option<Bound> {
        let Some(entry) = self.registry.get(name) else {
            log::debug!("{}: unknown server '{}'", op, name);
            return None;
        };
        let Some(session) = entry.session else {
            log::debug!("{}: server '{}' is not logged in", op, name);
            return None;
        };
        Some(Bound {
            api: self.api(&entry.url),
            user_id: session.user_id,
            identity: session.identity,
        })
    }

    /// Report a failed save of a registry write and tell whether the write
    /// was applied. Call with no lock held: the notifier may re-enter.
    pub(crate) fn saved(&self, write: Write) -> bool {
        if let Some(e) = write.save_error {
            self.notifier.show_error(&format!("Failed to save server registry: {}", e));
        }
        write.applied
    }

    /// Log a remote failure and, if the server supplied a message, show it.
    /// Call with no lock held.
    pub(crate) fn surface(&self, op: &str, name: &str, err: &RemoteError) {
        log::warn!("{} on '{}' failed: {}", op, name, err);
        match err.user_message() {
            Some(msg) if self.settings.surface_remote_errors => self.notifier.show_error(msg),
            _ => {}
        }
    }
}
