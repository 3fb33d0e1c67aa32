//! Server registry: the single root of durable state.
//!
//! Holds every known server entry (and through it, sessions and cached
//! projects) in memory and writes the whole map through to the store after
//! each mutation. Stored under one key as a JSON object `name → ServerEntry`.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;
use quire_config::{Store, StoreError};
use quire_protocol::{Identity, Project};
use serde::{Deserialize, Serialize};

/// Store key of the registry blob.
pub const REGISTRY_KEY: &str = "quire.servers";

/// One known remote instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEntry {
    /// Unique, immutable display name
    pub name: String,
    /// Base address of the instance
    pub url: String,
    /// `None` = logged out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
}

impl ServerEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into(), session: None }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }
}

/// Authenticated state of one user on one server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub identity: Identity,
    /// Result of the last successful catalog fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, identity: Identity) -> Self {
        Self { user_id: user_id.into(), username: username.into(), identity, projects: None }
    }
}

/// Outcome of a registry mutation.
///
/// A failed save does not undo the mutation: the in-memory map stays
/// authoritative. The caller reports `save_error` once it holds no locks.
#[must_use]
#[derive(Debug)]
pub(crate) struct Write {
    pub applied: bool,
    pub save_error: Option<StoreError>,
}

impl Write {
    fn skipped() -> Self {
        Self { applied: false, save_error: None }
    }
}

/// In-memory registry with write-through persistence and per-server locks.
pub struct Registry {
    store: Arc<dyn Store>,
    servers: Mutex<BTreeMap<String, ServerEntry>>,
    // Pruned only when nobody else holds or waits on the lock.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Registry {
    /// Read the registry blob from `store`. An absent blob is an empty registry;
    /// an unreadable one is an error (writing over it would lose servers).
    pub fn load(store: Arc<dyn Store>) -> Result<Self, StoreError> {
        let mut servers: BTreeMap<String, ServerEntry> = match store.get(REGISTRY_KEY)? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| StoreError::Corrupt(format!("{}: {}", REGISTRY_KEY, e)))?,
            None => BTreeMap::new(),
        };

        // The map key is authoritative for the name.
        for (key, entry) in servers.iter_mut() {
            if entry.name != *key {
                log::warn!("Server entry '{}' stored under '{}', using the key", entry.name, key);
                entry.name = key.clone();
            }
        }

        log::debug!("Loaded {} server(s) from store", servers.len());
        Ok(Self {
            store,
            servers: Mutex::new(servers),
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// All entries, ordered by name.
    pub fn entries(&self) -> Vec<ServerEntry> {
        self.servers.lock().values().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<ServerEntry> {
        self.servers.lock().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.servers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lock serializing read → remote calls → write-back on one server name.
    ///
    /// Lock order: server lock first, then (briefly) the registry map.
    pub(crate) fn server_lock(&self, name: &str) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.lock().entry(name.to_string()).or_default())
    }

    /// Drop the lock of `name` if no other handle to it exists. Callers must
    /// have released their own handle first.
    pub(crate) fn prune_lock(&self, name: &str) {
        let mut locks = self.locks.lock();
        if locks.get(name).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(name);
        }
    }

    /// Insert a new entry. Not applied (no mutation) if the name is taken.
    pub(crate) fn insert(&self, entry: ServerEntry) -> Write {
        let mut servers = self.servers.lock();
        if servers.contains_key(&entry.name) {
            return Write::skipped();
        }
        servers.insert(entry.name.clone(), entry);
        self.persist(&servers)
    }

    /// Remove an entry. Not applied if absent.
    pub(crate) fn remove(&self, name: &str) -> Write {
        let mut servers = self.servers.lock();
        if servers.remove(name).is_none() {
            return Write::skipped();
        }
        self.persist(&servers)
    }

    /// Mutate one entry in place and persist. Not applied if the entry is
    /// gone, in which case nothing is written.
    pub(crate) fn update(&self, name: &str, mutate: impl FnOnce(&mut ServerEntry)) -> Write {
        let mut servers = self.servers.lock();
        let Some(entry) = servers.get_mut(name) else {
            log::warn!("Server '{}' disappeared before write-back, dropping update", name);
            return Write::skipped();
        };
        mutate(entry);
        self.persist(&servers)
    }

    /// Write the full map. Runs under the map lock, so it only logs; the
    /// failure travels back in the returned `Write`.
    fn persist(&self, servers: &BTreeMap<String, ServerEntry>) -> Write {
        let result = serde_json::to_value(servers)
            .map_err(|e| StoreError::Serialize(e.to_string()))
            .and_then(|value| self.store.set(REGISTRY_KEY, value));

        if let Err(e) = &result {
            log::error!("Failed to save server registry: {}", e);
        }
        Write { applied: true, save_error: result.err() }
    }
}
