//! Realtime sessions. Ephemeral: built on demand, never persisted.

use std::sync::Arc;

use quire_client::{RealtimeChannel, RemoteApi};

use crate::orchestrator::Orchestrator;

/// A fresh client handle and the realtime channel riding on it, both bound
/// to the same identity.
pub struct LiveSession {
    pub api: Arc<dyn RemoteApi>,
    pub channel: Box<dyn RealtimeChannel>,
}

impl Orchestrator {
    /// `None` when `name` is unknown or logged out.
    pub fn create_live_session(&self, name: &str) -> Option<LiveSession> {
        let entry = self.registry.get(name)?;
        let Some(session) = entry.session else {
            log::debug!("create_live_session: '{}' is not logged in", name);
            return None;
        };

        let api = self.connector.api(&entry.url);
        let channel = self.connector.channel(&entry.url, Arc::clone(&api), &session.identity);
        log::debug!("Opened realtime channel to '{}' ({})", name, session.identity.fingerprint());
        Some(LiveSession { api, channel })
    }
}
