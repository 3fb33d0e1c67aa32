//! Construction of client handles.
//!
//! The core never builds transports itself; it asks a [`Connector`] for a
//! handle bound to a server url (and, for realtime channels, an identity).

use std::sync::Arc;

use quire_protocol::Identity;

use crate::api::RemoteApi;

/// Live, project-scoped realtime connection. Ephemeral: rebuilt on demand,
/// never persisted.
pub trait RealtimeChannel: Send {
    /// Base address the channel connects to.
    fn url(&self) -> &str;

    /// Tear the connection down. Idempotent.
    fn close(&mut self);
}

/// Builds client handles for a server url.
pub trait Connector: Send + Sync {
    /// A fresh REST handle for `url`.
    fn api(&self, url: &str) -> Arc<dyn RemoteApi>;

    /// A realtime channel riding on `api` and authenticated as `identity`.
    fn channel(
        &self,
        url: &str,
        api: Arc<dyn RemoteApi>,
        identity: &Identity,
    ) -> Box<dyn RealtimeChannel>;
}
