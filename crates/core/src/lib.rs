//! Quire core: servers, sessions and everything done through them.
//!
//! One [`Orchestrator`] per process owns the server registry (servers,
//! sessions, cached project catalogs) and mediates every remote operation.
//!
//! Failures never escape as panics or fatal errors: preconditions that do not
//! hold yield `false` / `None` / an empty list, remote failures are logged
//! and their message handed to the [`Notifier`].
//!
//! Blocking by design. Operations that read-modify-write a server entry
//! (login, logout, project fetch, removal) are serialized per server name.

mod catalog;
mod compile;
mod entities;
mod live;
mod notify;
mod orchestrator;
mod registry;
mod session;
mod sync;

pub use live::LiveSession;
pub use notify::{LogNotifier, Notifier};
pub use orchestrator::{Orchestrator, ServerHandle};
pub use registry::{Registry, ServerEntry, Session, REGISTRY_KEY};
pub use session::SessionError;

pub use quire_client::{Connector, Credentials, RealtimeChannel, RemoteApi};
pub use quire_config::{JsonFileStore, MemoryStore, Settings, Store, StoreError};
pub use quire_protocol::{
    AccessLevel, CompileOutput, EntityType, FileRef, FolderRef, Identity, PdfPosition, Project,
    RemoteError, RemoteErrorKind, SourcePosition,
};
