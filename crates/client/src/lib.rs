//! Remote client contracts shared between the core and transport crates.
//!
//! This crate is the single source of truth for what the core may ask of a
//! server: login, logout, project listing, file tree edits, compile, sync,
//! and realtime channel construction.
//!
//! No HTTP. No sockets. Transports implement these traits.

mod api;
mod auth;
mod connector;

pub use api::RemoteApi;
pub use auth::Credentials;
pub use connector::{Connector, RealtimeChannel};

pub use quire_protocol::{
    CompileOutput, EntityType, FileRef, FolderRef, Identity, LoginSuccess, PdfPosition, Project,
    RemoteError, RemoteErrorKind, RemoteResult, SourcePosition, UserInfo,
};
