//! Quire wire types, shared by the remote client contract and the core.
//!
//! Every remote operation answers with a tagged JSON object:
//!
//! ```text
//! { "type": "success", ...payload }
//! { "type": "<error kind>", "message": "optional human readable text" }
//! ```
//!
//! [`Response`] models that envelope and [`Response::into_result`] turns it
//! into a plain [`RemoteResult`], so call sites match on `Ok`/`Err` and on an
//! exhaustive [`RemoteErrorKind`].
//!
//! # Usage
//!
//! ```ignore
//! use quire_protocol::{Response, ProjectList};
//!
//! let resp: Response<ProjectList> = serde_json::from_str(&body)?;
//! let projects = resp.into_result()?.projects;
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Result Envelope
// =============================================================================

/// Result of a remote call once the envelope has been unpacked.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure category reported by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteErrorKind {
    /// Identity missing, expired or revoked
    Unauthorized,
    /// Authenticated, but not allowed to touch the resource
    Forbidden,
    /// Project, file or folder does not exist
    NotFound,
    /// Name clash or stale parent (e.g. upload into a deleted folder)
    Conflict,
    /// Server asked us to slow down
    RateLimited,
    /// Could not reach the server at all
    Network,
    /// Server-side failure (5xx, compile backend down, ...)
    Server,
    /// Anything the server did not classify
    Error,
}

impl RemoteErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            RemoteErrorKind::Unauthorized => "unauthorized",
            RemoteErrorKind::Forbidden => "forbidden",
            RemoteErrorKind::NotFound => "not found",
            RemoteErrorKind::Conflict => "conflict",
            RemoteErrorKind::RateLimited => "rate limited",
            RemoteErrorKind::Network => "network error",
            RemoteErrorKind::Server => "server error",
            RemoteErrorKind::Error => "error",
        }
    }
}

/// A failed remote call: kind plus the server's message, if it sent one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub message: Option<String>,
}

impl RemoteError {
    pub fn new(kind: RemoteErrorKind) -> Self {
        Self { kind, message: None }
    }

    pub fn with_message(kind: RemoteErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: Some(message.into()) }
    }

    /// The message to show a user. `None` when the server sent nothing useful.
    pub fn user_message(&self) -> Option<&str> {
        self.message.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.user_message() {
            Some(msg) => write!(f, "{}: {}", self.kind.label(), msg),
            None => write!(f, "{}", self.kind.label()),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Body of every non-success envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Tagged response envelope, one variant per `type` value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response<T> {
    Success(T),
    Unauthorized(ErrorBody),
    Forbidden(ErrorBody),
    NotFound(ErrorBody),
    Conflict(ErrorBody),
    RateLimited(ErrorBody),
    Network(ErrorBody),
    Server(ErrorBody),
    Error(ErrorBody),
}

impl<T> Response<T> {
    pub fn into_result(self) -> RemoteResult<T> {
        let (kind, body) = match self {
            Response::Success(payload) => return Ok(payload),
            Response::Unauthorized(b) => (RemoteErrorKind::Unauthorized, b),
            Response::Forbidden(b) => (RemoteErrorKind::Forbidden, b),
            Response::NotFound(b) => (RemoteErrorKind::NotFound, b),
            Response::Conflict(b) => (RemoteErrorKind::Conflict, b),
            Response::RateLimited(b) => (RemoteErrorKind::RateLimited, b),
            Response::Network(b) => (RemoteErrorKind::Network, b),
            Response::Server(b) => (RemoteErrorKind::Server, b),
            Response::Error(b) => (RemoteErrorKind::Error, b),
        };
        Err(RemoteError { kind, message: body.message })
    }
}

/// Payload of calls that only report success (logout, delete, rename, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {}

// =============================================================================
// Identity & Login
// =============================================================================

/// Opaque authentication bundle handed back at login.
///
/// Passed to every remote call once logged in. `Debug` is redacted; use
/// [`Identity::fingerprint`] when a log line needs to tell identities apart.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub cookies: String,
    #[serde(default)]
    pub csrf_token: String,
}

impl Identity {
    pub fn new(cookies: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self { cookies: cookies.into(), csrf_token: csrf_token.into() }
    }

    /// Short one-way digest, safe to log.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.cookies.as_bytes());
        hasher.update(b"\0");
        hasher.update(self.csrf_token.as_bytes());
        let hex = hasher.finalize().to_hex();
        format!("blake3:{}", &hex.as_str()[..12])
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity").field("fingerprint", &self.fingerprint()).finish()
    }
}

/// Account info returned alongside a fresh identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    #[serde(default)]
    pub user_email: String,
}

/// Success payload of `cookies_login` / `passport_login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSuccess {
    pub identity: Identity,
    pub user_info: UserInfo,
}

// =============================================================================
// Projects
// =============================================================================

/// How the session's user relates to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessLevel {
    Owner,
    Collaborator,
    ReadOnly,
}

/// User reference attached to project metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectUser {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// One project visible to a session.
///
/// `user_id` is not part of the server payload; the catalog stamps it with
/// the owning session's user after every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<ProjectUser>,
    #[serde(alias = "accessLevel")]
    pub source: AccessLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trashed: Option<bool>,
}

/// Success payload of `get_projects_json` / `user_projects_json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<Project>,
}

// =============================================================================
// Entities
// =============================================================================

/// Kind of node in a project's remote file tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Editable text document
    Doc,
    /// Binary file reference
    File,
    Folder,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Doc => "doc",
            EntityType::File => "file",
            EntityType::Folder => "folder",
        }
    }
}

/// File created by an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

/// Folder created by `add_folder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
}

// =============================================================================
// Compile & Sync
// =============================================================================

/// One artifact produced by a compile run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    pub path: String,
    pub url: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(default)]
    pub build: String,
}

/// Success payload of `compile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileOutput {
    /// Backend verdict ("success", "failure", "timedout", ...)
    pub status: String,
    #[serde(default)]
    pub output_files: Vec<OutputFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile_group: Option<String>,
}

impl CompileOutput {
    /// The main PDF, if the run produced one.
    pub fn pdf(&self) -> Option<&OutputFile> {
        self.output_files.iter().find(|f| f.file_type == "pdf")
    }
}

/// A box in the compiled PDF (source → output).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PdfPosition {
    pub page: u32,
    pub h: f64,
    pub v: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// A location in a source file (output → source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    pub file: String,
    pub line: u32,
    /// -1 when the backend only knows the line
    pub column: i32,
}

/// Success payload of `proxy_sync_code`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfTargets {
    #[serde(default)]
    pub pdf: Vec<PdfPosition>,
}

/// Success payload of `proxy_sync_pdf`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeTargets {
    #[serde(default)]
    pub code: Vec<SourcePosition>,
}

impl CodeTargets {
    /// The server lists candidates best-first; callers want a single answer.
    pub fn into_best(self) -> RemoteResult<SourcePosition> {
        self.code.into_iter().next().ok_or_else(|| {
            RemoteError::with_message(RemoteErrorKind::NotFound, "No source location for this point")
        })
    }
}
