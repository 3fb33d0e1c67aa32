//! Session-bound REST operations of a Quire server.
//!
//! Blocking by contract (no runtime required). Hosts with an event loop run
//! calls on a blocking pool, the same way they run file I/O.

use quire_protocol::{
    CompileOutput, EntityType, FileRef, FolderRef, Identity, LoginSuccess, PdfPosition, Project,
    RemoteResult, SourcePosition,
};

/// One server's API, as seen by the core.
///
/// Implementations translate the server's tagged envelope into
/// [`RemoteResult`] (see `quire_protocol::Response::into_result`). They never
/// panic on server-side failures.
pub trait RemoteApi: Send + Sync {
    /// Base address this handle talks to.
    fn url(&self) -> &str;

    // ── Session ─────────────────────────────────────────────────────

    /// Exchange a browser cookie string for an identity.
    fn cookies_login(&self, cookies: &str) -> RemoteResult<LoginSuccess>;

    /// Email/password login.
    fn passport_login(&self, email: &str, password: &str) -> RemoteResult<LoginSuccess>;

    fn logout(&self, identity: &Identity) -> RemoteResult<()>;

    // ── Projects ────────────────────────────────────────────────────

    /// Primary project listing.
    fn get_projects_json(&self, identity: &Identity) -> RemoteResult<Vec<Project>>;

    /// Older per-user listing, still served where the primary one is not.
    fn user_projects_json(&self, identity: &Identity) -> RemoteResult<Vec<Project>>;

    // ── File tree ───────────────────────────────────────────────────

    fn get_file(&self, identity: &Identity, project_id: &str, file_id: &str) -> RemoteResult<Vec<u8>>;

    fn upload_file(
        &self,
        identity: &Identity,
        project_id: &str,
        parent_folder_id: &str,
        file_name: &str,
        content: &[u8],
    ) -> RemoteResult<FileRef>;

    fn add_folder(
        &self,
        identity: &Identity,
        project_id: &str,
        folder_name: &str,
        parent_folder_id: &str,
    ) -> RemoteResult<FolderRef>;

    fn delete_entity(
        &self,
        identity: &Identity,
        project_id: &str,
        entity_type: EntityType,
        entity_id: &str,
    ) -> RemoteResult<()>;

    fn rename_entity(
        &self,
        identity: &Identity,
        project_id: &str,
        entity_type: EntityType,
        entity_id: &str,
        new_name: &str,
    ) -> RemoteResult<()>;

    fn move_entity(
        &self,
        identity: &Identity,
        project_id: &str,
        entity_type: EntityType,
        entity_id: &str,
        new_parent_id: &str,
    ) -> RemoteResult<()>;

    // ── Build ───────────────────────────────────────────────────────

    /// Drop cached intermediate build files (aux, bbl, ...).
    fn delete_aux_files(&self, identity: &Identity, project_id: &str) -> RemoteResult<()>;

    fn compile(&self, identity: &Identity, project_id: &str) -> RemoteResult<CompileOutput>;

    /// Source position → boxes in the compiled PDF.
    fn proxy_sync_code(
        &self,
        identity: &Identity,
        project_id: &str,
        file_path: &str,
        line: u32,
        column: u32,
    ) -> RemoteResult<Vec<PdfPosition>>;

    /// PDF point → source position.
    fn proxy_sync_pdf(
        &self,
        identity: &Identity,
        project_id: &str,
        page: u32,
        h: f64,
        v: f64,
    ) -> RemoteResult<SourcePosition>;
}
