//! Scripted remote, connector and notifier shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use quire_core::{
    AccessLevel, CompileOutput, Connector, EntityType, FileRef, FolderRef, Identity, MemoryStore,
    Notifier, Orchestrator, PdfPosition, Project, RealtimeChannel, RemoteApi, RemoteError,
    RemoteErrorKind, Settings, SourcePosition, Store, StoreError,
};
use quire_protocol::{LoginSuccess, RemoteResult, UserInfo};
use serde_json::Value;

/// Remote that records every call and fails the operations it is told to.
pub struct MockRemote {
    url: String,
    calls: Mutex<Vec<&'static str>>,
    failures: Mutex<HashMap<&'static str, RemoteError>>,
    projects: Mutex<Vec<Project>>,
    user_projects: Mutex<Vec<Project>>,
    user_id: Mutex<String>,
    login_delay: Mutex<Option<Duration>>,
    list_delay: Mutex<Option<Duration>>,
}

impl MockRemote {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            projects: Mutex::new(Vec::new()),
            user_projects: Mutex::new(Vec::new()),
            user_id: Mutex::new("u1".to_string()),
            login_delay: Mutex::new(None),
            list_delay: Mutex::new(None),
        }
    }

    /// Make `op` fail with a server message.
    pub fn fail(&self, op: &'static str, message: &str) {
        self.failures
            .lock()
            .insert(op, RemoteError::with_message(RemoteErrorKind::Server, message));
    }

    /// Make `op` fail without any message.
    pub fn fail_silently(&self, op: &'static str) {
        self.failures.lock().insert(op, RemoteError::new(RemoteErrorKind::Network));
    }

    pub fn recover(&self, op: &'static str) {
        self.failures.lock().remove(op);
    }

    pub fn set_projects(&self, projects: Vec<Project>) {
        *self.projects.lock() = projects;
    }

    pub fn set_user_projects(&self, projects: Vec<Project>) {
        *self.user_projects.lock() = projects;
    }

    pub fn set_user_id(&self, user_id: &str) {
        *self.user_id.lock() = user_id.to_string();
    }

    pub fn set_login_delay(&self, delay: Duration) {
        *self.login_delay.lock() = Some(delay);
    }

    pub fn set_list_delay(&self, delay: Duration) {
        *self.list_delay.lock() = Some(delay);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.lock().iter().filter(|c| **c == op).count()
    }

    fn record(&self, op: &'static str) -> RemoteResult<()> {
        self.calls.lock().push(op);
        match self.failures.lock().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn login_success(&self, cookies: String, email: &str) -> LoginSuccess {
        if let Some(delay) = *self.login_delay.lock() {
            std::thread::sleep(delay);
        }
        LoginSuccess {
            identity: Identity::new(cookies, "csrf-1"),
            user_info: UserInfo {
                user_id: self.user_id.lock().clone(),
                user_email: email.to_string(),
            },
        }
    }
}

impl RemoteApi for MockRemote {
    fn url(&self) -> &str {
        &self.url
    }

    fn cookies_login(&self, cookies: &str) -> RemoteResult<LoginSuccess> {
        self.record("cookies_login")?;
        Ok(self.login_success(cookies.to_string(), "cookie-user@lab.example"))
    }

    fn passport_login(&self, email: &str, _password: &str) -> RemoteResult<LoginSuccess> {
        self.record("passport_login")?;
        Ok(self.login_success(format!("sid={}", email), email))
    }

    fn logout(&self, _identity: &Identity) -> RemoteResult<()> {
        self.record("logout")
    }

    fn get_projects_json(&self, _identity: &Identity) -> RemoteResult<Vec<Project>> {
        self.record("get_projects_json")?;
        if let Some(delay) = *self.list_delay.lock() {
            std::thread::sleep(delay);
        }
        Ok(self.projects.lock().clone())
    }

    fn user_projects_json(&self, _identity: &Identity) -> RemoteResult<Vec<Project>> {
        self.record("user_projects_json")?;
        Ok(self.user_projects.lock().clone())
    }

    fn get_file(&self, _identity: &Identity, _project_id: &str, file_id: &str) -> RemoteResult<Vec<u8>> {
        self.record("get_file")?;
        Ok(format!("contents of {}", file_id).into_bytes())
    }

    fn upload_file(
        &self,
        _identity: &Identity,
        _project_id: &str,
        _parent_folder_id: &str,
        file_name: &str,
        _content: &[u8],
    ) -> RemoteResult<FileRef> {
        self.record("upload_file")?;
        Ok(FileRef { id: "file-1".into(), name: file_name.into(), created: None })
    }

    fn add_folder(
        &self,
        _identity: &Identity,
        _project_id: &str,
        folder_name: &str,
        _parent_folder_id: &str,
    ) -> RemoteResult<FolderRef> {
        self.record("add_folder")?;
        Ok(FolderRef { id: "folder-1".into(), name: folder_name.into() })
    }

    fn delete_entity(&self, _: &Identity, _: &str, _: EntityType, _: &str) -> RemoteResult<()> {
        self.record("delete_entity")
    }

    fn rename_entity(&self, _: &Identity, _: &str, _: EntityType, _: &str, _: &str) -> RemoteResult<()> {
        self.record("rename_entity")
    }

    fn move_entity(&self, _: &Identity, _: &str, _: EntityType, _: &str, _: &str) -> RemoteResult<()> {
        self.record("move_entity")
    }

    fn delete_aux_files(&self, _identity: &Identity, _project_id: &str) -> RemoteResult<()> {
        self.record("delete_aux_files")
    }

    fn compile(&self, _identity: &Identity, _project_id: &str) -> RemoteResult<CompileOutput> {
        self.record("compile")?;
        Ok(CompileOutput { status: "success".into(), output_files: Vec::new(), compile_group: None })
    }

    fn proxy_sync_code(
        &self,
        _identity: &Identity,
        _project_id: &str,
        _file_path: &str,
        _line: u32,
        _column: u32,
    ) -> RemoteResult<Vec<PdfPosition>> {
        self.record("proxy_sync_code")?;
        Ok(vec![PdfPosition { page: 1, h: 72.0, v: 144.0, width: 300.0, height: 10.0 }])
    }

    fn proxy_sync_pdf(
        &self,
        _identity: &Identity,
        _project_id: &str,
        _page: u32,
        _h: f64,
        _v: f64,
    ) -> RemoteResult<SourcePosition> {
        self.record("proxy_sync_pdf")?;
        Ok(SourcePosition { file: "main.tex".into(), line: 12, column: -1 })
    }
}

/// Channel that remembers which identity opened it.
pub struct MockChannel {
    url: String,
    pub fingerprint: String,
    closed: bool,
}

impl RealtimeChannel for MockChannel {
    fn url(&self) -> &str {
        &self.url
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Hands out the same scripted remote for every url.
pub struct MockConnector {
    pub remote: Arc<MockRemote>,
    pub apis_built: Mutex<Vec<String>>,
    pub channels_built: Mutex<Vec<(String, String)>>,
}

impl Connector for MockConnector {
    fn api(&self, url: &str) -> Arc<dyn RemoteApi> {
        self.apis_built.lock().push(url.to_string());
        let api: Arc<dyn RemoteApi> = self.remote.clone();
        api
    }

    fn channel(&self, url: &str, _api: Arc<dyn RemoteApi>, identity: &Identity) -> Box<dyn RealtimeChannel> {
        self.channels_built.lock().push((url.to_string(), identity.fingerprint()));
        Box::new(MockChannel { url: url.to_string(), fingerprint: identity.fingerprint(), closed: false })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_error(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Store whose writes can be switched off.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    pub fail_writes: Mutex<bool>,
}

impl Store for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        if *self.fail_writes.lock() {
            return Err(StoreError::Io("disk full".into()));
        }
        self.inner.set(key, value)
    }
}

pub struct Harness {
    pub core: Orchestrator,
    pub remote: Arc<MockRemote>,
    pub connector: Arc<MockConnector>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: Arc<dyn Store>,
}

pub fn harness() -> Harness {
    harness_with(Arc::new(MemoryStore::new()), Settings::default())
}

pub fn connector() -> Arc<MockConnector> {
    Arc::new(MockConnector {
        remote: Arc::new(MockRemote::new("https://lab.example")),
        apis_built: Mutex::new(Vec::new()),
        channels_built: Mutex::new(Vec::new()),
    })
}

pub fn harness_with(store: Arc<dyn Store>, settings: Settings) -> Harness {
    let connector = connector();
    let remote = Arc::clone(&connector.remote);
    let notifier = Arc::new(RecordingNotifier::default());
    let core = Orchestrator::with_settings(
        Arc::clone(&store),
        connector.clone(),
        notifier.clone(),
        settings,
    )
    .expect("empty store loads");
    Harness { core, remote, connector, notifier, store }
}

/// Harness with `lab` registered and logged in as ada@lab.example.
pub fn logged_in() -> Harness {
    let h = harness();
    assert!(h.core.add_server("lab", "https://lab.example"));
    assert!(h.core.login("lab", &quire_core::Credentials::password("ada@lab.example", "pw")));
    h
}

pub fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.into(),
        user_id: String::new(),
        name: name.into(),
        last_updated: "2024-05-01T10:00:00Z".into(),
        last_updated_by: None,
        source: AccessLevel::Owner,
        archived: None,
        trashed: None,
    }
}
