//! Session manager: `LoggedOut → LoggedIn → LoggedOut` per server entry.

use quire_client::Credentials;
use quire_protocol::Identity;

use crate::orchestrator::{Locked, Orchestrator};
use crate::registry::Session;

/// Error type for session lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No server registered under this name
    UnknownServer(String),
    /// Server known, but logged out
    NotAuthenticated(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::UnknownServer(name) => write!(f, "Unknown server '{}'", name),
            SessionError::NotAuthenticated(name) => {
                write!(f, "Not authenticated on '{}', log in first", name)
            }
        }
    }
}

impl std::error::Error for SessionError {}

impl Orchestrator {
    /// Log in to `name`. Refused (`false`, no remote call) when the server is
    /// unknown or already has a session.
    pub fn login(&self, name: &str, credentials: &Credentials) -> bool {
        let outcome = {
            let lock = self.registry.server_lock(name);
            let _guard = lock.lock();
            self.login_locked(name, credentials)
        };

        match outcome {
            Locked::Skipped => false,
            Locked::Failed(err) => {
                self.surface("login", name, &err);
                false
            }
            Locked::Done((), write) => self.saved(write),
        }
    }

    fn login_locked(&self, name: &str, credentials: &Credentials) -> Locked<()> {
        let Some(entry) = self.registry.get(name) else {
            log::warn!("login: unknown server '{}'", name);
            return Locked::Skipped;
        };
        if entry.is_logged_in() {
            log::info!("login: '{}' already has a session", name);
            return Locked::Skipped;
        }

        let api = self.api(&entry.url);
        let result = match credentials {
            Credentials::Cookies(cookies) => api.cookies_login(cookies),
            Credentials::Password { email, password } => api.passport_login(email, password),
        };
        let login = match result {
            Ok(login) => login,
            Err(err) => return Locked::Failed(err),
        };

        let username = credentials
            .login_id()
            .map(str::to_string)
            .unwrap_or(login.user_info.user_email);
        log::info!(
            "Logged in to '{}' as {} via {} ({})",
            name,
            username,
            credentials.method(),
            login.identity.fingerprint()
        );
        let session = Session::new(login.user_info.user_id, username, login.identity);
        Locked::Done((), self.registry.update(name, |e| e.session = Some(session)))
    }

    /// Log out of `name`. `false` if it has no session; otherwise the session
    /// is cleared locally whatever the server answers.
    pub fn logout(&self, name: &str) -> bool {
        let write = {
            let lock = self.registry.server_lock(name);
            let _guard = lock.lock();

            let Some(entry) = self.registry.get(name) else {
                return false;
            };
            let Some(session) = entry.session else {
                log::debug!("logout: '{}' is not logged in", name);
                return false;
            };

            // Best effort: the identity may already be revoked. Local state must
            // not keep referencing it either way, so the outcome is ignored.
            if let Err(err) = self.api(&entry.url).logout(&session.identity) {
                log::debug!("Remote logout on '{}' failed (ignored): {}", name, err);
            }
            self.registry.update(name, |e| e.session = None)
        };

        log::info!("Logged out of '{}'", name);
        self.saved(write)
    }

    /// Identity of the active session. Never contacts the server.
    pub fn authenticate(&self, name: &str) -> Result<Identity, SessionError> {
        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| SessionError::UnknownServer(name.to_string()))?;
        entry
            .session
            .map(|s| s.identity)
            .ok_or_else(|| SessionError::NotAuthenticated(name.to_string()))
    }
}
