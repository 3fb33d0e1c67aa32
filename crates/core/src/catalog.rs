//! Project catalog: remote listing with fallback, cached on the session.

use quire_protocol::Project;

use crate::orchestrator::{Locked, Orchestrator};

impl Orchestrator {
    /// Fetch the projects visible to the session on `name`.
    ///
    /// Logged out → empty, no error. The primary listing is tried first, the
    /// per-user listing second. On success every project is stamped with the
    /// session's user id and replaces the cache. If both fail, only the last
    /// failure is surfaced and the cache is left as it was.
    pub fn fetch_projects(&self, name: &str) -> Vec<Project> {
        let outcome = {
            let lock = self.registry.server_lock(name);
            let _guard = lock.lock();
            self.fetch_locked(name)
        };

        match outcome {
            Locked::Skipped => Vec::new(),
            Locked::Failed(err) => {
                self.surface("list projects", name, &err);
                Vec::new()
            }
            Locked::Done(projects, write) => {
                self.saved(write);
                projects
            }
        }
    }

    fn fetch_locked(&self, name: &str) -> Locked<Vec<Project>> {
        let Some(bound) = self.bind(name, "fetch_projects") else {
            return Locked::Skipped;
        };

        let listed = match bound.api.get_projects_json(&bound.identity) {
            Ok(projects) => Ok(projects),
            Err(primary) if self.settings.catalog_fallback => {
                log::debug!("Primary project listing on '{}' failed ({}), trying user listing", name, primary);
                bound.api.user_projects_json(&bound.identity)
            }
            Err(primary) => Err(primary),
        };
        let mut projects = match listed {
            Ok(projects) => projects,
            Err(err) => return Locked::Failed(err),
        };

        for project in &mut projects {
            project.user_id = bound.user_id.clone();
        }
        log::debug!("Fetched {} project(s) from '{}'", projects.len(), name);

        let cached = projects.clone();
        let write = self.registry.update(name, |entry| {
            if let Some(session) = entry.session.as_mut() {
                session.projects = Some(cached);
            }
        });
        Locked::Done(projects, write)
    }

    /// Projects from the last successful fetch, without a remote call.
    /// `None` if logged out or never fetched.
    pub fn cached_projects(&self, name: &str) -> Option<Vec<Project>> {
        self.registry.get(name)?.session?.projects
    }

    /// Look a project up in the cache by id.
    pub fn find_project(&self, name: &str, project_id: &str) -> Option<Project> {
        self.cached_projects(name)?
            .into_iter()
            .find(|p| p.id == project_id)
    }
}
