//! Source ↔ PDF position mapping, proxied through the session.

use quire_protocol::{Identity, PdfPosition, SourcePosition};

use crate::orchestrator::Orchestrator;

impl Orchestrator {
    /// Where does `file_path:line:column` land in the compiled PDF?
    pub fn sync_code(
        &self,
        name: &str,
        project_id: &str,
        file_path: &str,
        line: u32,
        column: u32,
    ) -> Option<Vec<PdfPosition>> {
        let (url, identity) = self.resolve(name, "sync_code")?;
        match self.api(&url).proxy_sync_code(&identity, project_id, file_path, line, column) {
            Ok(positions) => Some(positions),
            Err(err) => {
                self.surface("sync code to PDF", name, &err);
                None
            }
        }
    }

    /// Which source location produced the point (`h`, `v`) on `page`?
    pub fn sync_pdf(
        &self,
        name: &str,
        project_id: &str,
        page: u32,
        h: f64,
        v: f64,
    ) -> Option<SourcePosition> {
        let (url, identity) = self.resolve(name, "sync_pdf")?;
        match self.api(&url).proxy_sync_pdf(&identity, project_id, page, h, v) {
            Ok(position) => Some(position),
            Err(err) => {
                self.surface("sync PDF to code", name, &err);
                None
            }
        }
    }

    fn resolve(&self, name: &str, op: &str) -> Option<(String, Identity)> {
        let identity = match self.authenticate(name) {
            Ok(identity) => identity,
            Err(e) => {
                log::debug!("{}: {}", op, e);
                return None;
            }
        };
        let url = self.registry.get(name)?.url;
        Some((url, identity))
    }
}
