//! Remote builds, with an optional aux-file cleanup first.

use quire_protocol::CompileOutput;

use crate::orchestrator::Orchestrator;

impl Orchestrator {
    /// Trigger a remote build of `project_id`, optionally clearing the
    /// server's intermediate files first.
    pub fn compile(
        &self,
        name: &str,
        project_id: &str,
        need_cache_clear_first: bool,
    ) -> Option<CompileOutput> {
        let bound = self.bind(name, "compile")?;

        if need_cache_clear_first {
            // Fire-and-forget: the compile runs whatever this returns.
            if let Err(err) = bound.api.delete_aux_files(&bound.identity, project_id) {
                log::debug!("Clearing aux files of {} on '{}' failed (ignored): {}", project_id, name, err);
            }
        }

        match bound.api.compile(&bound.identity, project_id) {
            Ok(output) => {
                log::debug!("Compiled {} on '{}': {}", project_id, name, output.status);
                Some(output)
            }
            Err(err) => {
                self.surface("compile", name, &err);
                None
            }
        }
    }
}
