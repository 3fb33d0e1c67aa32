//! File tree operations on a project, gated on an active session.
//!
//! The tree of record lives on the server; nothing here touches the local
//! catalog cache. Failure sentinels: `None` for operations returning an
//! entity or bytes, `false` for the rest.

use quire_protocol::{EntityType, FileRef, FolderRef};

use crate::orchestrator::Orchestrator;

impl Orchestrator {
    /// Download a file's bytes.
    pub fn get_file(&self, name: &str, project_id: &str, file_id: &str) -> Option<Vec<u8>> {
        let bound = self.bind(name, "get_file")?;
        match bound.api.get_file(&bound.identity, project_id, file_id) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                self.surface("download file", name, &err);
                None
            }
        }
    }

    pub fn upload_file(
        &self,
        name: &str,
        project_id: &str,
        parent_folder_id: &str,
        file_name: &str,
        content: &[u8],
    ) -> Option<FileRef> {
        let bound = self.bind(name, "upload_file")?;
        match bound.api.upload_file(&bound.identity, project_id, parent_folder_id, file_name, content) {
            Ok(file) => {
                log::debug!("Uploaded '{}' ({} bytes) to {}/{}", file_name, content.len(), project_id, parent_folder_id);
                Some(file)
            }
            Err(err) => {
                self.surface("upload", name, &err);
                None
            }
        }
    }

    pub fn add_folder(
        &self,
        name: &str,
        project_id: &str,
        folder_name: &str,
        parent_folder_id: &str,
    ) -> Option<FolderRef> {
        let bound = self.bind(name, "add_folder")?;
        match bound.api.add_folder(&bound.identity, project_id, folder_name, parent_folder_id) {
            Ok(folder) => Some(folder),
            Err(err) => {
                self.surface("add folder", name, &err);
                None
            }
        }
    }

    pub fn delete_entity(
        &self,
        name: &str,
        project_id: &str,
        entity_type: EntityType,
        entity_id: &str,
    ) -> bool {
        let Some(bound) = self.bind(name, "delete_entity") else {
            return false;
        };
        match bound.api.delete_entity(&bound.identity, project_id, entity_type, entity_id) {
            Ok(()) => true,
            Err(err) => {
                self.surface(&format!("delete {}", entity_type.as_str()), name, &err);
                false
            }
        }
    }

    pub fn rename_entity(
        &self,
        name: &str,
        project_id: &str,
        entity_type: EntityType,
        entity_id: &str,
        new_name: &str,
    ) -> bool {
        let Some(bound) = self.bind(name, "rename_entity") else {
            return false;
        };
        match bound.api.rename_entity(&bound.identity, project_id, entity_type, entity_id, new_name) {
            Ok(()) => true,
            Err(err) => {
                self.surface(&format!("rename {}", entity_type.as_str()), name, &err);
                false
            }
        }
    }

    pub fn move_entity(
        &self,
        name: &str,
        project_id: &str,
        entity_type: EntityType,
        entity_id: &str,
        new_parent_id: &str,
    ) -> bool {
        let Some(bound) = self.bind(name, "move_entity") else {
            return false;
        };
        match bound.api.move_entity(&bound.identity, project_id, entity_type, entity_id, new_parent_id) {
            Ok(()) => true,
            Err(err) => {
                self.surface(&format!("move {}", entity_type.as_str()), name, &err);
                false
            }
        }
    }
}
