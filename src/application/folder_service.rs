// src/application/folder_service.rs
use tracing::debug;

use crate::application::FolderRepository;
use crate::domain::{DomainError, Folder, FolderDraft, FolderPatch};

pub struct FolderService<R: FolderRepository> {
    repository: R,
}

impl<R: FolderRepository> FolderService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn list_folders(&self) -> Result<Vec<Folder>, DomainError> {
        self.repository.list_folders()
    }

    pub fn get_folder(&self, id: i64) -> Result<Folder, DomainError> {
        self.repository.get_folder(id)
    }

    pub fn create_folder(&self, draft: FolderDraft) -> Result<Folder, DomainError> {
        let new_folder = draft.validate()?;
        self.repository.insert_folder(&new_folder)
    }

    /// Existence is checked before the body, so an unknown id wins over an empty patch
    pub fn update_folder(&self, id: i64, patch: &FolderPatch) -> Result<(), DomainError> {
        self.repository.get_folder(id)?;
        if !patch.has_changes() {
            return Err(DomainError::EmptyFolderUpdate);
        }
        let rows = self.repository.update_folder(id, patch)?;
        debug!(folder_id = id, rows, "Updated folder");
        Ok(())
    }

    pub fn delete_folder(&self, id: i64) -> Result<(), DomainError> {
        self.repository.get_folder(id)?;
        let rows = self.repository.delete_folder(id)?;
        debug!(folder_id = id, rows, "Deleted folder");
        Ok(())
    }
}
