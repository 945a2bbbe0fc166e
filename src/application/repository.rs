// src/application/repository.rs
use std::sync::Arc;

use crate::domain::{DomainError, Folder, FolderPatch, NewFolder, NewNote, Note, NotePatch};

pub trait FolderRepository: Send + Sync {
    fn list_folders(&self) -> Result<Vec<Folder>, DomainError>;

    /// Returns `FolderNotFound` when no row has this id
    fn get_folder(&self, id: i64) -> Result<Folder, DomainError>;

    fn insert_folder(&self, folder: &NewFolder) -> Result<Folder, DomainError>;

    /// Writes the `Some` fields of the patch and returns the number of rows touched
    fn update_folder(&self, id: i64, patch: &FolderPatch) -> Result<usize, DomainError>;

    /// Returns the number of rows removed
    fn delete_folder(&self, id: i64) -> Result<usize, DomainError>;
}

pub trait NoteRepository: Send + Sync {
    fn list_notes(&self) -> Result<Vec<Note>, DomainError>;

    /// Returns `NoteNotFound` when no row has this id
    fn get_note(&self, id: i64) -> Result<Note, DomainError>;

    fn insert_note(&self, note: &NewNote) -> Result<Note, DomainError>;

    fn update_note(&self, id: i64, patch: &NotePatch) -> Result<usize, DomainError>;

    fn delete_note(&self, id: i64) -> Result<usize, DomainError>;
}

impl<T: FolderRepository + ?Sized> FolderRepository for Arc<T> {
    fn list_folders(&self) -> Result<Vec<Folder>, DomainError> {
        (**self).list_folders()
    }

    fn get_folder(&self, id: i64) -> Result<Folder, DomainError> {
        (**self).get_folder(id)
    }

    fn insert_folder(&self, folder: &NewFolder) -> Result<Folder, DomainError> {
        (**self).insert_folder(folder)
    }

    fn update_folder(&self, id: i64, patch: &FolderPatch) -> Result<usize, DomainError> {
        (**self).update_folder(id, patch)
    }

    fn delete_folder(&self, id: i64) -> Result<usize, DomainError> {
        (**self).delete_folder(id)
    }
}

impl<T: NoteRepository + ?Sized> NoteRepository for Arc<T> {
    fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        (**self).list_notes()
    }

    fn get_note(&self, id: i64) -> Result<Note, DomainError> {
        (**self).get_note(id)
    }

    fn insert_note(&self, note: &NewNote) -> Result<Note, DomainError> {
        (**self).insert_note(note)
    }

    fn update_note(&self, id: i64, patch: &NotePatch) -> Result<usize, DomainError> {
        (**self).update_note(id, patch)
    }

    fn delete_note(&self, id: i64) -> Result<usize, DomainError> {
        (**self).delete_note(id)
    }
}
