// src/application/note_service.rs
use tracing::debug;

use crate::application::NoteRepository;
use crate::domain::{DomainError, Note, NoteDraft, NotePatch};

pub struct NoteService<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        self.repository.list_notes()
    }

    pub fn get_note(&self, id: i64) -> Result<Note, DomainError> {
        self.repository.get_note(id)
    }

    /// The referenced folder is not checked here; storage enforces the foreign key
    pub fn create_note(&self, draft: NoteDraft) -> Result<Note, DomainError> {
        let new_note = draft.validate()?;
        self.repository.insert_note(&new_note)
    }

    pub fn update_note(&self, id: i64, patch: &NotePatch) -> Result<(), DomainError> {
        self.repository.get_note(id)?;
        if !patch.has_changes() {
            return Err(DomainError::EmptyNoteUpdate);
        }
        let rows = self.repository.update_note(id, patch)?;
        debug!(note_id = id, rows, "Updated note");
        Ok(())
    }

    pub fn delete_note(&self, id: i64) -> Result<(), DomainError> {
        self.repository.get_note(id)?;
        let rows = self.repository.delete_note(id)?;
        debug!(note_id = id, rows, "Deleted note");
        Ok(())
    }
}
