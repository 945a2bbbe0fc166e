// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Folder not found: {0}")]
    FolderNotFound(i64),
    #[error("Note not found: {0}")]
    NoteNotFound(i64),
    #[error("Missing required field: folder_name")]
    MissingFolderName,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Folder update carries no field to apply")]
    EmptyFolderUpdate,
    #[error("Note update carries no field to apply")]
    EmptyNoteUpdate,
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        DomainError::Storage(err.to_string())
    }
}
