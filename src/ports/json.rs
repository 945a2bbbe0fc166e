// src/ports/json.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Folder, Note};
use crate::ports::sanitize;

/// Folder as returned to clients, with `folder_name` sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderResponse {
    pub id: i64,
    pub folder_name: String,
}

impl From<&Folder> for FolderResponse {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            folder_name: sanitize(&folder.folder_name),
        }
    }
}

/// Note as returned to clients. `note_name` and `content` are sanitized;
/// `id`, `modified` and `folderid` pass through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteResponse {
    pub id: i64,
    pub note_name: String,
    pub modified: DateTime<Utc>,
    pub folderid: i64,
    pub content: String,
}

impl From<&Note> for NoteResponse {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            note_name: sanitize(&note.note_name),
            modified: note.modified,
            folderid: note.folderid,
            content: sanitize(&note.content),
        }
    }
}
