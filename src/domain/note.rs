// src/domain/note.rs
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::domain::DomainError;

/// A note row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub note_name: String,
    pub modified: DateTime<Utc>,
    pub folderid: i64,
    pub content: String,
}

/// Validated insert payload for a note. `modified` is left to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub note_name: String,
    pub folderid: i64,
    pub content: String,
}

/// Body of a note create request before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteDraft {
    pub note_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_folder_id")]
    pub folderid: Option<i64>,
    pub content: Option<String>,
}

impl NoteDraft {
    /// Fails on the first missing field, checked in `note_name`, `folderid`, `content` order.
    pub fn validate(self) -> Result<NewNote, DomainError> {
        let note_name = self.note_name.ok_or(DomainError::MissingField("note_name"))?;
        let folderid = self.folderid.ok_or(DomainError::MissingField("folderid"))?;
        let content = self.content.ok_or(DomainError::MissingField("content"))?;
        Ok(NewNote {
            note_name,
            folderid,
            content,
        })
    }
}

/// Body of a note update request. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotePatch {
    pub note_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_folder_id")]
    pub folderid: Option<i64>,
    pub content: Option<String>,
}

impl NotePatch {
    /// Number of fields carrying a truthy value. `""` and `0` count as absent.
    pub fn truthy_fields(&self) -> usize {
        let name = self.note_name.as_deref().is_some_and(|s| !s.is_empty());
        let folder = self.folderid.is_some_and(|id| id != 0);
        let content = self.content.as_deref().is_some_and(|s| !s.is_empty());
        [name, folder, content].into_iter().filter(|set| *set).count()
    }

    pub fn has_changes(&self) -> bool {
        self.truthy_fields() > 0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FolderIdRepr {
    Number(i64),
    Text(String),
}

/// Accepts `folderid` as a JSON integer or a numeric string.
fn deserialize_folder_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<FolderIdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FolderIdRepr::Number(id)) => Ok(Some(id)),
        Some(FolderIdRepr::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("folderid must be an integer, got {text:?}"))),
    }
}
