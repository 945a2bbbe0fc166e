// src/domain/folder.rs
use serde::Deserialize;

use crate::domain::DomainError;

/// A folder row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub id: i64,
    pub folder_name: String,
}

/// Validated insert payload for a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFolder {
    pub folder_name: String,
}

/// Body of a folder create request before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolderDraft {
    pub folder_name: Option<String>,
}

impl FolderDraft {
    /// Presence check: `null` and absent are both missing, an empty string is not.
    pub fn validate(self) -> Result<NewFolder, DomainError> {
        let folder_name = self
            .folder_name
            .ok_or(DomainError::MissingFolderName)?;
        Ok(NewFolder { folder_name })
    }
}

/// Body of a folder update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FolderPatch {
    pub folder_name: Option<String>,
}

impl FolderPatch {
    /// Number of fields carrying a truthy value. An empty string counts as absent.
    pub fn truthy_fields(&self) -> usize {
        usize::from(self.folder_name.as_deref().is_some_and(|s| !s.is_empty()))
    }

    pub fn has_changes(&self) -> bool {
        self.truthy_fields() > 0
    }
}
