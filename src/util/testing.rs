// src/util/testing.rs

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{FolderRepository, NoteRepository};
use crate::domain::{DomainError, Folder, FolderPatch, NewFolder, NewNote, Note, NotePatch};

/// Timestamp used for every note the mock creates.
pub fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2029, 1, 22, 16, 28, 32)
        .single()
        .unwrap_or_default()
}

pub fn sample_note(id: i64) -> Note {
    Note {
        id,
        note_name: format!("Test Note {id}"),
        modified: fixed_timestamp(),
        folderid: id,
        content: format!("Test Content {id}"),
    }
}

#[derive(Default)]
struct MockState {
    folders: BTreeMap<i64, Folder>,
    notes: BTreeMap<i64, Note>,
}

/// In-memory stand-in for both repositories
///
/// Clones share the same rows, so a test can hand one clone to a service and
/// inspect the other afterwards.
///
/// # Examples
///
/// ```
/// use noteful::util::testing::{sample_note, MockRepository};
/// use noteful::domain::Folder;
///
/// let mock = MockRepository::builder()
///     .with_folder(Folder { id: 1, folder_name: "Inbox".to_string() })
///     .with_note(sample_note(1))
///     .build();
/// ```
#[derive(Clone)]
pub struct MockRepository {
    state: Arc<Mutex<MockState>>,
    failing: bool,
}

impl MockRepository {
    pub fn builder() -> MockRepositoryBuilder {
        MockRepositoryBuilder::new()
    }

    fn state(&self) -> Result<MutexGuard<'_, MockState>, DomainError> {
        if self.failing {
            return Err(DomainError::Storage("simulated storage failure".to_string()));
        }
        self.state
            .lock()
            .map_err(|_| DomainError::Storage("mock state poisoned".to_string()))
    }
}

impl FolderRepository for MockRepository {
    fn list_folders(&self) -> Result<Vec<Folder>, DomainError> {
        Ok(self.state()?.folders.values().cloned().collect())
    }

    fn get_folder(&self, id: i64) -> Result<Folder, DomainError> {
        self.state()?
            .folders
            .get(&id)
            .cloned()
            .ok_or(DomainError::FolderNotFound(id))
    }

    fn insert_folder(&self, folder: &NewFolder) -> Result<Folder, DomainError> {
        let mut state = self.state()?;
        let id = state.folders.keys().next_back().map_or(1, |last| last + 1);
        let stored = Folder {
            id,
            folder_name: folder.folder_name.clone(),
        };
        state.folders.insert(id, stored.clone());
        Ok(stored)
    }

    fn update_folder(&self, id: i64, patch: &FolderPatch) -> Result<usize, DomainError> {
        let mut state = self.state()?;
        let Some(folder) = state.folders.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(name) = &patch.folder_name {
            folder.folder_name = name.clone();
        }
        Ok(1)
    }

    fn delete_folder(&self, id: i64) -> Result<usize, DomainError> {
        Ok(usize::from(self.state()?.folders.remove(&id).is_some()))
    }
}

impl NoteRepository for MockRepository {
    fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        Ok(self.state()?.notes.values().cloned().collect())
    }

    fn get_note(&self, id: i64) -> Result<Note, DomainError> {
        self.state()?
            .notes
            .get(&id)
            .cloned()
            .ok_or(DomainError::NoteNotFound(id))
    }

    fn insert_note(&self, note: &NewNote) -> Result<Note, DomainError> {
        let mut state = self.state()?;
        let id = state.notes.keys().next_back().map_or(1, |last| last + 1);
        let stored = Note {
            id,
            note_name: note.note_name.clone(),
            modified: fixed_timestamp(),
            folderid: note.folderid,
            content: note.content.clone(),
        };
        state.notes.insert(id, stored.clone());
        Ok(stored)
    }

    fn update_note(&self, id: i64, patch: &NotePatch) -> Result<usize, DomainError> {
        let mut state = self.state()?;
        let Some(note) = state.notes.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(name) = &patch.note_name {
            note.note_name = name.clone();
        }
        if let Some(folderid) = patch.folderid {
            note.folderid = folderid;
        }
        if let Some(content) = &patch.content {
            note.content = content.clone();
        }
        Ok(1)
    }

    fn delete_note(&self, id: i64) -> Result<usize, DomainError> {
        Ok(usize::from(self.state()?.notes.remove(&id).is_some()))
    }
}

/// Builder for MockRepository
pub struct MockRepositoryBuilder {
    state: MockState,
    failing: bool,
}

impl MockRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            state: MockState::default(),
            failing: false,
        }
    }

    pub fn with_folder(mut self, folder: Folder) -> Self {
        self.state.folders.insert(folder.id, folder);
        self
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.state.notes.insert(note.id, note);
        self
    }

    /// Every call returns `DomainError::Storage`
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn build(self) -> MockRepository {
        MockRepository {
            state: Arc::new(Mutex::new(self.state)),
            failing: self.failing,
        }
    }
}

impl Default for MockRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "tower", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_folder_added_when_getting_folder_then_returns_folder() {
        let mock = MockRepository::builder()
            .with_folder(Folder {
                id: 7,
                folder_name: "Seven".to_string(),
            })
            .build();

        let result = mock.get_folder(7).expect("Folder should exist");
        assert_eq!(result.folder_name, "Seven");
    }

    #[test]
    fn given_no_note_when_getting_note_then_returns_error() {
        let mock = MockRepository::builder().build();

        let result = mock.get_note(999);
        assert!(matches!(result, Err(DomainError::NoteNotFound(999))));
    }

    #[test]
    fn given_failing_mock_when_listing_folders_then_returns_storage_error() {
        let mock = MockRepository::builder().failing().build();

        let result = mock.list_folders();
        assert!(matches!(result, Err(DomainError::Storage(_))));
    }

    #[test]
    fn given_existing_rows_when_inserting_then_assigns_next_id() {
        let mock = MockRepository::builder().with_note(sample_note(3)).build();

        let created = mock
            .insert_note(&NewNote {
                note_name: "n".to_string(),
                folderid: 1,
                content: "c".to_string(),
            })
            .expect("Insert should succeed");
        assert_eq!(created.id, 4);
    }
}
