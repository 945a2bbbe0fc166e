// src/infrastructure/sqlite.rs
use crate::application::{FolderRepository, NoteRepository};
use crate::domain::{DomainError, Folder, FolderPatch, NewFolder, NewNote, Note, NotePatch};
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{ToSql, Type};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS folders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    folder_name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    note_name TEXT NOT NULL,
    modified TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    folderid INTEGER NOT NULL REFERENCES folders(id) ON DELETE CASCADE,
    content TEXT NOT NULL
);
";

const FOLDER_COLUMNS: &str = "id, folder_name";
const NOTE_COLUMNS: &str = "id, note_name, modified, folderid, content";

/// SQLite-backed storage for folders and notes
///
/// A single connection is shared behind a mutex; callers on an async runtime
/// are expected to reach it from a blocking task.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the store named by a connection string.
    ///
    /// Accepts a plain file path, `:memory:`, or either of those prefixed with `sqlite://`.
    pub fn open(database_url: &str) -> Result<Self> {
        let path = database_url
            .strip_prefix("sqlite://")
            .unwrap_or(database_url);
        debug!(path, "Opening SQLite store");

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {database_url}"))?;
        let store = Self::init(conn)?;

        info!(path, "Successfully opened SQLite store");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)
            .context("Failed to enable foreign keys")?;
        conn.execute_batch(SCHEMA)
            .context("Failed to create folders and notes tables")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|_| DomainError::Storage("connection mutex poisoned".to_string()))
    }

    /// Empty both tables and restart their id sequences
    pub fn truncate(&self) -> Result<(), DomainError> {
        self.conn()?.execute_batch(
            "DELETE FROM notes;
             DELETE FROM folders;
             DELETE FROM sqlite_sequence WHERE name IN ('folders', 'notes');",
        )?;
        Ok(())
    }

    /// Insert folders with their ids as given
    pub fn seed_folders(&self, folders: &[Folder]) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("INSERT INTO folders (id, folder_name) VALUES (?1, ?2)")?;
        for folder in folders {
            stmt.execute(params![folder.id, folder.folder_name])?;
        }
        Ok(())
    }

    /// Insert notes with their ids and timestamps as given
    pub fn seed_notes(&self, notes: &[Note]) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "INSERT INTO notes (id, note_name, modified, folderid, content)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for note in notes {
            stmt.execute(params![
                note.id,
                note.note_name,
                format_timestamp(&note.modified),
                note.folderid,
                note.content
            ])?;
        }
        Ok(())
    }
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn folder_from_row(row: &Row<'_>) -> rusqlite::Result<Folder> {
    Ok(Folder {
        id: row.get(0)?,
        folder_name: row.get(1)?,
    })
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    let modified: String = row.get(2)?;
    let modified = DateTime::parse_from_rfc3339(&modified)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(Note {
        id: row.get(0)?,
        note_name: row.get(1)?,
        modified,
        folderid: row.get(3)?,
        content: row.get(4)?,
    })
}

impl FolderRepository for SqliteStore {
    #[instrument(level = "debug", skip(self))]
    fn list_folders(&self) -> Result<Vec<Folder>, DomainError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {FOLDER_COLUMNS} FROM folders ORDER BY id"))?;
        let folders = stmt
            .query_map([], folder_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(folders)
    }

    #[instrument(level = "debug", skip(self))]
    fn get_folder(&self, id: i64) -> Result<Folder, DomainError> {
        self.conn()?
            .query_row(
                &format!("SELECT {FOLDER_COLUMNS} FROM folders WHERE id = ?1"),
                params![id],
                folder_from_row,
            )
            .optional()?
            .ok_or(DomainError::FolderNotFound(id))
    }

    #[instrument(level = "debug", skip(self))]
    fn insert_folder(&self, folder: &NewFolder) -> Result<Folder, DomainError> {
        let created = self.conn()?.query_row(
            &format!("INSERT INTO folders (folder_name) VALUES (?1) RETURNING {FOLDER_COLUMNS}"),
            params![folder.folder_name],
            folder_from_row,
        )?;
        info!(folder_id = created.id, "Created folder");
        Ok(created)
    }

    #[instrument(level = "debug", skip(self))]
    fn update_folder(&self, id: i64, patch: &FolderPatch) -> Result<usize, DomainError> {
        let Some(folder_name) = &patch.folder_name else {
            return Ok(0);
        };
        let rows = self.conn()?.execute(
            "UPDATE folders SET folder_name = ?1 WHERE id = ?2",
            params![folder_name, id],
        )?;
        Ok(rows)
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_folder(&self, id: i64) -> Result<usize, DomainError> {
        let rows = self
            .conn()?
            .execute("DELETE FROM folders WHERE id = ?1", params![id])?;
        info!(folder_id = id, rows, "Deleted folder");
        Ok(rows)
    }
}

impl NoteRepository for SqliteStore {
    #[instrument(level = "debug", skip(self))]
    fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY id"))?;
        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    #[instrument(level = "debug", skip(self))]
    fn get_note(&self, id: i64) -> Result<Note, DomainError> {
        self.conn()?
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
                params![id],
                note_from_row,
            )
            .optional()?
            .ok_or(DomainError::NoteNotFound(id))
    }

    #[instrument(level = "debug", skip(self))]
    fn insert_note(&self, note: &NewNote) -> Result<Note, DomainError> {
        let created = self.conn()?.query_row(
            &format!(
                "INSERT INTO notes (note_name, folderid, content) VALUES (?1, ?2, ?3)
                 RETURNING {NOTE_COLUMNS}"
            ),
            params![note.note_name, note.folderid, note.content],
            note_from_row,
        )?;
        info!(note_id = created.id, folder_id = created.folderid, "Created note");
        Ok(created)
    }

    #[instrument(level = "debug", skip(self))]
    fn update_note(&self, id: i64, patch: &NotePatch) -> Result<usize, DomainError> {
        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();
        if let Some(note_name) = &patch.note_name {
            assignments.push("note_name = ?");
            values.push(note_name);
        }
        if let Some(folderid) = &patch.folderid {
            assignments.push("folderid = ?");
            values.push(folderid);
        }
        if let Some(content) = &patch.content {
            assignments.push("content = ?");
            values.push(content);
        }
        if assignments.is_empty() {
            return Ok(0);
        }
        values.push(&id);

        let sql = format!("UPDATE notes SET {} WHERE id = ?", assignments.join(", "));
        let rows = self.conn()?.execute(&sql, values.as_slice())?;
        Ok(rows)
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_note(&self, id: i64) -> Result<usize, DomainError> {
        let rows = self
            .conn()?
            .execute("DELETE FROM notes WHERE id = ?1", params![id])?;
        info!(note_id = id, rows, "Deleted note");
        Ok(rows)
    }
}
