// src/domain/mod.rs
pub mod error;
pub mod folder;
pub mod note;

pub use error::DomainError;
pub use folder::{Folder, FolderDraft, FolderPatch, NewFolder};
pub use note::{NewNote, Note, NoteDraft, NotePatch};
