// src/application/mod.rs
pub mod folder_service;
pub mod note_service;
pub mod repository;

pub use folder_service::FolderService;
pub use note_service::NoteService;
pub use repository::{FolderRepository, NoteRepository};
