// src/ports/mod.rs
pub mod http;
pub mod json;
pub mod sanitize;

pub use json::{FolderResponse, NoteResponse};
pub use sanitize::sanitize;
