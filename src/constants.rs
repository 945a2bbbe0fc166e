// src/constants.rs
//
// Application-wide constants shared by the composition root and the route handlers.

/// Mount point of the folder routes.
///
/// Used in: `lib.rs` (nesting), tests building request paths
pub const FOLDERS_PATH: &str = "/api/folders";

/// Mount point of the note routes.
///
/// Used in: `lib.rs` (nesting), tests building request paths
pub const NOTES_PATH: &str = "/api/notes";

/// Message returned by the catch-all responder when internals must not leak.
///
/// Used in: `ports/http/error.rs`
pub const GENERIC_ERROR_MESSAGE: &str = "server error";

/// Port the server binds to when neither `--port` nor `PORT` is given.
///
/// Used in: `cli/args.rs`
pub const DEFAULT_PORT: u16 = 9090;
