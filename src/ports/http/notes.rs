// src/ports/http/notes.rs
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{OriginalUri, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::error::NOTE_NOT_FOUND;
use super::{item_location, parse_body, parse_id, run_blocking, ApiError};
use crate::application::{NoteRepository, NoteService};
use crate::domain::{NoteDraft, NotePatch};
use crate::ports::NoteResponse;

type Service<R> = Arc<NoteService<R>>;

/// Note routes, relative to wherever they are mounted
pub fn router<R: NoteRepository + 'static>(service: Service<R>) -> Router {
    Router::new()
        .route("/", get(list_notes::<R>).post(create_note::<R>))
        .route(
            "/:note_id",
            get(get_note::<R>)
                .patch(update_note::<R>)
                .delete(delete_note::<R>),
        )
        .with_state(service)
}

fn note_id(raw: &str) -> Result<i64, ApiError> {
    parse_id(raw).ok_or(ApiError::NotFound(NOTE_NOT_FOUND))
}

async fn list_notes<R: NoteRepository + 'static>(
    State(service): State<Service<R>>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let notes = run_blocking(move || service.list_notes()).await?;
    Ok(Json(notes.iter().map(NoteResponse::from).collect()))
}

async fn get_note<R: NoteRepository + 'static>(
    State(service): State<Service<R>>,
    Path(raw_id): Path<String>,
) -> Result<Json<NoteResponse>, ApiError> {
    let id = note_id(&raw_id)?;
    let note = run_blocking(move || service.get_note(id)).await?;
    Ok(Json(NoteResponse::from(&note)))
}

async fn create_note<R: NoteRepository + 'static>(
    State(service): State<Service<R>>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let draft: NoteDraft = parse_body(&body)?;
    let note = run_blocking(move || service.create_note(draft)).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, item_location(&uri, note.id))],
        Json(NoteResponse::from(&note)),
    ))
}

async fn update_note<R: NoteRepository + 'static>(
    State(service): State<Service<R>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let id = note_id(&raw_id)?;
    let patch = parse_body::<NotePatch>(&body);
    run_blocking(move || match patch {
        Ok(patch) => service.update_note(id, &patch),
        Err(err) => {
            // an unknown id is reported before a bad body
            service.get_note(id)?;
            Err(err)
        }
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_note<R: NoteRepository + 'static>(
    State(service): State<Service<R>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = note_id(&raw_id)?;
    run_blocking(move || service.delete_note(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
