// src/ports/http/folders.rs
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{OriginalUri, Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::error::FOLDER_NOT_FOUND;
use super::{item_location, parse_body, parse_id, run_blocking, ApiError};
use crate::application::{FolderRepository, FolderService};
use crate::domain::{FolderDraft, FolderPatch};
use crate::ports::FolderResponse;

type Service<R> = Arc<FolderService<R>>;

/// Folder routes, relative to wherever they are mounted
pub fn router<R: FolderRepository + 'static>(service: Service<R>) -> Router {
    Router::new()
        .route("/", get(list_folders::<R>).post(create_folder::<R>))
        .route(
            "/:folder_id",
            get(get_folder::<R>)
                .patch(update_folder::<R>)
                .delete(delete_folder::<R>),
        )
        .with_state(service)
}

fn folder_id(raw: &str) -> Result<i64, ApiError> {
    parse_id(raw).ok_or(ApiError::NotFound(FOLDER_NOT_FOUND))
}

async fn list_folders<R: FolderRepository + 'static>(
    State(service): State<Service<R>>,
) -> Result<Json<Vec<FolderResponse>>, ApiError> {
    let folders = run_blocking(move || service.list_folders()).await?;
    Ok(Json(folders.iter().map(FolderResponse::from).collect()))
}

async fn get_folder<R: FolderRepository + 'static>(
    State(service): State<Service<R>>,
    Path(raw_id): Path<String>,
) -> Result<Json<FolderResponse>, ApiError> {
    let id = folder_id(&raw_id)?;
    let folder = run_blocking(move || service.get_folder(id)).await?;
    Ok(Json(FolderResponse::from(&folder)))
}

async fn create_folder<R: FolderRepository + 'static>(
    State(service): State<Service<R>>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let draft: FolderDraft = parse_body(&body)?;
    let folder = run_blocking(move || service.create_folder(draft)).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, item_location(&uri, folder.id))],
        Json(FolderResponse::from(&folder)),
    ))
}

async fn update_folder<R: FolderRepository + 'static>(
    State(service): State<Service<R>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let id = folder_id(&raw_id)?;
    let patch = parse_body::<FolderPatch>(&body);
    run_blocking(move || match patch {
        Ok(patch) => service.update_folder(id, &patch),
        Err(err) => {
            // an unknown id is reported before a bad body
            service.get_folder(id)?;
            Err(err)
        }
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_folder<R: FolderRepository + 'static>(
    State(service): State<Service<R>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = folder_id(&raw_id)?;
    run_blocking(move || service.delete_folder(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
