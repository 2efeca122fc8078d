use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::DocumentController;
use crate::dto::ApiResponse;
use crate::services::upload_storage::content_type_for;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_document_router() -> Router<AppState> {
    Router::new()
        .route("/:id", delete(delete_document))
        .route("/:id/file", get(download_document))
}

async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let controller = DocumentController::new(&state);
    let (document, bytes) = controller.download(id).await?;

    let headers = [
        (header::CONTENT_TYPE, content_type_for(&document.filename).to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", document.original_name.replace('"', "")),
        ),
    ];
    Ok((headers, bytes).into_response())
}

async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = DocumentController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
