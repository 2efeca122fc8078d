use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::{DocumentController, VehicleController};
use crate::dto::document_dto::{DocumentGroups, UploadResponse};
use crate::dto::vehicle_dto::{VehicleDetailResponse, VehicleForm, VehicleResponse};
use crate::dto::ApiResponse;
use crate::models::document::DocumentType;
use crate::models::vehicle::VehicleFilters;
use crate::services::soon_due_evaluator::today;
use crate::services::upload_storage::PendingUpload;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/export", get(export_vehicles))
        .route("/:id", get(get_vehicle).put(update_vehicle).delete(delete_vehicle))
        .route("/:id/documents", get(list_documents).post(upload_documents))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list(&filters, today()).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(form): Json<VehicleForm>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(form, today()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleDetailResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.get_by_id(id, today()).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<VehicleForm>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update(id, form, today()).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn export_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Response, AppError> {
    let controller = VehicleController::new(&state);
    let export = controller.export(&filters, today()).await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=UTF-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ),
        (header::CACHE_CONTROL, "no-cache".to_string()),
    ];
    Ok((headers, export.content).into_response())
}

async fn list_documents(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentGroups>, AppError> {
    let controller = DocumentController::new(&state);
    let response = controller.list(id).await?;
    Ok(Json(response))
}

async fn upload_documents(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponse>>), AppError> {
    let uploads = read_uploads(multipart).await?;
    let controller = DocumentController::new(&state);
    let response = controller.upload(id, uploads).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Cada parte se llama como el tipo de documento; las partes vacías
/// (input file sin fichero) se ignoran
async fn read_uploads(mut multipart: Multipart) -> Result<Vec<PendingUpload>, AppError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        let doc_type = DocumentType::parse(&name)
            .ok_or_else(|| AppError::BadRequest(format!("Tipo de documento desconocido: '{}'", name)))?;
        let original_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        if original_name.is_empty() && bytes.is_empty() {
            continue;
        }

        uploads.push(PendingUpload {
            doc_type,
            original_name,
            bytes: bytes.to_vec(),
        });
    }

    Ok(uploads)
}

fn multipart_error(error: axum::extract::multipart::MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(error.body_text())
    } else {
        AppError::BadRequest(format!("Multipart inválido: {}", error.body_text()))
    }
}
