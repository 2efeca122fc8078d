use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::CatalogController;
use crate::dto::catalog_dto::{CreateBrandRequest, CreateEstablishmentRequest, CreateModelRequest, CreatePoleRequest};
use crate::dto::ApiResponse;
use crate::models::catalog::{Brand, Establishment, EstablishmentWithPole, Pole, VehicleModel, VehicleModelWithBrand};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/poles", get(list_poles).post(create_pole))
        .route("/poles/:id", delete(delete_pole))
        .route("/establishments", get(list_establishments).post(create_establishment))
        .route("/establishments/:id", delete(delete_establishment))
        .route("/brands", get(list_brands).post(create_brand))
        .route("/models", get(list_models).post(create_model))
        .route("/models/:id", delete(delete_model))
}

async fn list_poles(State(state): State<AppState>) -> Result<Json<Vec<Pole>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.list_poles().await?))
}

async fn create_pole(
    State(state): State<AppState>,
    Json(request): Json<CreatePoleRequest>,
) -> Result<Json<ApiResponse<Pole>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.create_pole(request).await?))
}

async fn delete_pole(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.delete_pole(id).await?))
}

async fn list_establishments(State(state): State<AppState>) -> Result<Json<Vec<EstablishmentWithPole>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.list_establishments().await?))
}

async fn create_establishment(
    State(state): State<AppState>,
    Json(request): Json<CreateEstablishmentRequest>,
) -> Result<Json<ApiResponse<Establishment>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.create_establishment(request).await?))
}

async fn delete_establishment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.delete_establishment(id).await?))
}

async fn list_brands(State(state): State<AppState>) -> Result<Json<Vec<Brand>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.list_brands().await?))
}

async fn create_brand(
    State(state): State<AppState>,
    Json(request): Json<CreateBrandRequest>,
) -> Result<Json<ApiResponse<Brand>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.create_brand(request).await?))
}

async fn list_models(State(state): State<AppState>) -> Result<Json<Vec<VehicleModelWithBrand>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.list_models().await?))
}

async fn create_model(
    State(state): State<AppState>,
    Json(request): Json<CreateModelRequest>,
) -> Result<Json<ApiResponse<VehicleModel>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.create_model(request).await?))
}

async fn delete_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.delete_model(id).await?))
}
