use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::VehicleResponse;
use crate::repositories::DueKind;
use crate::services::soon_due_evaluator::today;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/imminent-maintenance", get(imminent_maintenance))
        .route("/imminent-inspections", get(imminent_inspections))
}

async fn imminent_maintenance(State(state): State<AppState>) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list_imminent(DueKind::Maintenance, today()).await?;
    Ok(Json(response))
}

async fn imminent_inspections(State(state): State<AppState>) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list_imminent(DueKind::Inspection, today()).await?;
    Ok(Json(response))
}
