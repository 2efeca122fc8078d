use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::AuthController;
use crate::dto::auth_dto::{CurrentUserResponse, LoginRequest, LoginResponse};
use crate::dto::ApiResponse;
use crate::middleware::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Login público; logout y me requieren sesión
pub fn create_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route_layer(from_fn_with_state(state, auth_middleware))
        .route("/login", post(login))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AuthController::new(&state);
    controller.logout(&user).await?;
    Ok(Json(ApiResponse::message("Sesión cerrada")))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<CurrentUserResponse> {
    let controller = AuthController::new(&state);
    Json(controller.me(&user))
}
