//! Middleware de autenticación JWT
//!
//! Valida el token, comprueba que la sesión sigue viva (y renueva su TTL
//! de inactividad) e inyecta el usuario autenticado en las extensions.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub session_id: String,
    pub username: String,
    pub role: String,
}

/// Middleware de autenticación JWT + sesión
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)
        .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    let session = state
        .sessions
        .touch(&claims.sid)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Sesión expirada".to_string()))?;

    if session.user_id.to_string() != claims.sub {
        return Err(AppError::Unauthorized("Token inválido".to_string()));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: session.user_id,
        session_id: session.session_id,
        username: session.username,
        role: session.role,
    });

    Ok(next.run(request).await)
}
