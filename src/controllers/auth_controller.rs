use bcrypt::{hash, verify, DEFAULT_COST};
use lazy_static::lazy_static;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::cache::{Session, SessionStore};
use crate::dto::auth_dto::{CurrentUserResponse, LoginRequest, LoginResponse};
use crate::middleware::AuthenticatedUser;
use crate::models::user::{User, UserRole};
use crate::repositories::UserRepository;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

const INVALID_CREDENTIALS: &str = "Usuario o contraseña incorrectos";

lazy_static! {
    /// Hash verificado cuando el usuario no existe
    static ref DUMMY_HASH: String = hash("fleet-manager-unknown-user", DEFAULT_COST).unwrap_or_default();
}

pub struct AuthController {
    users: UserRepository,
    sessions: Arc<dyn SessionStore>,
    jwt: JwtConfig,
    idle_timeout: u64,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: UserRepository::new(state.pool.clone()),
            sessions: state.sessions.clone(),
            jwt: state.jwt.clone(),
            idle_timeout: state.config.session_idle_timeout,
        }
    }

    /// Verifica credenciales, abre una sesión y emite el token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let user = self.users.find_by_username(request.username.trim()).await?;
        let valid = check_password(&request.password, user.as_ref().map(|u| u.password_hash.as_str()))?;
        let user = match user {
            Some(user) if valid => user,
            _ => return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string())),
        };

        let session = Session::new(user.id, user.username.clone(), user.role().as_str().to_string());
        self.sessions.create(&session).await?;
        let token = generate_token(user.id, &session.session_id, &session.role, &self.jwt)?;

        info!("🔐 Sesión abierta para {}", user.username);

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            idle_timeout: self.idle_timeout,
            user: CurrentUserResponse::from(&session),
        })
    }

    pub async fn logout(&self, user: &AuthenticatedUser) -> Result<(), AppError> {
        self.sessions.revoke(&user.session_id).await?;
        info!("👋 Sesión cerrada para {}", user.username);
        Ok(())
    }

    pub fn me(&self, user: &AuthenticatedUser) -> CurrentUserResponse {
        CurrentUserResponse {
            id: user.user_id,
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}

/// Verifica la contraseña; sin hash guardado se ejecuta bcrypt igualmente
/// y el resultado es siempre false
fn check_password(password: &str, stored_hash: Option<&str>) -> Result<bool, AppError> {
    match stored_hash {
        Some(stored_hash) => verify(password, stored_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e))),
        None => {
            let _ = verify(password, &DUMMY_HASH);
            Ok(false)
        }
    }
}

/// Alta de usuario (CLI de administración); rechaza duplicados
pub async fn register_user(
    users: &UserRepository,
    username: &str,
    password: &str,
    role: UserRole,
) -> Result<User, AppError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Usuario y contraseña son requeridos".to_string(),
        ));
    }
    if users.username_exists(username).await? {
        return Err(conflict_error("User", "username", username));
    }

    let password_hash =
        hash(password, DEFAULT_COST).map_err(|e| AppError::Hash(format!("Error hasheando contraseña: {}", e)))?;

    users.create(username, &password_hash, role).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_password_against_stored_hash() {
        let stored = hash("s3cret", 4).unwrap();
        assert!(check_password("s3cret", Some(&stored)).unwrap());
        assert!(!check_password("wrong", Some(&stored)).unwrap());
    }

    #[test]
    fn test_unknown_user_still_runs_bcrypt() {
        assert!(DUMMY_HASH.starts_with("$2"));
        assert!(verify("fleet-manager-unknown-user", &DUMMY_HASH).unwrap());
        assert!(!check_password("fleet-manager-unknown-user", None).unwrap());
        assert!(!check_password("anything", None).unwrap());
    }
}
