use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::cache::Session;

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub idle_timeout: u64,
    pub user: CurrentUserResponse,
}

// Usuario de la sesión actual
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrentUserResponse {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

impl From<&Session> for CurrentUserResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.user_id,
            username: session.username.clone(),
            role: session.role.clone(),
        }
    }
}
