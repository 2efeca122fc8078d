//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;

use crate::cache::SessionStore;
use crate::config::environment::EnvironmentConfig;
use crate::services::upload_storage::UploadStorage;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub sessions: Arc<dyn SessionStore>,
    pub storage: UploadStorage,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            storage: UploadStorage::new(config.upload_dir.clone(), config.max_upload_size),
            pool,
            config,
            sessions,
        }
    }
}
