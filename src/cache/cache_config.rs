//! Configuración de cache
//!
//! Este módulo contiene la configuración de Redis para las sesiones.

use serde::{Deserialize, Serialize};

use crate::config::environment::DEFAULT_SESSION_IDLE_TIMEOUT;

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub redis_url: String,
    pub key_prefix: String,
    pub session_ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            key_prefix: "fleet_manager".to_string(),
            session_ttl: DEFAULT_SESSION_IDLE_TIMEOUT,
        }
    }
}
