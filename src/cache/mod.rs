//! Cache
//!
//! Este módulo contiene el cliente Redis y el almacén de sesiones.

pub mod cache_config;
pub mod redis_client;
pub mod session_store;

pub use cache_config::CacheConfig;
pub use session_store::{InMemorySessionStore, RedisSessionStore, Session, SessionStore};
