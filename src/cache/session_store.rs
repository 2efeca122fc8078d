//! Almacén de sesiones
//!
//! Cada login crea una sesión con un TTL de inactividad. Cada request
//! autenticada la "toca" y renueva el TTL; el logout la revoca.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::redis_client::RedisClient;
use crate::utils::errors::{AppError, AppResult};

/// Sesión de un usuario autenticado
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub session_id: String,
    pub user_id: Uuid,
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: Uuid, username: String, role: String) -> Self {
        Self {
            session_id: Uuid::new_v4().simple().to_string(),
            user_id,
            username,
            role,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: &Session) -> AppResult<()>;

    /// Devuelve la sesión viva y renueva su TTL de inactividad
    async fn touch(&self, session_id: &str) -> AppResult<Option<Session>>;

    async fn revoke(&self, session_id: &str) -> AppResult<()>;
}

/// Sesiones en Redis (SET EX + EXPIRE en cada acceso)
pub struct RedisSessionStore {
    redis: RedisClient,
    idle_timeout: u64,
}

impl RedisSessionStore {
    pub fn new(redis: RedisClient, idle_timeout: u64) -> Self {
        Self { redis, idle_timeout }
    }
}

fn cache_error(error: anyhow::Error) -> AppError {
    AppError::Internal(format!("Error de Redis: {}", error))
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, session: &Session) -> AppResult<()> {
        let key = self.redis.session_key(&session.session_id);
        self.redis
            .set_json(&key, session, self.idle_timeout)
            .await
            .map_err(cache_error)
    }

    async fn touch(&self, session_id: &str) -> AppResult<Option<Session>> {
        let key = self.redis.session_key(session_id);
        let session: Option<Session> = self.redis.get_json(&key).await.map_err(cache_error)?;
        if session.is_some() && !self.redis.expire(&key, self.idle_timeout).await.map_err(cache_error)? {
            // expiró entre el GET y el EXPIRE
            return Ok(None);
        }
        Ok(session)
    }

    async fn revoke(&self, session_id: &str) -> AppResult<()> {
        let key = self.redis.session_key(session_id);
        self.redis.delete(&key).await.map_err(cache_error)
    }
}

/// Sesiones en memoria del proceso (desarrollo sin Redis y tests)
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, (Session, Instant)>>,
    idle_timeout: Duration,
}

impl InMemorySessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: &Session) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        sessions.retain(|_, (_, last_seen)| now.duration_since(*last_seen) < self.idle_timeout);
        sessions.insert(session.session_id.clone(), (session.clone(), now));
        Ok(())
    }

    async fn touch(&self, session_id: &str) -> AppResult<Option<Session>> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let expired = match sessions.get_mut(session_id) {
            None => return Ok(None),
            Some((session, last_seen)) => {
                if now.duration_since(*last_seen) >= self.idle_timeout {
                    true
                } else {
                    *last_seen = now;
                    return Ok(Some(session.clone()));
                }
            }
        };
        if expired {
            sessions.remove(session_id);
        }
        Ok(None)
    }

    async fn revoke(&self, session_id: &str) -> AppResult<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Uuid::new_v4(), "gestion".to_string(), "admin".to_string())
    }

    #[tokio::test]
    async fn test_create_touch_revoke() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let session = session();
        store.create(&session).await.unwrap();

        let found = store.touch(&session.session_id).await.unwrap();
        assert_eq!(found, Some(session.clone()));

        store.revoke(&session.session_id).await.unwrap();
        assert_eq!(store.touch(&session.session_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_idle_session_expires() {
        let store = InMemorySessionStore::new(Duration::from_millis(20));
        let session = session();
        store.create(&session).await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(store.touch(&session.session_id).await.unwrap(), None);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_touch_extends_idle_window() {
        let store = InMemorySessionStore::new(Duration::from_millis(200));
        let session = session();
        store.create(&session).await.unwrap();

        for _ in 0..3 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            assert!(store.touch(&session.session_id).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        assert_eq!(store.touch("missing").await.unwrap(), None);
        store.revoke("missing").await.unwrap();
    }
}
