use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_manager::cache::{redis_client::RedisClient, CacheConfig, InMemorySessionStore, RedisSessionStore, SessionStore};
use fleet_manager::config::{DatabaseConfig, EnvironmentConfig};
use fleet_manager::database::DatabaseConnection;
use fleet_manager::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚗 Fleet Manager - Gestión del parque automóvil");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️ Entorno: {}", config.environment);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::connect(&DatabaseConfig::new(&config.database_url)).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    let pool = db_connection.pool().clone();

    let sessions = init_session_store(&config).await?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let addr = config.server_url();
    let app = create_router(AppState::new(pool, config, sessions));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health");
    info!("   POST /api/auth/login | POST /api/auth/logout | GET /api/auth/me");
    info!("   GET|POST /api/vehicles | GET /api/vehicles/export");
    info!("   GET|PUT|DELETE /api/vehicles/:id");
    info!("   GET|POST /api/vehicles/:id/documents");
    info!("   GET /api/documents/:id/file | DELETE /api/documents/:id");
    info!("   GET /api/dashboard/imminent-maintenance | imminent-inspections");
    info!("   /api/catalog/poles | establishments | brands | models");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Redis si está configurado; si no, sesiones en memoria del proceso
async fn init_session_store(config: &EnvironmentConfig) -> Result<Arc<dyn SessionStore>> {
    let Some(redis_url) = config.redis_url.clone() else {
        warn!("⚠️ REDIS_URL no definido: sesiones en memoria (se pierden al reiniciar)");
        return Ok(Arc::new(InMemorySessionStore::new(Duration::from_secs(
            config.session_idle_timeout,
        ))));
    };

    let cache_config = CacheConfig {
        redis_url,
        session_ttl: config.session_idle_timeout,
        ..CacheConfig::default()
    };

    match RedisClient::new(cache_config).await {
        Ok(client) => Ok(Arc::new(RedisSessionStore::new(client, config.session_idle_timeout))),
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            Err(anyhow::anyhow!("Error de Redis: {}", e))
        }
    }
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
