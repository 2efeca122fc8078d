//! Alta de usuarios desde la línea de comandos
//!
//! `create-user --username gestion --password secreto [--role admin]`

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fleet_manager::config::DatabaseConfig;
use fleet_manager::controllers::auth_controller::register_user;
use fleet_manager::database::DatabaseConnection;
use fleet_manager::models::user::UserRole;
use fleet_manager::repositories::UserRepository;

#[derive(Parser, Debug)]
#[command(name = "create-user", about = "Crear un usuario de la gestión del parque", version)]
struct Cli {
    /// Nombre de usuario (único)
    #[arg(long)]
    username: String,
    /// Contraseña en claro; se guarda con bcrypt
    #[arg(long)]
    password: String,
    /// Rol: admin o user
    #[arg(long, default_value = "user", value_parser = parse_role)]
    role: UserRole,
}

fn parse_role(value: &str) -> Result<UserRole, String> {
    UserRole::parse(value).ok_or_else(|| format!("rol desconocido '{}' (admin | user)", value))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = DatabaseConnection::connect(&DatabaseConfig::new(database_url)).await?;

    let users = UserRepository::new(db.pool().clone());
    let user = register_user(&users, &cli.username, &cli.password, cli.role)
        .await
        .map_err(|e| anyhow!("{}", e))?;

    info!("✅ Usuario '{}' creado ({}) con rol {}", user.username, user.id, user.role);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_role() {
        let cli = Cli::parse_from(["create-user", "--username", "u", "--password", "p", "--role", "Admin"]);
        assert_eq!(cli.role, UserRole::Admin);

        let cli = Cli::parse_from(["create-user", "--username", "u", "--password", "p"]);
        assert_eq!(cli.role, UserRole::User);

        assert!(Cli::try_parse_from(["create-user", "--username", "u", "--password", "p", "--role", "root"]).is_err());
    }
}
