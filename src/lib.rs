//! Gestión del parque automóvil
//!
//! API HTTP para vehículos en leasing: historial de mantenimientos y
//! controles técnicos, fechas proyectadas, documentos y export CSV.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
