//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL.

pub mod catalog;
pub mod document;
pub mod user;
pub mod vehicle;
