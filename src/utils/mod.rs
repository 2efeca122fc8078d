//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! de formularios y JWT.

pub mod errors;
pub mod jwt;
pub mod validation;
