//! Modelos de referencia del parque
//!
//! Poles, establecimientos, marcas y modelos de vehículo.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Pole - agrupa establecimientos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Pole {
    pub id: Uuid,
    pub name: String,
}

/// Establecimiento - pertenece a un pole
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Establishment {
    pub id: Uuid,
    pub name: String,
    pub pole_id: Uuid,
}

/// Establecimiento con el nombre de su pole
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EstablishmentWithPole {
    pub id: Uuid,
    pub name: String,
    pub pole_id: Uuid,
    pub pole_name: String,
}

/// Marca de vehículo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
}

/// Modelo de vehículo - pertenece a una marca
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct VehicleModel {
    pub id: Uuid,
    pub name: String,
    pub brand_id: Uuid,
}

/// Modelo con el nombre de su marca
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VehicleModelWithBrand {
    pub id: Uuid,
    pub name: String,
    pub brand_id: Uuid,
    pub brand_name: String,
}
