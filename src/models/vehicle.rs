//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, la clase de vehículo y el historial
//! de fechas (mantenimientos y controles técnicos) con slots fijos.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::{FromRow, Type};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Número de slots de mantenimiento registrados por vehículo
pub const MAINTENANCE_SLOTS: usize = 3;

/// Número de slots de control técnico registrados por vehículo
pub const INSPECTION_SLOTS: usize = 5;

/// Clase del vehículo - mapea al ENUM vehicle_class
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "vehicle_class", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    Commercial,
    #[default]
    NonCommercial,
}

impl VehicleClass {
    /// Interpreta el valor del formulario. Cualquier valor no reconocido
    /// (incluido el vacío) cae en NonCommercial.
    pub fn from_input(value: &str) -> Self {
        Self::parse(value).unwrap_or(VehicleClass::NonCommercial)
    }

    /// Interpretación estricta: None si el valor no es una clase conocida
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace('_', " ");
        match normalized.as_str() {
            "commercial" => Some(VehicleClass::Commercial),
            "non commercial" => Some(VehicleClass::NonCommercial),
            _ => None,
        }
    }

    /// Etiqueta legible (export, listados)
    pub fn label(&self) -> &'static str {
        match self {
            VehicleClass::Commercial => "Commercial",
            VehicleClass::NonCommercial => "non commercial",
        }
    }
}

/// Historial de fechas con N slots ordenados.
///
/// El índice 0 es el slot 1 (el más antiguo en orden de captura) y el último
/// índice es el más reciente. No se reordena por fecha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateHistory<const N: usize> {
    slots: [Option<NaiveDate>; N],
}

pub type MaintenanceHistory = DateHistory<MAINTENANCE_SLOTS>;
pub type InspectionHistory = DateHistory<INSPECTION_SLOTS>;

impl<const N: usize> DateHistory<N> {
    pub fn new(slots: [Option<NaiveDate>; N]) -> Self {
        Self { slots }
    }

    pub fn empty() -> Self {
        Self { slots: [None; N] }
    }

    /// Construir desde valores crudos `YYYY-MM-DD`. Vacío y ausente son
    /// equivalentes; un valor mal formado se trata como ausente.
    pub fn from_raw(raw: [Option<&str>; N]) -> Self {
        let mut slots = [None; N];
        for (index, value) in raw.iter().enumerate() {
            slots[index] = value.and_then(|v| parse_slot(index + 1, v));
        }
        Self { slots }
    }

    /// Slot por número (1..=N)
    pub fn slot(&self, number: usize) -> Option<NaiveDate> {
        number
            .checked_sub(1)
            .and_then(|index| self.slots.get(index).copied().flatten())
    }

    pub fn slots(&self) -> &[Option<NaiveDate>; N] {
        &self.slots
    }

    /// Primer slot presente recorriendo del más reciente al más antiguo
    pub fn latest(&self) -> Option<NaiveDate> {
        self.slots.iter().rev().find_map(|slot| *slot)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

fn parse_slot(number: usize, value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!("Slot {} con fecha mal formada '{}', se ignora", number, trimmed);
            None
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub model_id: Uuid,
    pub license_plate: String,
    pub monthly_payment: Decimal,
    pub lease_start: NaiveDate,
    pub initial_mileage: Option<i64>,
    pub maintenance_1: Option<NaiveDate>,
    pub maintenance_2: Option<NaiveDate>,
    pub maintenance_3: Option<NaiveDate>,
    pub inspection_1: Option<NaiveDate>,
    pub inspection_2: Option<NaiveDate>,
    pub inspection_3: Option<NaiveDate>,
    pub inspection_4: Option<NaiveDate>,
    pub inspection_5: Option<NaiveDate>,
    pub projected_maintenance: Option<NaiveDate>,
    pub projected_inspection: Option<NaiveDate>,
    pub seats: i32,
    pub vehicle_class: VehicleClass,
    pub notes: Option<String>,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn maintenance_history(&self) -> MaintenanceHistory {
        DateHistory::new([self.maintenance_1, self.maintenance_2, self.maintenance_3])
    }

    pub fn inspection_history(&self) -> InspectionHistory {
        DateHistory::new([
            self.inspection_1,
            self.inspection_2,
            self.inspection_3,
            self.inspection_4,
            self.inspection_5,
        ])
    }
}

/// Vehículo con los nombres de sus relaciones (pole, establecimiento, marca, modelo)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VehicleOverview {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub establishment_name: Option<String>,
    pub pole_name: Option<String>,
    pub model_id: Uuid,
    pub model_name: Option<String>,
    pub brand_id: Option<Uuid>,
    pub brand_name: Option<String>,
    pub license_plate: String,
    pub monthly_payment: Decimal,
    pub lease_start: NaiveDate,
    pub initial_mileage: Option<i64>,
    pub maintenance_1: Option<NaiveDate>,
    pub maintenance_2: Option<NaiveDate>,
    pub maintenance_3: Option<NaiveDate>,
    pub inspection_1: Option<NaiveDate>,
    pub inspection_2: Option<NaiveDate>,
    pub inspection_3: Option<NaiveDate>,
    pub inspection_4: Option<NaiveDate>,
    pub inspection_5: Option<NaiveDate>,
    pub projected_maintenance: Option<NaiveDate>,
    pub projected_inspection: Option<NaiveDate>,
    pub seats: i32,
    pub vehicle_class: VehicleClass,
    pub notes: Option<String>,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Datos ya validados para insertar o actualizar un vehículo
#[derive(Debug, Clone)]
pub struct VehicleDraft {
    pub establishment_id: Uuid,
    pub model_id: Uuid,
    pub license_plate: String,
    pub monthly_payment: Decimal,
    pub lease_start: NaiveDate,
    pub initial_mileage: Option<i64>,
    pub maintenance: MaintenanceHistory,
    pub inspections: InspectionHistory,
    pub projected_maintenance: Option<NaiveDate>,
    pub projected_inspection: Option<NaiveDate>,
    pub seats: i32,
    pub vehicle_class: VehicleClass,
    pub notes: Option<String>,
}

/// Filtros para búsqueda de vehículos. Un parámetro vacío equivale a
/// no filtrar.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilters {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub establishment_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub model_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub brand_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub license_plate: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

/// Columna de ordenación permitida para el listado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleSort {
    Created,
    Establishment,
    MaintenanceDate,
    InspectionDate,
    LicensePlate,
}

impl VehicleSort {
    /// Valores desconocidos caen en el orden por defecto
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("establishment") => VehicleSort::Establishment,
            Some("maintenance_date") => VehicleSort::MaintenanceDate,
            Some("inspection_date") => VehicleSort::InspectionDate,
            Some("license_plate") => VehicleSort::LicensePlate,
            _ => VehicleSort::Created,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            VehicleSort::Created => "v.created_at",
            VehicleSort::Establishment => "e.name",
            VehicleSort::MaintenanceDate => "v.maintenance_1",
            VehicleSort::InspectionDate => "v.inspection_1",
            VehicleSort::LicensePlate => "v.license_plate",
        }
    }
}

/// Dirección de ordenación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "desc" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}
