//! Proyección de fechas de vencimiento
//!
//! Calcula la próxima fecha de mantenimiento y de control técnico a partir
//! del historial de slots del vehículo, la fecha de inicio del leasing y la
//! clase del vehículo. Funciones puras: sin I/O, sin estado, sin "hoy".

use chrono::{Months, NaiveDate};

use crate::models::vehicle::{InspectionHistory, MaintenanceHistory, VehicleClass};

/// Años que se suman a la fecha base del mantenimiento
pub const MAINTENANCE_INTERVAL_YEARS: u32 = 1;

/// Tabla canónica de años entre controles técnicos según la clase
pub fn inspection_interval_years(class: VehicleClass) -> u32 {
    match class {
        VehicleClass::NonCommercial => 2,
        VehicleClass::Commercial => 1,
    }
}

/// Suma años de calendario (mismo mes/día). Un 29 de febrero pasa al
/// 28 de febrero si el año destino no es bisiesto. Devuelve None si la
/// fecha resultante queda fuera del rango representable.
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    years
        .checked_mul(12)
        .and_then(|months| date.checked_add_months(Months::new(months)))
}

/// Próxima fecha de mantenimiento: slot más reciente presente (3 → 1),
/// si no hay ninguno el inicio del leasing, más un año.
pub fn project_next_maintenance(
    history: &MaintenanceHistory,
    lease_start: Option<NaiveDate>,
) -> Option<NaiveDate> {
    let base = history.latest().or(lease_start)?;
    add_years(base, MAINTENANCE_INTERVAL_YEARS)
}

/// Próximo control técnico: slot más reciente presente (5 → 1), si no hay
/// ninguno el inicio del leasing, más el intervalo de la clase.
pub fn project_next_inspection(
    history: &InspectionHistory,
    lease_start: Option<NaiveDate>,
    class: VehicleClass,
) -> Option<NaiveDate> {
    let base = history.latest().or(lease_start)?;
    add_years(base, inspection_interval_years(class))
}

/// Par de fechas proyectadas que se persiste junto al vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectedDates {
    pub maintenance: Option<NaiveDate>,
    pub inspection: Option<NaiveDate>,
}

/// Proyecta ambas fechas en una sola llamada (creación y actualización)
pub fn project(
    maintenance: &MaintenanceHistory,
    inspections: &InspectionHistory,
    lease_start: Option<NaiveDate>,
    class: VehicleClass,
) -> ProjectedDates {
    ProjectedDates {
        maintenance: project_next_maintenance(maintenance, lease_start),
        inspection: project_next_inspection(inspections, lease_start, class),
    }
}
