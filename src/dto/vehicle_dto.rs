//! DTOs de vehículos
//!
//! El formulario llega como strings (igual que un formulario HTML); la
//! validación recoge todos los errores antes de devolverlos juntos.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::dto::document_dto::DocumentGroups;
use crate::models::vehicle::{
    DateHistory, InspectionHistory, MaintenanceHistory, VehicleClass, VehicleOverview, INSPECTION_SLOTS,
    MAINTENANCE_SLOTS,
};
use crate::services::soon_due_evaluator::DueFlags;
use crate::utils::validation::{
    format_display_date, normalize_optional, validate_amount, validate_date, validate_digits, validate_not_empty,
    validate_optional_date, validate_positive, validate_uuid,
};

/// Texto mostrado cuando no hay fecha proyectada
pub const NO_FUTURE_DATE_LABEL: &str = "Aucune date future";

/// Plazas por defecto cuando el formulario no las indica
pub const DEFAULT_SEATS: i32 = 4;

/// Límite exclusivo de la columna `monthly_payment NUMERIC(10, 2)`
const MAX_MONTHLY_PAYMENT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

const MAINTENANCE_FIELDS: [&str; MAINTENANCE_SLOTS] = ["maintenance_1", "maintenance_2", "maintenance_3"];
const INSPECTION_FIELDS: [&str; INSPECTION_SLOTS] = [
    "inspection_1",
    "inspection_2",
    "inspection_3",
    "inspection_4",
    "inspection_5",
];

// Request de creación / actualización de un vehículo
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VehicleForm {
    pub establishment_id: Option<String>,
    pub brand_id: Option<String>,
    pub model_id: Option<String>,
    pub license_plate: Option<String>,
    pub monthly_payment: Option<String>,
    pub lease_start: Option<String>,
    pub initial_mileage: Option<String>,
    pub maintenance_1: Option<String>,
    pub maintenance_2: Option<String>,
    pub maintenance_3: Option<String>,
    pub inspection_1: Option<String>,
    pub inspection_2: Option<String>,
    pub inspection_3: Option<String>,
    pub inspection_4: Option<String>,
    pub inspection_5: Option<String>,
    pub seats: Option<String>,
    pub vehicle_class: Option<String>,
    pub notes: Option<String>,
}

/// Formulario ya validado y normalizado
#[derive(Debug, Clone)]
pub struct VehicleInput {
    pub establishment_id: Uuid,
    pub brand_id: Uuid,
    pub model_id: Uuid,
    pub license_plate: String,
    pub monthly_payment: Decimal,
    pub lease_start: NaiveDate,
    pub initial_mileage: Option<i64>,
    pub maintenance: MaintenanceHistory,
    pub inspections: InspectionHistory,
    pub seats: i32,
    pub vehicle_class: VehicleClass,
    pub notes: Option<String>,
}

impl VehicleForm {
    pub fn into_input(self) -> Result<VehicleInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let establishment_id = check(
            &mut errors,
            "establishment_id",
            required(&self.establishment_id).and_then(validate_uuid),
            "Establecimiento requerido",
        );
        let brand_id = check(
            &mut errors,
            "brand_id",
            required(&self.brand_id).and_then(validate_uuid),
            "Marca requerida",
        );
        let model_id = check(
            &mut errors,
            "model_id",
            required(&self.model_id).and_then(validate_uuid),
            "Modelo requerido",
        );
        let license_plate = check(
            &mut errors,
            "license_plate",
            required(&self.license_plate).map(|plate| plate.trim().to_string()),
            "La matrícula es requerida",
        );
        let monthly_payment = check(
            &mut errors,
            "monthly_payment",
            required(&self.monthly_payment).and_then(parse_payment),
            "La cuota mensual debe ser un importe entre 0 y 99 999 999,99",
        );
        let lease_start = check(
            &mut errors,
            "lease_start",
            required(&self.lease_start).and_then(validate_date),
            "Fecha de inicio de leasing inválida (YYYY-MM-DD)",
        );
        let initial_mileage = check(
            &mut errors,
            "initial_mileage",
            match normalize_optional(self.initial_mileage.as_deref()) {
                Some(value) => validate_digits(&value).map(Some),
                None => Ok(None),
            },
            "El kilometraje inicial debe contener solo cifras",
        );
        let seats = check(
            &mut errors,
            "seats",
            parse_seats(self.seats.as_deref()),
            "El número de plazas debe ser un entero positivo",
        );
        let vehicle_class = parse_class(self.vehicle_class.as_deref());

        let maintenance = collect_slots(
            &mut errors,
            &MAINTENANCE_FIELDS,
            [&self.maintenance_1, &self.maintenance_2, &self.maintenance_3],
        );
        let inspections = collect_slots(
            &mut errors,
            &INSPECTION_FIELDS,
            [
                &self.inspection_1,
                &self.inspection_2,
                &self.inspection_3,
                &self.inspection_4,
                &self.inspection_5,
            ],
        );

        match (
            establishment_id,
            brand_id,
            model_id,
            license_plate,
            monthly_payment,
            lease_start,
            initial_mileage,
            seats,
        ) {
            (
                Some(establishment_id),
                Some(brand_id),
                Some(model_id),
                Some(license_plate),
                Some(monthly_payment),
                Some(lease_start),
                Some(initial_mileage),
                Some(seats),
            ) if errors.errors().is_empty() => Ok(VehicleInput {
                establishment_id,
                brand_id,
                model_id,
                license_plate,
                monthly_payment,
                lease_start,
                initial_mileage,
                maintenance,
                inspections,
                seats,
                vehicle_class,
                notes: normalize_optional(self.notes.as_deref()),
            }),
            _ => Err(errors),
        }
    }
}

fn required(value: &Option<String>) -> Result<&str, ValidationError> {
    let value = value.as_deref().unwrap_or("");
    validate_not_empty(value)?;
    Ok(value)
}

fn check<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    result: Result<T, ValidationError>,
    message: &'static str,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(mut error) => {
            error.message = Some(message.into());
            errors.add(field, error);
            None
        }
    }
}

fn collect_slots<const N: usize>(
    errors: &mut ValidationErrors,
    fields: &[&'static str; N],
    raw: [&Option<String>; N],
) -> DateHistory<N> {
    let mut slots = [None; N];
    for (index, value) in raw.iter().enumerate() {
        slots[index] = check(
            errors,
            fields[index],
            validate_optional_date(value.as_deref()),
            "Fecha inválida (YYYY-MM-DD)",
        )
        .flatten();
    }
    DateHistory::new(slots)
}

fn parse_payment(value: &str) -> Result<Decimal, ValidationError> {
    let amount = validate_amount(value)?.round_dp(2);
    if amount < Decimal::ZERO || amount >= MAX_MONTHLY_PAYMENT {
        let mut error = ValidationError::new("amount");
        error.add_param("value".into(), &value.to_string());
        error.add_param("max".into(), &MAX_MONTHLY_PAYMENT.to_string());
        return Err(error);
    }
    Ok(amount)
}

fn parse_seats(value: Option<&str>) -> Result<i32, ValidationError> {
    let Some(value) = normalize_optional(value) else {
        return Ok(DEFAULT_SEATS);
    };
    let seats = value.parse::<i32>().map_err(|_| {
        let mut error = ValidationError::new("integer");
        error.add_param("value".into(), &value);
        error
    })?;
    validate_positive(seats)?;
    Ok(seats)
}

/// Clase vacía o no reconocida: NonCommercial
fn parse_class(value: Option<&str>) -> VehicleClass {
    let Some(value) = normalize_optional(value) else {
        return VehicleClass::NonCommercial;
    };
    if VehicleClass::parse(&value).is_none() {
        tracing::warn!("Clase de vehículo '{}' no reconocida, se usa NonCommercial", value);
    }
    VehicleClass::from_input(&value)
}

/// Fecha proyectada lista para mostrar
pub fn display_projected(date: Option<NaiveDate>) -> String {
    date.map(format_display_date)
        .unwrap_or_else(|| NO_FUTURE_DATE_LABEL.to_string())
}

// Response de vehículo (listado y detalle)
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    #[serde(flatten)]
    pub vehicle: VehicleOverview,
    pub maintenance_imminent: bool,
    pub inspection_imminent: bool,
    pub projected_maintenance_display: String,
    pub projected_inspection_display: String,
}

impl VehicleResponse {
    pub fn new(vehicle: VehicleOverview, today: NaiveDate) -> Self {
        let flags = DueFlags::evaluate(vehicle.projected_maintenance, vehicle.projected_inspection, today);
        Self {
            maintenance_imminent: flags.maintenance,
            inspection_imminent: flags.inspection,
            projected_maintenance_display: display_projected(vehicle.projected_maintenance),
            projected_inspection_display: display_projected(vehicle.projected_inspection),
            vehicle,
        }
    }
}

// Response de detalle con documentos
#[derive(Debug, Serialize)]
pub struct VehicleDetailResponse {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub documents: DocumentGroups,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> VehicleForm {
        VehicleForm {
            establishment_id: Some(Uuid::new_v4().to_string()),
            brand_id: Some(Uuid::new_v4().to_string()),
            model_id: Some(Uuid::new_v4().to_string()),
            license_plate: Some("  AB-123-CD ".to_string()),
            monthly_payment: Some("349,90".to_string()),
            lease_start: Some("2021-06-15".to_string()),
            initial_mileage: Some("12 500".to_string()),
            maintenance_1: Some("2022-06-01".to_string()),
            maintenance_2: Some("".to_string()),
            inspection_3: Some("2023-09-01".to_string()),
            vehicle_class: Some("Commercial".to_string()),
            notes: Some("   ".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_is_normalized() {
        let input = valid_form().into_input().unwrap();
        assert_eq!(input.license_plate, "AB-123-CD");
        assert_eq!(input.monthly_payment, Decimal::new(34990, 2));
        assert_eq!(input.initial_mileage, Some(12500));
        assert_eq!(input.seats, DEFAULT_SEATS);
        assert_eq!(input.vehicle_class, VehicleClass::Commercial);
        assert_eq!(input.notes, None);
        assert_eq!(input.maintenance.slot(2), None);
        assert_eq!(input.inspections.slot(3), NaiveDate::from_ymd_opt(2023, 9, 1));
    }

    #[test]
    fn test_all_errors_are_collected() {
        let form = VehicleForm {
            license_plate: Some("   ".to_string()),
            monthly_payment: Some("abc".to_string()),
            lease_start: Some("2023-02-30".to_string()),
            initial_mileage: Some("12km".to_string()),
            maintenance_2: Some("01/02/2023".to_string()),
            inspection_5: Some("2023-13-01".to_string()),
            seats: Some("0".to_string()),
            vehicle_class: Some("camion".to_string()),
            ..Default::default()
        };
        let errors = form.into_input().unwrap_err();
        let fields = errors.field_errors();
        for field in [
            "establishment_id",
            "brand_id",
            "model_id",
            "license_plate",
            "monthly_payment",
            "lease_start",
            "initial_mileage",
            "maintenance_2",
            "inspection_5",
            "seats",
        ] {
            assert!(fields.contains_key(field), "missing error for {}", field);
        }
        assert!(!fields.contains_key("maintenance_1"));
        assert!(!fields.contains_key("vehicle_class"));
    }

    #[test]
    fn test_monthly_payment_must_fit_the_column() {
        for raw in ["123456789012,999", "100000000", "-300", "-0,01"] {
            let mut form = valid_form();
            form.monthly_payment = Some(raw.to_string());
            let errors = form.into_input().unwrap_err();
            let fields = errors.field_errors();
            assert_eq!(fields.len(), 1, "value {}", raw);
            assert_eq!(fields["monthly_payment"][0].code, "amount", "value {}", raw);
        }

        let mut form = valid_form();
        form.monthly_payment = Some("99 999 999,99".to_string());
        assert_eq!(form.into_input().unwrap().monthly_payment, Decimal::new(9_999_999_999, 2));

        let mut form = valid_form();
        form.monthly_payment = Some("0".to_string());
        assert_eq!(form.into_input().unwrap().monthly_payment, Decimal::ZERO);

        let mut form = valid_form();
        form.monthly_payment = Some("349,905".to_string());
        assert_eq!(form.into_input().unwrap().monthly_payment, Decimal::new(34990, 2));
    }

    #[test]
    fn test_unknown_class_falls_back_to_non_commercial() {
        for raw in ["camion", "Utilitaire", "commercial-ish"] {
            let mut form = valid_form();
            form.vehicle_class = Some(raw.to_string());
            let input = form.into_input().unwrap();
            assert_eq!(input.vehicle_class, VehicleClass::NonCommercial, "value {}", raw);
        }
    }

    #[test]
    fn test_empty_class_defaults_to_non_commercial() {
        let mut form = valid_form();
        form.vehicle_class = Some(String::new());
        form.seats = Some("7".to_string());
        let input = form.into_input().unwrap();
        assert_eq!(input.vehicle_class, VehicleClass::NonCommercial);
        assert_eq!(input.seats, 7);
    }

    #[test]
    fn test_display_projected() {
        assert_eq!(display_projected(None), NO_FUTURE_DATE_LABEL);
        assert_eq!(display_projected(NaiveDate::from_ymd_opt(2025, 6, 1)), "01/06/2025");
    }
}
