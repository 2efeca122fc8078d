//! Export CSV del parque
//!
//! Formato pensado para Excel: separador `;`, BOM UTF-8 y cuotas con
//! coma decimal y espacio como separador de miles.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::vehicle::VehicleOverview;
use crate::utils::errors::{AppError, AppResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const EXPORT_HEADER: [&str; 22] = [
    "ID véhicule",
    "Pole",
    "Etablissement",
    "Immatriculation",
    "Marque",
    "Modèle",
    "Mensualité (€)",
    "Début leasing",
    "Km initial",
    "Nombre de places",
    "Type de véhicule",
    "Entretien 1",
    "Entretien 2",
    "Entretien 3",
    "Contrôle 1",
    "Contrôle 2",
    "Contrôle 3",
    "Contrôle 4",
    "Contrôle 5",
    "Notes",
    "Date futur entretien",
    "Date futur contrôle",
];

/// Nombre del fichero descargado
pub fn export_filename(today: NaiveDate) -> String {
    format!("parc_automobile-{}.csv", today.format("%d-%m-%Y"))
}

/// `1234.5` → `1 234,50`
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{},{}", sign, grouped, fraction)
}

fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn vehicle_record(vehicle: &VehicleOverview) -> Vec<String> {
    vec![
        vehicle.id.to_string(),
        vehicle.pole_name.clone().unwrap_or_default(),
        vehicle.establishment_name.clone().unwrap_or_default(),
        vehicle.license_plate.clone(),
        vehicle.brand_name.clone().unwrap_or_default(),
        vehicle.model_name.clone().unwrap_or_default(),
        format_money(vehicle.monthly_payment),
        vehicle.lease_start.format("%Y-%m-%d").to_string(),
        vehicle.initial_mileage.map(|km| km.to_string()).unwrap_or_default(),
        vehicle.seats.to_string(),
        vehicle.vehicle_class.label().to_string(),
        date_cell(vehicle.maintenance_1),
        date_cell(vehicle.maintenance_2),
        date_cell(vehicle.maintenance_3),
        date_cell(vehicle.inspection_1),
        date_cell(vehicle.inspection_2),
        date_cell(vehicle.inspection_3),
        date_cell(vehicle.inspection_4),
        date_cell(vehicle.inspection_5),
        vehicle.notes.clone().unwrap_or_default(),
        date_cell(vehicle.projected_maintenance),
        date_cell(vehicle.projected_inspection),
    ]
}

/// Genera el CSV completo; las fechas proyectadas se exportan tal cual
/// están guardadas
pub fn export_vehicles(vehicles: &[VehicleOverview]) -> AppResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(EXPORT_HEADER).map_err(csv_error)?;
    for vehicle in vehicles {
        writer.write_record(vehicle_record(vehicle)).map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Error finalizando CSV: {}", e)))
}

fn csv_error(error: csv::Error) -> AppError {
    AppError::Internal(format!("Error escribiendo CSV: {}", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleClass;
    use chrono::Utc;
    use uuid::Uuid;

    fn overview() -> VehicleOverview {
        VehicleOverview {
            id: Uuid::nil(),
            establishment_id: Uuid::new_v4(),
            establishment_name: Some("Agence Nord".to_string()),
            pole_name: None,
            model_id: Uuid::new_v4(),
            model_name: Some("Kangoo".to_string()),
            brand_id: Some(Uuid::new_v4()),
            brand_name: Some("Renault".to_string()),
            license_plate: "AB-123-CD".to_string(),
            monthly_payment: Decimal::new(123456, 2),
            lease_start: NaiveDate::from_ymd_opt(2021, 6, 15).unwrap(),
            initial_mileage: None,
            maintenance_1: NaiveDate::from_ymd_opt(2022, 6, 1),
            maintenance_2: None,
            maintenance_3: None,
            inspection_1: None,
            inspection_2: None,
            inspection_3: None,
            inspection_4: None,
            inspection_5: None,
            projected_maintenance: NaiveDate::from_ymd_opt(2023, 6, 1),
            projected_inspection: None,
            seats: 2,
            vehicle_class: VehicleClass::Commercial,
            notes: Some("porte; latérale".to_string()),
            photo: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(123456, 2)), "1 234,56");
        assert_eq!(format_money(Decimal::new(3499, 1)), "349,90");
        assert_eq!(format_money(Decimal::new(1234567890, 2)), "12 345 678,90");
        assert_eq!(format_money(Decimal::ZERO), "0,00");
        assert_eq!(format_money(Decimal::new(-150000, 2)), "-1 500,00");
        assert_eq!(format_money(Decimal::new(12345, 3)), "12,35");
    }

    #[test]
    fn test_export_filename() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_filename(today), "parc_automobile-09-03-2024.csv");
    }

    #[test]
    fn test_export_layout() {
        let bytes = export_vehicles(&[overview()]).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("ID véhicule;Pole;Etablissement;"));
        assert_eq!(header.split(';').count(), EXPORT_HEADER.len());

        let row = lines.next().unwrap();
        assert!(row.starts_with("00000000-0000-0000-0000-000000000000;;Agence Nord;AB-123-CD;Renault;Kangoo;1 234,56;2021-06-15;;2;Commercial;2022-06-01;;;"));
        assert!(row.contains("\"porte; latérale\""));
        assert!(row.ends_with(";2023-06-01;"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_export_empty_has_header_only() {
        let bytes = export_vehicles(&[]).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
