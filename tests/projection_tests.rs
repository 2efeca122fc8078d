use chrono::{Duration, NaiveDate};

use fleet_manager::dto::vehicle_dto::{display_projected, VehicleForm, NO_FUTURE_DATE_LABEL};
use fleet_manager::models::vehicle::{InspectionHistory, MaintenanceHistory, VehicleClass};
use fleet_manager::services::due_date_projector::{project, project_next_inspection, project_next_maintenance};
use fleet_manager::services::soon_due_evaluator::{is_imminent, DueFlags};

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

#[test]
fn scenario_latest_maintenance_slot_plus_one_year() {
    let history = MaintenanceHistory::new([None, None, Some(date("2023-06-01"))]);
    assert_eq!(
        project_next_maintenance(&history, Some(date("2023-01-01"))),
        Some(date("2024-06-01"))
    );
}

#[test]
fn scenario_lease_start_fallback_and_absence() {
    let history = MaintenanceHistory::empty();
    assert_eq!(
        project_next_maintenance(&history, Some(date("2023-01-01"))),
        Some(date("2024-01-01"))
    );
    assert_eq!(project_next_maintenance(&history, None), None);
}

#[test]
fn scenario_inspection_offset_depends_on_class() {
    let history = InspectionHistory::new([None, None, None, None, Some(date("2023-03-10"))]);
    assert_eq!(
        project_next_inspection(&history, None, VehicleClass::Commercial),
        Some(date("2024-03-10"))
    );
    assert_eq!(
        project_next_inspection(&history, None, VehicleClass::NonCommercial),
        Some(date("2025-03-10"))
    );
}

#[test]
fn scenario_imminence_window() {
    let today = date("2024-01-01");
    assert!(is_imminent(Some(date("2024-01-20")), today));
    assert!(!is_imminent(Some(date("2024-03-01")), today));
}

#[test]
fn law_slot_priority_ignores_chronology() {
    let later = date("2025-01-01");
    let earlier = date("2020-01-01");
    for (slot_1, slot_2) in [(Some(later), None), (None, Some(later)), (Some(later), Some(later))] {
        let history = MaintenanceHistory::new([slot_1, slot_2, Some(earlier)]);
        assert_eq!(project_next_maintenance(&history, None), Some(date("2021-01-01")));
    }
}

#[test]
fn law_imminence_boundaries() {
    let today = date("2024-06-15");
    assert!(is_imminent(Some(today + Duration::days(29)), today));
    assert!(!is_imminent(Some(today + Duration::days(30)), today));
    assert!(!is_imminent(Some(today), today));
    assert!(!is_imminent(Some(today - Duration::days(1)), today));
    assert!(!is_imminent(None, today));
}

#[test]
fn law_both_columns_share_the_same_threshold() {
    let today = date("2024-06-15");
    let flags = DueFlags::evaluate(
        Some(today + Duration::days(10)),
        Some(today + Duration::days(10)),
        today,
    );
    assert!(flags.maintenance && flags.inspection);

    let flags = DueFlags::evaluate(Some(today + Duration::days(45)), None, today);
    assert!(!flags.maintenance && !flags.inspection);
}

#[test]
fn form_slots_flow_into_projection() {
    let form = VehicleForm {
        establishment_id: Some(uuid::Uuid::new_v4().to_string()),
        brand_id: Some(uuid::Uuid::new_v4().to_string()),
        model_id: Some(uuid::Uuid::new_v4().to_string()),
        license_plate: Some("GH-456-IJ".to_string()),
        monthly_payment: Some("410".to_string()),
        lease_start: Some("2022-09-01".to_string()),
        maintenance_1: Some("".to_string()),
        inspection_1: Some("2023-09-05".to_string()),
        vehicle_class: Some("non commercial".to_string()),
        ..Default::default()
    };
    let input = form.into_input().unwrap();
    let projected = project(
        &input.maintenance,
        &input.inspections,
        Some(input.lease_start),
        input.vehicle_class,
    );

    assert_eq!(projected.maintenance, Some(date("2023-09-01")));
    assert_eq!(projected.inspection, Some(date("2025-09-05")));
    assert_eq!(display_projected(projected.maintenance), "01/09/2023");
    assert_eq!(display_projected(None), NO_FUTURE_DATE_LABEL);
}
