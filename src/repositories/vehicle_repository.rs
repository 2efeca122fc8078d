use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::vehicle::{SortDirection, Vehicle, VehicleDraft, VehicleFilters, VehicleOverview, VehicleSort};
use crate::services::soon_due_evaluator::imminent_window;
use crate::utils::errors::AppError;

/// Columnas del vehículo con los nombres de sus relaciones
const OVERVIEW_SELECT: &str = r#"
    SELECT
        v.id, v.establishment_id, e.name AS establishment_name, p.name AS pole_name,
        v.model_id, m.name AS model_name, b.id AS brand_id, b.name AS brand_name,
        v.license_plate, v.monthly_payment, v.lease_start, v.initial_mileage,
        v.maintenance_1, v.maintenance_2, v.maintenance_3,
        v.inspection_1, v.inspection_2, v.inspection_3, v.inspection_4, v.inspection_5,
        v.projected_maintenance, v.projected_inspection,
        v.seats, v.vehicle_class, v.notes, v.photo, v.created_at
    FROM vehicles v
    LEFT JOIN establishments e ON e.id = v.establishment_id
    LEFT JOIN poles p ON p.id = e.pole_id
    LEFT JOIN vehicle_models m ON m.id = v.model_id
    LEFT JOIN brands b ON b.id = m.brand_id
"#;

/// Fecha proyectada que alimenta un listado de inminentes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueKind {
    Maintenance,
    Inspection,
}

impl DueKind {
    fn column(&self) -> &'static str {
        match self {
            DueKind::Maintenance => "v.projected_maintenance",
            DueKind::Inspection => "v.projected_inspection",
        }
    }
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, draft: &VehicleDraft) -> Result<Vehicle, AppError> {
        let maintenance = draft.maintenance.slots();
        let inspections = draft.inspections.slots();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, establishment_id, model_id, license_plate, monthly_payment, lease_start,
                initial_mileage, maintenance_1, maintenance_2, maintenance_3,
                inspection_1, inspection_2, inspection_3, inspection_4, inspection_5,
                projected_maintenance, projected_inspection, seats, vehicle_class, notes,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $21)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(draft.establishment_id)
        .bind(draft.model_id)
        .bind(&draft.license_plate)
        .bind(draft.monthly_payment)
        .bind(draft.lease_start)
        .bind(draft.initial_mileage)
        .bind(maintenance[0])
        .bind(maintenance[1])
        .bind(maintenance[2])
        .bind(inspections[0])
        .bind(inspections[1])
        .bind(inspections[2])
        .bind(inspections[3])
        .bind(inspections[4])
        .bind(draft.projected_maintenance)
        .bind(draft.projected_inspection)
        .bind(draft.seats)
        .bind(draft.vehicle_class)
        .bind(&draft.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Reescribe todos los campos editables, incluidas las fechas proyectadas
    pub async fn update(&self, id: Uuid, draft: &VehicleDraft) -> Result<Option<Vehicle>, AppError> {
        let maintenance = draft.maintenance.slots();
        let inspections = draft.inspections.slots();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET establishment_id = $2, model_id = $3, license_plate = $4, monthly_payment = $5,
                lease_start = $6, initial_mileage = $7,
                maintenance_1 = $8, maintenance_2 = $9, maintenance_3 = $10,
                inspection_1 = $11, inspection_2 = $12, inspection_3 = $13,
                inspection_4 = $14, inspection_5 = $15,
                projected_maintenance = $16, projected_inspection = $17,
                seats = $18, vehicle_class = $19, notes = $20, updated_at = $21
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(draft.establishment_id)
        .bind(draft.model_id)
        .bind(&draft.license_plate)
        .bind(draft.monthly_payment)
        .bind(draft.lease_start)
        .bind(draft.initial_mileage)
        .bind(maintenance[0])
        .bind(maintenance[1])
        .bind(maintenance[2])
        .bind(inspections[0])
        .bind(inspections[1])
        .bind(inspections[2])
        .bind(inspections[3])
        .bind(inspections[4])
        .bind(draft.projected_maintenance)
        .bind(draft.projected_inspection)
        .bind(draft.seats)
        .bind(draft.vehicle_class)
        .bind(&draft.notes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_overview(&self, id: Uuid) -> Result<Option<VehicleOverview>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(OVERVIEW_SELECT);
        builder.push(" WHERE v.id = ").push_bind(id);

        let vehicle = builder
            .build_query_as::<VehicleOverview>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Listado filtrado; filtros conjuntivos y matrícula por subcadena
    pub async fn list(
        &self,
        filters: &VehicleFilters,
        sort: VehicleSort,
        direction: SortDirection,
    ) -> Result<Vec<VehicleOverview>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(OVERVIEW_SELECT);
        builder.push(" WHERE TRUE");

        if let Some(establishment_id) = filters.establishment_id {
            builder.push(" AND v.establishment_id = ").push_bind(establishment_id);
        }
        if let Some(model_id) = filters.model_id {
            builder.push(" AND v.model_id = ").push_bind(model_id);
        }
        if let Some(brand_id) = filters.brand_id {
            builder.push(" AND m.brand_id = ").push_bind(brand_id);
        }
        if let Some(plate) = filters.license_plate.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            builder
                .push(" AND v.license_plate ILIKE ")
                .push_bind(format!("%{}%", escape_like(plate)));
        }

        builder.push(format!(
            " ORDER BY {} {} NULLS LAST, v.id",
            sort.column(),
            direction.as_sql()
        ));

        let vehicles = builder
            .build_query_as::<VehicleOverview>()
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    /// Vehículos cuya fecha proyectada guardada cae en la ventana de aviso,
    /// de la más próxima a la más lejana
    pub async fn list_imminent(&self, kind: DueKind, today: NaiveDate) -> Result<Vec<VehicleOverview>, AppError> {
        let mut builder = imminent_query(kind, today);
        let vehicles = builder
            .build_query_as::<VehicleOverview>()
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    /// Matrícula ya usada por otro vehículo
    pub async fn license_plate_exists(&self, license_plate: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(license_plate)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn set_photo(&self, id: Uuid, filename: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE vehicles SET photo = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(filename)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Borra documentos y vehículo en una sola transacción.
    /// Devuelve false si el vehículo no existía.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM documents WHERE vehicle_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Ventana exclusiva de `imminent_window`, de la fecha más próxima a la más lejana
fn imminent_query(kind: DueKind, today: NaiveDate) -> QueryBuilder<'static, Postgres> {
    let (after, before) = imminent_window(today);
    let column = kind.column();

    let mut builder = QueryBuilder::<Postgres>::new(OVERVIEW_SELECT);
    builder
        .push(format!(" WHERE {} > ", column))
        .push_bind(after)
        .push(format!(" AND {} < ", column))
        .push_bind(before)
        .push(format!(" ORDER BY {} ASC, v.license_plate", column));
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("AB-1"), "AB-1");
        assert_eq!(escape_like("50%_x"), "50\\%\\_x");
    }

    #[test]
    fn test_due_kind_columns() {
        assert_eq!(DueKind::Maintenance.column(), "v.projected_maintenance");
        assert_eq!(DueKind::Inspection.column(), "v.projected_inspection");
    }

    #[test]
    fn test_imminent_query_uses_exclusive_window_ascending() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let builder = imminent_query(DueKind::Inspection, today);
        let sql = builder.sql();
        assert!(sql.contains(
            "WHERE v.projected_inspection > $1 AND v.projected_inspection < $2 \
             ORDER BY v.projected_inspection ASC"
        ));
    }
}
