use sqlx::PgPool;
use uuid::Uuid;

use crate::models::catalog::{Brand, Establishment, EstablishmentWithPole, Pole, VehicleModel, VehicleModelWithBrand};
use crate::utils::errors::AppError;

/// Datos de referencia: poles, establecimientos, marcas y modelos
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---- Poles ----

    pub async fn create_pole(&self, name: &str) -> Result<Pole, AppError> {
        let pole = sqlx::query_as::<_, Pole>("INSERT INTO poles (id, name) VALUES ($1, $2) RETURNING id, name")
            .bind(Uuid::new_v4())
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(pole)
    }

    pub async fn list_poles(&self) -> Result<Vec<Pole>, AppError> {
        let poles = sqlx::query_as::<_, Pole>("SELECT id, name FROM poles ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(poles)
    }

    pub async fn pole_exists(&self, id: Uuid) -> Result<bool, AppError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM poles WHERE id = $1)", id).await
    }

    pub async fn delete_pole(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete("DELETE FROM poles WHERE id = $1", id).await
    }

    // ---- Establecimientos ----

    pub async fn create_establishment(&self, name: &str, pole_id: Uuid) -> Result<Establishment, AppError> {
        let establishment = sqlx::query_as::<_, Establishment>(
            "INSERT INTO establishments (id, name, pole_id) VALUES ($1, $2, $3) RETURNING id, name, pole_id",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(pole_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(establishment)
    }

    pub async fn list_establishments(&self) -> Result<Vec<EstablishmentWithPole>, AppError> {
        let establishments = sqlx::query_as::<_, EstablishmentWithPole>(
            r#"
            SELECT e.id, e.name, e.pole_id, p.name AS pole_name
            FROM establishments e
            JOIN poles p ON p.id = e.pole_id
            ORDER BY e.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(establishments)
    }

    pub async fn establishment_exists(&self, id: Uuid) -> Result<bool, AppError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM establishments WHERE id = $1)", id)
            .await
    }

    pub async fn delete_establishment(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete("DELETE FROM establishments WHERE id = $1", id).await
    }

    // ---- Marcas ----

    pub async fn create_brand(&self, name: &str) -> Result<Brand, AppError> {
        let brand = sqlx::query_as::<_, Brand>("INSERT INTO brands (id, name) VALUES ($1, $2) RETURNING id, name")
            .bind(Uuid::new_v4())
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(brand)
    }

    pub async fn list_brands(&self) -> Result<Vec<Brand>, AppError> {
        let brands = sqlx::query_as::<_, Brand>("SELECT id, name FROM brands ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(brands)
    }

    pub async fn brand_exists(&self, id: Uuid) -> Result<bool, AppError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM brands WHERE id = $1)", id).await
    }

    // ---- Modelos ----

    pub async fn create_model(&self, name: &str, brand_id: Uuid) -> Result<VehicleModel, AppError> {
        let model = sqlx::query_as::<_, VehicleModel>(
            "INSERT INTO vehicle_models (id, name, brand_id) VALUES ($1, $2, $3) RETURNING id, name, brand_id",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(brand_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(model)
    }

    pub async fn list_models(&self) -> Result<Vec<VehicleModelWithBrand>, AppError> {
        let models = sqlx::query_as::<_, VehicleModelWithBrand>(
            r#"
            SELECT m.id, m.name, m.brand_id, b.name AS brand_name
            FROM vehicle_models m
            JOIN brands b ON b.id = m.brand_id
            ORDER BY m.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(models)
    }

    pub async fn find_model(&self, id: Uuid) -> Result<Option<VehicleModel>, AppError> {
        let model = sqlx::query_as::<_, VehicleModel>("SELECT id, name, brand_id FROM vehicle_models WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(model)
    }

    pub async fn delete_model(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete("DELETE FROM vehicle_models WHERE id = $1", id).await
    }

    async fn exists(&self, query: &str, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(query).bind(id).fetch_one(&self.pool).await?;
        Ok(result.0)
    }

    /// Las claves foráneas RESTRICT convierten un borrado referenciado en Conflict
    async fn delete(&self, query: &str, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
