use sqlx::PgPool;
use uuid::Uuid;

use crate::models::document::{Document, DocumentType};
use crate::utils::errors::{not_found_error, AppError};

const LOCK_VEHICLE: &str = "SELECT id FROM vehicles WHERE id = $1 FOR UPDATE";

const LATEST_VERSION: &str =
    "SELECT COALESCE(MAX(version), 0) FROM documents WHERE vehicle_id = $1 AND doc_type = $2";

pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta con version = versión más alta del mismo tipo + 1, con la
    /// fila del vehículo bloqueada hasta el commit
    pub async fn create(
        &self,
        vehicle_id: Uuid,
        doc_type: DocumentType,
        filename: &str,
        original_name: &str,
    ) -> Result<Document, AppError> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<(Uuid,)> = sqlx::query_as(LOCK_VEHICLE)
            .bind(vehicle_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(not_found_error("Vehicle", &vehicle_id.to_string()));
        }

        let (latest,): (i32,) = sqlx::query_as(LATEST_VERSION)
            .bind(vehicle_id)
            .bind(doc_type.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (id, vehicle_id, doc_type, version, filename, original_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(doc_type.as_str())
        .bind(latest + 1)
        .bind(filename)
        .bind(original_name)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(document)
    }

    /// Documentos del vehículo, por tipo y versión más reciente primero
    pub async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE vehicle_id = $1 ORDER BY doc_type, version DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(document)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
