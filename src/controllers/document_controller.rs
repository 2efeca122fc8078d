use tracing::info;
use uuid::Uuid;

use crate::dto::document_dto::{group_documents, DocumentGroups, UploadResponse};
use crate::dto::ApiResponse;
use crate::models::document::{Document, DocumentType};
use crate::repositories::{DocumentRepository, VehicleRepository};
use crate::services::upload_storage::{PendingUpload, UploadStorage};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct DocumentController {
    documents: DocumentRepository,
    vehicles: VehicleRepository,
    storage: UploadStorage,
}

impl DocumentController {
    pub fn new(state: &AppState) -> Self {
        Self {
            documents: DocumentRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            storage: state.storage.clone(),
        }
    }

    /// Valida todos los ficheros antes de guardar ninguno
    pub async fn upload(
        &self,
        vehicle_id: Uuid,
        uploads: Vec<PendingUpload>,
    ) -> Result<ApiResponse<UploadResponse>, AppError> {
        self.ensure_vehicle(vehicle_id).await?;

        if uploads.is_empty() {
            return Err(AppError::BadRequest("No se ha enviado ningún fichero".to_string()));
        }

        let accepted = self.storage.validate(uploads)?;
        let mut stored = Vec::with_capacity(accepted.len());

        for upload in &accepted {
            let filename = self.storage.store(vehicle_id, upload).await?;
            let document = self
                .documents
                .create(vehicle_id, upload.doc_type, &filename, &upload.original_name)
                .await?;

            if upload.doc_type == DocumentType::Photo {
                self.vehicles.set_photo(vehicle_id, &filename).await?;
            }

            info!(
                "📎 Documento {} v{} añadido al vehículo {}",
                document.doc_type, document.version, vehicle_id
            );
            stored.push(document);
        }

        Ok(ApiResponse::success_with_message(
            UploadResponse { stored },
            "Documentos subidos exitosamente",
        ))
    }

    pub async fn list(&self, vehicle_id: Uuid) -> Result<DocumentGroups, AppError> {
        self.ensure_vehicle(vehicle_id).await?;
        let documents = self.documents.list_by_vehicle(vehicle_id).await?;
        Ok(group_documents(documents))
    }

    pub async fn download(&self, id: Uuid) -> Result<(Document, Vec<u8>), AppError> {
        let document = self.find(id).await?;
        let bytes = self
            .storage
            .read(document.vehicle_id, &document.doc_type, &document.filename)
            .await?;
        Ok((document, bytes))
    }

    /// Si el fichero ya no está en disco se responde 404 y la fila se conserva
    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let document = self.find(id).await?;
        self.storage
            .remove(document.vehicle_id, &document.doc_type, &document.filename)
            .await?;
        self.documents.delete(id).await?;

        info!("🗑️ Documento eliminado: {} ({})", document.original_name, id);
        Ok(ApiResponse::message("Documento eliminado exitosamente"))
    }

    async fn find(&self, id: Uuid) -> Result<Document, AppError> {
        self.documents
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Document", &id.to_string()))
    }

    async fn ensure_vehicle(&self, vehicle_id: Uuid) -> Result<(), AppError> {
        match self.vehicles.find_by_id(vehicle_id).await? {
            Some(_) => Ok(()),
            None => Err(not_found_error("Vehicle", &vehicle_id.to_string())),
        }
    }
}
