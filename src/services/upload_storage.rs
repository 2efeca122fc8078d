//! Almacenamiento de documentos en disco
//!
//! Estructura: `<UPLOAD_DIR>/vehicles/<vehicle_id>/<tipo>/<aleatorio>.<ext>`.
//! Los nombres guardados son UUID; el nombre original solo se conserva en BD.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::models::document::DocumentType;
use crate::utils::errors::{field_error, AppError, AppResult};

/// Fichero recibido en memoria, todavía sin guardar
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub doc_type: DocumentType,
    pub original_name: String,
    pub bytes: Vec<u8>,
}

/// Fichero validado, con la extensión normalizada
#[derive(Debug, Clone)]
pub struct AcceptedUpload {
    pub doc_type: DocumentType,
    pub original_name: String,
    pub extension: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadStorage {
    root: PathBuf,
    max_size: usize,
}

impl UploadStorage {
    pub fn new(root: impl Into<PathBuf>, max_size: usize) -> Self {
        Self {
            root: root.into(),
            max_size,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn vehicle_dir(&self, vehicle_id: Uuid) -> PathBuf {
        self.root.join("vehicles").join(vehicle_id.to_string())
    }

    pub fn file_path(&self, vehicle_id: Uuid, doc_type: &str, filename: &str) -> PathBuf {
        self.vehicle_dir(vehicle_id).join(doc_type).join(filename)
    }

    /// Valida todos los ficheros y devuelve todos los problemas juntos.
    /// Si hay uno solo inválido no se acepta ninguno.
    pub fn validate(&self, uploads: Vec<PendingUpload>) -> Result<Vec<AcceptedUpload>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut accepted = Vec::with_capacity(uploads.len());

        for upload in uploads {
            let field = upload.doc_type.as_str();
            let Some(extension) = extension_of(&upload.original_name) else {
                errors.add(
                    field,
                    field_error(format!("'{}' no tiene extensión", upload.original_name)),
                );
                continue;
            };
            if !upload.doc_type.allowed_extensions().contains(&extension.as_str()) {
                errors.add(
                    field,
                    field_error(format!(
                        "'{}': extensión .{} no permitida para {}",
                        upload.original_name, extension, upload.doc_type
                    )),
                );
                continue;
            }
            if upload.bytes.len() > self.max_size {
                errors.add(
                    field,
                    field_error(format!(
                        "'{}' supera el tamaño máximo de {} bytes",
                        upload.original_name, self.max_size
                    )),
                );
                continue;
            }
            accepted.push(AcceptedUpload {
                doc_type: upload.doc_type,
                original_name: upload.original_name,
                extension,
                bytes: upload.bytes,
            });
        }

        if errors.errors().is_empty() {
            Ok(accepted)
        } else {
            Err(errors)
        }
    }

    /// Guarda el fichero y devuelve el nombre aleatorio generado
    pub async fn store(&self, vehicle_id: Uuid, upload: &AcceptedUpload) -> AppResult<String> {
        let dir = self.vehicle_dir(vehicle_id).join(upload.doc_type.as_str());
        tokio::fs::create_dir_all(&dir).await?;

        let filename = format!("{}.{}", Uuid::new_v4().simple(), upload.extension);
        tokio::fs::write(dir.join(&filename), &upload.bytes).await?;
        debug!("💾 Documento guardado: {}/{}", dir.display(), filename);

        Ok(filename)
    }

    pub async fn read(&self, vehicle_id: Uuid, doc_type: &str, filename: &str) -> AppResult<Vec<u8>> {
        let path = self.file_path(vehicle_id, doc_type, filename);
        tokio::fs::read(&path).await.map_err(|e| missing_or_storage(e, &path))
    }

    pub async fn remove(&self, vehicle_id: Uuid, doc_type: &str, filename: &str) -> AppResult<()> {
        let path = self.file_path(vehicle_id, doc_type, filename);
        tokio::fs::remove_file(&path).await.map_err(|e| missing_or_storage(e, &path))
    }

    /// Borra la carpeta completa del vehículo; no falla si ya no existe
    pub async fn remove_vehicle_dir(&self, vehicle_id: Uuid) -> AppResult<()> {
        let dir = self.vehicle_dir(vehicle_id);
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!("⚠️ No se pudo borrar {}: {}", dir.display(), e);
                Err(e.into())
            }
        }
    }
}

fn missing_or_storage(error: std::io::Error, path: &Path) -> AppError {
    if error.kind() == ErrorKind::NotFound {
        AppError::NotFound(format!("Fichero no encontrado: {}", path.display()))
    } else {
        AppError::Storage(error)
    }
}

/// Extensión en minúsculas, sin el punto
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .filter(|ext| !ext.is_empty())
}

pub fn content_type_for(filename: &str) -> &'static str {
    match extension_of(filename).as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}
