//! Modelo de Document
//!
//! Documentos adjuntos a un vehículo, versionados por tipo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Tipo de documento - se guarda como texto en documents.doc_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Contract,
    RegistrationCard,
    InspectionCertificate,
    Invoice,
    Photo,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Contract,
        DocumentType::RegistrationCard,
        DocumentType::InspectionCertificate,
        DocumentType::Invoice,
        DocumentType::Photo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Contract => "contract",
            DocumentType::RegistrationCard => "registration_card",
            DocumentType::InspectionCertificate => "inspection_certificate",
            DocumentType::Invoice => "invoice",
            DocumentType::Photo => "photo",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    /// Extensiones aceptadas para este tipo
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            DocumentType::Photo => &["jpg", "jpeg", "png"],
            _ => &["pdf", "jpg", "jpeg", "png"],
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document - mapea exactamente a la tabla documents
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub doc_type: String,
    pub version: i32,
    pub filename: String,
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    pub fn document_type(&self) -> Option<DocumentType> {
        DocumentType::parse(&self.doc_type)
    }
}
