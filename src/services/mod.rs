//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: proyección
//! de vencimientos, evaluación de inminencia, almacenamiento de documentos
//! y export CSV.

pub mod csv_export;
pub mod due_date_projector;
pub mod soon_due_evaluator;
pub mod upload_storage;

pub use due_date_projector::{project, ProjectedDates};
pub use soon_due_evaluator::{is_imminent, DueFlags};
pub use upload_storage::UploadStorage;
