//! Controllers
//!
//! Orquestan validación, repositorios y servicios para cada recurso.

pub mod auth_controller;
pub mod catalog_controller;
pub mod document_controller;
pub mod vehicle_controller;

pub use auth_controller::AuthController;
pub use catalog_controller::CatalogController;
pub use document_controller::DocumentController;
pub use vehicle_controller::VehicleController;
