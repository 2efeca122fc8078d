//! Repositorios
//!
//! Acceso a PostgreSQL. Cada repositorio recibe un clon del pool.

pub mod catalog_repository;
pub mod document_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use catalog_repository::CatalogRepository;
pub use document_repository::DocumentRepository;
pub use user_repository::UserRepository;
pub use vehicle_repository::{DueKind, VehicleRepository};
