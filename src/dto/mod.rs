//! DTOs de la API
//!
//! Requests y responses expuestos por los endpoints JSON.

pub mod api_response;
pub mod auth_dto;
pub mod catalog_dto;
pub mod document_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
