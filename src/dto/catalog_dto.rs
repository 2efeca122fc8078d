use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// Request para crear un pole
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePoleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

// Request para crear un establecimiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEstablishmentRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub pole_id: Uuid,
}

// Request para crear una marca
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBrandRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

// Request para crear un modelo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateModelRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub brand_id: Uuid,
}
