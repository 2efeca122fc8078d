use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::catalog_dto::{CreateBrandRequest, CreateEstablishmentRequest, CreateModelRequest, CreatePoleRequest};
use crate::dto::ApiResponse;
use crate::models::catalog::{Brand, Establishment, EstablishmentWithPole, Pole, VehicleModel, VehicleModelWithBrand};
use crate::repositories::CatalogRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError};

pub struct CatalogController {
    repository: CatalogRepository,
}

impl CatalogController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CatalogRepository::new(pool),
        }
    }

    pub async fn create_pole(&self, request: CreatePoleRequest) -> Result<ApiResponse<Pole>, AppError> {
        let name = required_name(&request.name)?;
        request.validate()?;
        let pole = self.repository.create_pole(name).await?;
        Ok(ApiResponse::success_with_message(pole, "Pole creado exitosamente"))
    }

    pub async fn list_poles(&self) -> Result<Vec<Pole>, AppError> {
        self.repository.list_poles().await
    }

    pub async fn delete_pole(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete_pole(id).await? {
            return Err(not_found_error("Pole", &id.to_string()));
        }
        Ok(ApiResponse::message("Pole eliminado exitosamente"))
    }

    pub async fn create_establishment(
        &self,
        request: CreateEstablishmentRequest,
    ) -> Result<ApiResponse<Establishment>, AppError> {
        let name = required_name(&request.name)?;
        request.validate()?;
        if !self.repository.pole_exists(request.pole_id).await? {
            return Err(validation_error("pole_id", "El pole no existe"));
        }
        let establishment = self.repository.create_establishment(name, request.pole_id).await?;
        Ok(ApiResponse::success_with_message(
            establishment,
            "Establecimiento creado exitosamente",
        ))
    }

    pub async fn list_establishments(&self) -> Result<Vec<EstablishmentWithPole>, AppError> {
        self.repository.list_establishments().await
    }

    pub async fn delete_establishment(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete_establishment(id).await? {
            return Err(not_found_error("Establishment", &id.to_string()));
        }
        Ok(ApiResponse::message("Establecimiento eliminado exitosamente"))
    }

    pub async fn create_brand(&self, request: CreateBrandRequest) -> Result<ApiResponse<Brand>, AppError> {
        let name = required_name(&request.name)?;
        request.validate()?;
        let brand = self.repository.create_brand(name).await?;
        Ok(ApiResponse::success_with_message(brand, "Marca creada exitosamente"))
    }

    pub async fn list_brands(&self) -> Result<Vec<Brand>, AppError> {
        self.repository.list_brands().await
    }

    pub async fn create_model(&self, request: CreateModelRequest) -> Result<ApiResponse<VehicleModel>, AppError> {
        let name = required_name(&request.name)?;
        request.validate()?;
        if !self.repository.brand_exists(request.brand_id).await? {
            return Err(validation_error("brand_id", "La marca no existe"));
        }
        let model = self.repository.create_model(name, request.brand_id).await?;
        Ok(ApiResponse::success_with_message(model, "Modelo creado exitosamente"))
    }

    pub async fn list_models(&self) -> Result<Vec<VehicleModelWithBrand>, AppError> {
        self.repository.list_models().await
    }

    pub async fn delete_model(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete_model(id).await? {
            return Err(not_found_error("Model", &id.to_string()));
        }
        Ok(ApiResponse::message("Modelo eliminado exitosamente"))
    }
}

fn required_name(name: &str) -> Result<&str, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(validation_error("name", "El nombre es requerido"));
    }
    Ok(trimmed)
}
