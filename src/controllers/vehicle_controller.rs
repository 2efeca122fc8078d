use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::document_dto::group_documents;
use crate::dto::vehicle_dto::{VehicleDetailResponse, VehicleForm, VehicleInput, VehicleResponse};
use crate::dto::ApiResponse;
use crate::models::vehicle::{SortDirection, VehicleDraft, VehicleFilters, VehicleOverview, VehicleSort};
use crate::repositories::{CatalogRepository, DocumentRepository, DueKind, VehicleRepository};
use crate::services::csv_export::{export_filename, export_vehicles};
use crate::services::due_date_projector::project;
use crate::services::upload_storage::UploadStorage;
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, validation_error, AppError};

/// CSV listo para descargar
pub struct CsvExport {
    pub filename: String,
    pub content: Vec<u8>,
}

pub struct VehicleController {
    vehicles: VehicleRepository,
    catalog: CatalogRepository,
    documents: DocumentRepository,
    storage: UploadStorage,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: VehicleRepository::new(state.pool.clone()),
            catalog: CatalogRepository::new(state.pool.clone()),
            documents: DocumentRepository::new(state.pool.clone()),
            storage: state.storage.clone(),
        }
    }

    pub async fn create(&self, form: VehicleForm, today: NaiveDate) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let input = form.into_input()?;
        let draft = self.prepare_draft(input, None).await?;

        let vehicle = self.vehicles.create(&draft).await?;
        info!("🚗 Vehículo creado: {} ({})", vehicle.license_plate, vehicle.id);

        let overview = self.overview(vehicle.id).await?;
        Ok(ApiResponse::success_with_message(
            VehicleResponse::new(overview, today),
            "Vehículo creado exitosamente",
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: VehicleForm,
        today: NaiveDate,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        if self.vehicles.find_by_id(id).await?.is_none() {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        let input = form.into_input()?;
        let draft = self.prepare_draft(input, Some(id)).await?;

        self.vehicles
            .update(id, &draft)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        let overview = self.overview(id).await?;
        Ok(ApiResponse::success_with_message(
            VehicleResponse::new(overview, today),
            "Vehículo actualizado exitosamente",
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, today: NaiveDate) -> Result<VehicleDetailResponse, AppError> {
        let overview = self.overview(id).await?;
        let documents = self.documents.list_by_vehicle(id).await?;

        Ok(VehicleDetailResponse {
            vehicle: VehicleResponse::new(overview, today),
            documents: group_documents(documents),
        })
    }

    pub async fn list(&self, filters: &VehicleFilters, today: NaiveDate) -> Result<Vec<VehicleResponse>, AppError> {
        let sort = VehicleSort::from_param(filters.sort.as_deref());
        let direction = SortDirection::from_param(filters.dir.as_deref());

        let vehicles = self.vehicles.list(filters, sort, direction).await?;
        Ok(vehicles
            .into_iter()
            .map(|vehicle| VehicleResponse::new(vehicle, today))
            .collect())
    }

    pub async fn list_imminent(&self, kind: DueKind, today: NaiveDate) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.vehicles.list_imminent(kind, today).await?;
        Ok(vehicles
            .into_iter()
            .map(|vehicle| VehicleResponse::new(vehicle, today))
            .collect())
    }

    /// Mismos filtros que el listado, siempre por fecha de creación
    pub async fn export(&self, filters: &VehicleFilters, today: NaiveDate) -> Result<CsvExport, AppError> {
        let vehicles = self
            .vehicles
            .list(filters, VehicleSort::Created, SortDirection::Asc)
            .await?;

        Ok(CsvExport {
            filename: export_filename(today),
            content: export_vehicles(&vehicles)?,
        })
    }

    /// Borra filas en transacción y después la carpeta de ficheros
    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.vehicles.delete(id).await? {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        if let Err(e) = self.storage.remove_vehicle_dir(id).await {
            warn!("⚠️ Vehículo {} borrado pero sus ficheros no: {}", id, e);
        }

        info!("🗑️ Vehículo eliminado: {}", id);
        Ok(ApiResponse::message("Vehículo eliminado exitosamente"))
    }

    async fn overview(&self, id: Uuid) -> Result<VehicleOverview, AppError> {
        self.vehicles
            .find_overview(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    /// Comprueba referencias y matrícula, y calcula las fechas proyectadas
    async fn prepare_draft(&self, input: VehicleInput, exclude_id: Option<Uuid>) -> Result<VehicleDraft, AppError> {
        let model = self
            .catalog
            .find_model(input.model_id)
            .await?
            .ok_or_else(|| validation_error("model_id", "El modelo no existe"))?;
        if model.brand_id != input.brand_id {
            return Err(validation_error(
                "model_id",
                "El modelo no pertenece a la marca seleccionada",
            ));
        }

        if !self.catalog.establishment_exists(input.establishment_id).await? {
            return Err(validation_error("establishment_id", "El establecimiento no existe"));
        }

        if self
            .vehicles
            .license_plate_exists(&input.license_plate, exclude_id)
            .await?
        {
            return Err(conflict_error("Vehicle", "license_plate", &input.license_plate));
        }

        Ok(build_draft(input))
    }
}

/// Las fechas proyectadas se recalculan siempre desde el historial enviado
pub fn build_draft(input: VehicleInput) -> VehicleDraft {
    let projected = project(
        &input.maintenance,
        &input.inspections,
        Some(input.lease_start),
        input.vehicle_class,
    );

    VehicleDraft {
        establishment_id: input.establishment_id,
        model_id: input.model_id,
        license_plate: input.license_plate,
        monthly_payment: input.monthly_payment,
        lease_start: input.lease_start,
        initial_mileage: input.initial_mileage,
        maintenance: input.maintenance,
        inspections: input.inspections,
        projected_maintenance: projected.maintenance,
        projected_inspection: projected.inspection,
        seats: input.seats,
        vehicle_class: input.vehicle_class,
        notes: input.notes,
    }
}
