// Temperature controller - Measurements, optionally scoped to one aquarium
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::maintenance_repository::MaintenanceRepository;
use crate::application::validators::{required, Validator};
use crate::application::{found, resolve_sort};
use crate::domain::order_by::{OrderBy, TemperatureSort};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::temperature::{AquariumTemperature, NewTemperature, TemperaturePayload};
use std::sync::Arc;

#[derive(Clone)]
pub struct TemperatureController {
    repository: Arc<dyn MaintenanceRepository>,
    validator: Validator,
}

impl TemperatureController {
    pub fn new(repository: Arc<dyn MaintenanceRepository>, validator: Validator) -> Self {
        Self {
            repository,
            validator,
        }
    }

    pub async fn count_all(&self, aquarium_id: Option<i64>) -> ServiceResult<u64> {
        Ok(self.repository.count_temperatures(aquarium_id).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<AquariumTemperature>> {
        Ok(self.repository.get_temperature(id).await?)
    }

    pub async fn get_multiple(
        &self,
        order_by: &OrderBy,
        aquarium_id: Option<i64>,
        page: PageRequest,
    ) -> ServiceResult<Vec<AquariumTemperature>> {
        let sort = resolve_sort::<TemperatureSort>(order_by)?;
        tracing::debug!(?aquarium_id, %order_by, page = page.page, "Listing temperatures");
        Ok(self.repository.list_temperatures(aquarium_id, sort, page).await?)
    }

    pub async fn list(
        &self,
        order_by: &OrderBy,
        aquarium_id: Option<i64>,
        page: PageRequest,
    ) -> ServiceResult<Page<AquariumTemperature>> {
        let content = self.get_multiple(order_by, aquarium_id, page).await?;
        let total = self.count_all(aquarium_id).await?;
        Ok(Page::new(content, page, total))
    }

    pub async fn create(&self, payload: TemperaturePayload) -> ServiceResult<AquariumTemperature> {
        let temperature = Validator::temperature(required("celsius", payload.celsius)?)?;
        let aquarium_id = self
            .validator
            .aquarium_id(required("aquarium_id", payload.aquarium_id)?)
            .await?;

        let measurement = self
            .repository
            .insert_temperature(NewTemperature {
                temperature,
                aquarium_id,
            })
            .await?;

        tracing::info!(
            temperature_id = measurement.id,
            aquarium_id,
            celsius = temperature,
            "Recorded temperature"
        );
        Ok(measurement)
    }

    pub async fn update(
        &self,
        id: i64,
        payload: TemperaturePayload,
    ) -> ServiceResult<AquariumTemperature> {
        let mut measurement = found("Temperature", id, self.get_by_id(id).await?)?;

        let celsius = payload.celsius.map(Validator::temperature).transpose()?;
        let aquarium_id = match payload.aquarium_id {
            Some(aquarium_id) => Some(self.validator.aquarium_id(aquarium_id).await?),
            None => None,
        };

        measurement.apply(celsius, aquarium_id);
        self.repository.save_temperature(&measurement).await?;

        tracing::info!(temperature_id = id, "Updated temperature");
        Ok(measurement)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.repository.delete_temperature(id).await? {
            return Err(ServiceError::not_found("Temperature", id));
        }
        tracing::info!(temperature_id = id, "Deleted temperature");
        Ok(())
    }
}
