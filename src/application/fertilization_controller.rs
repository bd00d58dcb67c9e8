// Fertilization controller
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::maintenance_repository::MaintenanceRepository;
use crate::application::validators::{required, Validator};
use crate::application::{found, resolve_sort};
use crate::domain::fertilization::{Fertilization, FertilizationPayload, NewFertilization};
use crate::domain::order_by::{FertilizationSort, OrderBy};
use crate::domain::pagination::{Page, PageRequest};
use std::sync::Arc;

#[derive(Clone)]
pub struct FertilizationController {
    repository: Arc<dyn MaintenanceRepository>,
    validator: Validator,
}

impl FertilizationController {
    pub fn new(repository: Arc<dyn MaintenanceRepository>, validator: Validator) -> Self {
        Self {
            repository,
            validator,
        }
    }

    pub async fn count_all(&self, aquarium_id: Option<i64>) -> ServiceResult<u64> {
        Ok(self.repository.count_fertilizations(aquarium_id).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<Fertilization>> {
        Ok(self.repository.get_fertilization(id).await?)
    }

    pub async fn get_multiple(
        &self,
        order_by: &OrderBy,
        aquarium_id: Option<i64>,
        page: PageRequest,
    ) -> ServiceResult<Vec<Fertilization>> {
        let sort = resolve_sort::<FertilizationSort>(order_by)?;
        tracing::debug!(?aquarium_id, %order_by, page = page.page, "Listing fertilizations");
        Ok(self
            .repository
            .list_fertilizations(aquarium_id, sort, page)
            .await?)
    }

    pub async fn list(
        &self,
        order_by: &OrderBy,
        aquarium_id: Option<i64>,
        page: PageRequest,
    ) -> ServiceResult<Page<Fertilization>> {
        let content = self.get_multiple(order_by, aquarium_id, page).await?;
        let total = self.count_all(aquarium_id).await?;
        Ok(Page::new(content, page, total))
    }

    pub async fn create(&self, payload: FertilizationPayload) -> ServiceResult<Fertilization> {
        let amount_in_milliliter =
            Validator::amount(required("amount_in_milliliter", payload.amount_in_milliliter)?)?;
        let aquarium_id = self
            .validator
            .aquarium_id(required("aquarium_id", payload.aquarium_id)?)
            .await?;
        let fertilizer_id = self
            .validator
            .fertilizer_id(required("fertilizer_id", payload.fertilizer_id)?)
            .await?;

        let fertilization = self
            .repository
            .insert_fertilization(NewFertilization {
                amount_in_milliliter,
                aquarium_id,
                fertilizer_id,
            })
            .await?;

        tracing::info!(
            fertilization_id = fertilization.id,
            aquarium_id,
            fertilizer_id,
            "Recorded fertilization"
        );
        Ok(fertilization)
    }

    pub async fn update(
        &self,
        id: i64,
        payload: FertilizationPayload,
    ) -> ServiceResult<Fertilization> {
        let mut fertilization = found("Fertilization", id, self.get_by_id(id).await?)?;

        let checked = FertilizationPayload {
            amount_in_milliliter: payload
                .amount_in_milliliter
                .map(Validator::amount)
                .transpose()?,
            aquarium_id: match payload.aquarium_id {
                Some(aquarium_id) => Some(self.validator.aquarium_id(aquarium_id).await?),
                None => None,
            },
            fertilizer_id: match payload.fertilizer_id {
                Some(fertilizer_id) => Some(self.validator.fertilizer_id(fertilizer_id).await?),
                None => None,
            },
        };

        fertilization.apply(checked);
        self.repository.save_fertilization(&fertilization).await?;

        tracing::info!(fertilization_id = id, "Updated fertilization");
        Ok(fertilization)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.repository.delete_fertilization(id).await? {
            return Err(ServiceError::not_found("Fertilization", id));
        }
        tracing::info!(fertilization_id = id, "Deleted fertilization");
        Ok(())
    }
}
