// Fertilizer controller - Includes chemical set reconciliation
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::maintenance_repository::MaintenanceRepository;
use crate::application::validators::{required, Validator};
use crate::application::{found, resolve_sort};
use crate::domain::fertilizer::{Fertilizer, FertilizerChange, FertilizerPayload, NewFertilizer};
use crate::domain::order_by::{NameSort, OrderBy};
use crate::domain::pagination::{Page, PageRequest};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct FertilizerController {
    repository: Arc<dyn MaintenanceRepository>,
    validator: Validator,
}

/// Chemicals to add and to remove so that `current` becomes `desired`.
/// Ids present in both are left alone.
pub fn reconcile_chemicals(current: &BTreeSet<i64>, desired: &[i64]) -> (Vec<i64>, Vec<i64>) {
    let desired: BTreeSet<i64> = desired.iter().copied().collect();
    let add = desired.difference(current).copied().collect();
    let remove = current.difference(&desired).copied().collect();
    (add, remove)
}

impl FertilizerController {
    pub fn new(repository: Arc<dyn MaintenanceRepository>, validator: Validator) -> Self {
        Self {
            repository,
            validator,
        }
    }

    pub async fn count_all(&self, chemical_id: Option<i64>) -> ServiceResult<u64> {
        Ok(self.repository.count_fertilizers(chemical_id).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<Fertilizer>> {
        Ok(self.repository.get_fertilizer(id).await?)
    }

    /// Fertilizers containing `chemical_id` when given, all fertilizers otherwise.
    pub async fn get_multiple(
        &self,
        order_by: &OrderBy,
        chemical_id: Option<i64>,
        page: PageRequest,
    ) -> ServiceResult<Vec<Fertilizer>> {
        let sort = resolve_sort::<NameSort>(order_by)?;
        tracing::debug!(?chemical_id, %order_by, page = page.page, "Listing fertilizers");
        Ok(self.repository.list_fertilizers(chemical_id, sort, page).await?)
    }

    pub async fn list(
        &self,
        order_by: &OrderBy,
        chemical_id: Option<i64>,
        page: PageRequest,
    ) -> ServiceResult<Page<Fertilizer>> {
        let content = self.get_multiple(order_by, chemical_id, page).await?;
        let total = self.count_all(chemical_id).await?;
        Ok(Page::new(content, page, total))
    }

    pub async fn create(&self, payload: FertilizerPayload) -> ServiceResult<Fertilizer> {
        let name = Validator::name(required("name", payload.name)?)?;
        let chemical_ids = self
            .validator
            .chemicals(payload.chemicals.unwrap_or_default())
            .await?;

        if self.repository.fertilizer_name_exists(&name).await? {
            return Err(ServiceError::name_taken(&name));
        }

        let chemical_ids: Vec<i64> = chemical_ids
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let fertilizer = self
            .repository
            .insert_fertilizer(NewFertilizer { name, chemical_ids })
            .await?;

        tracing::info!(
            fertilizer_id = fertilizer.id,
            chemicals = fertilizer.chemicals.len(),
            "Created fertilizer"
        );
        Ok(fertilizer)
    }

    pub async fn update(&self, id: i64, payload: FertilizerPayload) -> ServiceResult<Fertilizer> {
        let fertilizer = found("Fertilizer", id, self.get_by_id(id).await?)?;

        let name = payload.name.map(Validator::name).transpose()?;
        let desired = match payload.chemicals {
            Some(ids) => Some(self.validator.chemicals(ids).await?),
            None => None,
        };

        let mut change = FertilizerChange::default();
        if let Some(name) = name {
            if name != fertilizer.name {
                if self.repository.fertilizer_name_exists(&name).await? {
                    return Err(ServiceError::name_taken(&name));
                }
                change.name = Some(name);
            }
        }
        if let Some(desired) = desired {
            let (add, remove) = reconcile_chemicals(&fertilizer.chemical_ids(), &desired);
            change.add_chemicals = add;
            change.remove_chemicals = remove;
        }

        if change.is_empty() {
            return Ok(fertilizer);
        }

        tracing::info!(
            fertilizer_id = id,
            added = ?change.add_chemicals,
            removed = ?change.remove_chemicals,
            "Updating fertilizer"
        );
        self.repository.apply_fertilizer_change(id, change).await?;

        found("Fertilizer", id, self.get_by_id(id).await?)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.repository.delete_fertilizer(id).await? {
            return Err(ServiceError::not_found("Fertilizer", id));
        }
        tracing::info!(fertilizer_id = id, "Deleted fertilizer");
        Ok(())
    }
}
