// Chemical controller
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::maintenance_repository::MaintenanceRepository;
use crate::application::validators::{required, Validator};
use crate::application::{found, resolve_sort};
use crate::domain::chemical::{Chemical, ChemicalPayload};
use crate::domain::order_by::{NameSort, OrderBy};
use crate::domain::pagination::{Page, PageRequest};
use std::sync::Arc;

#[derive(Clone)]
pub struct ChemicalController {
    repository: Arc<dyn MaintenanceRepository>,
}

impl ChemicalController {
    pub fn new(repository: Arc<dyn MaintenanceRepository>) -> Self {
        Self { repository }
    }

    pub async fn count_all(&self, fertilizer_id: Option<i64>) -> ServiceResult<u64> {
        Ok(self.repository.count_chemicals(fertilizer_id).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<Chemical>> {
        Ok(self.repository.get_chemical(id).await?)
    }

    /// Chemicals contained in `fertilizer_id` when given, all chemicals otherwise.
    pub async fn get_multiple(
        &self,
        order_by: &OrderBy,
        fertilizer_id: Option<i64>,
        page: PageRequest,
    ) -> ServiceResult<Vec<Chemical>> {
        let sort = resolve_sort::<NameSort>(order_by)?;
        tracing::debug!(?fertilizer_id, %order_by, page = page.page, "Listing chemicals");
        Ok(self.repository.list_chemicals(fertilizer_id, sort, page).await?)
    }

    pub async fn list(
        &self,
        order_by: &OrderBy,
        fertilizer_id: Option<i64>,
        page: PageRequest,
    ) -> ServiceResult<Page<Chemical>> {
        let content = self.get_multiple(order_by, fertilizer_id, page).await?;
        let total = self.count_all(fertilizer_id).await?;
        Ok(Page::new(content, page, total))
    }

    pub async fn create(&self, payload: ChemicalPayload) -> ServiceResult<Chemical> {
        let name = Validator::name(required("name", payload.name)?)?;
        if self.repository.chemical_name_exists(&name).await? {
            return Err(ServiceError::name_taken(&name));
        }

        let chemical = self.repository.insert_chemical(name).await?;
        tracing::info!(chemical_id = chemical.id, name = %chemical.name, "Created chemical");
        Ok(chemical)
    }

    pub async fn update(&self, id: i64, payload: ChemicalPayload) -> ServiceResult<Chemical> {
        let mut chemical = found("Chemical", id, self.get_by_id(id).await?)?;

        if let Some(name) = payload.name.map(Validator::name).transpose()? {
            if name != chemical.name {
                if self.repository.chemical_name_exists(&name).await? {
                    return Err(ServiceError::name_taken(&name));
                }
                chemical.name = name;
                self.repository.save_chemical(&chemical).await?;
                tracing::info!(chemical_id = id, "Renamed chemical");
            }
        }

        Ok(chemical)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.repository.delete_chemical(id).await? {
            return Err(ServiceError::not_found("Chemical", id));
        }
        tracing::info!(chemical_id = id, "Deleted chemical");
        Ok(())
    }
}
