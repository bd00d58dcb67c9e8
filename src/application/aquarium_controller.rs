// Aquarium controller - Filtered, ordered, paginated access and mutations
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::maintenance_repository::MaintenanceRepository;
use crate::application::validators::{required, Validator};
use crate::application::{found, resolve_sort};
use crate::domain::aquarium::{Aquarium, AquariumPayload, NewAquarium};
use crate::domain::order_by::{AquariumSort, OrderBy};
use crate::domain::pagination::{Page, PageRequest};
use std::sync::Arc;

#[derive(Clone)]
pub struct AquariumController {
    repository: Arc<dyn MaintenanceRepository>,
}

impl AquariumController {
    pub fn new(repository: Arc<dyn MaintenanceRepository>) -> Self {
        Self { repository }
    }

    pub async fn count_all(&self) -> ServiceResult<u64> {
        Ok(self.repository.count_aquariums().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<Aquarium>> {
        Ok(self.repository.get_aquarium(id).await?)
    }

    pub async fn get_multiple(
        &self,
        order_by: &OrderBy,
        page: PageRequest,
    ) -> ServiceResult<Vec<Aquarium>> {
        let sort = resolve_sort::<AquariumSort>(order_by)?;
        tracing::debug!(%order_by, page = page.page, "Listing aquariums");
        Ok(self.repository.list_aquariums(sort, page).await?)
    }

    pub async fn list(
        &self,
        order_by: &OrderBy,
        page: PageRequest,
    ) -> ServiceResult<Page<Aquarium>> {
        let content = self.get_multiple(order_by, page).await?;
        let total = self.count_all().await?;
        Ok(Page::new(content, page, total))
    }

    pub async fn create(&self, payload: AquariumPayload) -> ServiceResult<Aquarium> {
        let name = Validator::name(required("name", payload.name)?)?;
        let volume_in_liter =
            Validator::volume(required("volume_in_liter", payload.volume_in_liter)?)?;

        if self.repository.aquarium_name_exists(&name).await? {
            return Err(ServiceError::name_taken(&name));
        }

        let aquarium = self
            .repository
            .insert_aquarium(NewAquarium {
                name,
                volume_in_liter,
            })
            .await?;

        tracing::info!(aquarium_id = aquarium.id, name = %aquarium.name, "Created aquarium");
        Ok(aquarium)
    }

    pub async fn update(&self, id: i64, payload: AquariumPayload) -> ServiceResult<Aquarium> {
        let mut aquarium = found("Aquarium", id, self.get_by_id(id).await?)?;

        let name = payload.name.map(Validator::name).transpose()?;
        let volume_in_liter = payload.volume_in_liter.map(Validator::volume).transpose()?;

        let name = match name {
            Some(name) if name != aquarium.name => {
                if self.repository.aquarium_name_exists(&name).await? {
                    return Err(ServiceError::name_taken(&name));
                }
                Some(name)
            }
            _ => None,
        };

        aquarium.apply(name, volume_in_liter);
        self.repository.save_aquarium(&aquarium).await?;

        tracing::info!(aquarium_id = id, "Updated aquarium");
        Ok(aquarium)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.repository.delete_aquarium(id).await? {
            return Err(ServiceError::not_found("Aquarium", id));
        }
        tracing::info!(aquarium_id = id, "Deleted aquarium");
        Ok(())
    }
}
