// Repository traits for maintenance data access
use crate::application::error::StoreResult;
use crate::domain::aquarium::{Aquarium, NewAquarium};
use crate::domain::chemical::Chemical;
use crate::domain::fertilization::{Fertilization, NewFertilization};
use crate::domain::fertilizer::{Fertilizer, FertilizerChange, NewFertilizer};
use crate::domain::order_by::{AquariumSort, FertilizationSort, NameSort, Sort, TemperatureSort};
use crate::domain::pagination::PageRequest;
use crate::domain::temperature::{AquariumTemperature, NewTemperature};
use async_trait::async_trait;

/// Existence checks used by validators for foreign-key references.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    async fn aquarium_exists(&self, id: i64) -> StoreResult<bool>;

    async fn fertilizer_exists(&self, id: i64) -> StoreResult<bool>;

    async fn chemical_exists(&self, id: i64) -> StoreResult<bool>;
}

/// The relational store. Every `list_*` method applies the optional
/// foreign-key filter, then the sort (ties broken by id), then the page.
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    // Aquariums
    async fn count_aquariums(&self) -> StoreResult<u64>;
    async fn get_aquarium(&self, id: i64) -> StoreResult<Option<Aquarium>>;
    async fn list_aquariums(
        &self,
        sort: Sort<AquariumSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<Aquarium>>;
    async fn aquarium_name_exists(&self, name: &str) -> StoreResult<bool>;
    async fn insert_aquarium(&self, aquarium: NewAquarium) -> StoreResult<Aquarium>;
    async fn save_aquarium(&self, aquarium: &Aquarium) -> StoreResult<()>;
    /// Also removes the aquarium's temperatures and fertilization events.
    async fn delete_aquarium(&self, id: i64) -> StoreResult<bool>;

    // Temperatures
    async fn count_temperatures(&self, aquarium_id: Option<i64>) -> StoreResult<u64>;
    async fn get_temperature(&self, id: i64) -> StoreResult<Option<AquariumTemperature>>;
    async fn list_temperatures(
        &self,
        aquarium_id: Option<i64>,
        sort: Sort<TemperatureSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<AquariumTemperature>>;
    async fn insert_temperature(&self, temperature: NewTemperature)
    -> StoreResult<AquariumTemperature>;
    async fn save_temperature(&self, temperature: &AquariumTemperature) -> StoreResult<()>;
    async fn delete_temperature(&self, id: i64) -> StoreResult<bool>;

    // Chemicals
    async fn count_chemicals(&self, fertilizer_id: Option<i64>) -> StoreResult<u64>;
    async fn get_chemical(&self, id: i64) -> StoreResult<Option<Chemical>>;
    async fn list_chemicals(
        &self,
        fertilizer_id: Option<i64>,
        sort: Sort<NameSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<Chemical>>;
    async fn chemical_name_exists(&self, name: &str) -> StoreResult<bool>;
    async fn insert_chemical(&self, name: String) -> StoreResult<Chemical>;
    async fn save_chemical(&self, chemical: &Chemical) -> StoreResult<()>;
    async fn delete_chemical(&self, id: i64) -> StoreResult<bool>;

    // Fertilizers
    async fn count_fertilizers(&self, chemical_id: Option<i64>) -> StoreResult<u64>;
    async fn get_fertilizer(&self, id: i64) -> StoreResult<Option<Fertilizer>>;
    async fn list_fertilizers(
        &self,
        chemical_id: Option<i64>,
        sort: Sort<NameSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<Fertilizer>>;
    async fn fertilizer_name_exists(&self, name: &str) -> StoreResult<bool>;
    /// Creates the fertilizer and its chemical associations atomically.
    async fn insert_fertilizer(&self, fertilizer: NewFertilizer) -> StoreResult<Fertilizer>;
    /// Applies rename and association delta atomically.
    async fn apply_fertilizer_change(&self, id: i64, change: FertilizerChange) -> StoreResult<()>;
    /// Also removes the fertilizer's fertilization events.
    async fn delete_fertilizer(&self, id: i64) -> StoreResult<bool>;

    // Fertilization events
    async fn count_fertilizations(&self, aquarium_id: Option<i64>) -> StoreResult<u64>;
    async fn get_fertilization(&self, id: i64) -> StoreResult<Option<Fertilization>>;
    async fn list_fertilizations(
        &self,
        aquarium_id: Option<i64>,
        sort: Sort<FertilizationSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<Fertilization>>;
    async fn insert_fertilization(
        &self,
        fertilization: NewFertilization,
    ) -> StoreResult<Fertilization>;
    async fn save_fertilization(&self, fertilization: &Fertilization) -> StoreResult<()>;
    async fn delete_fertilization(&self, id: i64) -> StoreResult<bool>;
}
