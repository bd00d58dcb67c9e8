// In-memory repository implementation (for tests)
use crate::application::error::{StoreError, StoreResult};
use crate::application::maintenance_repository::{EntityLookup, MaintenanceRepository};
use crate::domain::aquarium::{Aquarium, NewAquarium};
use crate::domain::chemical::Chemical;
use crate::domain::fertilization::{Fertilization, NewFertilization};
use crate::domain::fertilizer::{Fertilizer, FertilizerChange, NewFertilizer};
use crate::domain::order_by::{
    AquariumSort, FertilizationSort, NameSort, Sort, SortField, TemperatureSort,
};
use crate::domain::pagination::{paginate, PageRequest};
use crate::domain::temperature::{AquariumTemperature, NewTemperature};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    aquariums: BTreeMap<i64, Aquarium>,
    temperatures: BTreeMap<i64, AquariumTemperature>,
    chemicals: BTreeMap<i64, Chemical>,
    fertilizers: BTreeMap<i64, String>,
    /// (fertilizer_id, chemical_id)
    ingredients: BTreeSet<(i64, i64)>,
    fertilizations: BTreeMap<i64, Fertilization>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn fertilizer(&self, id: i64) -> Option<Fertilizer> {
        let name = self.fertilizers.get(&id)?.clone();
        let mut chemicals: Vec<Chemical> = self
            .ingredients
            .iter()
            .filter(|(f, _)| *f == id)
            .filter_map(|(_, c)| self.chemicals.get(c).cloned())
            .collect();
        chemicals.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Some(Fertilizer {
            id,
            name,
            chemicals,
        })
    }

    fn chemical_in_fertilizer(&self, chemical_id: i64, fertilizer_id: Option<i64>) -> bool {
        fertilizer_id.is_none_or(|f| self.ingredients.contains(&(f, chemical_id)))
    }

    fn fertilizer_has_chemical(&self, fertilizer_id: i64, chemical_id: Option<i64>) -> bool {
        chemical_id.is_none_or(|c| self.ingredients.contains(&(fertilizer_id, c)))
    }

    fn require_aquarium(&self, id: i64) -> StoreResult<()> {
        if self.aquariums.contains_key(&id) {
            return Ok(());
        }
        Err(StoreError::Backend(anyhow!(
            "foreign key violation: aquarium {} does not exist",
            id
        )))
    }

    fn require_fertilizer(&self, id: i64) -> StoreResult<()> {
        if self.fertilizers.contains_key(&id) {
            return Ok(());
        }
        Err(StoreError::Backend(anyhow!(
            "foreign key violation: fertilizer {} does not exist",
            id
        )))
    }

    fn require_chemicals(&self, ids: &[i64]) -> StoreResult<()> {
        match ids.iter().find(|id| !self.chemicals.contains_key(id)) {
            Some(id) => Err(StoreError::Backend(anyhow!(
                "foreign key violation: chemical {} does not exist",
                id
            ))),
            None => Ok(()),
        }
    }
}

/// Sort on the primary key in the requested direction, ties by ascending id,
/// then cut out the requested page.
fn sorted_page<T, F: SortField>(
    mut rows: Vec<T>,
    sort: Sort<F>,
    page: PageRequest,
    compare: impl Fn(F, &T, &T) -> Ordering,
    id: impl Fn(&T) -> i64,
) -> Vec<T> {
    rows.sort_by(|a, b| {
        let primary = compare(sort.field, a, b);
        let primary = if sort.ascending { primary } else { primary.reverse() };
        primary.then_with(|| id(a).cmp(&id(b)))
    });
    paginate(rows, page)
}

fn duplicate(name: &str) -> StoreError {
    StoreError::Duplicate(format!("name '{}' already exists", name))
}

/// Same semantics as the PostgreSQL store, kept behind a single lock so
/// multi-step writes are atomic.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityLookup for InMemoryRepository {
    async fn aquarium_exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.read().await.aquariums.contains_key(&id))
    }

    async fn fertilizer_exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.read().await.fertilizers.contains_key(&id))
    }

    async fn chemical_exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.read().await.chemicals.contains_key(&id))
    }
}

#[async_trait]
impl MaintenanceRepository for InMemoryRepository {
    async fn count_aquariums(&self) -> StoreResult<u64> {
        Ok(self.tables.read().await.aquariums.len() as u64)
    }

    async fn get_aquarium(&self, id: i64) -> StoreResult<Option<Aquarium>> {
        Ok(self.tables.read().await.aquariums.get(&id).cloned())
    }

    async fn list_aquariums(
        &self,
        sort: Sort<AquariumSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<Aquarium>> {
        let rows: Vec<Aquarium> = self.tables.read().await.aquariums.values().cloned().collect();
        Ok(sorted_page(
            rows,
            sort,
            page,
            |field, a: &Aquarium, b: &Aquarium| match field {
                AquariumSort::Name => a.name.cmp(&b.name),
                AquariumSort::Liter => a.volume_in_liter.cmp(&b.volume_in_liter),
            },
            |a| a.id,
        ))
    }

    async fn aquarium_name_exists(&self, name: &str) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.aquariums.values().any(|a| a.name == name))
    }

    async fn insert_aquarium(&self, aquarium: NewAquarium) -> StoreResult<Aquarium> {
        let mut tables = self.tables.write().await;
        if tables.aquariums.values().any(|a| a.name == aquarium.name) {
            return Err(duplicate(&aquarium.name));
        }

        let row = Aquarium {
            id: tables.next_id(),
            name: aquarium.name,
            volume_in_liter: aquarium.volume_in_liter,
        };
        tables.aquariums.insert(row.id, row.clone());
        Ok(row)
    }

    async fn save_aquarium(&self, aquarium: &Aquarium) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .aquariums
            .values()
            .any(|a| a.id != aquarium.id && a.name == aquarium.name)
        {
            return Err(duplicate(&aquarium.name));
        }
        if let Some(row) = tables.aquariums.get_mut(&aquarium.id) {
            *row = aquarium.clone();
        }
        Ok(())
    }

    async fn delete_aquarium(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.aquariums.remove(&id).is_none() {
            return Ok(false);
        }
        tables.temperatures.retain(|_, t| t.aquarium_id != id);
        tables.fertilizations.retain(|_, f| f.aquarium_id != id);
        Ok(true)
    }

    async fn count_temperatures(&self, aquarium_id: Option<i64>) -> StoreResult<u64> {
        let tables = self.tables.read().await;
        let count = tables
            .temperatures
            .values()
            .filter(|t| aquarium_id.is_none_or(|a| t.aquarium_id == a))
            .count();
        Ok(count as u64)
    }

    async fn get_temperature(&self, id: i64) -> StoreResult<Option<AquariumTemperature>> {
        Ok(self.tables.read().await.temperatures.get(&id).cloned())
    }

    async fn list_temperatures(
        &self,
        aquarium_id: Option<i64>,
        sort: Sort<TemperatureSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<AquariumTemperature>> {
        let rows: Vec<AquariumTemperature> = self
            .tables
            .read()
            .await
            .temperatures
            .values()
            .filter(|t| aquarium_id.is_none_or(|a| t.aquarium_id == a))
            .cloned()
            .collect();
        Ok(sorted_page(
            rows,
            sort,
            page,
            |field, a: &AquariumTemperature, b: &AquariumTemperature| match field {
                TemperatureSort::Celsius => a.temperature.total_cmp(&b.temperature),
                TemperatureSort::Date => a.timestamp.cmp(&b.timestamp),
            },
            |t| t.id,
        ))
    }

    async fn insert_temperature(
        &self,
        temperature: NewTemperature,
    ) -> StoreResult<AquariumTemperature> {
        let mut tables = self.tables.write().await;
        tables.require_aquarium(temperature.aquarium_id)?;

        let row = AquariumTemperature {
            id: tables.next_id(),
            temperature: temperature.temperature,
            timestamp: Utc::now(),
            aquarium_id: temperature.aquarium_id,
        };
        tables.temperatures.insert(row.id, row.clone());
        Ok(row)
    }

    async fn save_temperature(&self, temperature: &AquariumTemperature) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_aquarium(temperature.aquarium_id)?;
        if let Some(row) = tables.temperatures.get_mut(&temperature.id) {
            *row = temperature.clone();
        }
        Ok(())
    }

    async fn delete_temperature(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.temperatures.remove(&id).is_some())
    }

    async fn count_chemicals(&self, fertilizer_id: Option<i64>) -> StoreResult<u64> {
        let tables = self.tables.read().await;
        let count = tables
            .chemicals
            .keys()
            .filter(|id| tables.chemical_in_fertilizer(**id, fertilizer_id))
            .count();
        Ok(count as u64)
    }

    async fn get_chemical(&self, id: i64) -> StoreResult<Option<Chemical>> {
        Ok(self.tables.read().await.chemicals.get(&id).cloned())
    }

    async fn list_chemicals(
        &self,
        fertilizer_id: Option<i64>,
        sort: Sort<NameSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<Chemical>> {
        let tables = self.tables.read().await;
        let rows: Vec<Chemical> = tables
            .chemicals
            .values()
            .filter(|c| tables.chemical_in_fertilizer(c.id, fertilizer_id))
            .cloned()
            .collect();
        Ok(sorted_page(
            rows,
            sort,
            page,
            |NameSort::Name, a: &Chemical, b: &Chemical| a.name.cmp(&b.name),
            |c| c.id,
        ))
    }

    async fn chemical_name_exists(&self, name: &str) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.chemicals.values().any(|c| c.name == name))
    }

    async fn insert_chemical(&self, name: String) -> StoreResult<Chemical> {
        let mut tables = self.tables.write().await;
        if tables.chemicals.values().any(|c| c.name == name) {
            return Err(duplicate(&name));
        }

        let row = Chemical {
            id: tables.next_id(),
            name,
        };
        tables.chemicals.insert(row.id, row.clone());
        Ok(row)
    }

    async fn save_chemical(&self, chemical: &Chemical) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .chemicals
            .values()
            .any(|c| c.id != chemical.id && c.name == chemical.name)
        {
            return Err(duplicate(&chemical.name));
        }
        if let Some(row) = tables.chemicals.get_mut(&chemical.id) {
            *row = chemical.clone();
        }
        Ok(())
    }

    async fn delete_chemical(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.chemicals.remove(&id).is_none() {
            return Ok(false);
        }
        tables.ingredients.retain(|(_, c)| *c != id);
        Ok(true)
    }

    async fn count_fertilizers(&self, chemical_id: Option<i64>) -> StoreResult<u64> {
        let tables = self.tables.read().await;
        let count = tables
            .fertilizers
            .keys()
            .filter(|id| tables.fertilizer_has_chemical(**id, chemical_id))
            .count();
        Ok(count as u64)
    }

    async fn get_fertilizer(&self, id: i64) -> StoreResult<Option<Fertilizer>> {
        Ok(self.tables.read().await.fertilizer(id))
    }

    async fn list_fertilizers(
        &self,
        chemical_id: Option<i64>,
        sort: Sort<NameSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<Fertilizer>> {
        let tables = self.tables.read().await;
        let rows: Vec<Fertilizer> = tables
            .fertilizers
            .keys()
            .filter(|id| tables.fertilizer_has_chemical(**id, chemical_id))
            .filter_map(|id| tables.fertilizer(*id))
            .collect();
        Ok(sorted_page(
            rows,
            sort,
            page,
            |NameSort::Name, a: &Fertilizer, b: &Fertilizer| a.name.cmp(&b.name),
            |f| f.id,
        ))
    }

    async fn fertilizer_name_exists(&self, name: &str) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.fertilizers.values().any(|n| n == name))
    }

    async fn insert_fertilizer(&self, fertilizer: NewFertilizer) -> StoreResult<Fertilizer> {
        let mut tables = self.tables.write().await;
        if tables.fertilizers.values().any(|n| *n == fertilizer.name) {
            return Err(duplicate(&fertilizer.name));
        }
        tables.require_chemicals(&fertilizer.chemical_ids)?;

        let id = tables.next_id();
        tables.fertilizers.insert(id, fertilizer.name);
        for chemical_id in fertilizer.chemical_ids {
            tables.ingredients.insert((id, chemical_id));
        }

        tables
            .fertilizer(id)
            .ok_or_else(|| StoreError::Backend(anyhow!("fertilizer {} vanished after insert", id)))
    }

    async fn apply_fertilizer_change(&self, id: i64, change: FertilizerChange) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.fertilizers.contains_key(&id) {
            return Ok(());
        }
        if let Some(name) = &change.name {
            if tables.fertilizers.iter().any(|(f, n)| *f != id && n == name) {
                return Err(duplicate(name));
            }
        }
        tables.require_chemicals(&change.add_chemicals)?;

        if let Some(name) = change.name {
            tables.fertilizers.insert(id, name);
        }
        for chemical_id in change.remove_chemicals {
            tables.ingredients.remove(&(id, chemical_id));
        }
        for chemical_id in change.add_chemicals {
            tables.ingredients.insert((id, chemical_id));
        }
        Ok(())
    }

    async fn delete_fertilizer(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.fertilizers.remove(&id).is_none() {
            return Ok(false);
        }
        tables.ingredients.retain(|(f, _)| *f != id);
        tables.fertilizations.retain(|_, f| f.fertilizer_id != id);
        Ok(true)
    }

    async fn count_fertilizations(&self, aquarium_id: Option<i64>) -> StoreResult<u64> {
        let tables = self.tables.read().await;
        let count = tables
            .fertilizations
            .values()
            .filter(|f| aquarium_id.is_none_or(|a| f.aquarium_id == a))
            .count();
        Ok(count as u64)
    }

    async fn get_fertilization(&self, id: i64) -> StoreResult<Option<Fertilization>> {
        Ok(self.tables.read().await.fertilizations.get(&id).cloned())
    }

    async fn list_fertilizations(
        &self,
        aquarium_id: Option<i64>,
        sort: Sort<FertilizationSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<Fertilization>> {
        let rows: Vec<Fertilization> = self
            .tables
            .read()
            .await
            .fertilizations
            .values()
            .filter(|f| aquarium_id.is_none_or(|a| f.aquarium_id == a))
            .cloned()
            .collect();
        Ok(sorted_page(
            rows,
            sort,
            page,
            |field, a: &Fertilization, b: &Fertilization| match field {
                FertilizationSort::Amount => a.amount_in_milliliter.cmp(&b.amount_in_milliliter),
                FertilizationSort::Date => a.timestamp.cmp(&b.timestamp),
            },
            |f| f.id,
        ))
    }

    async fn insert_fertilization(
        &self,
        fertilization: NewFertilization,
    ) -> StoreResult<Fertilization> {
        let mut tables = self.tables.write().await;
        tables.require_aquarium(fertilization.aquarium_id)?;
        tables.require_fertilizer(fertilization.fertilizer_id)?;

        let row = Fertilization {
            id: tables.next_id(),
            amount_in_milliliter: fertilization.amount_in_milliliter,
            timestamp: Utc::now(),
            aquarium_id: fertilization.aquarium_id,
            fertilizer_id: fertilization.fertilizer_id,
        };
        tables.fertilizations.insert(row.id, row.clone());
        Ok(row)
    }

    async fn save_fertilization(&self, fertilization: &Fertilization) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.require_aquarium(fertilization.aquarium_id)?;
        tables.require_fertilizer(fertilization.fertilizer_id)?;
        if let Some(row) = tables.fertilizations.get_mut(&fertilization.id) {
            *row = fertilization.clone();
        }
        Ok(())
    }

    async fn delete_fertilization(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.fertilizations.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn aquarium(repo: &InMemoryRepository, name: &str) -> Aquarium {
        repo.insert_aquarium(NewAquarium {
            name: name.to_string(),
            volume_in_liter: 100,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_delete_aquarium_cascades() {
        let repo = InMemoryRepository::new();
        let tank = aquarium(&repo, "Tank1").await;
        let other = aquarium(&repo, "Tank2").await;
        let fertilizer = repo
            .insert_fertilizer(NewFertilizer {
                name: "Macro".to_string(),
                chemical_ids: vec![],
            })
            .await
            .unwrap();

        let t1 = repo
            .insert_temperature(NewTemperature {
                temperature: 24.0,
                aquarium_id: tank.id,
            })
            .await
            .unwrap();
        let kept = repo
            .insert_temperature(NewTemperature {
                temperature: 26.0,
                aquarium_id: other.id,
            })
            .await
            .unwrap();
        let f1 = repo
            .insert_fertilization(NewFertilization {
                amount_in_milliliter: 5,
                aquarium_id: tank.id,
                fertilizer_id: fertilizer.id,
            })
            .await
            .unwrap();

        assert!(repo.delete_aquarium(tank.id).await.unwrap());
        assert!(repo.get_temperature(t1.id).await.unwrap().is_none());
        assert!(repo.get_fertilization(f1.id).await.unwrap().is_none());
        assert!(repo.get_temperature(kept.id).await.unwrap().is_some());
        assert!(!repo.delete_aquarium(tank.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_chemical_filters_use_join_table() {
        let repo = InMemoryRepository::new();
        let iron = repo.insert_chemical("Iron".to_string()).await.unwrap();
        let nitrate = repo.insert_chemical("Nitrate".to_string()).await.unwrap();
        let micro = repo
            .insert_fertilizer(NewFertilizer {
                name: "Micro".to_string(),
                chemical_ids: vec![iron.id],
            })
            .await
            .unwrap();

        let sort = Sort::new(NameSort::Name, true);
        let page = PageRequest::new(1, 5);
        let in_micro = repo.list_chemicals(Some(micro.id), sort, page).await.unwrap();
        assert_eq!(in_micro, vec![iron.clone()]);
        assert_eq!(repo.count_chemicals(Some(micro.id)).await.unwrap(), 1);
        assert_eq!(repo.count_fertilizers(Some(nitrate.id)).await.unwrap(), 0);

        assert!(repo.delete_chemical(iron.id).await.unwrap());
        let micro = repo.get_fertilizer(micro.id).await.unwrap().unwrap();
        assert!(micro.chemicals.is_empty());
    }

    #[tokio::test]
    async fn test_descending_sort_breaks_ties_by_id() {
        let repo = InMemoryRepository::new();
        for name in ["A", "B", "C"] {
            repo.insert_aquarium(NewAquarium {
                name: name.to_string(),
                volume_in_liter: 50,
            })
            .await
            .unwrap();
        }

        let rows = repo
            .list_aquariums(Sort::new(AquariumSort::Liter, false), PageRequest::new(1, 5))
            .await
            .unwrap();
        let names: Vec<&str> = rows.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_unique_names_enforced() {
        let repo = InMemoryRepository::new();
        aquarium(&repo, "Tank1").await;
        let result = repo
            .insert_aquarium(NewAquarium {
                name: "Tank1".to_string(),
                volume_in_liter: 10,
            })
            .await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));
    }
}
