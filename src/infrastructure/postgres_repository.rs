// PostgreSQL repository implementation
use crate::application::error::{StoreError, StoreResult};
use crate::application::maintenance_repository::{EntityLookup, MaintenanceRepository};
use crate::domain::aquarium::{Aquarium, NewAquarium};
use crate::domain::chemical::Chemical;
use crate::domain::fertilization::{Fertilization, NewFertilization};
use crate::domain::fertilizer::{Fertilizer, FertilizerChange, NewFertilizer};
use crate::domain::order_by::{
    AquariumSort, FertilizationSort, NameSort, Sort, SortField, TemperatureSort,
};
use crate::domain::pagination::PageRequest;
use crate::domain::temperature::{AquariumTemperature, NewTemperature};
use crate::infrastructure::config::DatabaseSettings;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool and bring the schema up to date.
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self::new(pool))
    }

    async fn exists(&self, sql: &str, id: i64) -> StoreResult<bool> {
        let row = sqlx::query(sql).bind(id).fetch_one(&self.pool).await?;
        Ok(row.try_get(0)?)
    }

    /// Run a `COUNT(*)` whose only parameter is the optional foreign-key filter.
    async fn count(&self, sql: &str, filter: Option<i64>) -> StoreResult<u64> {
        let row = sqlx::query(sql).bind(filter).fetch_one(&self.pool).await?;
        let count: i64 = row.try_get(0)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn delete(&self, sql: &str, id: i64) -> StoreResult<bool> {
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load the chemicals of each fertilizer row in one query.
    async fn with_chemicals(&self, rows: Vec<(i64, String)>) -> StoreResult<Vec<Fertilizer>> {
        let ids: Vec<i64> = rows.iter().map(|(id, _)| *id).collect();
        let ingredient_rows = sqlx::query(
            r#"
            SELECT fi.fertilizer_id, c.id, c.name
            FROM fertilizer_ingredients fi
            JOIN chemicals c ON c.id = fi.chemical_id
            WHERE fi.fertilizer_id = ANY($1)
            ORDER BY c.name ASC, c.id ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_fertilizer: HashMap<i64, Vec<Chemical>> = HashMap::new();
        for row in ingredient_rows {
            by_fertilizer
                .entry(row.try_get("fertilizer_id")?)
                .or_default()
                .push(Chemical {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                });
        }

        Ok(rows
            .into_iter()
            .map(|(id, name)| Fertilizer {
                id,
                name,
                chemicals: by_fertilizer.remove(&id).unwrap_or_default(),
            })
            .collect())
    }
}

fn limit_offset(page: PageRequest) -> (i64, i64) {
    (
        i64::try_from(page.limit()).unwrap_or(i64::MAX),
        i64::try_from(page.offset()).unwrap_or(i64::MAX),
    )
}

fn order_clause<F: SortField>(sort: Sort<F>) -> String {
    format!("ORDER BY {} {}, id ASC", sort.field.column(), sort.sql_direction())
}

fn aquarium_from_row(row: &PgRow) -> Result<Aquarium, sqlx::Error> {
    Ok(Aquarium {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        volume_in_liter: row.try_get("volume_in_liter")?,
    })
}

fn temperature_from_row(row: &PgRow) -> Result<AquariumTemperature, sqlx::Error> {
    Ok(AquariumTemperature {
        id: row.try_get("id")?,
        temperature: row.try_get("temperature")?,
        timestamp: row.try_get("recorded_at")?,
        aquarium_id: row.try_get("aquarium_id")?,
    })
}

fn chemical_from_row(row: &PgRow) -> Result<Chemical, sqlx::Error> {
    Ok(Chemical {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

fn fertilization_from_row(row: &PgRow) -> Result<Fertilization, sqlx::Error> {
    Ok(Fertilization {
        id: row.try_get("id")?,
        amount_in_milliliter: row.try_get("amount_in_milliliter")?,
        timestamp: row.try_get("recorded_at")?,
        aquarium_id: row.try_get("aquarium_id")?,
        fertilizer_id: row.try_get("fertilizer_id")?,
    })
}

#[async_trait]
impl EntityLookup for PgRepository {
    async fn aquarium_exists(&self, id: i64) -> StoreResult<bool> {
        self.exists("SELECT EXISTS(SELECT 1 FROM aquariums WHERE id = $1)", id)
            .await
    }

    async fn fertilizer_exists(&self, id: i64) -> StoreResult<bool> {
        self.exists("SELECT EXISTS(SELECT 1 FROM fertilizers WHERE id = $1)", id)
            .await
    }

    async fn chemical_exists(&self, id: i64) -> StoreResult<bool> {
        self.exists("SELECT EXISTS(SELECT 1 FROM chemicals WHERE id = $1)", id)
            .await
    }
}

#[async_trait]
impl MaintenanceRepository for PgRepository {
    async fn count_aquariums(&self) -> StoreResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) FROM aquariums")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get(0)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn get_aquarium(&self, id: i64) -> StoreResult<Option<Aquarium>> {
        let row = sqlx::query("SELECT id, name, volume_in_liter FROM aquariums WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(aquarium_from_row).transpose()?)
    }

    async fn list_aquariums(
        &self,
        sort: Sort<AquariumSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<Aquarium>> {
        let (limit, offset) = limit_offset(page);
        let sql = format!(
            "SELECT id, name, volume_in_liter FROM aquariums {} LIMIT $1 OFFSET $2",
            order_clause(sort)
        );
        tracing::debug!("Executing aquarium query: {}", sql);

        let rows = sqlx::query(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(aquarium_from_row).collect::<Result<_, _>>()?)
    }

    async fn aquarium_name_exists(&self, name: &str) -> StoreResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM aquariums WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get(0)?)
    }

    async fn insert_aquarium(&self, aquarium: NewAquarium) -> StoreResult<Aquarium> {
        let row = sqlx::query(
            r#"
            INSERT INTO aquariums (name, volume_in_liter)
            VALUES ($1, $2)
            RETURNING id, name, volume_in_liter
            "#,
        )
        .bind(&aquarium.name)
        .bind(aquarium.volume_in_liter)
        .fetch_one(&self.pool)
        .await?;
        Ok(aquarium_from_row(&row)?)
    }

    async fn save_aquarium(&self, aquarium: &Aquarium) -> StoreResult<()> {
        sqlx::query("UPDATE aquariums SET name = $2, volume_in_liter = $3 WHERE id = $1")
            .bind(aquarium.id)
            .bind(&aquarium.name)
            .bind(aquarium.volume_in_liter)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_aquarium(&self, id: i64) -> StoreResult<bool> {
        self.delete("DELETE FROM aquariums WHERE id = $1", id).await
    }

    async fn count_temperatures(&self, aquarium_id: Option<i64>) -> StoreResult<u64> {
        self.count(
            "SELECT COUNT(*) FROM aquarium_temperatures WHERE ($1::BIGINT IS NULL OR aquarium_id = $1)",
            aquarium_id,
        )
        .await
    }

    async fn get_temperature(&self, id: i64) -> StoreResult<Option<AquariumTemperature>> {
        let row = sqlx::query(
            "SELECT id, temperature, recorded_at, aquarium_id FROM aquarium_temperatures WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(temperature_from_row).transpose()?)
    }

    async fn list_temperatures(
        &self,
        aquarium_id: Option<i64>,
        sort: Sort<TemperatureSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<AquariumTemperature>> {
        let (limit, offset) = limit_offset(page);
        let sql = format!(
            r#"
            SELECT id, temperature, recorded_at, aquarium_id
            FROM aquarium_temperatures
            WHERE ($1::BIGINT IS NULL OR aquarium_id = $1)
            {}
            LIMIT $2 OFFSET $3
            "#,
            order_clause(sort)
        );

        let rows = sqlx::query(&sql)
            .bind(aquarium_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .iter()
            .map(temperature_from_row)
            .collect::<Result<_, _>>()?)
    }

    async fn insert_temperature(
        &self,
        temperature: NewTemperature,
    ) -> StoreResult<AquariumTemperature> {
        let row = sqlx::query(
            r#"
            INSERT INTO aquarium_temperatures (temperature, aquarium_id)
            VALUES ($1, $2)
            RETURNING id, temperature, recorded_at, aquarium_id
            "#,
        )
        .bind(temperature.temperature)
        .bind(temperature.aquarium_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(temperature_from_row(&row)?)
    }

    async fn save_temperature(&self, temperature: &AquariumTemperature) -> StoreResult<()> {
        sqlx::query(
            "UPDATE aquarium_temperatures SET temperature = $2, aquarium_id = $3 WHERE id = $1",
        )
        .bind(temperature.id)
        .bind(temperature.temperature)
        .bind(temperature.aquarium_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_temperature(&self, id: i64) -> StoreResult<bool> {
        self.delete("DELETE FROM aquarium_temperatures WHERE id = $1", id)
            .await
    }

    async fn count_chemicals(&self, fertilizer_id: Option<i64>) -> StoreResult<u64> {
        self.count(
            r#"
            SELECT COUNT(*) FROM chemicals c
            WHERE ($1::BIGINT IS NULL OR EXISTS (
                SELECT 1 FROM fertilizer_ingredients fi
                WHERE fi.chemical_id = c.id AND fi.fertilizer_id = $1
            ))
            "#,
            fertilizer_id,
        )
        .await
    }

    async fn get_chemical(&self, id: i64) -> StoreResult<Option<Chemical>> {
        let row = sqlx::query("SELECT id, name FROM chemicals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(chemical_from_row).transpose()?)
    }

    async fn list_chemicals(
        &self,
        fertilizer_id: Option<i64>,
        sort: Sort<NameSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<Chemical>> {
        let (limit, offset) = limit_offset(page);
        let sql = format!(
            r#"
            SELECT c.id, c.name FROM chemicals c
            WHERE ($1::BIGINT IS NULL OR EXISTS (
                SELECT 1 FROM fertilizer_ingredients fi
                WHERE fi.chemical_id = c.id AND fi.fertilizer_id = $1
            ))
            {}
            LIMIT $2 OFFSET $3
            "#,
            order_clause(sort)
        );

        let rows = sqlx::query(&sql)
            .bind(fertilizer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(chemical_from_row).collect::<Result<_, _>>()?)
    }

    async fn chemical_name_exists(&self, name: &str) -> StoreResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM chemicals WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get(0)?)
    }

    async fn insert_chemical(&self, name: String) -> StoreResult<Chemical> {
        let row = sqlx::query("INSERT INTO chemicals (name) VALUES ($1) RETURNING id, name")
            .bind(&name)
            .fetch_one(&self.pool)
            .await?;
        Ok(chemical_from_row(&row)?)
    }

    async fn save_chemical(&self, chemical: &Chemical) -> StoreResult<()> {
        sqlx::query("UPDATE chemicals SET name = $2 WHERE id = $1")
            .bind(chemical.id)
            .bind(&chemical.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_chemical(&self, id: i64) -> StoreResult<bool> {
        self.delete("DELETE FROM chemicals WHERE id = $1", id).await
    }

    async fn count_fertilizers(&self, chemical_id: Option<i64>) -> StoreResult<u64> {
        self.count(
            r#"
            SELECT COUNT(*) FROM fertilizers f
            WHERE ($1::BIGINT IS NULL OR EXISTS (
                SELECT 1 FROM fertilizer_ingredients fi
                WHERE fi.fertilizer_id = f.id AND fi.chemical_id = $1
            ))
            "#,
            chemical_id,
        )
        .await
    }

    async fn get_fertilizer(&self, id: i64) -> StoreResult<Option<Fertilizer>> {
        let row = sqlx::query("SELECT id, name FROM fertilizers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut fertilizers = self
            .with_chemicals(vec![(row.try_get("id")?, row.try_get("name")?)])
            .await?;
        Ok(fertilizers.pop())
    }

    async fn list_fertilizers(
        &self,
        chemical_id: Option<i64>,
        sort: Sort<NameSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<Fertilizer>> {
        let (limit, offset) = limit_offset(page);
        let sql = format!(
            r#"
            SELECT f.id, f.name FROM fertilizers f
            WHERE ($1::BIGINT IS NULL OR EXISTS (
                SELECT 1 FROM fertilizer_ingredients fi
                WHERE fi.fertilizer_id = f.id AND fi.chemical_id = $1
            ))
            {}
            LIMIT $2 OFFSET $3
            "#,
            order_clause(sort)
        );

        let rows = sqlx::query(&sql)
            .bind(chemical_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        let rows = rows
            .iter()
            .map(|r| Ok((r.try_get("id")?, r.try_get("name")?)))
            .collect::<Result<Vec<(i64, String)>, sqlx::Error>>()?;

        self.with_chemicals(rows).await
    }

    async fn fertilizer_name_exists(&self, name: &str) -> StoreResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM fertilizers WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get(0)?)
    }

    async fn insert_fertilizer(&self, fertilizer: NewFertilizer) -> StoreResult<Fertilizer> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("INSERT INTO fertilizers (name) VALUES ($1) RETURNING id")
            .bind(&fertilizer.name)
            .fetch_one(&mut *tx)
            .await?;
        let id: i64 = row.try_get("id")?;

        sqlx::query(
            r#"
            INSERT INTO fertilizer_ingredients (fertilizer_id, chemical_id)
            SELECT $1, UNNEST($2::BIGINT[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(id)
        .bind(&fertilizer.chemical_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_fertilizer(id)
            .await?
            .ok_or_else(|| StoreError::Backend(anyhow!("fertilizer {} vanished after insert", id)))
    }

    async fn apply_fertilizer_change(&self, id: i64, change: FertilizerChange) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        if let Some(name) = &change.name {
            sqlx::query("UPDATE fertilizers SET name = $2 WHERE id = $1")
                .bind(id)
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }

        if !change.remove_chemicals.is_empty() {
            sqlx::query(
                "DELETE FROM fertilizer_ingredients WHERE fertilizer_id = $1 AND chemical_id = ANY($2)",
            )
            .bind(id)
            .bind(&change.remove_chemicals)
            .execute(&mut *tx)
            .await?;
        }

        if !change.add_chemicals.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO fertilizer_ingredients (fertilizer_id, chemical_id)
                SELECT $1, UNNEST($2::BIGINT[])
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(id)
            .bind(&change.add_chemicals)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_fertilizer(&self, id: i64) -> StoreResult<bool> {
        self.delete("DELETE FROM fertilizers WHERE id = $1", id).await
    }

    async fn count_fertilizations(&self, aquarium_id: Option<i64>) -> StoreResult<u64> {
        self.count(
            "SELECT COUNT(*) FROM fertilizations WHERE ($1::BIGINT IS NULL OR aquarium_id = $1)",
            aquarium_id,
        )
        .await
    }

    async fn get_fertilization(&self, id: i64) -> StoreResult<Option<Fertilization>> {
        let row = sqlx::query(
            r#"
            SELECT id, amount_in_milliliter, recorded_at, aquarium_id, fertilizer_id
            FROM fertilizations WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(fertilization_from_row).transpose()?)
    }

    async fn list_fertilizations(
        &self,
        aquarium_id: Option<i64>,
        sort: Sort<FertilizationSort>,
        page: PageRequest,
    ) -> StoreResult<Vec<Fertilization>> {
        let (limit, offset) = limit_offset(page);
        let sql = format!(
            r#"
            SELECT id, amount_in_milliliter, recorded_at, aquarium_id, fertilizer_id
            FROM fertilizations
            WHERE ($1::BIGINT IS NULL OR aquarium_id = $1)
            {}
            LIMIT $2 OFFSET $3
            "#,
            order_clause(sort)
        );

        let rows = sqlx::query(&sql)
            .bind(aquarium_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .iter()
            .map(fertilization_from_row)
            .collect::<Result<_, _>>()?)
    }

    async fn insert_fertilization(
        &self,
        fertilization: NewFertilization,
    ) -> StoreResult<Fertilization> {
        let row = sqlx::query(
            r#"
            INSERT INTO fertilizations (amount_in_milliliter, aquarium_id, fertilizer_id)
            VALUES ($1, $2, $3)
            RETURNING id, amount_in_milliliter, recorded_at, aquarium_id, fertilizer_id
            "#,
        )
        .bind(fertilization.amount_in_milliliter)
        .bind(fertilization.aquarium_id)
        .bind(fertilization.fertilizer_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(fertilization_from_row(&row)?)
    }

    async fn save_fertilization(&self, fertilization: &Fertilization) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE fertilizations
            SET amount_in_milliliter = $2, aquarium_id = $3, fertilizer_id = $4
            WHERE id = $1
            "#,
        )
        .bind(fertilization.id)
        .bind(fertilization.amount_in_milliliter)
        .bind(fertilization.aquarium_id)
        .bind(fertilization.fertilizer_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_fertilization(&self, id: i64) -> StoreResult<bool> {
        self.delete("DELETE FROM fertilizations WHERE id = $1", id)
            .await
    }
}
