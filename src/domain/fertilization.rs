// Fertilization event domain model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fertilization {
    pub id: i64,
    pub amount_in_milliliter: i32,
    pub timestamp: DateTime<Utc>,
    pub aquarium_id: i64,
    pub fertilizer_id: i64,
}

impl Fertilization {
    pub fn apply(&mut self, payload: FertilizationPayload) {
        if let Some(amount) = payload.amount_in_milliliter {
            self.amount_in_milliliter = amount;
        }
        if let Some(aquarium_id) = payload.aquarium_id {
            self.aquarium_id = aquarium_id;
        }
        if let Some(fertilizer_id) = payload.fertilizer_id {
            self.fertilizer_id = fertilizer_id;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FertilizationPayload {
    pub amount_in_milliliter: Option<i32>,
    pub aquarium_id: Option<i64>,
    pub fertilizer_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewFertilization {
    pub amount_in_milliliter: i32,
    pub aquarium_id: i64,
    pub fertilizer_id: i64,
}
