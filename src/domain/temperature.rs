// Temperature measurement domain model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AquariumTemperature {
    pub id: i64,
    pub temperature: f64,
    pub timestamp: DateTime<Utc>,
    pub aquarium_id: i64,
}

impl AquariumTemperature {
    pub fn apply(&mut self, celsius: Option<f64>, aquarium_id: Option<i64>) {
        if let Some(celsius) = celsius {
            self.temperature = celsius;
        }
        if let Some(aquarium_id) = aquarium_id {
            self.aquarium_id = aquarium_id;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemperaturePayload {
    #[serde(alias = "temperature")]
    pub celsius: Option<f64>,
    pub aquarium_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewTemperature {
    pub temperature: f64,
    pub aquarium_id: i64,
}
