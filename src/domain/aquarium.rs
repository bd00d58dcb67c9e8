// Aquarium domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aquarium {
    pub id: i64,
    pub name: String,
    pub volume_in_liter: i32,
}

impl Aquarium {
    /// Link to this aquarium's temperature measurements.
    pub fn temperatures_link(&self) -> String {
        format!("/temperatures?aquarium-id={}", self.id)
    }

    pub fn apply(&mut self, name: Option<String>, volume_in_liter: Option<i32>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(volume) = volume_in_liter {
            self.volume_in_liter = volume;
        }
    }
}

/// Request body for POST and PATCH. Absent fields are `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AquariumPayload {
    pub name: Option<String>,
    pub volume_in_liter: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewAquarium {
    pub name: String,
    pub volume_in_liter: i32,
}
