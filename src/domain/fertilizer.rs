// Fertilizer domain model and its chemical ingredients
use super::chemical::Chemical;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fertilizer {
    pub id: i64,
    pub name: String,
    pub chemicals: Vec<Chemical>,
}

impl Fertilizer {
    pub fn chemical_ids(&self) -> BTreeSet<i64> {
        self.chemicals.iter().map(|c| c.id).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FertilizerPayload {
    pub name: Option<String>,
    pub chemicals: Option<Vec<i64>>,
}

#[derive(Debug, Clone)]
pub struct NewFertilizer {
    pub name: String,
    pub chemical_ids: Vec<i64>,
}

/// Delta applied to a fertilizer in one atomic write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FertilizerChange {
    pub name: Option<String>,
    pub add_chemicals: Vec<i64>,
    pub remove_chemicals: Vec<i64>,
}

impl FertilizerChange {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.add_chemicals.is_empty() && self.remove_chemicals.is_empty()
    }
}
