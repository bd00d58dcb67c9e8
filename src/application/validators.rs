// Validators for domain constraints
//
// Each check returns the value unchanged when valid. Reference checks go
// through an `EntityLookup` so tests can substitute an in-memory store.
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::maintenance_repository::EntityLookup;
use std::sync::Arc;

pub const MIN_TEMPERATURE: f64 = 0.0;
pub const MAX_TEMPERATURE: f64 = 40.0;
pub const MAX_NAME_LENGTH: usize = 64;

#[derive(Clone)]
pub struct Validator {
    lookup: Arc<dyn EntityLookup>,
}

impl Validator {
    pub fn new(lookup: Arc<dyn EntityLookup>) -> Self {
        Self { lookup }
    }

    pub fn temperature(value: f64) -> ServiceResult<f64> {
        if MIN_TEMPERATURE < value && value < MAX_TEMPERATURE {
            return Ok(value);
        }
        Err(ServiceError::Validation(format!(
            "Aquarium temperatures must be greater than {} and smaller than {}",
            MIN_TEMPERATURE, MAX_TEMPERATURE
        )))
    }

    pub fn volume(value: i32) -> ServiceResult<i32> {
        if value > 0 {
            return Ok(value);
        }
        Err(ServiceError::Validation(
            "Volume must be greater than 0".to_string(),
        ))
    }

    pub fn amount(value: i32) -> ServiceResult<i32> {
        if value > 0 {
            return Ok(value);
        }
        Err(ServiceError::Validation(
            "Amount must be greater than 0".to_string(),
        ))
    }

    pub fn name(value: String) -> ServiceResult<String> {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation("Name must not be blank".to_string()));
        }
        if value.chars().count() > MAX_NAME_LENGTH {
            return Err(ServiceError::Validation(format!(
                "Name must be at most {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(value)
    }

    /// Filter ids in query strings only need to be positive.
    pub fn positive_id(field: &str, value: i64) -> ServiceResult<i64> {
        if value > 0 {
            return Ok(value);
        }
        Err(ServiceError::Validation(format!(
            "{} must be a positive integer",
            field
        )))
    }

    pub async fn aquarium_id(&self, value: i64) -> ServiceResult<i64> {
        if value > 0 && self.lookup.aquarium_exists(value).await? {
            return Ok(value);
        }
        Err(ServiceError::Validation("Invalid aquarium id".to_string()))
    }

    pub async fn fertilizer_id(&self, value: i64) -> ServiceResult<i64> {
        if value > 0 && self.lookup.fertilizer_exists(value).await? {
            return Ok(value);
        }
        Err(ServiceError::Validation("Invalid fertilizer id".to_string()))
    }

    pub async fn chemical_id(&self, value: i64) -> ServiceResult<i64> {
        if value > 0 && self.lookup.chemical_exists(value).await? {
            return Ok(value);
        }
        Err(ServiceError::Validation("Invalid chemical id".to_string()))
    }

    pub async fn chemicals(&self, value: Vec<i64>) -> ServiceResult<Vec<i64>> {
        for id in &value {
            match self.chemical_id(*id).await {
                Ok(_) => {}
                Err(ServiceError::Validation(_)) => {
                    return Err(ServiceError::Validation(format!(
                        "At least one invalid chemical id ({})",
                        id
                    )));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(value)
    }
}

/// Unwrap a required body field.
pub fn required<T>(field: &str, value: Option<T>) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::Validation(format!("Missing required field '{}'", field)))
}
