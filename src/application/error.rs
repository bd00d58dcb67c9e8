// Error taxonomy shared by the store, validators and controllers
use thiserror::Error;

/// Failures reported by a `MaintenanceRepository` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Duplicate(db_err.message().to_string())
            }
            other => StoreError::Backend(other.into()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Cant apply sorting with {0}")]
    UnsupportedSort(String),

    #[error("store failure: {0}")]
    Store(anyhow::Error),
}

impl ServiceError {
    pub fn not_found(resource: &str, id: i64) -> Self {
        ServiceError::NotFound(format!("{} {} not found", resource, id))
    }

    pub fn name_taken(name: &str) -> Self {
        ServiceError::Conflict(format!("Name '{}' not available", name))
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(_) => ServiceError::Conflict("Name not available".to_string()),
            StoreError::Backend(e) => ServiceError::Store(e),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
