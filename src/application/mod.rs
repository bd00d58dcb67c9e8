// Application layer - Controllers, validators and the store contract
pub mod aquarium_controller;
pub mod chemical_controller;
pub mod error;
pub mod fertilization_controller;
pub mod fertilizer_controller;
pub mod maintenance_repository;
pub mod temperature_controller;
pub mod validators;

use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::order_by::{OrderBy, Sort, SortField};

/// Map a wire directive onto an entity's sortable columns.
pub(crate) fn resolve_sort<F: SortField>(order_by: &OrderBy) -> ServiceResult<Sort<F>> {
    Sort::resolve(order_by).ok_or_else(|| ServiceError::UnsupportedSort(order_by.to_string()))
}

/// Turn an absent row into a 404.
pub(crate) fn found<T>(resource: &str, id: i64, row: Option<T>) -> ServiceResult<T> {
    row.ok_or_else(|| ServiceError::not_found(resource, id))
}
