use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::fertilization::{Fertilization, FertilizationPayload};
use crate::domain::order_by::FertilizationSort;
use crate::domain::pagination::Page;
use crate::presentation::app_state::AppState;
use crate::presentation::error::{json_body, patch_body, path_id, query_params};
use crate::presentation::query::ListParams;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

pub async fn list_fertilizations(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ServiceResult<Json<Page<Fertilization>>> {
    let params = query_params(query)?;
    let order_by = params.order_by::<FertilizationSort>()?;
    let aquarium_id = params.aquarium_id()?;
    let page = params.page(state.items_per_page)?;

    Ok(Json(state.fertilizations.list(&order_by, aquarium_id, page).await?))
}

pub async fn create_fertilization(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FertilizationPayload>, JsonRejection>,
) -> ServiceResult<(StatusCode, Json<Fertilization>)> {
    let fertilization = state.fertilizations.create(json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(fertilization)))
}

pub async fn get_fertilization(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Json<Fertilization>> {
    let id = path_id("Fertilization", path)?;
    state
        .fertilizations
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("Fertilization", id))
}

pub async fn update_fertilization(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FertilizationPayload>, JsonRejection>,
) -> ServiceResult<Json<Fertilization>> {
    let id = path_id("Fertilization", path)?;
    let payload =
        patch_body("Fertilization", id, payload, state.fertilizations.get_by_id(id)).await?;
    Ok(Json(state.fertilizations.update(id, payload).await?))
}

pub async fn delete_fertilization(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<StatusCode> {
    let id = path_id("Fertilization", path)?;
    state.fertilizations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
