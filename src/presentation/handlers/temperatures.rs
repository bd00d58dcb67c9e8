use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::order_by::TemperatureSort;
use crate::domain::pagination::Page;
use crate::domain::temperature::{AquariumTemperature, TemperaturePayload};
use crate::presentation::app_state::AppState;
use crate::presentation::error::{json_body, patch_body, path_id, query_params};
use crate::presentation::query::ListParams;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

pub async fn list_temperatures(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ServiceResult<Json<Page<AquariumTemperature>>> {
    let params = query_params(query)?;
    let order_by = params.order_by::<TemperatureSort>()?;
    let aquarium_id = params.aquarium_id()?;
    let page = params.page(state.items_per_page)?;

    Ok(Json(state.temperatures.list(&order_by, aquarium_id, page).await?))
}

pub async fn create_temperature(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TemperaturePayload>, JsonRejection>,
) -> ServiceResult<(StatusCode, Json<AquariumTemperature>)> {
    let temperature = state.temperatures.create(json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(temperature)))
}

pub async fn get_temperature(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Json<AquariumTemperature>> {
    let id = path_id("Temperature", path)?;
    state
        .temperatures
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("Temperature", id))
}

pub async fn update_temperature(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TemperaturePayload>, JsonRejection>,
) -> ServiceResult<Json<AquariumTemperature>> {
    let id = path_id("Temperature", path)?;
    let payload = patch_body("Temperature", id, payload, state.temperatures.get_by_id(id)).await?;
    Ok(Json(state.temperatures.update(id, payload).await?))
}

pub async fn delete_temperature(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<StatusCode> {
    let id = path_id("Temperature", path)?;
    state.temperatures.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
