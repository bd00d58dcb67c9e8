use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::chemical::{Chemical, ChemicalPayload};
use crate::domain::order_by::NameSort;
use crate::domain::pagination::Page;
use crate::presentation::app_state::AppState;
use crate::presentation::error::{json_body, patch_body, path_id, query_params};
use crate::presentation::query::ListParams;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

pub async fn list_chemicals(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ServiceResult<Json<Page<Chemical>>> {
    let params = query_params(query)?;
    let order_by = params.order_by::<NameSort>()?;
    let fertilizer_id = params.fertilizer_id()?;
    let page = params.page(state.items_per_page)?;

    Ok(Json(state.chemicals.list(&order_by, fertilizer_id, page).await?))
}

pub async fn create_chemical(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChemicalPayload>, JsonRejection>,
) -> ServiceResult<(StatusCode, Json<Chemical>)> {
    let chemical = state.chemicals.create(json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(chemical)))
}

pub async fn get_chemical(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Json<Chemical>> {
    let id = path_id("Chemical", path)?;
    state
        .chemicals
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("Chemical", id))
}

pub async fn update_chemical(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ChemicalPayload>, JsonRejection>,
) -> ServiceResult<Json<Chemical>> {
    let id = path_id("Chemical", path)?;
    let payload = patch_body("Chemical", id, payload, state.chemicals.get_by_id(id)).await?;
    Ok(Json(state.chemicals.update(id, payload).await?))
}

pub async fn delete_chemical(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<StatusCode> {
    let id = path_id("Chemical", path)?;
    state.chemicals.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
