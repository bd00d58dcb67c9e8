use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::fertilizer::{Fertilizer, FertilizerPayload};
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

pub async fn list_fertilizers(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ServiceResult<Json<Page<Fertilizer>>> {
    let params = query_params(query)?;
    let order_by = params.order_by::<NameSort>()?;
    let chemical_id = params.chemical_id()?;
    let page = params.page(state.items_per_page)?;

    Ok(Json(state.fertilizers.list(&order_by, chemical_id, page).await?))
}

pub async fn create_fertilizer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FertilizerPayload>, JsonRejection>,
) -> ServiceResult<(StatusCode, Json<Fertilizer>)> {
    let fertilizer = state.fertilizers.create(json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(fertilizer)))
}

pub async fn get_fertilizer(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Json<Fertilizer>> {
    let id = path_id("Fertilizer", path)?;
    state
        .fertilizers
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("Fertilizer", id))
}

pub async fn update_fertilizer(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FertilizerPayload>, JsonRejection>,
) -> ServiceResult<Json<Fertilizer>> {
    let id = path_id("Fertilizer", path)?;
    let payload = patch_body("Fertilizer", id, payload, state.fertilizers.get_by_id(id)).await?;
    Ok(Json(state.fertilizers.update(id, payload).await?))
}

pub async fn delete_fertilizer(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<StatusCode> {
    let id = path_id("Fertilizer", path)?;
    state.fertilizers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
