use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::aquarium::{Aquarium, AquariumPayload};
use crate::domain::order_by::AquariumSort;
use crate::domain::pagination::Page;
use crate::presentation::app_state::AppState;
use crate::presentation::error::{json_body, patch_body, path_id, query_params};
use crate::presentation::query::ListParams;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Aquarium as rendered to clients, with a link to its measurements.
#[derive(Debug, Serialize)]
pub struct AquariumView {
    pub id: i64,
    pub name: String,
    pub volume_in_liter: i32,
    pub temperatures: String,
}

impl From<Aquarium> for AquariumView {
    fn from(aquarium: Aquarium) -> Self {
        let temperatures = aquarium.temperatures_link();
        Self {
            id: aquarium.id,
            name: aquarium.name,
            volume_in_liter: aquarium.volume_in_liter,
            temperatures,
        }
    }
}

pub async fn list_aquariums(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ServiceResult<Json<Page<AquariumView>>> {
    let params = query_params(query)?;
    let order_by = params.order_by::<AquariumSort>()?;
    let page = params.page(state.items_per_page)?;

    let aquariums = state.aquariums.list(&order_by, page).await?;
    Ok(Json(aquariums.map(AquariumView::from)))
}

pub async fn create_aquarium(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AquariumPayload>, JsonRejection>,
) -> ServiceResult<(StatusCode, Json<AquariumView>)> {
    let aquarium = state.aquariums.create(json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(aquarium.into())))
}

pub async fn get_aquarium(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Json<AquariumView>> {
    let id = path_id("Aquarium", path)?;
    let aquarium = state
        .aquariums
        .get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Aquarium", id))?;
    Ok(Json(aquarium.into()))
}

pub async fn update_aquarium(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AquariumPayload>, JsonRejection>,
) -> ServiceResult<Json<AquariumView>> {
    let id = path_id("Aquarium", path)?;
    let payload = patch_body("Aquarium", id, payload, state.aquariums.get_by_id(id)).await?;
    let aquarium = state.aquariums.update(id, payload).await?;
    Ok(Json(aquarium.into()))
}

pub async fn delete_aquarium(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<StatusCode> {
    let id = path_id("Aquarium", path)?;
    state.aquariums.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
