// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::aquariums::{
    create_aquarium, delete_aquarium, get_aquarium, list_aquariums, update_aquarium,
};
use crate::presentation::handlers::chemicals::{
    create_chemical, delete_chemical, get_chemical, list_chemicals, update_chemical,
};
use crate::presentation::handlers::fertilization::{
    create_fertilization, delete_fertilization, get_fertilization, list_fertilizations,
    update_fertilization,
};
use crate::presentation::handlers::fertilizers::{
    create_fertilizer, delete_fertilizer, get_fertilizer, list_fertilizers, update_fertilizer,
};
use crate::presentation::handlers::health_check;
use crate::presentation::handlers::temperatures::{
    create_temperature, delete_temperature, get_temperature, list_temperatures,
    update_temperature,
};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/aquariums", get(list_aquariums).post(create_aquarium))
        .route(
            "/aquariums/:id",
            get(get_aquarium)
                .patch(update_aquarium)
                .delete(delete_aquarium),
        )
        .route("/temperatures", get(list_temperatures).post(create_temperature))
        .route(
            "/temperatures/:id",
            get(get_temperature)
                .patch(update_temperature)
                .delete(delete_temperature),
        )
        .route("/chemicals", get(list_chemicals).post(create_chemical))
        .route(
            "/chemicals/:id",
            get(get_chemical)
                .patch(update_chemical)
                .delete(delete_chemical),
        )
        .route("/fertilizers", get(list_fertilizers).post(create_fertilizer))
        .route(
            "/fertilizers/:id",
            get(get_fertilizer)
                .patch(update_fertilizer)
                .delete(delete_fertilizer),
        )
        .route(
            "/fertilization",
            get(list_fertilizations).post(create_fertilization),
        )
        .route(
            "/fertilization/:id",
            get(get_fertilization)
                .patch(update_fertilization)
                .delete(delete_fertilization),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
