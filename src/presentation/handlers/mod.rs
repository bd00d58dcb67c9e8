// HTTP request handlers, one module per resource
pub mod aquariums;
pub mod chemicals;
pub mod fertilization;
pub mod fertilizers;
pub mod temperatures;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}
