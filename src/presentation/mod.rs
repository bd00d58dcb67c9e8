// Presentation layer - HTTP routing, request parsing and response shaping
pub mod app_state;
pub mod error;
pub mod handlers;
pub mod query;
pub mod router;
