// Domain layer - Entities, payloads, ordering and pagination
pub mod aquarium;
pub mod chemical;
pub mod fertilization;
pub mod fertilizer;
pub mod order_by;
pub mod pagination;
pub mod temperature;
