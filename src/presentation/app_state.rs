// Application state for HTTP handlers
use crate::application::aquarium_controller::AquariumController;
use crate::application::chemical_controller::ChemicalController;
use crate::application::fertilization_controller::FertilizationController;
use crate::application::fertilizer_controller::FertilizerController;
use crate::application::maintenance_repository::{EntityLookup, MaintenanceRepository};
use crate::application::temperature_controller::TemperatureController;
use crate::application::validators::Validator;
use std::sync::Arc;

/// Read-only after construction; shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub aquariums: AquariumController,
    pub temperatures: TemperatureController,
    pub chemicals: ChemicalController,
    pub fertilizers: FertilizerController,
    pub fertilizations: FertilizationController,
    pub items_per_page: u32,
}

impl AppState {
    pub fn new<R>(repository: Arc<R>, items_per_page: u32) -> Self
    where
        R: MaintenanceRepository + EntityLookup + 'static,
    {
        let validator = Validator::new(repository.clone());

        Self {
            aquariums: AquariumController::new(repository.clone()),
            temperatures: TemperatureController::new(repository.clone(), validator.clone()),
            chemicals: ChemicalController::new(repository.clone()),
            fertilizers: FertilizerController::new(repository.clone(), validator.clone()),
            fertilizations: FertilizationController::new(repository, validator),
            items_per_page,
        }
    }
}
