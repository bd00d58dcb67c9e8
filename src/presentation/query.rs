// List query parameters: order-by whitelist, page and cross-entity filters
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::validators::Validator;
use crate::domain::order_by::{OrderBy, SortField};
use crate::domain::pagination::PageRequest;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "order-by")]
    pub order_by: Option<String>,
    pub page: Option<i64>,
    #[serde(rename = "aquarium-id")]
    pub aquarium_id: Option<i64>,
    #[serde(rename = "fertilizer-id")]
    pub fertilizer_id: Option<i64>,
    #[serde(rename = "chemical-id")]
    pub chemical_id: Option<i64>,
}

impl ListParams {
    /// The requested directive if it is one of `F`'s choices, the first
    /// choice when absent.
    pub fn order_by<F: SortField>(&self) -> ServiceResult<OrderBy> {
        let Some(raw) = &self.order_by else {
            return Ok(F::default_order());
        };

        let choices = F::choices();
        if !choices.iter().any(|choice| choice == raw) {
            return Err(ServiceError::Validation(format!(
                "Unknown order-by parameter '{}'. Valid choices are {}",
                raw,
                choices.join(", ")
            )));
        }
        raw.parse().map_err(ServiceError::Validation)
    }

    pub fn page(&self, items_per_page: u32) -> ServiceResult<PageRequest> {
        let page = match self.page {
            None => 1,
            Some(page) => u32::try_from(page)
                .ok()
                .filter(|p| *p > 0)
                .ok_or_else(|| {
                    ServiceError::Validation("page must be a positive integer".to_string())
                })?,
        };
        Ok(PageRequest::new(page, items_per_page))
    }

    pub fn aquarium_id(&self) -> ServiceResult<Option<i64>> {
        self.aquarium_id
            .map(|id| Validator::positive_id("aquarium-id", id))
            .transpose()
    }

    pub fn fertilizer_id(&self) -> ServiceResult<Option<i64>> {
        self.fertilizer_id
            .map(|id| Validator::positive_id("fertilizer-id", id))
            .transpose()
    }

    pub fn chemical_id(&self) -> ServiceResult<Option<i64>> {
        self.chemical_id
            .map(|id| Validator::positive_id("chemical-id", id))
            .transpose()
    }
}
