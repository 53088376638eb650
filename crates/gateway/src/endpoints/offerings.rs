use models::offering::{self, Offering, OfferingInput};

use crate::client::Gateway;
use crate::error::ApiError;

impl Gateway {
    /// Service catalog of one barbershop.
    pub async fn list_offerings(&self, barbershop_id: &str) -> Result<Vec<Offering>, ApiError> {
        self.get(&format!("/services?barbershopId={barbershop_id}")).await
    }

    pub async fn create_offering(&self, input: &OfferingInput) -> Result<Offering, ApiError> {
        offering::validate_input(input)
            .map_err(|e| ApiError::RequestFailed { status: 400, message: e.to_string() })?;
        self.post("/services", input).await
    }

    pub async fn update_offering(
        &self,
        id: &str,
        input: &OfferingInput,
    ) -> Result<Offering, ApiError> {
        offering::validate_input(input)
            .map_err(|e| ApiError::RequestFailed { status: 400, message: e.to_string() })?;
        self.put(&format!("/services/{id}"), input).await
    }

    pub async fn delete_offering(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/services/{id}")).await
    }
}
