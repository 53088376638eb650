use models::barbershop::{self, Barbershop, BarbershopInput};

use crate::client::Gateway;
use crate::error::ApiError;
use crate::transport::Method;

impl Gateway {
    /// Barbershops the current user has access to.
    pub async fn list_barbershops(&self) -> Result<Vec<Barbershop>, ApiError> {
        self.get("/barbershops").await
    }

    pub async fn barbershop(&self, id: &str) -> Result<Barbershop, ApiError> {
        self.get(&format!("/barbershops/{id}")).await
    }

    /// Create (no id) or update (with id) a barbershop profile. On success
    /// the saved shop becomes the store's active barbershop, matching what
    /// the dashboard shows next.
    pub async fn save_barbershop(
        &self,
        input: &BarbershopInput,
        id: Option<&str>,
    ) -> Result<Barbershop, ApiError> {
        barbershop::validate_name(&input.name)
            .map_err(|e| ApiError::RequestFailed { status: 400, message: e.to_string() })?;
        let shop: Barbershop = match id {
            Some(id) => self.put(&format!("/barbershops/{id}"), input).await?,
            None => self.post("/barbershops", input).await?,
        };
        self.store().set_active_barbershop(shop.clone()).await;
        Ok(shop)
    }

    /// Ask the backend to grant this user access to an existing barbershop.
    pub async fn request_barbershop_access(&self, barbershop_id: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "barbershopId": barbershop_id });
        self.execute(Method::POST, "/barbershops/access-request", Some(body)).await
    }
}
