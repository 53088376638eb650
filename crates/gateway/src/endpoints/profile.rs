use models::user::{ProfileUpdate, User};

use crate::client::Gateway;
use crate::error::ApiError;

impl Gateway {
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.get("/users/profile").await
    }

    pub async fn update_profile(&self, input: &ProfileUpdate) -> Result<User, ApiError> {
        self.put("/users/update-profile", input).await
    }

    /// Delete the account, then clear the local session; the credentials are
    /// gone either way.
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        self.delete("/users/delete-account").await?;
        self.store().logout().await;
        Ok(())
    }
}
