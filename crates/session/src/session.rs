use models::barbershop::Barbershop;
use models::user::User;
use serde::{Deserialize, Serialize};

/// Whole-session snapshot. Mutations always swap the full value, so readers
/// never observe a half-written token pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
    pub active_barbershop: Option<Barbershop>,
}

impl Session {
    /// Authenticated means an identity is present; the token-pair invariant
    /// (both or neither) is maintained by the store's mutation paths.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
