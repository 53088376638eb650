//! Session layer for the barberdesk client.
//! - Single authority for the token pair, identity and active barbershop.
//! - Persists the whole session to one JSON file and rehydrates on open.
//! - Serializes every credential mutation behind one lock so a late renewal
//!   can never resurrect a logged-out session.

pub mod api;
pub mod error;
pub mod oauth;
pub mod session;
pub mod storage;
pub mod store;

pub use error::AuthError;
pub use oauth::{extract_callback_token, CallbackOutcome};
pub use session::Session;
pub use store::SessionStore;
