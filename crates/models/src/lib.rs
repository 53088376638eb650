//! Domain and wire types shared by the barberdesk client crates.
//! - Field names mirror the backend contract exactly: snake_case on the
//!   auth endpoints, camelCase (with the legacy `barbershop` prefix) on the
//!   domain endpoints.
//! - Validation helpers cover the few checks the client performs before
//!   spending a network round trip.

pub mod appointment;
pub mod auth;
pub mod barbershop;
pub mod errors;
pub mod offering;
pub mod user;
