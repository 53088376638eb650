//! Typed wrappers over the domain endpoints. Each is a thin call through
//! [`Gateway::request`](crate::Gateway::request); the renewal/retry policy
//! lives in one place, not per endpoint.

mod appointments;
mod barbershops;
mod offerings;
mod profile;
