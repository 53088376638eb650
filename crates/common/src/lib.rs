//! Shared bootstrap helpers for the barberdesk client crates.

pub mod env;
pub mod utils;
