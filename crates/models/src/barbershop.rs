use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Barbershop (tenant) record as returned by `/barbershops`.
///
/// The backend prefixes every field with `barbershop`; the serde renames keep
/// the Rust side readable without breaking the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barbershop {
    #[serde(rename = "barbershopId")]
    pub id: String,
    #[serde(rename = "barbershopName")]
    pub name: String,
    #[serde(rename = "barbershopAddress")]
    pub address: String,
    #[serde(rename = "barbershopCity")]
    pub city: String,
    #[serde(rename = "barbershopState")]
    pub state: String,
    #[serde(rename = "barbershopZipCode")]
    pub zip_code: String,
    #[serde(rename = "barbershopLatitude")]
    pub latitude: f64,
    #[serde(rename = "barbershopLongitude")]
    pub longitude: f64,
    #[serde(rename = "barbershopImages", default)]
    pub images: Vec<String>,
    #[serde(rename = "countryCode")]
    pub country_code: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    #[serde(rename = "additionalInfo", default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// Body for creating or updating a barbershop profile. Image upload goes
/// through a separate channel and is not part of this payload.
#[derive(Debug, Clone, Serialize)]
pub struct BarbershopInput {
    #[serde(rename = "barbershopName")]
    pub name: String,
    #[serde(rename = "barbershopAddress")]
    pub address: String,
    #[serde(rename = "barbershopCity")]
    pub city: String,
    #[serde(rename = "barbershopState")]
    pub state: String,
    #[serde(rename = "barbershopZipCode")]
    pub zip_code: String,
    #[serde(rename = "barbershopLatitude")]
    pub latitude: f64,
    #[serde(rename = "barbershopLongitude")]
    pub longitude: f64,
    #[serde(rename = "countryCode")]
    pub country_code: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    #[serde(rename = "additionalInfo", skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}
