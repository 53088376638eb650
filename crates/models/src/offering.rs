use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Catalog entry a barbershop sells (the backend calls these "services").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offering {
    pub id: String,
    pub service_name: String,
    pub description: String,
    pub price: f64,
    /// Duration in minutes.
    pub duration: u32,
    pub category: String,
    pub is_active: bool,
    pub barbershop_id: String,
}

/// Body for `POST /services` and `PUT /services/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingInput {
    pub service_name: String,
    pub description: String,
    pub price: f64,
    pub duration: u32,
    pub category: String,
    pub is_active: bool,
    pub barbershop_id: String,
}

pub fn validate_input(input: &OfferingInput) -> Result<(), ModelError> {
    if input.service_name.trim().is_empty() {
        return Err(ModelError::Validation("service name required".into()));
    }
    if input.price < 0.0 {
        return Err(ModelError::Validation("price must be >= 0".into()));
    }
    if input.duration == 0 {
        return Err(ModelError::Validation("duration must be >= 1 minute".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> OfferingInput {
        OfferingInput {
            service_name: "Skin fade".into(),
            description: "Full skin fade".into(),
            price: 35.0,
            duration: 45,
            category: "Haircut".into(),
            is_active: true,
            barbershop_id: "b1".into(),
        }
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(input()).unwrap();
        assert_eq!(value["serviceName"], "Skin fade");
        assert_eq!(value["isActive"], true);
        assert_eq!(value["barbershopId"], "b1");
    }

    #[test]
    fn input_validation() {
        assert!(validate_input(&input()).is_ok());
        let mut bad = input();
        bad.duration = 0;
        assert!(validate_input(&bad).is_err());
        let mut bad = input();
        bad.price = -1.0;
        assert!(validate_input(&bad).is_err());
    }
}
