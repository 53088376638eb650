use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

/// Booking as listed on the dashboard calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub client_name: String,
    pub service: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub status: AppointmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_scheduled() {
        let json = r#"{"id":"a1","clientName":"Sam","service":"Trim","date":"2026-09-01","time":"10:30"}"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert_eq!(appt.client_name, "Sam");
    }
}
