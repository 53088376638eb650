use models::appointment::Appointment;

use crate::client::Gateway;
use crate::error::ApiError;

impl Gateway {
    /// Bookings for one barbershop's calendar.
    pub async fn list_appointments(&self, barbershop_id: &str) -> Result<Vec<Appointment>, ApiError> {
        self.get(&format!("/appointments?barbershopId={barbershop_id}")).await
    }

    pub async fn cancel_appointment(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/appointments/{id}")).await
    }
}
