use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub customer_name: String,
    pub vehicle_number: String,
    pub service_type: String,
    pub booking_date: NaiveDate,
}

/// Payload for creating a booking. The id is assigned by the database.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub customer_name: String,
    pub vehicle_number: String,
    pub service_type: String,
    pub booking_date: NaiveDate,
}

impl NewBooking {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_non_empty("customer_name", &self.customer_name)?;
        require_non_empty("vehicle_number", &self.vehicle_number)?;
        require_non_empty("service_type", &self.service_type)?;
        validate_not_past(self.booking_date)
    }
}

/// Partial update: a `None` field is left untouched, a `Some` field replaces
/// the stored value. `Some("")` counts as supplied and is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingPatch {
    pub customer_name: Option<String>,
    pub vehicle_number: Option<String>,
    pub service_type: Option<String>,
    pub booking_date: Option<NaiveDate>,
}

impl BookingPatch {
    /// Checks only the supplied fields. A patch that does not touch the date
    /// must not re-validate the stored date, which may legitimately be in
    /// the past by now.
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.customer_name {
            require_non_empty("customer_name", name)?;
        }
        if let Some(vehicle) = &self.vehicle_number {
            require_non_empty("vehicle_number", vehicle)?;
        }
        if let Some(service) = &self.service_type {
            require_non_empty("service_type", service)?;
        }
        if let Some(date) = self.booking_date {
            validate_not_past(date)?;
        }
        Ok(())
    }

    pub fn apply(&self, booking: &mut Booking) {
        if let Some(name) = &self.customer_name {
            booking.customer_name = name.clone();
        }
        if let Some(vehicle) = &self.vehicle_number {
            booking.vehicle_number = vehicle.clone();
        }
        if let Some(service) = &self.service_type {
            booking.service_type = service.clone();
        }
        if let Some(date) = self.booking_date {
            booking.booking_date = date;
        }
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::EmptyField(field));
    }
    Ok(())
}

fn validate_not_past(date: NaiveDate) -> Result<(), ApiError> {
    if date < Utc::now().date_naive() {
        return Err(ApiError::InvalidDate);
    }
    Ok(())
}
