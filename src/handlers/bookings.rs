use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::db::queries;
use crate::errors::ApiError;
use crate::models::{Booking, BookingPatch, NewBooking};
use crate::state::AppState;

// Each handler takes the connection lock once, so its lookup-then-mutate
// sequence is a single atomic unit of work against the database.

// POST /bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    body.validate()?;

    let db = state.db.lock().unwrap();

    if state.config.enforce_unique_vehicle
        && queries::vehicle_number_in_use(&db, &body.vehicle_number, None)?
    {
        return Err(ApiError::DuplicateVehicle(body.vehicle_number.clone()));
    }

    let booking = queries::insert_booking(&db, &body)?;
    tracing::info!(
        "created booking {} for vehicle {}",
        booking.id,
        booking.vehicle_number
    );

    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let db = state.db.lock().unwrap();
    let bookings = queries::list_bookings(&db)?;
    Ok(Json(bookings))
}

// GET /bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, ApiError> {
    let db = state.db.lock().unwrap();
    let booking = queries::get_booking(&db, id)?.ok_or(ApiError::NotFound(id))?;
    Ok(Json(booking))
}

// PUT /bookings/:id
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<BookingPatch>,
) -> Result<Json<Booking>, ApiError> {
    // Validate before touching the record: a bad patch leaves it unchanged.
    patch.validate()?;

    let db = state.db.lock().unwrap();
    let mut booking = queries::get_booking(&db, id)?.ok_or(ApiError::NotFound(id))?;

    if state.config.enforce_unique_vehicle {
        if let Some(vehicle) = &patch.vehicle_number {
            if queries::vehicle_number_in_use(&db, vehicle, Some(id))? {
                return Err(ApiError::DuplicateVehicle(vehicle.clone()));
            }
        }
    }

    patch.apply(&mut booking);

    if !queries::update_booking(&db, &booking)? {
        return Err(ApiError::NotFound(id));
    }

    Ok(Json(booking))
}

// DELETE /bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let db = state.db.lock().unwrap();

    if !queries::delete_booking(&db, id)? {
        return Err(ApiError::NotFound(id));
    }

    tracing::info!("deleted booking {id}");
    Ok(StatusCode::NO_CONTENT)
}
