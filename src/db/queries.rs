use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::errors::ApiError;
use crate::models::{Booking, NewBooking};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn insert_booking(conn: &Connection, new: &NewBooking) -> Result<Booking, ApiError> {
    conn.execute(
        "INSERT INTO bookings (customer_name, vehicle_number, service_type, booking_date)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            new.customer_name,
            new.vehicle_number,
            new.service_type,
            new.booking_date.format(DATE_FORMAT).to_string(),
        ],
    )
    .map_err(|e| classify_constraint(e, &new.vehicle_number))?;

    Ok(Booking {
        id: conn.last_insert_rowid(),
        customer_name: new.customer_name.clone(),
        vehicle_number: new.vehicle_number.clone(),
        service_type: new.service_type.clone(),
        booking_date: new.booking_date,
    })
}

pub fn list_bookings(conn: &Connection) -> Result<Vec<Booking>, ApiError> {
    let mut stmt = conn.prepare(
        "SELECT id, customer_name, vehicle_number, service_type, booking_date
         FROM bookings ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn get_booking(conn: &Connection, id: i64) -> Result<Option<Booking>, ApiError> {
    let result = conn.query_row(
        "SELECT id, customer_name, vehicle_number, service_type, booking_date
         FROM bookings WHERE id = ?1",
        params![id],
        parse_booking_row,
    );

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Writes all four data fields for the given id. Callers compose this with
/// `get_booking` under one connection lock so the read-modify-write is atomic.
pub fn update_booking(conn: &Connection, booking: &Booking) -> Result<bool, ApiError> {
    let count = conn
        .execute(
            "UPDATE bookings
             SET customer_name = ?1, vehicle_number = ?2, service_type = ?3, booking_date = ?4
             WHERE id = ?5",
            params![
                booking.customer_name,
                booking.vehicle_number,
                booking.service_type,
                booking.booking_date.format(DATE_FORMAT).to_string(),
                booking.id,
            ],
        )
        .map_err(|e| classify_constraint(e, &booking.vehicle_number))?;
    Ok(count > 0)
}

pub fn delete_booking(conn: &Connection, id: i64) -> Result<bool, ApiError> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

pub fn vehicle_number_in_use(
    conn: &Connection,
    vehicle_number: &str,
    exclude_id: Option<i64>,
) -> Result<bool, ApiError> {
    let count: i64 = match exclude_id {
        Some(id) => conn.query_row(
            "SELECT COUNT(*) FROM bookings WHERE vehicle_number = ?1 AND id != ?2",
            params![vehicle_number, id],
            |row| row.get(0),
        )?,
        None => conn.query_row(
            "SELECT COUNT(*) FROM bookings WHERE vehicle_number = ?1",
            params![vehicle_number],
            |row| row.get(0),
        )?,
    };
    Ok(count > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let date_str: String = row.get(4)?;
    let booking_date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Booking {
        id: row.get(0)?,
        customer_name: row.get(1)?,
        vehicle_number: row.get(2)?,
        service_type: row.get(3)?,
        booking_date,
    })
}

/// The unique index on vehicle_number surfaces as a constraint violation;
/// translate it here so callers see the domain error, not the sqlite one.
fn classify_constraint(err: rusqlite::Error, vehicle_number: &str) -> ApiError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            ApiError::DuplicateVehicle(vehicle_number.to_string())
        }
        _ => ApiError::Database(err),
    }
}
