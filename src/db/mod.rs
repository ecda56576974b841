pub mod migrations;
pub mod queries;

use anyhow::Context;
use rusqlite::Connection;

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}

/// Backs the vehicle-number uniqueness invariant for deployments that enable
/// it. Created outside the migration chain because the flag may change
/// between runs.
pub fn ensure_vehicle_unique_index(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_bookings_vehicle_number
         ON bookings(vehicle_number);",
    )
    .context("failed to create vehicle number unique index")?;
    Ok(())
}
