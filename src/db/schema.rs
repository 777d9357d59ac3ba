use duckdb::Connection;
use tracing::info;

/// DDL for the single table this service queries.
const CREATE_TICKETS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS tickets (
        id INTEGER PRIMARY KEY,
        text VARCHAR NOT NULL,
        category VARCHAR NOT NULL,
        priority VARCHAR NOT NULL,
        status VARCHAR NOT NULL,
        created_at TIMESTAMP NOT NULL
    )";

/// Creates the tickets table on startup if the database file is fresh.
pub fn ensure_tickets_table(conn: &Connection) -> Result<(), duckdb::Error> {
    conn.execute_batch(CREATE_TICKETS_TABLE)?;
    info!("Tickets table ready");
    Ok(())
}
