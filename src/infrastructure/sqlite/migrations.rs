use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS candidates (
            name TEXT PRIMARY KEY,
            description TEXT NOT NULL,
            embedding BLOB NOT NULL
        );
        ",
    )
    .map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
