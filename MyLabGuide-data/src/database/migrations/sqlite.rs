use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    info!("Running SQLite migrations");

    create_blood_tests_table(conn)?;
    create_blood_tests_index(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the blood tests table
fn create_blood_tests_table(conn: &Connection) -> Result<(), String> {
    info!("Creating blood_tests table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS blood_tests (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            test_date TEXT NOT NULL,
            lab_values TEXT NOT NULL,
            analysis TEXT NOT NULL,
            recommendation TEXT NOT NULL,
            risk_tier TEXT NOT NULL,
            risk_score INTEGER NOT NULL,
            created_at TEXT NOT NULL
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

/// Index used by the per-user history queries
fn create_blood_tests_index(conn: &Connection) -> Result<(), String> {
    info!("Creating index on (user_id, test_date)");

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_blood_tests_user_date
        ON blood_tests (user_id, test_date DESC, created_at DESC)",
        [],
    ).map_err(|e| format!("Failed to create index: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'blood_tests'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
