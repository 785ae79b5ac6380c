use rusqlite::Connection;
use std::path::Path;

/// Opens the submission store, creating the table on first use.
///
/// Submissions are append-only: every accepted payload gets a fresh row
/// keyed by a generated id, with the insertion time recorded by SQLite.
pub fn open(path: &Path) -> Result<Connection, String> {
    let conn = Connection::open(path).map_err(|e| e.to_string())?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS submissions (
            id TEXT PRIMARY KEY,
            body TEXT NOT NULL,
            received_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )
    .map_err(|e| e.to_string())?;
    Ok(conn)
}
