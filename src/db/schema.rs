use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::error::ReunionResult;

/// Initialize the database schema. Creates the table and indexes if they don't exist.
pub fn initialize(conn: &Connection) -> ReunionResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS reunions (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT,
            description TEXT,
            location TEXT,
            start_date TEXT,
            end_date TEXT,
            state TEXT NOT NULL DEFAULT 'draft' CHECK (state IN ('draft', 'published')),
            discarded_at TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS index_reunions_on_state ON reunions(state);
        CREATE INDEX IF NOT EXISTS index_reunions_on_discarded_at ON reunions(discarded_at);
        ",
    )?;
    Ok(())
}

/// Open (or create) the database at `path` and make sure the schema exists.
/// The literal path `:memory:` opens a private in-memory database.
pub fn open(path: &Path) -> ReunionResult<Connection> {
    let conn = if path == Path::new(":memory:") {
        Connection::open_in_memory()?
    } else {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Connection::open(path)?
    };
    initialize(&conn)?;
    info!(path = %path.display(), "database ready");
    Ok(conn)
}

/// Create an in-memory connection for testing.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
