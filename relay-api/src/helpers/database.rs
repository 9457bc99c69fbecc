use crate::storage::migrations::run_migrations;
use crate::DbConnection;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Open the relay database at `path` (or `:memory:`) and bring its schema up to date
pub fn initialize_database(path: &str) -> anyhow::Result<DbConnection> {
    if path != ":memory:" {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let conn = Connection::open(path)?;
    prepare(conn)
}

pub fn open_in_memory() -> anyhow::Result<DbConnection> {
    prepare(Connection::open_in_memory()?)
}

fn prepare(mut conn: Connection) -> anyhow::Result<DbConnection> {
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    conn.busy_timeout(Duration::from_secs(5))?;
    run_migrations(&mut conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}
