//! SQLite Visit Store
//!
//! Implements VisitCounter using SQLite for storage.

use crate::domain::entities::VisitCount;
use crate::domain::ports::VisitCounter;
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::Arc;

/// SQLite-backed visit counter.
///
/// A single connection is shared behind a mutex; every statement runs on the
/// blocking pool so request handlers never stall the async runtime.
pub struct SqliteVisitStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteVisitStore {
    /// Open (or create) the database file, creating parent directories.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS ip_stats (
                 ip    TEXT PRIMARY KEY,
                 count INTEGER NOT NULL
             )",
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn increment(conn: &Connection, ip: &str) -> Result<u64> {
        let count: i64 = conn.query_row(
            "INSERT INTO ip_stats (ip, count) VALUES (?1, 1)
             ON CONFLICT(ip) DO UPDATE SET count = count + 1
             RETURNING count",
            params![ip],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn load_all(conn: &Connection) -> Result<Vec<VisitCount>> {
        let mut stmt = conn.prepare("SELECT ip, count FROM ip_stats ORDER BY ip")?;

        let visits = stmt
            .query_map([], Self::row_to_visit)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(visits)
    }

    /// Convert a SQLite row to a VisitCount entity.
    fn row_to_visit(row: &Row) -> rusqlite::Result<VisitCount> {
        Ok(VisitCount {
            ip: row.get(0)?,
            count: row.get::<_, i64>(1)? as u64,
        })
    }
}

#[async_trait]
impl VisitCounter for SqliteVisitStore {
    async fn record_visit(&self, ip: &str) -> Result<u64> {
        let conn = self.conn.clone();
        let ip = ip.to_string();
        tokio::task::spawn_blocking(move || Self::increment(&conn.lock(), &ip)).await?
    }

    async fn all_visits(&self) -> Result<Vec<VisitCount>> {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || Self::load_all(&conn.lock())).await?
    }
}
