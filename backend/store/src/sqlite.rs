//! SQLite-backed durable table store.
//!
//! Uses `rusqlite` with the grid serialized as JSON text and timestamps
//! stored RFC 3339, so rows stay inspectable with the sqlite3 shell. The
//! connection is opened once at startup and lives for the process.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use tokio::sync::Mutex;
use tracing::{debug, info};

use gridscan_core::ExtractionRecord;

use crate::TableStore;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS extractions (
    id             TEXT PRIMARY KEY,
    filename       TEXT NOT NULL,
    extracted_data TEXT NOT NULL,
    created_at     TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_extractions_created ON extractions(created_at);";

impl SqliteStore {
    /// Create or open a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .context("Failed to open SQLite extraction database")?;
        conn.execute_batch(&format!("PRAGMA journal_mode=WAL;\n{SCHEMA}"))
            .context("Failed to initialize extractions schema")?;
        info!("SqliteStore opened at {:?}", path.as_ref());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for tests).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<(String, String, String, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn decode(id: String, filename: String, data: String, created: String) -> Result<ExtractionRecord> {
    Ok(ExtractionRecord {
        id,
        filename,
        extracted_data: serde_json::from_str(&data)
            .context("Corrupt extracted_data column")?,
        created_at: chrono::DateTime::parse_from_rfc3339(&created)
            .context("Corrupt created_at column")?
            .with_timezone(&chrono::Utc),
    })
}

#[async_trait]
impl TableStore for SqliteStore {
    async fn insert(&self, record: &ExtractionRecord) -> Result<()> {
        let conn = self.conn.lock().await;
        let data = serde_json::to_string(&record.extracted_data)?;
        conn.execute(
            "INSERT INTO extractions (id, filename, extracted_data, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.id,
                record.filename,
                data,
                record.created_at.to_rfc3339(),
            ],
        )
        .context("Failed to insert extraction record")?;
        debug!("Inserted extraction {}", record.id);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ExtractionRecord>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT id, filename, extracted_data, created_at
             FROM extractions WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], row_to_record)?;
        match rows.next() {
            Some(row) => {
                let (id, filename, data, created) = row?;
                Ok(Some(decode(id, filename, data, created)?))
            }
            None => Ok(None),
        }
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<ExtractionRecord>> {
        let conn = self.conn.lock().await;
        // rowid tie-break keeps same-instant inserts newest-first.
        let mut stmt = conn.prepare(
            "SELECT id, filename, extracted_data, created_at
             FROM extractions ORDER BY created_at DESC, rowid DESC LIMIT ?1",
        )?;
        let rows: Vec<_> = stmt
            .query_map(params![limit], row_to_record)?
            .collect::<rusqlite::Result<_>>()?;

        rows.into_iter()
            .map(|(id, filename, data, created)| decode(id, filename, data, created))
            .collect()
    }
}
