pub mod mem;
pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

use gridscan_core::ExtractionRecord;

pub use mem::MemStore;
pub use sqlite::SqliteStore;

/// Abstract interface over extraction-record storage.
///
/// Records are write-once: there is no update or delete operation.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Persist a new record.
    async fn insert(&self, record: &ExtractionRecord) -> Result<()>;

    /// Look up a record by its id.
    async fn find_by_id(&self, id: &str) -> Result<Option<ExtractionRecord>>;

    /// Most recent records first, at most `limit` of them.
    async fn list_recent(&self, limit: usize) -> Result<Vec<ExtractionRecord>>;
}
