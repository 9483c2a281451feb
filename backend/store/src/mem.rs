//! In-memory table store for tests and ephemeral runs.

use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use gridscan_core::ExtractionRecord;

use crate::TableStore;

/// Append-only vector behind an `RwLock`; insertion order doubles as the
/// recency tie-break.
pub struct MemStore {
    records: RwLock<Vec<ExtractionRecord>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableStore for MemStore {
    async fn insert(&self, record: &ExtractionRecord) -> Result<()> {
        let mut records = self.records.write().unwrap();
        if records.iter().any(|r| r.id == record.id) {
            anyhow::bail!("duplicate extraction id {}", record.id);
        }
        records.push(record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ExtractionRecord>> {
        let records = self.records.read().unwrap();
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<ExtractionRecord>> {
        let records = self.records.read().unwrap();
        // Reverse insertion order first so the stable sort keeps
        // same-instant inserts newest-first.
        let mut out: Vec<_> = records.iter().rev().cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out.truncate(limit);
        Ok(out)
    }
}
