use crate::core::json_file;
use crate::domain::model::HistoryEntry;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::Utc;

pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Recently viewed recipes, oldest first on disk.
pub struct HistoryStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> HistoryStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    pub async fn record(&self, recipe_id: u64, title: &str) -> Result<()> {
        let mut entries: Vec<HistoryEntry> =
            json_file::read_or_default(&self.storage, &self.file_name).await;

        entries.push(HistoryEntry {
            recipe_id,
            title: title.to_string(),
            viewed_at: Utc::now(),
        });
        if entries.len() > MAX_HISTORY_ENTRIES {
            let excess = entries.len() - MAX_HISTORY_ENTRIES;
            entries.drain(..excess);
        }

        json_file::write_pretty(&self.storage, &self.file_name, &entries).await
    }

    /// Newest first.
    pub async fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        let entries: Vec<HistoryEntry> =
            json_file::read_or_default(&self.storage, &self.file_name).await;
        entries.into_iter().rev().take(limit).collect()
    }
}
