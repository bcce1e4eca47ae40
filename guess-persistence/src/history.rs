use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use guess_core::{DaySession, GuessHistory};
use guess_types::{DateKey, DaySummary, GuessRecord};

use crate::KeyValueStore;

pub const HISTORY_KEY_PREFIX: &str = "guessHistory_";

/// Stores each day's guess list as a JSON array under `guessHistory_<YYYYMMDD>`.
///
/// Pure mapping from day to list: no ranking, no dedup.
#[derive(Clone)]
pub struct GuessHistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl GuessHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn storage_key(date_key: DateKey) -> String {
        format!("{}{}", HISTORY_KEY_PREFIX, date_key)
    }

    pub async fn save(&self, date_key: DateKey, records: &[GuessRecord]) -> Result<()> {
        let payload = serde_json::to_string(records)
            .with_context(|| format!("serializing history for {}", date_key))?;
        self.store
            .set(&Self::storage_key(date_key), &payload)
            .await
            .with_context(|| format!("writing history for {}", date_key))
    }

    /// `None` when nothing is stored or the stored text is unreadable.
    pub async fn load(&self, date_key: DateKey) -> Result<Option<Vec<GuessRecord>>> {
        let key = Self::storage_key(date_key);
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<GuessRecord>>(&raw) {
            Ok(records) => Ok(Some(records)),
            Err(err) => {
                tracing::warn!("Ignoring corrupt history under '{}': {}", key, err);
                Ok(None)
            }
        }
    }

    pub async fn summary(&self, date_key: DateKey) -> Result<DaySummary> {
        let records = self.load(date_key).await?.unwrap_or_default();
        Ok(DaySession::restore(date_key, records).summary())
    }
}

#[async_trait]
impl GuessHistory for GuessHistoryRepository {
    async fn load(&self, date_key: DateKey) -> Result<Option<Vec<GuessRecord>>> {
        GuessHistoryRepository::load(self, date_key).await
    }

    async fn save(&self, date_key: DateKey, records: &[GuessRecord]) -> Result<()> {
        GuessHistoryRepository::save(self, date_key, records).await
    }
}
