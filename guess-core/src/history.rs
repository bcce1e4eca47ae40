use anyhow::Result;
use async_trait::async_trait;
use guess_types::{DateKey, GuessRecord};

/// Durable per-day guess lists.
///
/// `load` returns `Ok(None)` both for a day never played and for a stored
/// value that no longer parses. Implementations never rank or dedup.
#[async_trait]
pub trait GuessHistory: Send + Sync {
    async fn load(&self, date_key: DateKey) -> Result<Option<Vec<GuessRecord>>>;

    async fn save(&self, date_key: DateKey, records: &[GuessRecord]) -> Result<()>;
}
