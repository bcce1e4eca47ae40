pub mod connection;
pub mod entities;
pub mod history;
pub mod store;

pub use history::{GuessHistoryRepository, HISTORY_KEY_PREFIX};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
