use async_trait::async_trait;
use guess_types::{DateKey, ScoreOutcome};

/// Transport or parse failure while asking for a score.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("scoring service returned status {0}")]
    Status(u16),
    #[error("malformed scoring response: {0}")]
    Malformed(String),
}

/// The external service that compares a guess with the day's hidden word.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, word: &str, date_key: DateKey) -> Result<ScoreOutcome, ScoringError>;
}
