use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Advisory error shown to the player. None of these reset the day's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GuessError {
    InvalidInput,
    DuplicateGuess { word: String },
    GuessPending { word: String },
    AlreadySolved,
    ScoringUnavailable { message: String },
    PersistenceUnavailable { message: String },
    InvalidDate { input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Severity {
    Warning,
    Error,
}

impl GuessError {
    pub fn severity(&self) -> Severity {
        match self {
            GuessError::ScoringUnavailable { .. } | GuessError::PersistenceUnavailable { .. } => {
                Severity::Error
            }
            _ => Severity::Warning,
        }
    }

    /// Whether submitting the same word again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GuessError::ScoringUnavailable { .. }
                | GuessError::PersistenceUnavailable { .. }
                | GuessError::GuessPending { .. }
        )
    }
}
