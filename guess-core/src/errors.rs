use guess_types::GuessError;

use crate::ScoringError;

/// Why a guess was not recorded. Every variant leaves the day's history as it was.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("guess must not be empty")]
    InvalidInput,
    #[error("'{word}' has already been guessed for this day")]
    DuplicateGuess { word: String },
    #[error("'{word}' is still being scored")]
    GuessPending { word: String },
    #[error("this day's word has already been found")]
    AlreadySolved,
    #[error("scoring service unavailable: {0}")]
    ScoringUnavailable(#[from] ScoringError),
    #[error("could not save guess history: {0}")]
    PersistenceUnavailable(String),
}

impl From<&SessionError> for GuessError {
    fn from(error: &SessionError) -> Self {
        match error {
            SessionError::InvalidInput => GuessError::InvalidInput,
            SessionError::DuplicateGuess { word } => GuessError::DuplicateGuess { word: word.clone() },
            SessionError::GuessPending { word } => GuessError::GuessPending { word: word.clone() },
            SessionError::AlreadySolved => GuessError::AlreadySolved,
            SessionError::ScoringUnavailable(err) => GuessError::ScoringUnavailable {
                message: err.to_string(),
            },
            SessionError::PersistenceUnavailable(message) => GuessError::PersistenceUnavailable {
                message: message.clone(),
            },
        }
    }
}

impl From<SessionError> for GuessError {
    fn from(error: SessionError) -> Self {
        GuessError::from(&error)
    }
}
