use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GuessError, GuessRecord, SessionSnapshot, Severity};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectDateRequest {
    pub date: String, // YYYY-MM-DD or YYYYMMDD
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitGuessRequest {
    pub word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessAccepted {
    pub record: GuessRecord,
    pub snapshot: SessionSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: GuessError,
    pub severity: Severity,
    pub retryable: bool,
}

impl From<GuessError> for ErrorResponse {
    fn from(error: GuessError) -> Self {
        Self {
            severity: error.severity(),
            retryable: error.is_retryable(),
            error,
        }
    }
}
