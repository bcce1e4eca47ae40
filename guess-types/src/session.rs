use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{DateKey, GuessRecord};

/// Read-only view of the active day handed to the UI after every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSnapshot {
    #[ts(type = "string")]
    pub date_key: DateKey,
    pub records: Vec<GuessRecord>, // Best similarity first
    pub attempt_count: u32,
    pub solved: bool,
    pub is_today: bool,
    pub best_similarity: Option<f64>,
}

/// Totals for a stored day, computed without making it the active day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DaySummary {
    #[ts(type = "string")]
    pub date_key: DateKey,
    pub attempt_count: u32,
    pub solved: bool,
    pub best_similarity: Option<f64>,
}

impl DaySummary {
    pub fn from_records(date_key: DateKey, records: &[GuessRecord]) -> Self {
        Self {
            date_key,
            attempt_count: records.len() as u32,
            solved: records.iter().any(GuessRecord::is_exact),
            best_similarity: records
                .iter()
                .map(|record| record.similarity)
                .max_by(f64::total_cmp),
        }
    }
}
