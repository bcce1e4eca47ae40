use guess_types::{DateKey, DaySummary, GuessRecord, SessionSnapshot};

use crate::{dedup_words, next_timestamp, rank_records};

/// The guesses for one calendar day.
///
/// Records are only reachable through methods that keep them ranked, so the
/// list is always ordered by similarity (best first, ties by arrival).
#[derive(Debug, Clone, PartialEq)]
pub struct DaySession {
    date_key: DateKey,
    records: Vec<GuessRecord>,
}

impl DaySession {
    pub fn empty(date_key: DateKey) -> Self {
        Self {
            date_key,
            records: Vec::new(),
        }
    }

    /// Rebuilds a session from stored records, repairing order and repeats.
    pub fn restore(date_key: DateKey, records: Vec<GuessRecord>) -> Self {
        let mut records = dedup_words(records);
        rank_records(&mut records);
        Self { date_key, records }
    }

    pub fn date_key(&self) -> DateKey {
        self.date_key
    }

    pub fn records(&self) -> &[GuessRecord] {
        &self.records
    }

    pub fn solved(&self) -> bool {
        self.records.iter().any(GuessRecord::is_exact)
    }

    pub fn attempt_count(&self) -> usize {
        self.records.len()
    }

    pub fn best_similarity(&self) -> Option<f64> {
        self.records.first().map(|record| record.similarity)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.records.iter().any(|record| record.word == word)
    }

    /// Builds the record for a freshly scored word without touching the session.
    pub fn new_record(&self, word: &str, similarity: f64, now_millis: i64) -> GuessRecord {
        GuessRecord::new(word, similarity, next_timestamp(&self.records, now_millis))
    }

    /// The ranked list this session would hold after appending `record`.
    pub fn with_record(&self, record: GuessRecord) -> Vec<GuessRecord> {
        let mut records = self.records.clone();
        records.push(record);
        rank_records(&mut records);
        records
    }

    /// Replaces the list with one produced by `with_record` on this session.
    pub(crate) fn commit(&mut self, records: Vec<GuessRecord>) {
        debug_assert!(records.len() == self.records.len() + 1);
        self.records = records;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            date_key: self.date_key,
            records: self.records.clone(),
            attempt_count: self.records.len() as u32,
            solved: self.solved(),
            is_today: self.date_key.is_today(),
            best_similarity: self.best_similarity(),
        }
    }

    pub fn summary(&self) -> DaySummary {
        DaySummary::from_records(self.date_key, &self.records)
    }
}
