#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use guess_core::{
    GuessHistory, Scorer, ScoringError, SessionEvent, SessionEventHandler, SessionStore,
};
use guess_types::{DateKey, GuessRecord, ScoreOutcome};

/// Day used by most tests
pub fn test_day() -> DateKey {
    DateKey::parse("20250307").unwrap()
}

pub fn other_day() -> DateKey {
    DateKey::parse("20250306").unwrap()
}

/// History kept in a map, with switches to simulate a broken disk
#[derive(Default)]
pub struct MemoryHistory {
    days: Mutex<HashMap<DateKey, Vec<GuessRecord>>>,
    saves: AtomicUsize,
    fail_saves: Mutex<bool>,
    fail_loads: Mutex<bool>,
}

impl MemoryHistory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_day(date_key: DateKey, records: Vec<GuessRecord>) -> Arc<Self> {
        let history = Self::default();
        history.days.lock().unwrap().insert(date_key, records);
        Arc::new(history)
    }

    pub fn stored(&self, date_key: DateKey) -> Option<Vec<GuessRecord>> {
        self.days.lock().unwrap().get(&date_key).cloned()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }

    pub fn set_fail_loads(&self, fail: bool) {
        *self.fail_loads.lock().unwrap() = fail;
    }
}

#[async_trait]
impl GuessHistory for MemoryHistory {
    async fn load(&self, date_key: DateKey) -> Result<Option<Vec<GuessRecord>>> {
        if *self.fail_loads.lock().unwrap() {
            return Err(anyhow!("disk unavailable"));
        }
        Ok(self.stored(date_key))
    }

    async fn save(&self, date_key: DateKey, records: &[GuessRecord]) -> Result<()> {
        if *self.fail_saves.lock().unwrap() {
            return Err(anyhow!("disk full"));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.days.lock().unwrap().insert(date_key, records.to_vec());
        Ok(())
    }
}

/// Scorer answering from a fixed table; unknown words score 0
#[derive(Default)]
pub struct ScriptedScorer {
    answers: HashMap<String, Result<ScoreOutcome, ScoringError>>,
    calls: Mutex<Vec<(String, DateKey)>>,
}

impl ScriptedScorer {
    pub fn new(scores: &[(&str, f64)]) -> Self {
        let answers = scores
            .iter()
            .map(|(word, similarity)| {
                (
                    word.to_string(),
                    Ok(ScoreOutcome::new(*similarity, *similarity == 1.0)),
                )
            })
            .collect();
        Self {
            answers,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, word: &str, error: ScoringError) -> Self {
        self.answers.insert(word.to_string(), Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, DateKey)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Scorer for ScriptedScorer {
    async fn score(&self, word: &str, date_key: DateKey) -> Result<ScoreOutcome, ScoringError> {
        self.calls.lock().unwrap().push((word.to_string(), date_key));
        self.answers
            .get(word)
            .cloned()
            .unwrap_or_else(|| Ok(ScoreOutcome::new(0.0, false)))
    }
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&SessionEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl SessionEventHandler for EventCollector {
    fn handle_event(&mut self, event: SessionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub async fn open_store(history: Arc<MemoryHistory>) -> SessionStore {
    SessionStore::open(history, test_day()).await
}

pub fn words(records: &[GuessRecord]) -> Vec<&str> {
    records.iter().map(|record| record.word.as_str()).collect()
}
