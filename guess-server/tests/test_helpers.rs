#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use guess_core::{Scorer, ScoringError};
use guess_persistence::{GuessHistoryRepository, MemoryStore};
use guess_server::session_manager::SessionManager;
use guess_types::{DateKey, ScoreOutcome};
use tokio::sync::Notify;

/// Scorer answering from a fixed table; unknown words score 0
pub struct TableScorer {
    scores: HashMap<String, f64>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl TableScorer {
    pub fn new(scores: &[(&str, f64)]) -> Self {
        Self {
            scores: scores.iter().map(|(w, s)| (w.to_string(), *s)).collect(),
            unavailable: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            scores: HashMap::new(),
            unavailable: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Scorer for TableScorer {
    async fn score(&self, word: &str, _date_key: DateKey) -> Result<ScoreOutcome, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(ScoringError::Status(503));
        }
        let similarity = self.scores.get(word).copied().unwrap_or(0.0);
        Ok(ScoreOutcome::new(similarity, similarity == 1.0))
    }
}

/// Scorer that parks every call until the test releases it
#[derive(Clone, Default)]
pub struct GatedScorer {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[async_trait]
impl Scorer for GatedScorer {
    async fn score(&self, _word: &str, _date_key: DateKey) -> Result<ScoreOutcome, ScoringError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(ScoreOutcome::new(0.5, false))
    }
}

pub struct TestSetup {
    pub store: Arc<MemoryStore>,
    pub history: Arc<GuessHistoryRepository>,
    pub session_manager: Arc<SessionManager>,
}

impl TestSetup {
    pub async fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self::on_day(scorer, DateKey::today()).await
    }

    pub async fn on_day(scorer: Arc<dyn Scorer>, date_key: DateKey) -> Self {
        let store = Arc::new(MemoryStore::new());
        let history = Arc::new(GuessHistoryRepository::new(store.clone()));
        let session_manager = Arc::new(SessionManager::open(history.clone(), scorer, date_key).await);
        Self {
            store,
            history,
            session_manager,
        }
    }
}
