use std::sync::Arc;

use guess_core::{
    Scorer, SessionError, SessionEvent, SessionEventBus, SessionEventHandler, SessionStore,
};
use guess_persistence::GuessHistoryRepository;
use guess_types::{DateKey, DaySummary, GuessAccepted, SessionSnapshot};
use tokio::sync::Mutex;
use tracing::info;

/// Writes session events to the log.
pub struct TracingEventHandler;

impl SessionEventHandler for TracingEventHandler {
    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Solved {
                date_key,
                word,
                attempt_count,
            } => info!(
                "Solved {} with '{}' after {} guesses",
                date_key, word, attempt_count
            ),
            SessionEvent::GuessRejected {
                date_key,
                word,
                reason,
            } => tracing::debug!("Guess '{}' for {} rejected: {:?}", word, date_key, reason),
            other => tracing::trace!("Session event: {:?}", other),
        }
    }
}

/// Shares one player's session between concurrent requests.
///
/// The store lock is held only around local state changes; the scoring call
/// runs unlocked so other requests are never stuck behind the network.
pub struct SessionManager {
    store: Mutex<SessionStore>,
    history: Arc<GuessHistoryRepository>,
    scorer: Arc<dyn Scorer>,
}

impl SessionManager {
    pub async fn open(
        history: Arc<GuessHistoryRepository>,
        scorer: Arc<dyn Scorer>,
        date_key: DateKey,
    ) -> Self {
        let mut event_bus = SessionEventBus::new();
        event_bus.add_handler(Box::new(TracingEventHandler));
        let store = SessionStore::open_with_events(history.clone(), date_key, event_bus).await;

        Self {
            store: Mutex::new(store),
            history,
            scorer,
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.store.lock().await.snapshot()
    }

    /// Days after today are treated as today, like the date picker's upper bound.
    pub async fn select_date(&self, date_key: DateKey) -> SessionSnapshot {
        let date_key = date_key.clamp_to(DateKey::today());
        let mut store = self.store.lock().await;
        store.select_date(date_key).await.snapshot()
    }

    pub async fn submit_guess(&self, word: &str) -> Result<GuessAccepted, SessionError> {
        let pending = self.store.lock().await.begin_guess(word)?;

        let scored = self.scorer.score(pending.word(), pending.date_key()).await;

        let mut store = self.store.lock().await;
        let record = match scored {
            Ok(outcome) => store.complete_guess(pending, outcome).await?,
            Err(cause) => return Err(store.abandon_guess(pending, cause)),
        };

        Ok(GuessAccepted {
            record,
            snapshot: store.snapshot(),
        })
    }

    /// Summary of any stored day; the active session is left alone.
    pub async fn summary(&self, date_key: DateKey) -> anyhow::Result<DaySummary> {
        self.history.summary(date_key).await
    }
}
