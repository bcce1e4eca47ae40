use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use guess_types::{DateKey, GuessError, GuessRecord, ScoreOutcome, SessionSnapshot};
use tracing::{debug, error, info, warn};

use crate::{
    validate_guess, DaySession, GuessHistory, Scorer, ScoringError, SessionError, SessionEvent,
    SessionEventBus,
};

type InFlight = Arc<Mutex<HashSet<(DateKey, String)>>>;

fn lock_in_flight(
    in_flight: &Mutex<HashSet<(DateKey, String)>>,
) -> MutexGuard<'_, HashSet<(DateKey, String)>> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A guess that passed every local check and is waiting for its score.
///
/// Hand it back through `complete_guess` or `abandon_guess`. The word stays
/// reserved for its day until this value is dropped, including when the
/// future holding it is cancelled mid-score.
#[derive(Debug)]
pub struct PendingGuess {
    date_key: DateKey,
    word: String,
    in_flight: InFlight,
}

impl PendingGuess {
    pub fn date_key(&self) -> DateKey {
        self.date_key
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    fn key(&self) -> (DateKey, String) {
        (self.date_key, self.word.clone())
    }
}

impl Drop for PendingGuess {
    fn drop(&mut self) {
        lock_in_flight(&self.in_flight).remove(&self.key());
    }
}

/// Authoritative state for the day the player is looking at.
pub struct SessionStore {
    history: Arc<dyn GuessHistory>,
    active: DaySession,
    in_flight: InFlight,
    event_bus: SessionEventBus,
}

impl SessionStore {
    /// Creates a store with `date_key` already selected.
    pub async fn open(history: Arc<dyn GuessHistory>, date_key: DateKey) -> Self {
        Self::open_with_events(history, date_key, SessionEventBus::new()).await
    }

    pub async fn open_with_events(
        history: Arc<dyn GuessHistory>,
        date_key: DateKey,
        event_bus: SessionEventBus,
    ) -> Self {
        let mut store = Self {
            history,
            active: DaySession::empty(date_key),
            in_flight: Arc::default(),
            event_bus,
        };
        store.select_date(date_key).await;
        store
    }

    pub fn event_bus_mut(&mut self) -> &mut SessionEventBus {
        &mut self.event_bus
    }

    /// Makes `date_key` the active day. Never fails: a day with no readable
    /// history starts empty.
    pub async fn select_date(&mut self, date_key: DateKey) -> &DaySession {
        let session = match load_day(self.history.as_ref(), date_key).await {
            Ok(session) => session,
            Err(err) => {
                warn!("Could not read history for {}, starting empty: {:#}", date_key, err);
                DaySession::empty(date_key)
            }
        };

        info!(
            "Selected {} with {} guesses (solved: {})",
            date_key,
            session.attempt_count(),
            session.solved()
        );
        self.event_bus.publish(SessionEvent::DateSelected {
            date_key,
            attempt_count: session.attempt_count(),
            solved: session.solved(),
        });

        self.active = session;
        &self.active
    }

    pub fn session(&self) -> &DaySession {
        &self.active
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.active.snapshot()
    }

    pub fn is_pending(&self, word: &str) -> bool {
        lock_in_flight(&self.in_flight).contains(&(self.active.date_key(), word.to_string()))
    }

    /// Runs every local check and reserves the word for scoring.
    pub fn begin_guess(&mut self, word: &str) -> Result<PendingGuess, SessionError> {
        if let Err(err) = self.check_guess(word) {
            debug!("Rejected guess '{}' for {}: {}", word, self.active.date_key(), err);
            self.publish_rejection(self.active.date_key(), word, &err);
            return Err(err);
        }

        let pending = PendingGuess {
            date_key: self.active.date_key(),
            word: word.to_string(),
            in_flight: self.in_flight.clone(),
        };
        lock_in_flight(&self.in_flight).insert(pending.key());
        Ok(pending)
    }

    fn check_guess(&self, word: &str) -> Result<(), SessionError> {
        validate_guess(word)?;

        if self.active.contains_word(word) {
            return Err(SessionError::DuplicateGuess {
                word: word.to_string(),
            });
        }

        if self.is_pending(word) {
            return Err(SessionError::GuessPending {
                word: word.to_string(),
            });
        }

        if self.active.solved() {
            return Err(SessionError::AlreadySolved);
        }

        Ok(())
    }

    /// Releases a reservation after the scoring call failed. Nothing is recorded.
    pub fn abandon_guess(&mut self, pending: PendingGuess, cause: ScoringError) -> SessionError {
        warn!(
            "Scoring '{}' for {} failed: {}",
            pending.word, pending.date_key, cause
        );

        let err = SessionError::ScoringUnavailable(cause);
        self.publish_rejection(pending.date_key, &pending.word, &err);
        err
    }

    /// Folds a scored guess into its day, re-ranks, persists, then commits.
    ///
    /// If the player switched days while the score was pending, the record is
    /// written to that earlier day's stored history instead.
    pub async fn complete_guess(
        &mut self,
        pending: PendingGuess,
        outcome: ScoreOutcome,
    ) -> Result<GuessRecord, SessionError> {
        let now = chrono::Utc::now().timestamp_millis();

        if pending.date_key != self.active.date_key() {
            return self.complete_for_inactive_day(pending, outcome, now).await;
        }

        if self.active.contains_word(&pending.word) {
            return Err(SessionError::DuplicateGuess {
                word: pending.word.clone(),
            });
        }

        let record = self.active.new_record(&pending.word, outcome.similarity, now);
        let records = self.active.with_record(record.clone());
        persist(self.history.as_ref(), pending.date_key, &records).await?;
        self.active.commit(records);

        publish_recorded(&mut self.event_bus, &self.active, &record);
        Ok(record)
    }

    async fn complete_for_inactive_day(
        &mut self,
        pending: PendingGuess,
        outcome: ScoreOutcome,
        now: i64,
    ) -> Result<GuessRecord, SessionError> {
        let day = load_day(self.history.as_ref(), pending.date_key)
            .await
            .map_err(|err| {
                error!("Could not read history for {}: {:#}", pending.date_key, err);
                SessionError::PersistenceUnavailable(err.to_string())
            })?;

        if day.contains_word(&pending.word) {
            return Err(SessionError::DuplicateGuess {
                word: pending.word.clone(),
            });
        }

        let record = day.new_record(&pending.word, outcome.similarity, now);
        let records = day.with_record(record.clone());
        persist(self.history.as_ref(), pending.date_key, &records).await?;

        info!(
            "Recorded '{}' for {} after the player moved to {}",
            record.word,
            pending.date_key,
            self.active.date_key()
        );
        let updated = DaySession::restore(pending.date_key, records);
        publish_recorded(&mut self.event_bus, &updated, &record);
        Ok(record)
    }

    /// Checks, scores and records one guess end to end.
    pub async fn submit_guess(
        &mut self,
        word: &str,
        scorer: &dyn Scorer,
    ) -> Result<GuessRecord, SessionError> {
        let pending = self.begin_guess(word)?;

        match scorer.score(pending.word(), pending.date_key()).await {
            Ok(outcome) => self.complete_guess(pending, outcome).await,
            Err(cause) => Err(self.abandon_guess(pending, cause)),
        }
    }

    fn publish_rejection(&mut self, date_key: DateKey, word: &str, err: &SessionError) {
        self.event_bus.publish(SessionEvent::GuessRejected {
            date_key,
            word: word.to_string(),
            reason: GuessError::from(err),
        });
    }
}

fn publish_recorded(event_bus: &mut SessionEventBus, day: &DaySession, record: &GuessRecord) {
    let rank = day
        .records()
        .iter()
        .position(|r| r.word == record.word)
        .map(|index| index + 1)
        .unwrap_or(day.attempt_count());

    info!(
        "Recorded '{}' for {} at {} (rank {} of {})",
        record.word,
        day.date_key(),
        record.percent_label(),
        rank,
        day.attempt_count()
    );
    event_bus.publish(SessionEvent::GuessRecorded {
        date_key: day.date_key(),
        record: record.clone(),
        rank,
    });

    if record.is_exact() {
        event_bus.publish(SessionEvent::Solved {
            date_key: day.date_key(),
            word: record.word.clone(),
            attempt_count: day.attempt_count(),
        });
    }
}

async fn load_day(history: &dyn GuessHistory, date_key: DateKey) -> Result<DaySession> {
    let session = match history.load(date_key).await? {
        Some(records) => DaySession::restore(date_key, records),
        None => DaySession::empty(date_key),
    };
    Ok(session)
}

async fn persist(
    history: &dyn GuessHistory,
    date_key: DateKey,
    records: &[GuessRecord],
) -> Result<(), SessionError> {
    history.save(date_key, records).await.map_err(|err| {
        error!("Failed to save history for {}: {:#}", date_key, err);
        SessionError::PersistenceUnavailable(err.to_string())
    })
}
