use guess_types::{DateKey, GuessError, GuessRecord};

#[derive(Debug, Clone)]
pub enum SessionEvent {
    DateSelected {
        date_key: DateKey,
        attempt_count: usize,
        solved: bool,
    },
    GuessRecorded {
        date_key: DateKey,
        record: GuessRecord,
        rank: usize,
    },
    GuessRejected {
        date_key: DateKey,
        word: String,
        reason: GuessError,
    },
    Solved {
        date_key: DateKey,
        word: String,
        attempt_count: usize,
    },
}

impl SessionEvent {
    pub fn date_key(&self) -> DateKey {
        match self {
            SessionEvent::DateSelected { date_key, .. } => *date_key,
            SessionEvent::GuessRecorded { date_key, .. } => *date_key,
            SessionEvent::GuessRejected { date_key, .. } => *date_key,
            SessionEvent::Solved { date_key, .. } => *date_key,
        }
    }
}

/// Receives every event the session store publishes, in order.
pub trait SessionEventHandler: Send + Sync {
    fn handle_event(&mut self, event: SessionEvent);
}

/// Fans each session event out to the registered handlers.
pub struct SessionEventBus {
    handlers: Vec<Box<dyn SessionEventHandler>>,
}

impl SessionEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn SessionEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: SessionEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for SessionEventBus {
    fn default() -> Self {
        Self::new()
    }
}
