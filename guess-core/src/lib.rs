pub mod day_session;
pub mod errors;
pub mod history;
pub mod ranking;
pub mod scorer;
pub mod session;
pub mod session_events;
pub mod word_validation;

// Re-export main components
pub use day_session::*;
pub use errors::*;
pub use history::*;
pub use ranking::*;
pub use scorer::*;
pub use session::*;
pub use session_events::*;
pub use word_validation::*;
