pub mod date_key;
pub mod errors;
pub mod guess;
pub mod messages;
pub mod session;

// Re-export all types
pub use date_key::*;
pub use errors::*;
pub use guess::*;
pub use messages::*;
pub use session::*;
