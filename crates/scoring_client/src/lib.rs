//! Async session layer over the scoring engine: a backend trait for the
//! game server, optimistic local scoring with offline fallback, and edit
//! lock upkeep.

pub mod backend;
pub mod error;
pub mod session;

pub use backend::{GameBackend, GameSnapshot, PlaySubmission};
pub use error::BackendError;
pub use session::{GameSession, LOCK_REFRESH_INTERVAL};
