//! Play resolution engine for live football scoring.
//!
//! The crate is split in three layers: [`schema`] holds the field-position
//! and game-situation vocabulary, [`flow`] drives a play from the primary
//! prompt through its stage chain, and [`engine`] turns resolved plays into
//! descriptions and the next game state. Everything here is pure; persistence
//! and backend traffic live in the client crate.

pub mod engine;
pub mod error;
pub mod flow;
pub mod schema;

pub use engine::{apply_play, current_context, describe, next_context};
pub use error::{FlowError, GameClockError, PenaltyError, PlayTypeError, SpotError};
pub use flow::{Advance, FlowContext, Sequencer};
pub use schema::{GameState, PlayLog, PlayRecord, Side, Spot};
