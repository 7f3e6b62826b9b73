pub mod sequencer;
pub mod stage;

pub use sequencer::{Advance, FlowContext, Sequencer};
pub use stage::*;
