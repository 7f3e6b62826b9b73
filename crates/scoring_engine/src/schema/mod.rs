pub mod game_clock;
pub mod game_state;
pub mod penalty;
pub mod play;
pub mod spot;

pub use game_clock::*;
pub use game_state::*;
pub use penalty::*;
pub use play::*;
pub use spot::*;
