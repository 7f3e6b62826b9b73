pub mod describe;
pub mod downs;
pub mod enforcement;
pub mod reducer;
pub mod yardage;

pub use describe::describe;
pub use downs::{advance_downs, to_go, Progression, ToGo};
pub use enforcement::{apply_down_effect, enforce, reapply, walk_spot};
pub use reducer::{apply_play, current_context, next_context};
pub use yardage::{displacement, distance_to_goal, yards_gained};
