use crate::engine::yardage::{distance_to_goal, yards_gained};
use crate::schema::play::TurnoverKind;
use crate::schema::spot::{Side, Spot};
use std::fmt;

/// The down-and-distance situation after a scrimmage play resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
	pub down: u8,
	pub distance: u32,
	pub spot: Option<Spot>,
	pub possession: Side,
	pub turnover: Option<TurnoverKind>,
}

/// Scoreboard distance display: a yard count, or goal-to-go when the line to
/// gain sits in the end zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToGo {
	Yards(u32),
	Goal,
}

impl fmt::Display for ToGo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ToGo::Yards(n) => write!(f, "{}", n),
			ToGo::Goal => write!(f, "Goal"),
		}
	}
}

/// Goal-to-go applies when fewer yards remain to the goal line than to the
/// line to gain.
pub fn to_go(distance: u32, spot: Option<Spot>, possession: Side) -> ToGo {
	if distance_to_goal(spot, possession) < distance {
		ToGo::Goal
	} else {
		ToGo::Yards(distance)
	}
}

/// Advance down and distance from the pre-snap situation to where the ball
/// was spotted. Reaching the line to gain resets to 1st and 10; failing on
/// 4th down turns the ball over.
pub fn advance_downs(down: u8, distance: u32, possession: Side, prior_spot: Option<Spot>, new_spot: Option<Spot>) -> Progression {
	let spot = new_spot.or(prior_spot);

	// Without both spots there is nothing to measure; hold the situation.
	let (Some(prior), Some(end)) = (prior_spot, new_spot) else {
		return Progression {
			down,
			distance,
			spot,
			possession,
			turnover: None,
		};
	};

	let gained = yards_gained(Some(prior), Some(end), possession);
	if gained >= 0 && gained.unsigned_abs() >= distance {
		return Progression {
			down: 1,
			distance: 10,
			spot,
			possession,
			turnover: None,
		};
	}

	let next_down = down + 1;
	if next_down > 4 {
		return Progression {
			down: 1,
			distance: 10,
			spot,
			possession: possession.flip(),
			turnover: Some(TurnoverKind::Downs),
		};
	}

	let remaining = i64::from(distance) - i64::from(gained);
	Progression {
		down: next_down,
		distance: u32::try_from(remaining.max(0)).unwrap_or(0),
		spot,
		possession,
		turnover: None,
	}
}
