use crate::schema::spot::{Side, Spot};

/// Yards gained by the possessing team between two spots. Positive is toward
/// the opponent's goal line. Missing spots read as no gain; partial operator
/// entry must never poison a calculation.
pub fn yards_gained(from: Option<Spot>, to: Option<Spot>, possession: Side) -> i32 {
	let (Some(from), Some(to)) = (from, to) else {
		return 0;
	};
	let change = i32::from(to.field_position()) - i32::from(from.field_position());
	match possession {
		Side::Home => change,
		Side::Visitor => -change,
	}
}

/// Yards from a spot to the goal line the possessing team is attacking.
/// A missing spot reads as a nominal 10.
pub fn distance_to_goal(spot: Option<Spot>, possession: Side) -> u32 {
	let Some(spot) = spot else {
		return 10;
	};
	let fp = u32::from(spot.field_position());
	match possession {
		Side::Home => 100 - fp,
		Side::Visitor => fp,
	}
}

/// Field-position displacement between two spots, positive toward the visitor
/// goal line. Penalty stats charge the absolute value to the penalized team.
pub fn displacement(from: Option<Spot>, to: Option<Spot>) -> i32 {
	let (Some(from), Some(to)) = (from, to) else {
		return 0;
	};
	i32::from(to.field_position()) - i32::from(from.field_position())
}
