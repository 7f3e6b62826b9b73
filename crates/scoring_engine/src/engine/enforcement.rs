use crate::schema::penalty::{DownEffect, Enforcement, EnforcementType, PenaltyCode, PenaltyYardage, RuleLevel};
use crate::schema::spot::{Side, Spot};

/// Walk the ball a penalty distance from an enforcement spot. The walk is in
/// side-local yards: toward the penalized team's own goal line when the foul
/// is on the offense, toward the defense's otherwise. Crossing midfield flips
/// the side marker; crossing a goal line reflects back and the final yard is
/// clamped inside the field of play.
pub fn walk_spot(from: Spot, yards: u8, penalty_team: Side, possession: Side) -> Spot {
	let move_forward = penalty_team != possession;
	let mut side = from.side();
	let mut yard = i32::from(from.yard());
	let yards = i32::from(yards);

	if move_forward {
		yard += yards;
		if yard >= 50 {
			side = side.flip();
			yard = 100 - yard;
		}
	} else {
		yard -= yards;
		if yard <= 0 {
			yard = yard.abs();
			side = side.flip();
		}
	}

	// Yard is within 1-99 after the clamp, so construction cannot fail.
	u8::try_from(yard.clamp(1, 99))
		.ok()
		.and_then(|y| Spot::new(side, y).ok())
		.unwrap_or(from)
}

/// Compute the default enforcement for an accepted penalty. Pre-snap fouls
/// enforce from the previous spot; live-ball fouls default to the spot of the
/// foul, seeded at the current spot until the operator corrects it. Every
/// field of the result remains overridable.
pub fn enforce(code: PenaltyCode, penalty_team: Side, level: RuleLevel, possession: Side, current_spot: Spot) -> Enforcement {
	let enforcement_type = if code.is_pre_snap() {
		EnforcementType::PreviousSpot
	} else {
		EnforcementType::SpotOfFoul
	};

	let resulting_spot = match code.yardage(level) {
		PenaltyYardage::Fixed(yards) => walk_spot(current_spot, yards, penalty_team, possession),
		// Spot fouls and loss-of-down sentinels leave the ball where it is
		// until the operator supplies the actual spot.
		PenaltyYardage::SpotOfFoul | PenaltyYardage::LossOfDown => current_spot,
	};

	let effect = code.down_effect(level);
	Enforcement {
		spot_of_foul: Some(current_spot),
		enforcement_spot: Some(current_spot),
		resulting_spot: Some(resulting_spot),
		enforcement_type,
		automatic_first_down: effect == DownEffect::AutomaticFirstDown,
		loss_of_down: effect == DownEffect::LossOfDown,
		player_ejected: false,
	}
}

/// Recompute the resulting spot after the operator edits the enforcement
/// spot.
pub fn reapply(enforcement: &Enforcement, code: PenaltyCode, penalty_team: Side, level: RuleLevel, possession: Side) -> Option<Spot> {
	let from = enforcement.enforcement_spot?;
	Some(match code.yardage(level) {
		PenaltyYardage::Fixed(yards) => walk_spot(from, yards, penalty_team, possession),
		PenaltyYardage::SpotOfFoul | PenaltyYardage::LossOfDown => from,
	})
}

/// Apply an accepted penalty's down effect to the pre-snap down. The snap
/// does not count, so the default is a replay of the down.
pub fn apply_down_effect(enforcement: &Enforcement, down: u8, distance: u32) -> (u8, u32) {
	if enforcement.automatic_first_down {
		(1, 10)
	} else if enforcement.loss_of_down {
		(down.saturating_add(1).min(4), distance)
	} else {
		(down, distance)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn spot(s: &str) -> Spot {
		s.parse().unwrap()
	}

	#[test]
	fn test_walk_spot() {
		let test_cases = vec![
			// (from, yards, penalty_team, possession, expected)
			("H35", 5, Side::Visitor, Side::Home, "H40"), // defensive foul, offense advances
			("H35", 5, Side::Home, Side::Home, "H30"),    // offensive foul, walked back
			("H48", 5, Side::Visitor, Side::Home, "V47"), // crosses midfield
			("H47", 15, Side::Visitor, Side::Home, "V38"),
			("H3", 5, Side::Home, Side::Home, "V2"), // reflected past the goal line
			("H5", 5, Side::Home, Side::Home, "V1"), // lands on the goal line: reflect, then clamp to the 1
			("V30", 10, Side::Home, Side::Visitor, "V40"), // visitor offense advances
		];

		for (from, yards, team, possession, expected) in test_cases {
			assert_eq!(
				walk_spot(spot(from), yards, team, possession),
				spot(expected),
				"Failed for {} +{} (penalty on {:?})",
				from,
				yards,
				team
			);
		}
	}

	#[test]
	fn test_enforce_pre_snap() {
		let e = enforce(PenaltyCode::FalseStart, Side::Home, RuleLevel::HighSchool, Side::Home, spot("H35"));
		assert_eq!(e.enforcement_type, EnforcementType::PreviousSpot);
		assert_eq!(e.resulting_spot, Some(spot("H30")));
		assert!(!e.automatic_first_down);
		assert!(!e.loss_of_down);
	}

	#[test]
	fn test_enforce_live_ball() {
		let e = enforce(PenaltyCode::OffensiveHolding, Side::Home, RuleLevel::HighSchool, Side::Home, spot("H40"));
		assert_eq!(e.enforcement_type, EnforcementType::SpotOfFoul);
		assert_eq!(e.resulting_spot, Some(spot("H30")));
	}

	#[test]
	fn test_enforce_level_down_effects() {
		let hs = enforce(PenaltyCode::Facemask, Side::Visitor, RuleLevel::HighSchool, Side::Home, spot("H30"));
		assert!(!hs.automatic_first_down);

		let ncaa = enforce(PenaltyCode::Facemask, Side::Visitor, RuleLevel::Ncaa, Side::Home, spot("H30"));
		assert!(ncaa.automatic_first_down);

		let ig = enforce(PenaltyCode::IntentionalGrounding, Side::Home, RuleLevel::HighSchool, Side::Home, spot("H30"));
		assert!(ig.loss_of_down);
		// Sentinel yardage leaves the ball for the operator to spot.
		assert_eq!(ig.resulting_spot, Some(spot("H30")));
	}

	#[test]
	fn test_apply_down_effect() {
		let replay = Enforcement::default();
		assert_eq!(apply_down_effect(&replay, 2, 8), (2, 8));

		let auto_first = Enforcement {
			automatic_first_down: true,
			..Enforcement::default()
		};
		assert_eq!(apply_down_effect(&auto_first, 3, 12), (1, 10));

		let loss = Enforcement {
			loss_of_down: true,
			..Enforcement::default()
		};
		assert_eq!(apply_down_effect(&loss, 2, 8), (3, 8));
		assert_eq!(apply_down_effect(&loss, 4, 8), (4, 8));
	}

	#[test]
	fn test_reapply_after_spot_edit() {
		let mut e = enforce(PenaltyCode::OffensiveHolding, Side::Home, RuleLevel::HighSchool, Side::Home, spot("H40"));
		// Operator corrects the enforcement spot to the actual spot of the
		// foul; the resulting spot walks from there.
		e.enforcement_spot = Some(spot("H45"));
		let resulting = reapply(&e, PenaltyCode::OffensiveHolding, Side::Home, RuleLevel::HighSchool, Side::Home);
		assert_eq!(resulting, Some(spot("H35")));
	}
}
