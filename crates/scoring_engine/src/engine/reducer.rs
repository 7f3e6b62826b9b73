use crate::engine::downs::advance_downs;
use crate::engine::enforcement::apply_down_effect;
use crate::engine::yardage::{displacement, distance_to_goal, yards_gained};
use crate::schema::game_clock::{GameClock, Quarter};
use crate::schema::game_state::{Ejection, GamePhase, GameState};
use crate::schema::play::{GameControl, PlayRecord, PlayType, TimeoutParty};
use crate::schema::spot::Spot;

/// Serialize the situation as the backend context string:
/// `possession,down,distance,spot`.
pub fn current_context(state: &GameState) -> String {
	format!("{},{},{},{}", state.possession, state.down, state.distance, state.spot)
}

/// The context string a play leads to, without mutating state. The backend
/// stores both sides of the transition with each play.
pub fn next_context(state: &GameState, play: &PlayRecord) -> String {
	let mut possession = state.possession;
	let mut down = state.down;
	let mut distance = state.distance;
	let spot = play.end_spot.unwrap_or(state.spot);

	match play.play_type {
		Some(PlayType::Kickoff) => {
			possession = play.recovery_team.unwrap_or_else(|| state.possession.flip());
			down = 1;
			distance = 10;
		}
		Some(PlayType::Rush | PlayType::Pass) if play.end_spot.is_some() => {
			let p = advance_downs(state.down, state.distance, state.possession, Some(state.spot), play.end_spot);
			possession = p.possession;
			down = p.down;
			distance = p.distance;
		}
		Some(PlayType::Penalty) if play.enforcement.is_some() => {
			if let Some(enforcement) = &play.enforcement {
				let (d, dist) = apply_down_effect(enforcement, state.down, state.distance);
				down = d;
				distance = dist;
			}
		}
		_ if play.is_turnover => {
			possession = play.recovery_team.unwrap_or_else(|| state.possession.flip());
			down = 1;
			distance = 10;
		}
		_ => {}
	}

	format!("{},{},{},{}", possession, down, distance, spot)
}

/// Advance the game situation by one resolved play. Pure: the caller owns
/// persistence and ordering.
pub fn apply_play(state: &GameState, play: &PlayRecord) -> GameState {
	let mut next = state.clone();

	if let Some(control) = &play.control {
		apply_game_control(&mut next, control);
	}

	// Kickoffs never count as drive plays; they either start a drive or stay
	// pending, and nothing below applies to them.
	if play.play_type == Some(PlayType::Kickoff) {
		if let Some(final_spot) = play.end_spot {
			let receiving = play.recovery_team.unwrap_or_else(|| state.possession.flip());
			next.drive_number = if state.drive_number == 0 { 1 } else { state.drive_number + 1 };
			next.spot = final_spot;
			next.possession = receiving;
			next.down = 1;
			next.distance = 10;
			next.phase = GamePhase::Drive;
			next.drive_start = Some(format!("{} {}, {}", state.quarter, state.clock, final_spot));
			next.drive_plays = 0;
			next.drive_yards = 0;
			next.drive_time = GameClock::zero();
		}

		if play.is_touchback && play.result_code == Some('T') {
			// The touchback is credited to the kicking team.
			let kicking = play.recovery_team.map_or(state.possession, |r| r.flip());
			next.team_stats.get_mut(kicking).touchbacks += 1;
		}

		return next;
	}

	let mut turnover_charged = false;

	match play.play_type {
		Some(PlayType::Rush | PlayType::Pass) => {
			if state.phase == GamePhase::Drive {
				next.drive_plays = state.drive_plays + 1;

				let progression = advance_downs(state.down, state.distance, state.possession, Some(state.spot), play.end_spot);
				next.down = progression.down;
				next.distance = progression.distance;
				if let Some(spot) = progression.spot {
					next.spot = spot;
				}

				if progression.turnover.is_some() {
					next.possession = progression.possession;
					next.phase = GamePhase::ChangeOfPossession;
					*next.turnovers.get_mut(state.possession) += 1;
					turnover_charged = true;
				}

				next.drive_yards = state.drive_yards + yards_gained(Some(state.spot), play.end_spot, state.possession);
			}
		}
		_ => {
			if state.phase == GamePhase::Drive {
				next.drive_plays = state.drive_plays + 1;
			}
		}
	}

	// Punts, field goals, and live-ball turnovers end the drive.
	if play.is_turnover || matches!(play.play_type, Some(PlayType::Punt | PlayType::FieldGoal)) {
		next.phase = GamePhase::ChangeOfPossession;

		if play.is_turnover {
			next.possession = play.recovery_team.unwrap_or_else(|| state.possession.flip());
			next.down = 1;
			next.distance = 10;
			if let Some(spot) = play.end_spot {
				next.spot = spot;
			}
			if !turnover_charged {
				*next.turnovers.get_mut(state.possession) += 1;
			}
		}
	}

	if play.is_sack {
		// Sacks are a defensive stat.
		next.team_stats.get_mut(state.possession.flip()).sacks += 1;
	}

	if play.play_type == Some(PlayType::Penalty) {
		if let (Some(enforcement), Some(new_spot)) = (&play.enforcement, play.end_spot) {
			// Penalty stats track the ball's actual displacement, not the
			// nominal distance, so half-the-distance enforcements charge what
			// was really walked off.
			let walked = displacement(Some(state.spot), Some(new_spot)).unsigned_abs();
			next.spot = new_spot;

			if let Some(team) = play.penalty_team {
				let stats = next.team_stats.get_mut(team);
				stats.penalties += 1;
				stats.penalty_yards += walked;

				if enforcement.player_ejected {
					next.ejections.push(Ejection {
						team,
						player: play.penalized_player.clone(),
						penalty: play.penalty.unwrap_or(crate::schema::penalty::PenaltyCode::PersonalFoul),
						quarter: next.quarter,
						clock: next.clock,
					});
				}
			}
		}
	}

	// Down effects apply whether the penalty rode alone or on another play.
	if let Some(enforcement) = &play.enforcement {
		if enforcement.automatic_first_down {
			next.down = 1;
			next.distance = 10;
		} else if enforcement.loss_of_down {
			next.down = next.down.saturating_add(1).min(4);
		} else {
			reclamp_distance(&mut next);
		}
	} else {
		reclamp_distance(&mut next);
	}

	next
}

/// Distance to gain can never exceed the yards left to the goal line.
fn reclamp_distance(state: &mut GameState) {
	let to_goal = distance_to_goal(Some(state.spot), state.possession);
	state.distance = state.distance.min(to_goal);
}

fn apply_game_control(state: &mut GameState, control: &GameControl) {
	match control {
		GameControl::CoinToss { winner, deferred, receiving } => {
			state.coin_toss = Some(crate::schema::game_state::CoinToss {
				winner: *winner,
				deferred: *deferred,
				receiving: *receiving,
			});
			state.possession = *receiving;
		}
		GameControl::Timeout { party } => match party {
			TimeoutParty::Team(side) => {
				let remaining = state.timeouts.get_mut(*side);
				*remaining = remaining.saturating_sub(1);
			}
			// A challenge burns a timeout only if it fails; the count waits for
			// the ruling, but the flag is spent immediately.
			TimeoutParty::Challenge(side) => {
				*state.challenges_used.get_mut(*side) = true;
			}
			TimeoutParty::Official | TimeoutParty::Media => {}
		},
		GameControl::SetQuarter { quarter } => {
			if let Ok(q) = Quarter::from_number(*quarter) {
				state.quarter = q;
				state.clock = GameClock::start_of_quarter();
			}
		}
		GameControl::EndHalf => {
			state.quarter = Quarter::Second;
			state.clock = GameClock::zero();
		}
		GameControl::NewHalf { receiving } => {
			state.quarter = Quarter::Third;
			state.clock = GameClock::start_of_quarter();
			state.possession = *receiving;
			state.spot = Spot::from_field_position(35);
			state.phase = GamePhase::Kickoff;
			state.timeouts = crate::schema::game_state::TeamPair::both(3);
		}
		GameControl::BallPlacement { spot } => {
			state.spot = *spot;
		}
		GameControl::GameTime { clock } => {
			state.clock = *clock;
		}
		GameControl::Possession { team } => {
			state.possession = *team;
		}
		GameControl::DriveStart { team } => {
			state.possession = *team;
			state.drive_start = Some(format!("{} {}, {}", state.quarter, state.clock, state.spot));
			state.drive_time = GameClock::zero();
			state.phase = GamePhase::Drive;
		}
		GameControl::Uniform { .. } => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::spot::Side;

	fn drive_state() -> GameState {
		let mut state = GameState::default();
		state.phase = GamePhase::Drive;
		state.drive_number = 1;
		state
	}

	fn rush_to(spot: &str) -> PlayRecord {
		PlayRecord {
			play_type: Some(PlayType::Rush),
			result_code: Some('T'),
			end_spot: Spot::parse_opt(spot),
			..PlayRecord::default()
		}
	}

	#[test]
	fn test_rush_advances_downs() {
		let mut state = drive_state();
		state.down = 2;
		state.distance = 8;
		state.spot = "H35".parse().unwrap();

		let next = apply_play(&state, &rush_to("H41"));
		assert_eq!((next.down, next.distance), (3, 2));
		assert_eq!(next.spot.to_string(), "H41");
		assert_eq!(next.possession, Side::Home);
		assert_eq!(next.drive_plays, 1);
		assert_eq!(next.drive_yards, 6);
	}

	#[test]
	fn test_first_down_resets() {
		let mut state = drive_state();
		state.down = 3;
		state.distance = 4;
		state.spot = "H40".parse().unwrap();

		let next = apply_play(&state, &rush_to("H46"));
		assert_eq!((next.down, next.distance), (1, 10));
	}

	#[test]
	fn test_turnover_on_downs() {
		let mut state = drive_state();
		state.down = 4;
		state.distance = 2;
		state.spot = "V40".parse().unwrap();

		let next = apply_play(&state, &rush_to("V41"));
		assert_eq!(next.possession, Side::Visitor);
		assert_eq!((next.down, next.distance), (1, 10));
		assert_eq!(next.phase, GamePhase::ChangeOfPossession);
		assert_eq!(*next.turnovers.get(Side::Home), 1);
	}

	#[test]
	fn test_kickoff_starts_first_drive() {
		let state = GameState::default();
		assert_eq!(state.drive_number, 0);

		let play = PlayRecord {
			play_type: Some(PlayType::Kickoff),
			result_code: Some('R'),
			recovery_team: Some(Side::Visitor),
			end_spot: Spot::parse_opt("V25"),
			..PlayRecord::default()
		};
		let next = apply_play(&state, &play);

		// The opening kickoff starts drive 1, never drive 0 + 1 = 1 by luck:
		// later kickoffs increment from wherever the count stands.
		assert_eq!(next.drive_number, 1);
		assert_eq!(next.possession, Side::Visitor);
		assert_eq!((next.down, next.distance), (1, 10));
		assert_eq!(next.phase, GamePhase::Drive);
		assert_eq!(next.drive_start.as_deref(), Some("Q1 15:00, V25"));
		assert_eq!(next.drive_plays, 0);
		assert_eq!(next.drive_time.to_string(), "0:00");

		let mut mid_game = next.clone();
		mid_game.drive_number = 4;
		let later = apply_play(&mid_game, &play);
		assert_eq!(later.drive_number, 5);
	}

	#[test]
	fn test_kickoff_touchback_stats() {
		let state = GameState::default();
		let play = PlayRecord {
			play_type: Some(PlayType::Kickoff),
			result_code: Some('T'),
			recovery_team: Some(Side::Visitor),
			end_spot: Spot::parse_opt("V20"),
			is_touchback: true,
			..PlayRecord::default()
		};
		let next = apply_play(&state, &play);
		assert_eq!(next.team_stats.get(Side::Home).touchbacks, 1);
		assert_eq!(next.spot.to_string(), "V20");
	}

	#[test]
	fn test_fumble_changes_possession() {
		let mut state = drive_state();
		state.spot = "H40".parse().unwrap();

		let play = PlayRecord {
			play_type: Some(PlayType::Rush),
			result_code: Some('F'),
			terminal_result: Some(crate::schema::play::TerminalResult::Tackle),
			is_turnover: true,
			recovery_team: Some(Side::Visitor),
			fumbled_at: Spot::parse_opt("H42"),
			end_spot: Spot::parse_opt("H42"),
			..PlayRecord::default()
		};
		let next = apply_play(&state, &play);
		assert_eq!(next.possession, Side::Visitor);
		assert_eq!((next.down, next.distance), (1, 10));
		assert_eq!(next.phase, GamePhase::ChangeOfPossession);
		assert_eq!(*next.turnovers.get(Side::Home), 1);
	}

	#[test]
	fn test_punt_ends_drive() {
		let mut state = drive_state();
		state.down = 4;
		state.distance = 12;

		let play = PlayRecord {
			play_type: Some(PlayType::Punt),
			result_code: Some('C'),
			punted_to: Spot::parse_opt("V12"),
			..PlayRecord::default()
		};
		let next = apply_play(&state, &play);
		assert_eq!(next.phase, GamePhase::ChangeOfPossession);
		// Possession flips on the kickoff-like handover recorded separately.
		assert_eq!(next.drive_plays, 1);
	}

	#[test]
	fn test_penalty_enforcement_updates_stats() {
		let mut state = drive_state();
		state.spot = "H35".parse().unwrap();

		let play = PlayRecord {
			play_type: Some(PlayType::Penalty),
			result_code: Some('A'),
			penalty: Some(crate::schema::penalty::PenaltyCode::Offside),
			penalty_team: Some(Side::Visitor),
			enforcement: Some(crate::schema::penalty::Enforcement::default()),
			end_spot: Spot::parse_opt("H40"),
			..PlayRecord::default()
		};
		let next = apply_play(&state, &play);
		assert_eq!(next.spot.to_string(), "H40");
		assert_eq!(next.team_stats.get(Side::Visitor).penalties, 1);
		assert_eq!(next.team_stats.get(Side::Visitor).penalty_yards, 5);
		// Replay of the down: situation otherwise unchanged.
		assert_eq!((next.down, next.distance), (1, 10));
	}

	#[test]
	fn test_penalty_ejection_recorded() {
		let mut state = drive_state();
		state.spot = "H30".parse().unwrap();

		let enforcement = crate::schema::penalty::Enforcement {
			player_ejected: true,
			automatic_first_down: true,
			..crate::schema::penalty::Enforcement::default()
		};

		let play = PlayRecord {
			play_type: Some(PlayType::Penalty),
			result_code: Some('A'),
			penalty: Some(crate::schema::penalty::PenaltyCode::Targeting),
			penalty_team: Some(Side::Visitor),
			penalized_player: "44".to_string(),
			enforcement: Some(enforcement),
			end_spot: Spot::parse_opt("H45"),
			..PlayRecord::default()
		};
		let next = apply_play(&state, &play);
		assert_eq!(next.ejections.len(), 1);
		assert_eq!(next.ejections[0].player, "44");
		assert_eq!((next.down, next.distance), (1, 10));
	}

	#[test]
	fn test_distance_reclamped_near_goal() {
		let mut state = drive_state();
		state.spot = "V4".parse().unwrap();
		state.down = 1;
		state.distance = 10;

		// Any resolved play re-clamps the line to gain to the goal line.
		let next = apply_play(&state, &rush_to("V4"));
		assert!(next.distance <= 4);
	}

	#[test]
	fn test_game_controls() {
		let state = GameState::default();

		let timeout = PlayRecord {
			play_type: Some(PlayType::Game),
			result_code: Some('G'),
			control: Some(GameControl::Timeout {
				party: TimeoutParty::Team(Side::Home),
			}),
			..PlayRecord::default()
		};
		let next = apply_play(&state, &timeout);
		assert_eq!(*next.timeouts.get(Side::Home), 2);

		let new_half = PlayRecord {
			play_type: Some(PlayType::Game),
			result_code: Some('G'),
			control: Some(GameControl::NewHalf { receiving: Side::Home }),
			..PlayRecord::default()
		};
		let next = apply_play(&next, &new_half);
		assert_eq!(next.quarter, Quarter::Third);
		assert_eq!(next.clock.to_string(), "15:00");
		assert_eq!(next.phase, GamePhase::Kickoff);
		assert_eq!(*next.timeouts.get(Side::Home), 3);
	}

	#[test]
	fn test_challenge_timeout_flags_without_deducting() {
		let state = GameState::default();
		let challenge = PlayRecord {
			play_type: Some(PlayType::Game),
			result_code: Some('G'),
			control: Some(GameControl::Timeout {
				party: TimeoutParty::Challenge(Side::Visitor),
			}),
			..PlayRecord::default()
		};
		let next = apply_play(&state, &challenge);
		assert!(*next.challenges_used.get(Side::Visitor));
		assert!(!*next.challenges_used.get(Side::Home));
		// The timeout itself is only charged once the ruling comes back.
		assert_eq!(*next.timeouts.get(Side::Visitor), 3);
	}

	#[test]
	fn test_coin_toss_stored() {
		let state = GameState::default();
		let play = PlayRecord {
			play_type: Some(PlayType::Game),
			result_code: Some('G'),
			control: Some(GameControl::CoinToss {
				winner: Side::Visitor,
				deferred: false,
				receiving: Side::Visitor,
			}),
			..PlayRecord::default()
		};
		let next = apply_play(&state, &play);
		assert_eq!(next.coin_toss.map(|t| t.winner), Some(Side::Visitor));
		assert_eq!(next.possession, Side::Visitor);
	}

	#[test]
	fn test_context_strings() {
		let mut state = drive_state();
		state.down = 2;
		state.distance = 8;
		state.spot = "H35".parse().unwrap();
		assert_eq!(current_context(&state), "H,2,8,H35");

		let next = next_context(&state, &rush_to("H41"));
		assert_eq!(next, "H,3,2,H41");
	}
}
