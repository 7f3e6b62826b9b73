use crate::schema::game_clock::{GameClock, Quarter};
use crate::schema::penalty::{PenaltyCode, RuleLevel};
use crate::schema::spot::{Side, Spot};
use serde::{Deserialize, Serialize};

/// A home/visitor pair of any per-team value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamPair<T> {
	#[serde(rename = "H")]
	pub home: T,
	#[serde(rename = "V")]
	pub visitor: T,
}

impl<T> TeamPair<T> {
	pub fn new(home: T, visitor: T) -> Self {
		TeamPair { home, visitor }
	}

	pub fn get(&self, side: Side) -> &T {
		match side {
			Side::Home => &self.home,
			Side::Visitor => &self.visitor,
		}
	}

	pub fn get_mut(&mut self, side: Side) -> &mut T {
		match side {
			Side::Home => &mut self.home,
			Side::Visitor => &mut self.visitor,
		}
	}
}

impl<T: Clone> TeamPair<T> {
	pub fn both(value: T) -> Self {
		TeamPair {
			home: value.clone(),
			visitor: value,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
	#[default]
	Kickoff,
	Drive,
	ChangeOfPossession,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttackDirection {
	Left,
	Right,
}

impl AttackDirection {
	pub fn flip(self) -> Self {
		match self {
			AttackDirection::Left => AttackDirection::Right,
			AttackDirection::Right => AttackDirection::Left,
		}
	}
}

/// Aggregate counters kept per team across the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamStats {
	pub penalties: u32,
	pub penalty_yards: u32,
	pub touchbacks: u32,
	pub sacks: u32,
	pub fumbles: u32,
	pub interceptions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ejection {
	pub team: Side,
	pub player: String,
	pub penalty: PenaltyCode,
	pub quarter: Quarter,
	pub clock: GameClock,
}

/// Coin-toss outcome recorded at the start of the game. Kept locally because
/// the backend snapshot does not carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinToss {
	pub winner: Side,
	pub deferred: bool,
	pub receiving: Side,
}

/// Scoring configuration chosen before the game. The rule level drives
/// penalty yardage tables and the touchback spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
	pub level: RuleLevel,
	pub timeouts_per_half: u8,
	pub field_direction_set: bool,
	pub initial_attack_direction: Option<AttackDirection>,
}

impl Default for GameConfig {
	fn default() -> Self {
		GameConfig {
			level: RuleLevel::default(),
			timeouts_per_half: 3,
			field_direction_set: false,
			initial_attack_direction: None,
		}
	}
}

/// The full live game situation the reducer advances play by play.
///
/// `down` is stored raw rather than as a validated newtype: the operator may
/// transiently enter out-of-range values and corrections arrive as ordinary
/// plays. `validate` reports anomalies without refusing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
	pub quarter: Quarter,
	pub clock: GameClock,
	pub possession: Side,
	pub down: u8,
	pub distance: u32,
	pub spot: Spot,
	pub score: TeamPair<u32>,
	pub scores_by_quarter: TeamPair<Vec<u32>>,
	pub timeouts: TeamPair<u8>,
	pub challenges_used: TeamPair<bool>,
	pub team_stats: TeamPair<TeamStats>,
	pub turnovers: TeamPair<u32>,
	pub total_plays: TeamPair<u32>,
	pub total_yards: TeamPair<i32>,
	pub drive_number: u32,
	/// Where and when the current drive began, e.g. `Q1 12:45, H25`.
	pub drive_start: Option<String>,
	pub drive_plays: u32,
	pub drive_yards: i32,
	pub drive_time: GameClock,
	pub phase: GamePhase,
	pub coin_toss: Option<CoinToss>,
	pub attack_direction: Option<AttackDirection>,
	pub ejections: Vec<Ejection>,
}

impl Default for GameState {
	fn default() -> Self {
		GameState {
			quarter: Quarter::First,
			clock: GameClock::start_of_quarter(),
			possession: Side::Home,
			down: 1,
			distance: 10,
			// Opening kickoff spot; replaced once the kick resolves.
			spot: Spot::from_field_position(35),
			score: TeamPair::default(),
			scores_by_quarter: TeamPair::both(vec![0; 4]),
			timeouts: TeamPair::both(3),
			challenges_used: TeamPair::default(),
			team_stats: TeamPair::default(),
			turnovers: TeamPair::default(),
			total_plays: TeamPair::default(),
			total_yards: TeamPair::default(),
			drive_number: 0,
			drive_start: None,
			drive_plays: 0,
			drive_yards: 0,
			drive_time: GameClock::zero(),
			phase: GamePhase::Kickoff,
			coin_toss: None,
			attack_direction: None,
			ejections: Vec::new(),
		}
	}
}

impl GameState {
	pub fn reset() -> Self {
		GameState::default()
	}

	/// Advisory consistency check. Returns human-readable findings; an empty
	/// list means the situation looks legal.
	pub fn validate(&self) -> Vec<String> {
		let mut findings = Vec::new();
		if self.down == 0 || self.down > 4 {
			findings.push(format!("down {} outside 1-4", self.down));
		}
		if self.distance == 0 || self.distance > 99 {
			findings.push(format!("distance {} outside 1-99", self.distance));
		}
		let to_goal = u32::from(match self.possession {
			Side::Home => 100 - self.spot.field_position(),
			Side::Visitor => self.spot.field_position(),
		});
		if self.distance > to_goal {
			findings.push(format!("distance {} exceeds {} yards to the goal line", self.distance, to_goal));
		}
		findings
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_state() {
		let state = GameState::default();
		assert_eq!(state.quarter, Quarter::First);
		assert_eq!(state.clock.to_string(), "15:00");
		assert_eq!(state.possession, Side::Home);
		assert_eq!((state.down, state.distance), (1, 10));
		assert_eq!(state.spot.to_string(), "H35");
		assert_eq!(state.drive_number, 0);
		assert_eq!(state.phase, GamePhase::Kickoff);
		assert_eq!(*state.timeouts.get(Side::Visitor), 3);
		assert_eq!(state.scores_by_quarter.home, vec![0; 4]);
		assert!(!*state.challenges_used.get(Side::Home));
		assert_eq!(state.drive_start, None);
		assert_eq!(state.drive_time.to_string(), "0:00");
		assert!(state.validate().is_empty());
	}

	#[test]
	fn test_validate_flags_anomalies() {
		let state = GameState {
			down: 5,
			distance: 0,
			..GameState::default()
		};
		assert_eq!(state.validate().len(), 2);

		// Distance longer than the field ahead.
		let state = GameState {
			spot: "V4".parse().unwrap(),
			distance: 10,
			..GameState::default()
		};
		assert_eq!(state.validate().len(), 1);
	}

	#[test]
	fn test_team_pair_access() {
		let mut pair = TeamPair::new(10u32, 20u32);
		assert_eq!(*pair.get(Side::Home), 10);
		*pair.get_mut(Side::Visitor) += 5;
		assert_eq!(pair.visitor, 25);
	}
}
