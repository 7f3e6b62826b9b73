use crate::error::PlayTypeError;
use crate::schema::game_clock::GameClock;
use crate::schema::penalty::{Enforcement, PenaltyCode};
use crate::schema::spot::{Side, Spot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
	Rush,
	Pass,
	Punt,
	Kickoff,
	FieldGoal,
	Penalty,
	Game,
}

impl PlayType {
	pub const fn as_str(self) -> &'static str {
		match self {
			PlayType::Rush => "rush",
			PlayType::Pass => "pass",
			PlayType::Punt => "punt",
			PlayType::Kickoff => "kickoff",
			PlayType::FieldGoal => "field_goal",
			PlayType::Penalty => "penalty",
			PlayType::Game => "game",
		}
	}
}

impl FromStr for PlayType {
	type Err = PlayTypeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"rush" => Ok(PlayType::Rush),
			"pass" => Ok(PlayType::Pass),
			"punt" => Ok(PlayType::Punt),
			"kickoff" => Ok(PlayType::Kickoff),
			"field_goal" => Ok(PlayType::FieldGoal),
			"penalty" => Ok(PlayType::Penalty),
			"game" => Ok(PlayType::Game),
			_ => Err(PlayTypeError::unknown_play_type(s)),
		}
	}
}

impl fmt::Display for PlayType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RushResult {
	Tackle,
	Fumble,
	OutOfBounds,
	EndOfPlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassResult {
	Complete,
	Incomplete,
	Sack,
	Fumble,
	Intercepted,
	Scramble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuntResult {
	Returned,
	Downed,
	FairCatch,
	OutOfBounds,
	Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KickoffResult {
	Returned,
	OutOfBounds,
	Touchback,
	FairCatch,
	Downed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGoalResult {
	Good,
	NoGood,
	Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyResult {
	Accepted,
	Declined,
	Offsetting,
}

/// The outcome entered at the first prompt of a play. Each play type has its
/// own single-character result alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "result")]
pub enum PrimaryResult {
	Rush(RushResult),
	Pass(PassResult),
	Punt(PuntResult),
	Kickoff(KickoffResult),
	FieldGoal(FieldGoalResult),
	Penalty(PenaltyResult),
	Game,
}

impl PrimaryResult {
	pub const fn code(self) -> char {
		match self {
			PrimaryResult::Rush(r) => match r {
				RushResult::Tackle => 'T',
				RushResult::Fumble => 'F',
				RushResult::OutOfBounds => 'O',
				RushResult::EndOfPlay => '.',
			},
			PrimaryResult::Pass(r) => match r {
				PassResult::Complete => 'C',
				PassResult::Incomplete => 'I',
				PassResult::Sack => 'S',
				PassResult::Fumble => 'F',
				PassResult::Intercepted => 'X',
				PassResult::Scramble => 'R',
			},
			PrimaryResult::Punt(r) => match r {
				PuntResult::Returned => 'R',
				PuntResult::Downed => 'D',
				PuntResult::FairCatch => 'C',
				PuntResult::OutOfBounds => 'O',
				PuntResult::Blocked => 'B',
			},
			PrimaryResult::Kickoff(r) => match r {
				KickoffResult::Returned => 'R',
				KickoffResult::OutOfBounds => 'O',
				KickoffResult::Touchback => 'T',
				KickoffResult::FairCatch => 'C',
				KickoffResult::Downed => 'D',
			},
			PrimaryResult::FieldGoal(r) => match r {
				FieldGoalResult::Good => 'G',
				FieldGoalResult::NoGood => 'N',
				FieldGoalResult::Blocked => 'B',
			},
			PrimaryResult::Penalty(r) => match r {
				PenaltyResult::Accepted => 'A',
				PenaltyResult::Declined => 'D',
				PenaltyResult::Offsetting => 'O',
			},
			PrimaryResult::Game => 'G',
		}
	}

	/// Decode a result character against a play type's alphabet. Characters
	/// outside the alphabet are simply not a result, never an error.
	pub fn parse(play_type: PlayType, code: char) -> Option<Self> {
		let code = code.to_ascii_uppercase();
		match play_type {
			PlayType::Rush => match code {
				'T' => Some(PrimaryResult::Rush(RushResult::Tackle)),
				'F' => Some(PrimaryResult::Rush(RushResult::Fumble)),
				'O' => Some(PrimaryResult::Rush(RushResult::OutOfBounds)),
				'.' => Some(PrimaryResult::Rush(RushResult::EndOfPlay)),
				_ => None,
			},
			PlayType::Pass => match code {
				'C' => Some(PrimaryResult::Pass(PassResult::Complete)),
				'I' => Some(PrimaryResult::Pass(PassResult::Incomplete)),
				'S' => Some(PrimaryResult::Pass(PassResult::Sack)),
				'F' => Some(PrimaryResult::Pass(PassResult::Fumble)),
				'X' => Some(PrimaryResult::Pass(PassResult::Intercepted)),
				'R' => Some(PrimaryResult::Pass(PassResult::Scramble)),
				_ => None,
			},
			PlayType::Punt => match code {
				'R' => Some(PrimaryResult::Punt(PuntResult::Returned)),
				'D' => Some(PrimaryResult::Punt(PuntResult::Downed)),
				'C' => Some(PrimaryResult::Punt(PuntResult::FairCatch)),
				'O' => Some(PrimaryResult::Punt(PuntResult::OutOfBounds)),
				'B' => Some(PrimaryResult::Punt(PuntResult::Blocked)),
				_ => None,
			},
			PlayType::Kickoff => match code {
				'R' => Some(PrimaryResult::Kickoff(KickoffResult::Returned)),
				'O' => Some(PrimaryResult::Kickoff(KickoffResult::OutOfBounds)),
				'T' => Some(PrimaryResult::Kickoff(KickoffResult::Touchback)),
				'C' => Some(PrimaryResult::Kickoff(KickoffResult::FairCatch)),
				'D' => Some(PrimaryResult::Kickoff(KickoffResult::Downed)),
				_ => None,
			},
			PlayType::FieldGoal => match code {
				'G' => Some(PrimaryResult::FieldGoal(FieldGoalResult::Good)),
				'N' => Some(PrimaryResult::FieldGoal(FieldGoalResult::NoGood)),
				'B' => Some(PrimaryResult::FieldGoal(FieldGoalResult::Blocked)),
				_ => None,
			},
			PlayType::Penalty => match code {
				'A' => Some(PrimaryResult::Penalty(PenaltyResult::Accepted)),
				'D' => Some(PrimaryResult::Penalty(PenaltyResult::Declined)),
				'O' => Some(PrimaryResult::Penalty(PenaltyResult::Offsetting)),
				_ => None,
			},
			PlayType::Game => match code {
				'G' => Some(PrimaryResult::Game),
				_ => None,
			},
		}
	}
}

/// How a live-ball chain actually ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalResult {
	Tackle,
	OutOfBounds,
	EndOfPlay,
}

impl TerminalResult {
	pub const fn code(self) -> char {
		match self {
			TerminalResult::Tackle => 'T',
			TerminalResult::OutOfBounds => 'O',
			TerminalResult::EndOfPlay => '.',
		}
	}

	pub fn parse(code: char) -> Option<Self> {
		match code.to_ascii_uppercase() {
			'T' => Some(TerminalResult::Tackle),
			'O' => Some(TerminalResult::OutOfBounds),
			'.' => Some(TerminalResult::EndOfPlay),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnoverKind {
	Downs,
	Fumble,
	Interception,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutParty {
	Team(Side),
	Challenge(Side),
	Official,
	Media,
}

/// Administrative actions entered as `game` plays. These mutate game state
/// without a snap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum GameControl {
	CoinToss {
		winner: Side,
		deferred: bool,
		receiving: Side,
	},
	Timeout {
		party: TimeoutParty,
	},
	SetQuarter {
		quarter: u8,
	},
	EndHalf,
	NewHalf {
		receiving: Side,
	},
	Uniform {
		team: Side,
		note: String,
	},
	BallPlacement {
		spot: Spot,
	},
	GameTime {
		clock: GameClock,
	},
	Possession {
		team: Side,
	},
	DriveStart {
		team: Side,
	},
}

/// The flattened record of one resolved play, assembled by merging a
/// completed stage chain. Optional fields stay empty for play types they do
/// not apply to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayRecord {
	pub play_type: Option<PlayType>,
	pub result_code: Option<char>,
	pub terminal_result: Option<TerminalResult>,

	// Participants, as entered (jersey numbers or names).
	pub carrier: String,
	pub passer: String,
	pub receiver: String,
	pub kicker: String,
	pub returner: String,
	pub tackler: String,
	pub assist_tackler: String,
	pub forced_by: String,
	pub recovered_by: String,
	pub intercepted_by: String,
	pub downed_by: String,
	pub sacker: String,
	pub assist_sacker: String,

	pub recovery_team: Option<Side>,

	// Spots along the play.
	pub start_spot: Option<Spot>,
	pub kicked_to: Option<Spot>,
	pub punted_to: Option<Spot>,
	pub caught_at: Option<Spot>,
	pub fumbled_at: Option<Spot>,
	pub recovered_at: Option<Spot>,
	pub end_spot: Option<Spot>,

	pub yards: i32,
	pub sack_yards: i32,
	pub fg_distance: Option<u32>,

	pub is_turnover: bool,
	pub is_sack: bool,
	pub is_sack_fumble: bool,
	pub is_scramble: bool,
	pub is_touchback: bool,
	pub is_automatic_touchback: bool,
	pub return_attempted: bool,

	// How an incomplete pass fell incomplete.
	pub dropped: bool,
	pub broken_up: bool,
	pub broken_up_by: String,
	pub overthrown: bool,
	pub thrown_away: bool,

	pub penalty: Option<PenaltyCode>,
	pub penalty_team: Option<Side>,
	pub penalized_player: String,
	pub enforcement: Option<Enforcement>,

	pub control: Option<GameControl>,
}

impl PlayRecord {
	pub fn turnover_kind(&self) -> Option<TurnoverKind> {
		if !self.is_turnover {
			return None;
		}
		match self.result_code {
			Some('X') => Some(TurnoverKind::Interception),
			_ if self.fumbled_at.is_some() || self.is_sack_fumble => Some(TurnoverKind::Fumble),
			_ => Some(TurnoverKind::Downs),
		}
	}
}

/// One line of the scoring log. Entry numbers are issued by the log and never
/// reused, so a replaced play keeps its slot distinct from its successor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayLogEntry {
	pub number: u32,
	pub play: PlayRecord,
	pub description: String,
	pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayLog {
	entries: Vec<PlayLogEntry>,
	next_number: u32,
}

impl PlayLog {
	pub fn new() -> Self {
		PlayLog {
			entries: Vec::new(),
			next_number: 1,
		}
	}

	pub fn append(&mut self, play: PlayRecord, description: String) -> u32 {
		let number = self.next_number;
		self.next_number += 1;
		self.entries.push(PlayLogEntry {
			number,
			play,
			description,
			timestamp: Utc::now(),
		});
		number
	}

	/// Swap out the entry at `index` in place, issuing a fresh number. Earlier
	/// and later entries keep their numbers.
	pub fn replace(&mut self, index: usize, play: PlayRecord, description: String) -> Option<u32> {
		let entry = self.entries.get_mut(index)?;
		let number = self.next_number;
		self.next_number += 1;
		*entry = PlayLogEntry {
			number,
			play,
			description,
			timestamp: Utc::now(),
		};
		Some(number)
	}

	pub fn remove(&mut self, index: usize) -> Option<PlayLogEntry> {
		if index < self.entries.len() {
			Some(self.entries.remove(index))
		} else {
			None
		}
	}

	pub fn entries(&self) -> &[PlayLogEntry] {
		&self.entries
	}

	pub fn last(&self) -> Option<&PlayLogEntry> {
		self.entries.last()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_play_type_from_str() {
		let test_cases = vec![
			("rush", Ok(PlayType::Rush)),
			("pass", Ok(PlayType::Pass)),
			("field_goal", Ok(PlayType::FieldGoal)),
			("game", Ok(PlayType::Game)),
			("lateral", Err(PlayTypeError::unknown_play_type("lateral"))),
		];

		for (input, expected) in test_cases {
			assert_eq!(input.parse::<PlayType>(), expected, "Failed for input: {}", input);
		}
	}

	#[test]
	fn test_primary_result_alphabets() {
		// The same character decodes differently per play type.
		assert_eq!(PrimaryResult::parse(PlayType::Rush, 'T'), Some(PrimaryResult::Rush(RushResult::Tackle)));
		assert_eq!(
			PrimaryResult::parse(PlayType::Kickoff, 'T'),
			Some(PrimaryResult::Kickoff(KickoffResult::Touchback))
		);
		assert_eq!(PrimaryResult::parse(PlayType::Pass, 'X'), Some(PrimaryResult::Pass(PassResult::Intercepted)));
		assert_eq!(PrimaryResult::parse(PlayType::Pass, 'r'), Some(PrimaryResult::Pass(PassResult::Scramble)));
		assert_eq!(PrimaryResult::parse(PlayType::Rush, 'X'), None);
		assert_eq!(PrimaryResult::parse(PlayType::FieldGoal, 'G'), Some(PrimaryResult::FieldGoal(FieldGoalResult::Good)));
	}

	#[test]
	fn test_primary_result_code_round_trip() {
		let results = vec![
			PrimaryResult::Rush(RushResult::Fumble),
			PrimaryResult::Pass(PassResult::Sack),
			PrimaryResult::Punt(PuntResult::FairCatch),
			PrimaryResult::Kickoff(KickoffResult::Returned),
			PrimaryResult::FieldGoal(FieldGoalResult::NoGood),
			PrimaryResult::Penalty(PenaltyResult::Offsetting),
		];

		for result in results {
			let play_type = match result {
				PrimaryResult::Rush(_) => PlayType::Rush,
				PrimaryResult::Pass(_) => PlayType::Pass,
				PrimaryResult::Punt(_) => PlayType::Punt,
				PrimaryResult::Kickoff(_) => PlayType::Kickoff,
				PrimaryResult::FieldGoal(_) => PlayType::FieldGoal,
				PrimaryResult::Penalty(_) => PlayType::Penalty,
				PrimaryResult::Game => PlayType::Game,
			};
			assert_eq!(PrimaryResult::parse(play_type, result.code()), Some(result));
		}
	}

	#[test]
	fn test_play_log_numbering() {
		let mut log = PlayLog::new();
		let first = log.append(PlayRecord::default(), "first".to_string());
		let second = log.append(PlayRecord::default(), "second".to_string());
		assert_eq!((first, second), (1, 2));

		// Replacing issues a fresh number rather than reusing the old one.
		let replacement = log.replace(0, PlayRecord::default(), "corrected".to_string()).unwrap();
		assert_eq!(replacement, 3);
		assert_eq!(log.entries()[0].number, 3);
		assert_eq!(log.entries()[1].number, 2);

		assert!(log.replace(5, PlayRecord::default(), "nope".to_string()).is_none());
		assert_eq!(log.remove(0).map(|e| e.number), Some(3));
		assert_eq!(log.len(), 1);
	}

	#[test]
	fn test_turnover_kind() {
		let mut play = PlayRecord {
			play_type: Some(PlayType::Pass),
			result_code: Some('X'),
			is_turnover: true,
			..PlayRecord::default()
		};
		assert_eq!(play.turnover_kind(), Some(TurnoverKind::Interception));

		play.result_code = Some('F');
		play.fumbled_at = Spot::parse_opt("H40");
		assert_eq!(play.turnover_kind(), Some(TurnoverKind::Fumble));

		play.is_turnover = false;
		assert_eq!(play.turnover_kind(), None);
	}
}
