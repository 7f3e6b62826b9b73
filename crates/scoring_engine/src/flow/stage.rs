use crate::schema::penalty::{Enforcement, PenaltyCode};
use crate::schema::play::{GameControl, PlayType, PrimaryResult};
use crate::schema::spot::{Side, Spot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of stage a play chain can pass through. A chain starts with
/// `Primary` and ends at a terminal kind; continuing kinds hand off to
/// another stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
	Primary,
	Complete,
	Incomplete,
	Sack,
	Fumble,
	Return,
	Tackle,
	OutOfBounds,
	EndOfPlay,
	PenaltyEnforcement,
}

impl StageKind {
	/// Terminal kinds close the chain once their data is in.
	pub const fn is_terminal(self) -> bool {
		matches!(
			self,
			StageKind::Tackle | StageKind::OutOfBounds | StageKind::EndOfPlay | StageKind::Incomplete | StageKind::Sack | StageKind::PenaltyEnforcement
		)
	}
}

impl fmt::Display for StageKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			StageKind::Primary => "primary",
			StageKind::Complete => "complete",
			StageKind::Incomplete => "incomplete",
			StageKind::Sack => "sack",
			StageKind::Fumble => "fumble",
			StageKind::Return => "return",
			StageKind::Tackle => "tackle",
			StageKind::OutOfBounds => "out_of_bounds",
			StageKind::EndOfPlay => "end_of_play",
			StageKind::PenaltyEnforcement => "penalty_enforcement",
		};
		write!(f, "{}", name)
	}
}

/// Penalty identification entered at the primary prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltySelection {
	pub code: PenaltyCode,
	pub team: Side,
	pub player: String,
}

/// How the operator resolves a kickoff that sailed out of bounds: take the
/// ball where it went out, or take the 5-yard penalty as a rekick or enforced
/// from the spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KickoffOutOfBoundsOption {
	SpotBall,
	PenaltyRekick,
	PenaltySpot,
}

/// Everything the operator enters at the first prompt of a play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryInput {
	pub play_type: PlayType,
	pub result: PrimaryResult,
	pub carrier: String,
	pub passer: String,
	pub kicker: String,
	pub kicked_to: Option<Spot>,
	pub punted_to: Option<Spot>,
	pub fg_distance: Option<u32>,
	pub oob_option: Option<KickoffOutOfBoundsOption>,
	pub penalty: Option<PenaltySelection>,
	pub control: Option<GameControl>,
}

impl PrimaryInput {
	pub fn new(play_type: PlayType, result: PrimaryResult) -> Self {
		PrimaryInput {
			play_type,
			result,
			carrier: String::new(),
			passer: String::new(),
			kicker: String::new(),
			kicked_to: None,
			punted_to: None,
			fg_distance: None,
			oob_option: None,
			penalty: None,
			control: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TackleDetail {
	pub tackler: String,
	pub assist_tackler: String,
	pub spot: Option<Spot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutOfBoundsDetail {
	pub pushed_by: String,
	pub spot: Option<Spot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndOfPlayDetail {
	pub spot: Option<Spot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceptionDetail {
	pub receiver: String,
	pub caught_at: Option<Spot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncompleteDetail {
	pub intended_for: String,
	pub dropped: bool,
	pub broken_up: bool,
	pub broken_up_by: String,
	pub overthrown: bool,
	pub thrown_away: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SackDetail {
	pub sacker: String,
	pub assist_sacker: String,
	pub spot: Option<Spot>,
}

/// Fumble detail. On a sack fumble the sacker fields carry over from the sack
/// phase of the entry; `forced_by` left blank then defaults to the first
/// sacker at merge time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FumbleDetail {
	pub forced_by: String,
	pub sacker: String,
	pub assist_sacker: String,
	pub recovery_team: Option<Side>,
	pub recovered_by: String,
	pub recovered_at: Option<Spot>,
	pub return_attempted: bool,
	pub returner: String,
	pub return_spot: Option<Spot>,
}

/// A return leg: kickoff/punt returns and interception returns share it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnDetail {
	pub runner: String,
	pub started_at: Option<Spot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "stage", content = "data")]
pub enum StageData {
	Primary(PrimaryInput),
	Complete(ReceptionDetail),
	Incomplete(IncompleteDetail),
	Sack(SackDetail),
	Fumble(FumbleDetail),
	Return(ReturnDetail),
	Tackle(TackleDetail),
	OutOfBounds(OutOfBoundsDetail),
	EndOfPlay(EndOfPlayDetail),
	PenaltyEnforcement(Enforcement),
}

impl StageData {
	pub const fn kind(&self) -> StageKind {
		match self {
			StageData::Primary(_) => StageKind::Primary,
			StageData::Complete(_) => StageKind::Complete,
			StageData::Incomplete(_) => StageKind::Incomplete,
			StageData::Sack(_) => StageKind::Sack,
			StageData::Fumble(_) => StageKind::Fumble,
			StageData::Return(_) => StageKind::Return,
			StageData::Tackle(_) => StageKind::Tackle,
			StageData::OutOfBounds(_) => StageKind::OutOfBounds,
			StageData::EndOfPlay(_) => StageKind::EndOfPlay,
			StageData::PenaltyEnforcement(_) => StageKind::PenaltyEnforcement,
		}
	}

	/// The spot this stage places the ball at, if it carries one.
	pub fn spot(&self) -> Option<Spot> {
		match self {
			StageData::Tackle(d) => d.spot,
			StageData::OutOfBounds(d) => d.spot,
			StageData::EndOfPlay(d) => d.spot,
			StageData::Sack(d) => d.spot,
			StageData::Fumble(d) => d.return_spot.or(d.recovered_at),
			StageData::Complete(d) => d.caught_at,
			StageData::Return(d) => d.started_at,
			StageData::PenaltyEnforcement(e) => e.resulting_spot,
			StageData::Primary(_) | StageData::Incomplete(_) => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_terminal_kinds() {
		assert!(StageKind::Tackle.is_terminal());
		assert!(StageKind::OutOfBounds.is_terminal());
		assert!(StageKind::EndOfPlay.is_terminal());
		assert!(StageKind::Incomplete.is_terminal());
		assert!(StageKind::Sack.is_terminal());
		assert!(!StageKind::Primary.is_terminal());
		assert!(!StageKind::Complete.is_terminal());
		assert!(!StageKind::Fumble.is_terminal());
		assert!(!StageKind::Return.is_terminal());
	}

	#[test]
	fn test_stage_data_spot() {
		let tackle = StageData::Tackle(TackleDetail {
			tackler: "54".to_string(),
			assist_tackler: String::new(),
			spot: Spot::parse_opt("H41"),
		});
		assert_eq!(tackle.spot(), Spot::parse_opt("H41"));
		assert_eq!(tackle.kind(), StageKind::Tackle);

		let fumble = StageData::Fumble(FumbleDetail {
			recovered_at: Spot::parse_opt("H40"),
			return_spot: Spot::parse_opt("H45"),
			..FumbleDetail::default()
		});
		// The return leg, when present, supersedes the recovery spot.
		assert_eq!(fumble.spot(), Spot::parse_opt("H45"));
	}
}
