use crate::error::PenaltyError;
use crate::schema::spot::Spot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule set in effect for the game; yardage and down effects for several
/// fouls differ between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RuleLevel {
	#[default]
	#[serde(rename = "HS")]
	HighSchool,
	#[serde(rename = "NCAA")]
	Ncaa,
}

/// Nominal penalty yardage. `SpotOfFoul` and `LossOfDown` are sentinels: the
/// ball is not walked off a fixed distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyYardage {
	Fixed(u8),
	SpotOfFoul,
	LossOfDown,
}

impl fmt::Display for PenaltyYardage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PenaltyYardage::Fixed(n) => write!(f, "{}", n),
			PenaltyYardage::SpotOfFoul => write!(f, "Spot"),
			PenaltyYardage::LossOfDown => write!(f, "Loss of Down"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownEffect {
	Repeat,
	AutomaticFirstDown,
	LossOfDown,
	Rekick,
}

/// The penalty reference catalog. Codes are the scorer-facing abbreviations;
/// names, yardage, and down effects follow the printed reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyCode {
	ChopBlock,
	Clipping,
	DelayOfGame,
	Encroachment,
	Facemask,
	FairCatchInterference,
	FalseStart,
	DefensiveHolding,
	OffensiveHolding,
	HorseCollarTackle,
	IllegalBatting,
	IllegalBlockInBack,
	IllegalContact,
	IllegalEquipment,
	IllegalFormation,
	IllegalForwardPass,
	IllegalKicking,
	IllegalMotion,
	IllegalParticipation,
	IllegalProcedure,
	IllegalShift,
	IllegalSubstitution,
	IllegalUseOfHands,
	IneligibleReceiverDownfield,
	IntentionalGrounding,
	KickCatchInterference,
	KickoffOutOfBounds,
	NeutralZoneInfraction,
	Offside,
	DefensivePassInterference,
	OffensivePassInterference,
	PersonalFoul,
	RoughingTheKicker,
	RoughingThePasser,
	RunningIntoTheKicker,
	SafetyKickOutOfBounds,
	SidelineInterference,
	Spearing,
	Targeting,
	TooManyMen,
	UnsportsmanlikeConduct,
}

impl PenaltyCode {
	pub const fn code(self) -> &'static str {
		match self {
			PenaltyCode::ChopBlock => "CB",
			PenaltyCode::Clipping => "CLP",
			PenaltyCode::DelayOfGame => "DOG",
			PenaltyCode::Encroachment => "EN",
			PenaltyCode::Facemask => "FM",
			PenaltyCode::FairCatchInterference => "FCI",
			PenaltyCode::FalseStart => "FS",
			PenaltyCode::DefensiveHolding => "DH",
			PenaltyCode::OffensiveHolding => "OH",
			PenaltyCode::HorseCollarTackle => "HCT",
			PenaltyCode::IllegalBatting => "IB",
			PenaltyCode::IllegalBlockInBack => "IBB",
			PenaltyCode::IllegalContact => "IC",
			PenaltyCode::IllegalEquipment => "IE",
			PenaltyCode::IllegalFormation => "IF",
			PenaltyCode::IllegalForwardPass => "IFP",
			PenaltyCode::IllegalKicking => "IK",
			PenaltyCode::IllegalMotion => "IM",
			PenaltyCode::IllegalParticipation => "IP",
			PenaltyCode::IllegalProcedure => "IPR",
			PenaltyCode::IllegalShift => "IS",
			PenaltyCode::IllegalSubstitution => "ISUB",
			PenaltyCode::IllegalUseOfHands => "IUH",
			PenaltyCode::IneligibleReceiverDownfield => "IRD",
			PenaltyCode::IntentionalGrounding => "IG",
			PenaltyCode::KickCatchInterference => "KCI",
			PenaltyCode::KickoffOutOfBounds => "KOB",
			PenaltyCode::NeutralZoneInfraction => "NZI",
			PenaltyCode::Offside => "OS",
			PenaltyCode::DefensivePassInterference => "DPI",
			PenaltyCode::OffensivePassInterference => "OPI",
			PenaltyCode::PersonalFoul => "PF",
			PenaltyCode::RoughingTheKicker => "RTK",
			PenaltyCode::RoughingThePasser => "RTP",
			PenaltyCode::RunningIntoTheKicker => "RIK",
			PenaltyCode::SafetyKickOutOfBounds => "SKOB",
			PenaltyCode::SidelineInterference => "SI",
			PenaltyCode::Spearing => "SP",
			PenaltyCode::Targeting => "TGT",
			PenaltyCode::TooManyMen => "TMM",
			PenaltyCode::UnsportsmanlikeConduct => "UC",
		}
	}

	pub const fn name(self) -> &'static str {
		match self {
			PenaltyCode::ChopBlock => "Chop Block",
			PenaltyCode::Clipping => "Clipping",
			PenaltyCode::DelayOfGame => "Delay of Game",
			PenaltyCode::Encroachment => "Encroachment",
			PenaltyCode::Facemask => "Facemask",
			PenaltyCode::FairCatchInterference => "Fair Catch Interference",
			PenaltyCode::FalseStart => "False Start",
			PenaltyCode::DefensiveHolding => "Holding (Defensive)",
			PenaltyCode::OffensiveHolding => "Holding (Offensive)",
			PenaltyCode::HorseCollarTackle => "Horse Collar Tackle",
			PenaltyCode::IllegalBatting => "Illegal Batting",
			PenaltyCode::IllegalBlockInBack => "Illegal Block in the Back",
			PenaltyCode::IllegalContact => "Illegal Contact",
			PenaltyCode::IllegalEquipment => "Illegal Equipment",
			PenaltyCode::IllegalFormation => "Illegal Formation",
			PenaltyCode::IllegalForwardPass => "Illegal Forward Pass",
			PenaltyCode::IllegalKicking => "Illegal Kicking",
			PenaltyCode::IllegalMotion => "Illegal Motion",
			PenaltyCode::IllegalParticipation => "Illegal Participation",
			PenaltyCode::IllegalProcedure => "Illegal Procedure",
			PenaltyCode::IllegalShift => "Illegal Shift",
			PenaltyCode::IllegalSubstitution => "Illegal Substitution",
			PenaltyCode::IllegalUseOfHands => "Illegal Use of Hands",
			PenaltyCode::IneligibleReceiverDownfield => "Ineligible Receiver Downfield",
			PenaltyCode::IntentionalGrounding => "Intentional Grounding",
			PenaltyCode::KickCatchInterference => "Kick Catch Interference",
			PenaltyCode::KickoffOutOfBounds => "Kickoff Out of Bounds",
			PenaltyCode::NeutralZoneInfraction => "Neutral Zone Infraction",
			PenaltyCode::Offside => "Offside",
			PenaltyCode::DefensivePassInterference => "Pass Interference (Defensive)",
			PenaltyCode::OffensivePassInterference => "Pass Interference (Offensive)",
			PenaltyCode::PersonalFoul => "Personal Foul",
			PenaltyCode::RoughingTheKicker => "Roughing the Kicker",
			PenaltyCode::RoughingThePasser => "Roughing the Passer",
			PenaltyCode::RunningIntoTheKicker => "Running into the Kicker",
			PenaltyCode::SafetyKickOutOfBounds => "Safety Kick Out of Bounds",
			PenaltyCode::SidelineInterference => "Sideline Interference",
			PenaltyCode::Spearing => "Spearing",
			PenaltyCode::Targeting => "Targeting",
			PenaltyCode::TooManyMen => "Too Many Men on Field",
			PenaltyCode::UnsportsmanlikeConduct => "Unsportsmanlike Conduct",
		}
	}

	pub const fn yardage(self, level: RuleLevel) -> PenaltyYardage {
		match self {
			PenaltyCode::IntentionalGrounding => PenaltyYardage::LossOfDown,
			PenaltyCode::DefensivePassInterference => PenaltyYardage::SpotOfFoul,
			PenaltyCode::ChopBlock
			| PenaltyCode::Clipping
			| PenaltyCode::Facemask
			| PenaltyCode::FairCatchInterference
			| PenaltyCode::HorseCollarTackle
			| PenaltyCode::IllegalParticipation
			| PenaltyCode::KickCatchInterference
			| PenaltyCode::OffensivePassInterference
			| PenaltyCode::PersonalFoul
			| PenaltyCode::RoughingTheKicker
			| PenaltyCode::RoughingThePasser
			| PenaltyCode::SidelineInterference
			| PenaltyCode::Spearing
			| PenaltyCode::Targeting
			| PenaltyCode::UnsportsmanlikeConduct => PenaltyYardage::Fixed(15),
			PenaltyCode::OffensiveHolding | PenaltyCode::IllegalBatting | PenaltyCode::IllegalBlockInBack | PenaltyCode::IllegalKicking => {
				PenaltyYardage::Fixed(10)
			}
			// Everything else is a five-yard foul at both levels.
			_ => {
				let _ = level;
				PenaltyYardage::Fixed(5)
			}
		}
	}

	pub const fn down_effect(self, level: RuleLevel) -> DownEffect {
		match self {
			PenaltyCode::IllegalForwardPass | PenaltyCode::IntentionalGrounding => DownEffect::LossOfDown,
			PenaltyCode::KickoffOutOfBounds | PenaltyCode::SafetyKickOutOfBounds => DownEffect::Rekick,
			PenaltyCode::Facemask
			| PenaltyCode::FairCatchInterference
			| PenaltyCode::DefensiveHolding
			| PenaltyCode::HorseCollarTackle
			| PenaltyCode::IllegalContact
			| PenaltyCode::IllegalUseOfHands
			| PenaltyCode::KickCatchInterference
			| PenaltyCode::DefensivePassInterference
			| PenaltyCode::PersonalFoul
			| PenaltyCode::RoughingTheKicker
			| PenaltyCode::RoughingThePasser
			| PenaltyCode::SidelineInterference
			| PenaltyCode::Spearing
			| PenaltyCode::Targeting
			| PenaltyCode::UnsportsmanlikeConduct => match level {
				RuleLevel::Ncaa => DownEffect::AutomaticFirstDown,
				RuleLevel::HighSchool => DownEffect::Repeat,
			},
			_ => DownEffect::Repeat,
		}
	}

	/// Dead-ball fouls enforced from the previous spot.
	pub const fn is_pre_snap(self) -> bool {
		matches!(
			self,
			PenaltyCode::FalseStart
				| PenaltyCode::Offside
				| PenaltyCode::Encroachment
				| PenaltyCode::NeutralZoneInfraction
				| PenaltyCode::IllegalFormation
				| PenaltyCode::IllegalMotion
				| PenaltyCode::IllegalShift
				| PenaltyCode::DelayOfGame
				| PenaltyCode::IllegalSubstitution
				| PenaltyCode::TooManyMen
				| PenaltyCode::IllegalEquipment
		)
	}

	/// Fouls for which the operator may assert a player ejection.
	pub const fn is_ejectable(self) -> bool {
		matches!(
			self,
			PenaltyCode::PersonalFoul | PenaltyCode::UnsportsmanlikeConduct | PenaltyCode::Targeting | PenaltyCode::Spearing
		)
	}

	pub const ALL: [PenaltyCode; 41] = [
		PenaltyCode::ChopBlock,
		PenaltyCode::Clipping,
		PenaltyCode::DelayOfGame,
		PenaltyCode::Encroachment,
		PenaltyCode::Facemask,
		PenaltyCode::FairCatchInterference,
		PenaltyCode::FalseStart,
		PenaltyCode::DefensiveHolding,
		PenaltyCode::OffensiveHolding,
		PenaltyCode::HorseCollarTackle,
		PenaltyCode::IllegalBatting,
		PenaltyCode::IllegalBlockInBack,
		PenaltyCode::IllegalContact,
		PenaltyCode::IllegalEquipment,
		PenaltyCode::IllegalFormation,
		PenaltyCode::IllegalForwardPass,
		PenaltyCode::IllegalKicking,
		PenaltyCode::IllegalMotion,
		PenaltyCode::IllegalParticipation,
		PenaltyCode::IllegalProcedure,
		PenaltyCode::IllegalShift,
		PenaltyCode::IllegalSubstitution,
		PenaltyCode::IllegalUseOfHands,
		PenaltyCode::IneligibleReceiverDownfield,
		PenaltyCode::IntentionalGrounding,
		PenaltyCode::KickCatchInterference,
		PenaltyCode::KickoffOutOfBounds,
		PenaltyCode::NeutralZoneInfraction,
		PenaltyCode::Offside,
		PenaltyCode::DefensivePassInterference,
		PenaltyCode::OffensivePassInterference,
		PenaltyCode::PersonalFoul,
		PenaltyCode::RoughingTheKicker,
		PenaltyCode::RoughingThePasser,
		PenaltyCode::RunningIntoTheKicker,
		PenaltyCode::SafetyKickOutOfBounds,
		PenaltyCode::SidelineInterference,
		PenaltyCode::Spearing,
		PenaltyCode::Targeting,
		PenaltyCode::TooManyMen,
		PenaltyCode::UnsportsmanlikeConduct,
	];
}

impl FromStr for PenaltyCode {
	type Err = PenaltyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let upper = s.to_uppercase();
		PenaltyCode::ALL
			.iter()
			.copied()
			.find(|p| p.code() == upper)
			.ok_or_else(|| PenaltyError::unknown_code(s))
	}
}

impl fmt::Display for PenaltyCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.code())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnforcementType {
	#[default]
	PreviousSpot,
	SpotOfFoul,
	SucceedingSpot,
}

/// Enforcement detail confirmed by the operator before a penalty play is
/// finalized. The resulting spot is calculated but every field remains
/// overridable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Enforcement {
	pub spot_of_foul: Option<Spot>,
	pub enforcement_spot: Option<Spot>,
	pub resulting_spot: Option<Spot>,
	pub enforcement_type: EnforcementType,
	pub automatic_first_down: bool,
	pub loss_of_down: bool,
	pub player_ejected: bool,
}
