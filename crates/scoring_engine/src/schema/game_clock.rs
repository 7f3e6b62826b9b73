use crate::error::GameClockError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quarter {
	First,
	Second,
	Third,
	Fourth,
	Overtime,
}

impl Quarter {
	pub fn from_number(n: u8) -> Result<Self, GameClockError> {
		match n {
			1 => Ok(Quarter::First),
			2 => Ok(Quarter::Second),
			3 => Ok(Quarter::Third),
			4 => Ok(Quarter::Fourth),
			5 => Ok(Quarter::Overtime),
			_ => Err(GameClockError::invalid_quarter_error(&n.to_string())),
		}
	}

	pub const fn number(self) -> u8 {
		match self {
			Quarter::First => 1,
			Quarter::Second => 2,
			Quarter::Third => 3,
			Quarter::Fourth => 4,
			Quarter::Overtime => 5,
		}
	}
}

impl fmt::Display for Quarter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Quarter::Overtime => write!(f, "OT"),
			other => write!(f, "Q{}", other.number()),
		}
	}
}

/// Struct to represent minutes (valid range: 0-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minutes(u8);

impl Minutes {
	pub fn new(value: u8) -> Result<Self, GameClockError> {
		if value > 15 {
			Err(GameClockError::invalid_minutes_error(value))
		} else {
			Ok(Minutes(value))
		}
	}

	pub const fn value(self) -> u8 {
		self.0
	}
}

impl FromStr for Minutes {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let value = s.parse::<u8>()?;
		Minutes::new(value)
	}
}

/// Struct to represent seconds (valid range: 0-59)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seconds(u8);

impl Seconds {
	pub fn new(value: u8) -> Result<Self, GameClockError> {
		if value >= 60 {
			Err(GameClockError::invalid_seconds_error(value))
		} else {
			Ok(Seconds(value))
		}
	}

	pub const fn value(self) -> u8 {
		self.0
	}
}

impl FromStr for Seconds {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let value = s.parse::<u8>()?;
		Seconds::new(value)
	}
}

/// Scoreboard clock within a quarter, entered and displayed as `mm:ss`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct GameClock {
	minutes: Minutes,
	seconds: Seconds,
}

impl GameClock {
	pub fn new(minutes: Minutes, seconds: Seconds) -> Self {
		GameClock { minutes, seconds }
	}

	pub fn start_of_quarter() -> Self {
		GameClock {
			minutes: Minutes(15),
			seconds: Seconds(0),
		}
	}

	pub fn zero() -> Self {
		GameClock {
			minutes: Minutes(0),
			seconds: Seconds(0),
		}
	}
}

impl Default for GameClock {
	fn default() -> Self {
		GameClock::start_of_quarter()
	}
}

impl FromStr for GameClock {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (minutes_str, seconds_str) = s.split_once(':').ok_or_else(|| GameClockError::invalid_format_error(s))?;

		let minutes = minutes_str.trim().parse::<Minutes>()?;
		let seconds = seconds_str.trim().parse::<Seconds>()?;

		Ok(GameClock::new(minutes, seconds))
	}
}

impl fmt::Display for GameClock {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{:02}", self.minutes.value(), self.seconds.value())
	}
}

impl From<GameClock> for String {
	fn from(clock: GameClock) -> Self {
		clock.to_string()
	}
}

impl TryFrom<String> for GameClock {
	type Error = GameClockError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}
