use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SpotError {
	#[error("Invalid side marker: {side}")]
	InvalidSide { side: String },

	#[error("Invalid yard number: {yard}, must be between 0 and 99")]
	InvalidYard { yard: u8 },

	#[error("Invalid spot format: {0}")]
	InvalidFormat(String),

	#[error("Parse error occurred for yard number: {source}")]
	ParseError {
		#[from]
		source: ParseIntError,
	},
}

impl SpotError {
	pub fn invalid_side_error(side: &str) -> Self {
		SpotError::InvalidSide { side: side.to_string() }
	}

	pub fn invalid_yard_error(yard: u8) -> Self {
		SpotError::InvalidYard { yard }
	}

	pub fn invalid_format_error(input: &str) -> Self {
		SpotError::InvalidFormat(input.to_string())
	}
}

#[derive(Debug, Error, PartialEq)]
pub enum GameClockError {
	#[error("Invalid quarter: {quarter}")]
	InvalidQuarter { quarter: String },

	#[error("Invalid minutes: {minutes}, must be between 0 and 15")]
	InvalidMinutes { minutes: u8 },

	#[error("Invalid seconds: {seconds}, must be between 0 and 59")]
	InvalidSeconds { seconds: u8 },

	#[error("Invalid clock format: {0}")]
	InvalidFormat(String),

	#[error("Parse error occurred for number: {source}")]
	ParseError {
		#[from]
		source: ParseIntError,
	},
}

impl GameClockError {
	pub fn invalid_quarter_error(quarter: &str) -> Self {
		GameClockError::InvalidQuarter { quarter: quarter.to_string() }
	}

	pub fn invalid_minutes_error(minutes: u8) -> Self {
		GameClockError::InvalidMinutes { minutes }
	}

	pub fn invalid_seconds_error(seconds: u8) -> Self {
		GameClockError::InvalidSeconds { seconds }
	}

	pub fn invalid_format_error(input: &str) -> Self {
		GameClockError::InvalidFormat(input.to_string())
	}
}

#[derive(Debug, Error, PartialEq)]
pub enum PlayTypeError {
	#[error("Unable to determine play type from: {input}")]
	UnknownPlayType { input: String },
}

impl PlayTypeError {
	pub fn unknown_play_type(input: &str) -> Self {
		PlayTypeError::UnknownPlayType { input: input.to_string() }
	}
}

#[derive(Debug, Error, PartialEq)]
pub enum PenaltyError {
	#[error("Unknown penalty code: {code}")]
	UnknownCode { code: String },
}

impl PenaltyError {
	pub fn unknown_code(code: &str) -> Self {
		PenaltyError::UnknownCode { code: code.to_string() }
	}
}

#[derive(Debug, Error, PartialEq)]
pub enum FlowError {
	#[error("Flow already has a primary stage")]
	PrimaryAlreadySet,

	#[error("Flow has no primary stage yet")]
	MissingPrimary,

	#[error("Expected {expected} stage data, got {got}")]
	StageMismatch { expected: String, got: String },

	#[error("Play chain is not terminal; cannot merge")]
	NotTerminal,

	#[error("Stage index {index} out of range for chain of {len}")]
	StageOutOfRange { index: usize, len: usize },
}

impl FlowError {
	pub fn stage_mismatch(expected: &str, got: &str) -> Self {
		FlowError::StageMismatch {
			expected: expected.to_string(),
			got: got.to_string(),
		}
	}
}
