use crate::error::SpotError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which half of the field a spot is described from: `H` counts yards from the
/// home goal line, `V` from the visitor goal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
	#[serde(rename = "H")]
	Home,
	#[serde(rename = "V")]
	Visitor,
}

impl Side {
	pub fn flip(self) -> Self {
		match self {
			Side::Home => Side::Visitor,
			Side::Visitor => Side::Home,
		}
	}

	pub fn as_char(self) -> char {
		match self {
			Side::Home => 'H',
			Side::Visitor => 'V',
		}
	}
}

impl FromStr for Side {
	type Err = SpotError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"H" | "h" => Ok(Side::Home),
			"V" | "v" => Ok(Side::Visitor),
			_ => Err(SpotError::invalid_side_error(s)),
		}
	}
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_char())
	}
}

/// A field-position descriptor, e.g. `H35` or `V8`: a side marker plus a yard
/// number measured from that side's goal line.
///
/// The unified scale runs 0 (home goal line) to 100 (visitor goal line);
/// `field_position` and `from_field_position` convert between the two forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Spot {
	side: Side,
	yard: u8,
}

impl Spot {
	pub fn new(side: Side, yard: u8) -> Result<Self, SpotError> {
		if yard > 99 {
			Err(SpotError::invalid_yard_error(yard))
		} else {
			Ok(Spot { side, yard })
		}
	}

	pub const fn side(self) -> Side {
		self.side
	}

	pub const fn yard(self) -> u8 {
		self.yard
	}

	/// Position on the unified 0-100 scale: 0 = home goal line, 100 = visitor
	/// goal line.
	pub const fn field_position(self) -> u8 {
		match self.side {
			Side::Home => self.yard,
			Side::Visitor => 100 - self.yard,
		}
	}

	/// Inverse of `field_position`. The canonical descriptor puts the spot on
	/// the nearer side of midfield.
	pub fn from_field_position(field_position: u8) -> Self {
		let fp = if field_position > 100 { 100 } else { field_position };
		if fp <= 50 {
			Spot { side: Side::Home, yard: fp }
		} else {
			Spot {
				side: Side::Visitor,
				yard: 100 - fp,
			}
		}
	}

	/// Fail-soft parse for free-text operator input: mid-entry or malformed
	/// spots become `None` rather than an error.
	pub fn parse_opt(s: &str) -> Option<Self> {
		s.trim().parse().ok()
	}
}

impl FromStr for Spot {
	type Err = SpotError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.len() < 2 {
			return Err(SpotError::invalid_format_error(s));
		}
		let (side_str, yard_str) = s.split_at(1);
		let side = Side::from_str(side_str)?;
		let yard = yard_str.parse::<u8>()?;
		Spot::new(side, yard)
	}
}

impl fmt::Display for Spot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.side, self.yard)
	}
}

impl From<Spot> for String {
	fn from(spot: Spot) -> Self {
		spot.to_string()
	}
}

impl TryFrom<String> for Spot {
	type Error = SpotError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_spot_from_str() {
		let test_cases = vec![
			("H35", Ok(Spot { side: Side::Home, yard: 35 })),
			("V8", Ok(Spot { side: Side::Visitor, yard: 8 })),
			("H0", Ok(Spot { side: Side::Home, yard: 0 })),
			("v50", Ok(Spot { side: Side::Visitor, yard: 50 })),
			("X35", Err(SpotError::invalid_side_error("X"))),
			("H", Err(SpotError::invalid_format_error("H"))),
		];

		for (input, expected) in test_cases {
			assert_eq!(Spot::from_str(input), expected, "Failed for input: {}", input);
		}
		assert!(Spot::from_str("H1x").is_err());
		assert_eq!(Spot::parse_opt("garbage"), None);
		assert_eq!(Spot::parse_opt(" H41 "), Some(Spot { side: Side::Home, yard: 41 }));
	}

	#[test]
	fn test_field_position_scale() {
		assert_eq!("H35".parse::<Spot>().unwrap().field_position(), 35);
		assert_eq!("V35".parse::<Spot>().unwrap().field_position(), 65);
		assert_eq!("H0".parse::<Spot>().unwrap().field_position(), 0);
		assert_eq!("V0".parse::<Spot>().unwrap().field_position(), 100);
		assert_eq!("H50".parse::<Spot>().unwrap().field_position(), 50);
		assert_eq!("V50".parse::<Spot>().unwrap().field_position(), 50);
	}

	#[test]
	fn test_field_position_round_trip() {
		// The scalar must survive the round trip for every point on the scale.
		for fp in 0..=100u8 {
			let spot = Spot::from_field_position(fp);
			assert_eq!(spot.field_position(), fp, "Failed round trip for {}", fp);
		}
	}

	#[test]
	fn test_serde_string_form() {
		let spot: Spot = "H35".parse().unwrap();
		assert_eq!(serde_json::to_string(&spot).unwrap(), "\"H35\"");
		assert_eq!(serde_json::from_str::<Spot>("\"V8\"").unwrap(), spot_from("V8"));
		assert!(serde_json::from_str::<Spot>("\"X35\"").is_err());
	}

	fn spot_from(s: &str) -> Spot {
		s.parse().unwrap()
	}

	#[test]
	fn test_display_round_trip() {
		for input in ["H35", "V8", "H0", "V50"] {
			let spot: Spot = input.parse().unwrap();
			assert_eq!(spot.to_string(), input);
		}
	}
}
