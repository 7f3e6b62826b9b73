use crate::schema::play::{GameControl, PlayRecord, PlayType, TerminalResult, TimeoutParty};
use crate::schema::spot::Side;

fn team_name(side: Side) -> &'static str {
	match side {
		Side::Home => "Home",
		Side::Visitor => "Visitor",
	}
}

/// How the chain ended, rendered as a parenthetical. Auto-terminal results
/// carry their own notation; a manual end-of-play reads as a touchdown.
fn terminal_annotation(play: &PlayRecord) -> String {
	match play.terminal_result {
		Some(TerminalResult::Tackle) => {
			if play.tackler.is_empty() {
				String::new()
			} else if play.assist_tackler.trim().is_empty() {
				format!(" (tackled by {})", play.tackler)
			} else {
				format!(" (tackled by {}, {})", play.tackler, play.assist_tackler)
			}
		}
		Some(TerminalResult::OutOfBounds) => " (out of bounds)".to_string(),
		Some(TerminalResult::EndOfPlay) => match play.result_code {
			Some('I') => String::new(),
			Some('D') => " (downed)".to_string(),
			Some('B') => " (blocked)".to_string(),
			Some('A') => " (accepted)".to_string(),
			_ => " (touchdown)".to_string(),
		},
		None => String::new(),
	}
}

fn spot_suffix(play: &PlayRecord) -> String {
	play.end_spot.map_or_else(String::new, |s| format!(" at {}", s))
}

/// Why an incomplete pass fell incomplete, when the operator said.
fn incompletion_note(play: &PlayRecord) -> String {
	if play.dropped {
		" (dropped)".to_string()
	} else if play.broken_up {
		if play.broken_up_by.is_empty() {
			" (broken up)".to_string()
		} else {
			format!(" (broken up by {})", play.broken_up_by)
		}
	} else if play.overthrown {
		" (overthrown)".to_string()
	} else if play.thrown_away {
		" (thrown away)".to_string()
	} else {
		String::new()
	}
}

fn or_player(name: &str) -> &str {
	if name.is_empty() {
		"Player"
	} else {
		name
	}
}

/// Render the one-line scoring log description for a resolved play.
pub fn describe(play: &PlayRecord) -> String {
	let spot = spot_suffix(play);
	let terminal = terminal_annotation(play);
	let code = play.result_code.unwrap_or('?');

	match play.play_type {
		Some(PlayType::Rush) => {
			let verb = if play.is_scramble { "scramble" } else { "rush" };
			format!("{} {} for {} yards{}{}", or_player(&play.carrier), verb, play.yards, terminal, spot)
		}
		Some(PlayType::Pass) => match code {
			'C' => {
				let receiver = if play.receiver.is_empty() {
					String::new()
				} else {
					format!(" to {}", play.receiver)
				};
				let caught = play.caught_at.map_or_else(String::new, |s| format!(" caught at {}", s));
				format!("{} pass complete{}{}{}{}", play.passer, receiver, caught, terminal, spot)
			}
			'I' => {
				let intended = if play.receiver.is_empty() {
					String::new()
				} else {
					format!(" intended for {}", play.receiver)
				};
				format!("{} pass incomplete{}{}{}", play.passer, intended, incompletion_note(play), spot)
			}
			'S' => {
				let loss = if play.sack_yards == 0 {
					String::new()
				} else {
					format!(" for {} yard loss", play.sack_yards.abs())
				};
				let sacker = if play.sacker.is_empty() {
					String::new()
				} else if play.assist_sacker.trim().is_empty() {
					format!(" (sacked by {})", play.sacker)
				} else {
					format!(" (sacked by {}, {})", play.sacker, play.assist_sacker)
				};
				format!("{} sacked{}{}{}", play.passer, loss, sacker, spot)
			}
			'F' if play.is_sack_fumble => {
				let forced = if play.forced_by.is_empty() {
					" (sack fumble)".to_string()
				} else {
					format!(" (sack fumble forced by {})", play.forced_by)
				};
				let recovery = match (play.recovery_team, play.recovered_by.is_empty()) {
					(Some(team), false) => format!(" recovered by {} #{}", team, play.recovered_by),
					_ => String::new(),
				};
				format!("{} sacked{}{}{}{}", play.passer, forced, recovery, terminal, spot)
			}
			_ => format!("{} pass - result: {}{}", play.passer, code, terminal),
		},
		Some(PlayType::Punt) => {
			let punted_to = play.punted_to.map_or_else(|| "?".to_string(), |s| s.to_string());
			match code {
				'D' => format!("{} punt to {} (downed){}", play.kicker, punted_to, spot),
				'C' => format!("{} punt to {} (fair catch){}", play.kicker, punted_to, spot),
				'B' => format!("{} punt blocked{}", play.kicker, spot),
				_ => format!("{} punt to {}{}{}", play.kicker, punted_to, terminal, spot),
			}
		}
		Some(PlayType::Kickoff) => {
			let kicked_to = play.kicked_to.map_or_else(|| "?".to_string(), |s| s.to_string());
			let touchback_note = if play.is_automatic_touchback { " (automatic touchback)" } else { "" };
			match code {
				'R' => format!("{} kickoff to {}, returned{}{}", play.kicker, kicked_to, terminal, spot),
				'T' => {
					let ball_at = play.end_spot.map_or_else(|| "?".to_string(), |s| s.to_string());
					format!("{} kickoff (touchback), ball at {}", play.kicker, ball_at)
				}
				'O' => {
					let resolution = if play.penalty.is_some() && play.end_spot.is_none() {
						" (5 yard penalty, rekick)".to_string()
					} else if play.penalty.is_some() {
						format!(" (5 yard penalty){}", spot)
					} else {
						String::new()
					};
					format!("{} kickoff out of bounds at {}{}", play.kicker, kicked_to, resolution)
				}
				'C' => format!("{} kickoff to {} (fair catch){}", play.kicker, kicked_to, touchback_note),
				'D' => format!("{} kickoff to {} (downed){}", play.kicker, kicked_to, touchback_note),
				_ => format!("{} kickoff to {}{}{}", play.kicker, kicked_to, terminal, spot),
			}
		}
		Some(PlayType::FieldGoal) => {
			let distance = play.fg_distance.unwrap_or(0);
			match code {
				'G' => format!("{} {} yard field goal GOOD", play.kicker, distance),
				'N' => format!("{} {} yard field goal NO GOOD{}", play.kicker, distance, spot),
				'B' => format!("{} {} yard field goal BLOCKED{}{}", play.kicker, distance, terminal, spot),
				_ => format!("{} {} yard field goal attempt{}", play.kicker, distance, terminal),
			}
		}
		Some(PlayType::Penalty) => {
			let code_str = play.penalty.map_or_else(|| "?".to_string(), |p| p.code().to_string());
			let team = play.penalty_team.map_or("?", |t| match t {
				Side::Home => "H",
				Side::Visitor => "V",
			});
			let player = if play.penalized_player.is_empty() {
				String::new()
			} else {
				format!(" #{}", play.penalized_player)
			};
			let disposition = match code {
				'A' => "accepted",
				'O' => "offsetting",
				_ => "declined",
			};
			let ejected = if play.enforcement.as_ref().is_some_and(|e| e.player_ejected) {
				" (EJECTED)"
			} else {
				""
			};
			format!("Penalty: {} on {}{} ({}){}{}", code_str, team, player, disposition, ejected, spot)
		}
		Some(PlayType::Game) => match &play.control {
			Some(GameControl::CoinToss { winner, deferred, .. }) => {
				let choice = if *deferred { "defer" } else { "receive" };
				format!("Coin toss: {} wins, elects to {}", team_name(*winner), choice)
			}
			Some(GameControl::Timeout { party }) => match party {
				TimeoutParty::Team(side) => format!("Timeout: {}", team_name(*side)),
				TimeoutParty::Challenge(side) => format!("Challenge: {}", team_name(*side)),
				TimeoutParty::Official => "Timeout: officials".to_string(),
				TimeoutParty::Media => "Timeout: media".to_string(),
			},
			Some(GameControl::SetQuarter { quarter }) => format!("Start of quarter {}", quarter),
			Some(GameControl::EndHalf) => "End of first half".to_string(),
			Some(GameControl::NewHalf { receiving }) => format!("Second half: {} receives", team_name(*receiving)),
			Some(GameControl::Uniform { team, note }) => {
				if note.is_empty() {
					format!("Uniform change: {}", team_name(*team))
				} else {
					format!("Uniform change: {} ({})", team_name(*team), note)
				}
			}
			Some(GameControl::BallPlacement { spot }) => format!("Ball placed at {}", spot),
			Some(GameControl::GameTime { clock }) => format!("Clock set to {}", clock),
			Some(GameControl::Possession { team }) => format!("Possession: {}", team_name(*team)),
			Some(GameControl::DriveStart { team }) => format!("Drive start: {}", team_name(*team)),
			None => "Game control: unknown".to_string(),
		},
		None => format!("play{}{}", terminal, spot),
	}
}
