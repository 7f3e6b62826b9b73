use crate::engine::enforcement::enforce;
use crate::engine::yardage::{displacement, yards_gained};
use crate::error::FlowError;
use crate::flow::stage::{KickoffOutOfBoundsOption, PrimaryInput, StageData, StageKind};
use crate::schema::penalty::{PenaltyCode, RuleLevel};
use crate::schema::play::{
	FieldGoalResult, KickoffResult, PassResult, PenaltyResult, PlayRecord, PlayType, PrimaryResult, PuntResult, RushResult, TerminalResult,
};
use crate::schema::spot::{Side, Spot};
use serde::{Deserialize, Serialize};

/// Pre-snap facts the chain needs to resolve itself: who has the ball, where
/// it sits, and which rule level is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowContext {
	pub possession: Side,
	pub level: RuleLevel,
	pub spot: Spot,
}

/// What the chain needs next.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
	/// The chain is closed; here is the merged play.
	Complete(Box<PlayRecord>),
	/// A stage of this kind must be entered next.
	Needs(StageKind),
	/// A continuing stage finished; a result code (T, O, F, `.`) picks what
	/// follows.
	NeedsResultCode,
}

/// Drives one play from the primary prompt through continuing stages to a
/// terminal stage, then merges the chain into a flat record.
///
/// Stages are kept in entry order. Editing an earlier stage truncates
/// everything after it, since later answers may no longer make sense.
#[derive(Debug, Clone)]
pub struct Sequencer {
	context: FlowContext,
	stages: Vec<StageData>,
	pending: Option<StageKind>,
}

impl Sequencer {
	pub fn new(context: FlowContext) -> Self {
		Sequencer {
			context,
			stages: Vec::new(),
			pending: None,
		}
	}

	pub fn context(&self) -> FlowContext {
		self.context
	}

	pub fn stages(&self) -> &[StageData] {
		&self.stages
	}

	/// Enter the primary stage. Errors if the chain already has one.
	pub fn begin(&mut self, input: PrimaryInput) -> Result<Advance, FlowError> {
		if !self.stages.is_empty() {
			return Err(FlowError::PrimaryAlreadySet);
		}
		self.stages.push(StageData::Primary(input));
		self.status()
	}

	/// Enter the stage the chain asked for.
	pub fn advance(&mut self, data: StageData) -> Result<Advance, FlowError> {
		let expected = match self.status()? {
			Advance::Needs(kind) => kind,
			Advance::NeedsResultCode => return Err(FlowError::stage_mismatch("result code", &data.kind().to_string())),
			Advance::Complete(_) => return Err(FlowError::stage_mismatch("nothing", &data.kind().to_string())),
		};
		if data.kind() != expected {
			return Err(FlowError::stage_mismatch(&expected.to_string(), &data.kind().to_string()));
		}
		self.pending = None;
		self.stages.push(data);
		self.status()
	}

	/// Answer a result-code prompt. Characters outside `T`, `O`, `F`, `.`
	/// leave the chain exactly where it was.
	pub fn resolve_code(&mut self, code: char) -> Result<Advance, FlowError> {
		match self.status()? {
			Advance::NeedsResultCode => {}
			other => return Ok(other),
		}
		match code.to_ascii_uppercase() {
			'T' => {
				self.pending = Some(StageKind::Tackle);
				Ok(Advance::Needs(StageKind::Tackle))
			}
			'O' => {
				self.pending = Some(StageKind::OutOfBounds);
				Ok(Advance::Needs(StageKind::OutOfBounds))
			}
			'F' => {
				self.pending = Some(StageKind::Fumble);
				Ok(Advance::Needs(StageKind::Fumble))
			}
			'.' => {
				self.pending = None;
				self.stages.push(StageData::EndOfPlay(crate::flow::stage::EndOfPlayDetail { spot: None }));
				self.status()
			}
			_ => Ok(Advance::NeedsResultCode),
		}
	}

	/// Replace the stage at `index` with corrected data of the same kind.
	/// Every later stage is dropped; the chain re-asks from there.
	pub fn edit_stage(&mut self, index: usize, data: StageData) -> Result<Advance, FlowError> {
		let len = self.stages.len();
		let Some(existing) = self.stages.get_mut(index) else {
			return Err(FlowError::StageOutOfRange { index, len });
		};
		if existing.kind() != data.kind() {
			return Err(FlowError::stage_mismatch(&existing.kind().to_string(), &data.kind().to_string()));
		}
		*existing = data;
		self.truncate_after(index)?;
		self.status()
	}

	/// Drop every stage after `index`.
	pub fn truncate_after(&mut self, index: usize) -> Result<(), FlowError> {
		if index >= self.stages.len() {
			return Err(FlowError::StageOutOfRange {
				index,
				len: self.stages.len(),
			});
		}
		self.stages.truncate(index + 1);
		self.pending = None;
		Ok(())
	}

	/// What the chain needs now, derived from the stages entered so far.
	pub fn status(&self) -> Result<Advance, FlowError> {
		if let Some(pending) = self.pending {
			return Ok(Advance::Needs(pending));
		}
		let Some(last) = self.stages.last() else {
			return Err(FlowError::MissingPrimary);
		};

		let next = match last {
			StageData::Primary(input) => match after_primary(input) {
				Some(kind) => Advance::Needs(kind),
				None => Advance::Complete(Box::new(self.merge()?)),
			},
			StageData::Complete(_) | StageData::Return(_) => Advance::NeedsResultCode,
			StageData::Fumble(detail) => {
				if detail.return_attempted {
					Advance::NeedsResultCode
				} else {
					Advance::Complete(Box::new(self.merge()?))
				}
			}
			data if data.kind().is_terminal() => Advance::Complete(Box::new(self.merge()?)),
			data => return Err(FlowError::stage_mismatch("terminal", &data.kind().to_string())),
		};
		Ok(next)
	}

	/// Whether the last stage ends the play on its own. Only a closed chain
	/// can merge into a record.
	fn is_closed(&self) -> bool {
		if self.pending.is_some() {
			return false;
		}
		match self.stages.last() {
			Some(StageData::Primary(input)) => after_primary(input).is_none(),
			Some(StageData::Fumble(detail)) => !detail.return_attempted,
			Some(data) => data.kind().is_terminal(),
			None => false,
		}
	}

	/// Flatten the closed chain into one play record.
	pub fn merge(&self) -> Result<PlayRecord, FlowError> {
		let Some(StageData::Primary(input)) = self.stages.first() else {
			return Err(FlowError::MissingPrimary);
		};
		if !self.is_closed() {
			return Err(FlowError::NotTerminal);
		}

		let mut play = PlayRecord {
			play_type: Some(input.play_type),
			result_code: Some(input.result.code()),
			carrier: input.carrier.clone(),
			passer: input.passer.clone(),
			kicker: input.kicker.clone(),
			kicked_to: input.kicked_to,
			punted_to: input.punted_to,
			fg_distance: input.fg_distance,
			start_spot: Some(self.context.spot),
			control: input.control.clone(),
			..PlayRecord::default()
		};

		if let Some(selection) = &input.penalty {
			play.penalty = Some(selection.code);
			play.penalty_team = Some(selection.team);
			play.penalized_player = selection.player.clone();
		}

		for stage in &self.stages[1..] {
			self.merge_stage(&mut play, stage);
		}

		// The ball rests at the last spot any stage produced.
		play.end_spot = self.stages.iter().rev().find_map(StageData::spot).or(play.end_spot);

		self.finish_primary(&mut play, input);

		Ok(play)
	}

	fn merge_stage(&self, play: &mut PlayRecord, stage: &StageData) {
		match stage {
			StageData::Tackle(d) => {
				play.tackler = d.tackler.clone();
				play.assist_tackler = d.assist_tackler.clone();
				play.terminal_result = Some(TerminalResult::Tackle);
			}
			StageData::OutOfBounds(d) => {
				play.tackler = d.pushed_by.clone();
				play.terminal_result = Some(TerminalResult::OutOfBounds);
			}
			StageData::EndOfPlay(_) => {
				play.terminal_result = Some(TerminalResult::EndOfPlay);
			}
			StageData::Complete(d) => {
				play.receiver = d.receiver.clone();
				play.caught_at = d.caught_at;
			}
			StageData::Incomplete(d) => {
				play.receiver = d.intended_for.clone();
				play.dropped = d.dropped;
				play.broken_up = d.broken_up;
				play.broken_up_by = d.broken_up_by.clone();
				play.overthrown = d.overthrown;
				play.thrown_away = d.thrown_away;
				play.terminal_result = Some(TerminalResult::EndOfPlay);
			}
			StageData::Sack(d) => {
				play.sacker = d.sacker.clone();
				play.assist_sacker = d.assist_sacker.clone();
				play.is_sack = true;
				play.sack_yards = displacement(Some(self.context.spot), d.spot);
				play.terminal_result = Some(TerminalResult::Tackle);
			}
			StageData::Fumble(d) => {
				play.sacker = d.sacker.clone();
				play.assist_sacker = d.assist_sacker.clone();
				// NCAA scoring: a sack fumble without an explicit forcer is
				// charged to the first sacker.
				play.forced_by = if d.forced_by.is_empty() { d.sacker.clone() } else { d.forced_by.clone() };
				play.recovery_team = d.recovery_team;
				play.recovered_by = d.recovered_by.clone();
				play.recovered_at = d.recovered_at;
				play.fumbled_at = d.recovered_at;
				play.return_attempted = d.return_attempted;
				if !d.returner.is_empty() {
					play.returner = d.returner.clone();
				}
				play.is_turnover = d.recovery_team.is_some_and(|team| team != self.context.possession);
			}
			StageData::Return(d) => {
				play.returner = d.runner.clone();
			}
			StageData::PenaltyEnforcement(enforcement) => {
				play.enforcement = Some(enforcement.clone());
				play.end_spot = enforcement.resulting_spot;
			}
			StageData::Primary(_) => {}
		}
	}

	/// Per-play-type post-processing once every stage is folded in.
	fn finish_primary(&self, play: &mut PlayRecord, input: &PrimaryInput) {
		let possession = self.context.possession;

		match input.result {
			PrimaryResult::Rush(_) => {
				play.yards = yards_gained(Some(self.context.spot), play.end_spot, possession);
			}
			PrimaryResult::Pass(result) => match result {
				PassResult::Complete => {
					play.yards = yards_gained(Some(self.context.spot), play.end_spot, possession);
				}
				PassResult::Sack => {
					// A sack is not a pass attempt; the yardage is its own stat.
					play.yards = 0;
				}
				PassResult::Fumble => {
					play.is_sack = true;
					play.is_sack_fumble = true;
					play.sack_yards = displacement(Some(self.context.spot), play.recovered_at);
				}
				PassResult::Intercepted => {
					play.intercepted_by = play.returner.clone();
					play.is_turnover = true;
					play.recovery_team = Some(possession.flip());
				}
				PassResult::Scramble => {
					// Scrambles are rushes by the passer in the books.
					play.play_type = Some(PlayType::Rush);
					play.is_scramble = true;
					if play.carrier.is_empty() {
						play.carrier = play.passer.clone();
					}
					play.yards = yards_gained(Some(self.context.spot), play.end_spot, possession);
				}
				PassResult::Incomplete => {}
			},
			PrimaryResult::Kickoff(result) => {
				let receiving = possession.flip();
				play.recovery_team = Some(receiving);
				let touchback_yard = match self.context.level {
					RuleLevel::Ncaa => 25,
					RuleLevel::HighSchool => 20,
				};
				match result {
					KickoffResult::Touchback => {
						play.is_touchback = true;
						play.end_spot = Spot::new(receiving, touchback_yard).ok();
					}
					KickoffResult::FairCatch | KickoffResult::Downed => {
						if let Some(kicked_to) = input.kicked_to {
							if kicked_to.side() == receiving && kicked_to.yard() <= touchback_yard {
								play.is_automatic_touchback = true;
								play.end_spot = Spot::new(receiving, touchback_yard).ok();
							} else {
								play.end_spot = Some(kicked_to);
							}
						}
						if result == KickoffResult::Downed && !play.tackler.is_empty() {
							play.downed_by = play.tackler.clone();
						}
					}
					KickoffResult::OutOfBounds => match input.oob_option.unwrap_or(KickoffOutOfBoundsOption::SpotBall) {
						KickoffOutOfBoundsOption::SpotBall => {
							play.end_spot = input.kicked_to;
						}
						KickoffOutOfBoundsOption::PenaltyRekick => {
							// The kick never resolves; no drive starts until the
							// rekick comes in as its own play.
							play.penalty = Some(PenaltyCode::KickoffOutOfBounds);
							play.penalty_team = Some(possession);
							play.recovery_team = None;
							play.end_spot = None;
						}
						KickoffOutOfBoundsOption::PenaltySpot => {
							play.penalty = Some(PenaltyCode::KickoffOutOfBounds);
							play.penalty_team = Some(possession);
							if let Some(kicked_to) = input.kicked_to {
								let enforcement = enforce(PenaltyCode::KickoffOutOfBounds, possession, self.context.level, receiving, kicked_to);
								play.end_spot = enforcement.resulting_spot;
								play.enforcement = Some(enforcement);
							}
						}
					},
					KickoffResult::Returned => {}
				}
			}
			PrimaryResult::Punt(result) => match result {
				PuntResult::Downed | PuntResult::FairCatch | PuntResult::OutOfBounds => {
					play.end_spot = input.punted_to.or(play.end_spot);
				}
				PuntResult::Blocked | PuntResult::Returned => {}
			},
			PrimaryResult::FieldGoal(_) | PrimaryResult::Game => {}
			PrimaryResult::Penalty(PenaltyResult::Accepted) => {
				// Seed a default enforcement when the operator skipped it.
				if play.enforcement.is_none() {
					if let Some(selection) = &input.penalty {
						let enforcement = enforce(selection.code, selection.team, self.context.level, possession, self.context.spot);
						play.end_spot = enforcement.resulting_spot;
						play.enforcement = Some(enforcement);
					}
				}
			}
			PrimaryResult::Penalty(_) => {}
		}
	}
}

/// What follows the primary stage, or `None` when the primary closes the
/// chain on its own.
fn after_primary(input: &PrimaryInput) -> Option<StageKind> {
	match input.result {
		PrimaryResult::Rush(result) => Some(match result {
			RushResult::Tackle => StageKind::Tackle,
			RushResult::Fumble => StageKind::Fumble,
			RushResult::OutOfBounds => StageKind::OutOfBounds,
			RushResult::EndOfPlay => StageKind::EndOfPlay,
		}),
		PrimaryResult::Pass(result) => Some(match result {
			PassResult::Complete => StageKind::Complete,
			PassResult::Incomplete => StageKind::Incomplete,
			PassResult::Sack => StageKind::Sack,
			PassResult::Fumble => StageKind::Fumble,
			PassResult::Intercepted => StageKind::Return,
			PassResult::Scramble => StageKind::Tackle,
		}),
		PrimaryResult::Punt(PuntResult::Returned) | PrimaryResult::Kickoff(KickoffResult::Returned) => Some(StageKind::Return),
		PrimaryResult::Punt(_) => None,
		PrimaryResult::Kickoff(_) => None,
		PrimaryResult::FieldGoal(FieldGoalResult::Blocked) => Some(StageKind::EndOfPlay),
		PrimaryResult::FieldGoal(_) => None,
		PrimaryResult::Penalty(PenaltyResult::Accepted) => Some(StageKind::PenaltyEnforcement),
		PrimaryResult::Penalty(_) => None,
		PrimaryResult::Game => None,
	}
}
