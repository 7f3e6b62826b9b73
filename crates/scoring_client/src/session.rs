use crate::backend::{GameBackend, GameSnapshot, PlaySubmission};
use crate::error::BackendError;
use scoring_engine::engine::{apply_play, current_context, describe, next_context};
use scoring_engine::flow::FlowContext;
use scoring_engine::schema::{GameConfig, GameControl, GameState, PlayLog, PlayRecord};
use std::time::Duration;
use tracing::{debug, warn};

/// How often the scorer's edit lock is refreshed while a game is open.
pub const LOCK_REFRESH_INTERVAL: Duration = Duration::from_secs(2 * 60);

/// A live scoring session for one game: local authoritative-until-reconciled
/// state, the play log, and the backend connection.
///
/// Every submission resolves locally first; the backend response then
/// reconciles over it. A failed submission degrades to offline scoring
/// rather than losing the play.
pub struct GameSession<B: GameBackend> {
	backend: B,
	game_id: u64,
	user_id: String,
	config: GameConfig,
	state: GameState,
	log: PlayLog,
	online: bool,
}

impl<B: GameBackend> GameSession<B> {
	pub fn new(backend: B, game_id: u64, user_id: impl Into<String>) -> Self {
		GameSession {
			backend,
			game_id,
			user_id: user_id.into(),
			config: GameConfig::default(),
			state: GameState::default(),
			log: PlayLog::new(),
			online: false,
		}
	}

	pub fn with_config(mut self, config: GameConfig) -> Self {
		self.config = config;
		self
	}

	pub fn state(&self) -> &GameState {
		&self.state
	}

	pub fn config(&self) -> GameConfig {
		self.config
	}

	/// The pre-snap context a new play chain should be started with.
	pub fn flow_context(&self) -> FlowContext {
		FlowContext {
			possession: self.state.possession,
			level: self.config.level,
			spot: self.state.spot,
		}
	}

	pub fn log(&self) -> &PlayLog {
		&self.log
	}

	pub fn is_online(&self) -> bool {
		self.online
	}

	/// Pull the game down from the backend and adopt its state.
	pub async fn load(&mut self) -> Result<(), BackendError> {
		let snapshot = self.backend.load_game(self.game_id).await?;
		self.reconcile(snapshot);
		self.online = true;
		Ok(())
	}

	/// Score one resolved play. Returns the play's log number.
	pub async fn submit_play(&mut self, play: PlayRecord) -> u32 {
		let description = describe(&play);
		let submission = PlaySubmission {
			play_context: current_context(&self.state),
			new_context: next_context(&self.state, &play),
			description: description.clone(),
			play: play.clone(),
		};

		// The coin toss stays local until the field direction is settled;
		// the backend has no slot for a half-configured opening.
		let coin_toss = matches!(play.control, Some(GameControl::CoinToss { .. }));

		self.state = apply_play(&self.state, &play);
		let number = self.log.append(play, description);

		if coin_toss {
			debug!(game_id = self.game_id, "coin toss scored locally");
			return number;
		}

		if self.online {
			match self.backend.submit_play(self.game_id, &submission).await {
				Ok(snapshot) => self.reconcile(snapshot),
				Err(error) => {
					warn!(game_id = self.game_id, %error, "play submission failed; continuing offline");
					self.online = false;
				}
			}
		}

		number
	}

	/// Correct a logged play: the old entry is deleted on the backend and the
	/// replacement submitted as a new play. The log slot keeps its position
	/// but gets a fresh number.
	pub async fn replace_play(&mut self, index: usize, play: PlayRecord) -> Result<Option<u32>, BackendError> {
		let Some(old_number) = self.log.entries().get(index).map(|e| e.number) else {
			return Ok(None);
		};

		if self.online {
			if let Err(error) = self.backend.delete_play(self.game_id, old_number).await {
				warn!(game_id = self.game_id, play_number = old_number, %error, "delete before replace failed");
				self.online = false;
			}
		}

		let description = describe(&play);
		let submission = PlaySubmission {
			play_context: current_context(&self.state),
			new_context: next_context(&self.state, &play),
			description: description.clone(),
			play: play.clone(),
		};

		let number = self.log.replace(index, play, description);

		if self.online {
			match self.backend.submit_play(self.game_id, &submission).await {
				Ok(snapshot) => self.reconcile(snapshot),
				Err(error) => {
					warn!(game_id = self.game_id, %error, "replacement submission failed; continuing offline");
					self.online = false;
				}
			}
		}

		Ok(number)
	}

	/// Remove a logged play locally and on the backend.
	pub async fn delete_play(&mut self, index: usize) -> Result<bool, BackendError> {
		let Some(entry) = self.log.remove(index) else {
			return Ok(false);
		};
		if self.online {
			self.backend.delete_play(self.game_id, entry.number).await?;
		}
		Ok(true)
	}

	/// Fold a backend snapshot over local state. Fields the backend does not
	/// track, the coin toss and the attack direction, survive from the local
	/// copy.
	pub fn reconcile(&mut self, snapshot: GameSnapshot) {
		if let Some(mut server_state) = snapshot.game_state {
			if server_state.coin_toss.is_none() {
				server_state.coin_toss = self.state.coin_toss;
			}
			if server_state.attack_direction.is_none() {
				server_state.attack_direction = self.state.attack_direction;
			}
			self.state = server_state;
		}
		if let Some(log) = snapshot.play_log {
			self.log = log;
		}
		if let Some(stats) = snapshot.stats {
			self.state.team_stats = stats;
		}
	}

	/// Refresh the edit lock once. Session-ending failures surface to the
	/// caller; the periodic loop just logs them.
	pub async fn refresh_lock(&self) -> Result<(), BackendError> {
		self.backend.refresh_lock(self.game_id, &self.user_id).await
	}

	/// Keep the edit lock alive until the task is dropped.
	pub async fn run_lock_refresh(&self) {
		let mut interval = tokio::time::interval(LOCK_REFRESH_INTERVAL);
		interval.tick().await;
		loop {
			interval.tick().await;
			if let Err(error) = self.refresh_lock().await {
				warn!(game_id = self.game_id, %error, "lock refresh failed");
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use scoring_engine::schema::{GamePhase, PlayType, Side, Spot, TerminalResult};
	use std::sync::atomic::{AtomicBool, Ordering};
	use std::sync::Mutex;

	#[derive(Default)]
	struct RecordingBackend {
		fail: AtomicBool,
		submissions: Mutex<Vec<PlaySubmission>>,
		deletions: Mutex<Vec<u32>>,
	}

	#[async_trait]
	impl GameBackend for &RecordingBackend {
		async fn load_game(&self, _game_id: u64) -> Result<GameSnapshot, BackendError> {
			Ok(GameSnapshot::default())
		}

		async fn submit_play(&self, _game_id: u64, submission: &PlaySubmission) -> Result<GameSnapshot, BackendError> {
			if self.fail.load(Ordering::SeqCst) {
				return Err(BackendError::transport_error("connection refused"));
			}
			self.submissions.lock().unwrap().push(submission.clone());
			Ok(GameSnapshot::default())
		}

		async fn delete_play(&self, _game_id: u64, play_number: u32) -> Result<(), BackendError> {
			if self.fail.load(Ordering::SeqCst) {
				return Err(BackendError::transport_error("connection refused"));
			}
			self.deletions.lock().unwrap().push(play_number);
			Ok(())
		}

		async fn refresh_lock(&self, _game_id: u64, _user_id: &str) -> Result<(), BackendError> {
			Ok(())
		}
	}

	fn rush_play(spot: &str) -> PlayRecord {
		PlayRecord {
			play_type: Some(PlayType::Rush),
			result_code: Some('T'),
			terminal_result: Some(TerminalResult::Tackle),
			carrier: "22".to_string(),
			yards: 6,
			end_spot: Spot::parse_opt(spot),
			..PlayRecord::default()
		}
	}

	async fn session_in_drive(backend: &RecordingBackend) -> GameSession<&RecordingBackend> {
		let mut session = GameSession::new(backend, 7, "scorer-1");
		session.load().await.unwrap();
		session.state.phase = GamePhase::Drive;
		session.state.down = 2;
		session.state.distance = 8;
		session.state.spot = "H35".parse().unwrap();
		session
	}

	#[tokio::test]
	async fn test_submit_records_both_contexts() {
		let backend = RecordingBackend::default();
		let mut session = session_in_drive(&backend).await;

		let number = session.submit_play(rush_play("H41")).await;
		assert_eq!(number, 1);

		let submissions = backend.submissions.lock().unwrap();
		assert_eq!(submissions.len(), 1);
		assert_eq!(submissions[0].play_context, "H,2,8,H35");
		assert_eq!(submissions[0].new_context, "H,3,2,H41");
		assert_eq!(submissions[0].description, "22 rush for 6 yards at H41");

		assert_eq!((session.state.down, session.state.distance), (3, 2));
		assert_eq!(session.log.len(), 1);
	}

	#[tokio::test]
	async fn test_offline_fallback_keeps_scoring() {
		let backend = RecordingBackend::default();
		let mut session = session_in_drive(&backend).await;
		backend.fail.store(true, Ordering::SeqCst);

		let number = session.submit_play(rush_play("H41")).await;
		assert_eq!(number, 1);
		assert!(!session.is_online());
		assert!(backend.submissions.lock().unwrap().is_empty());

		// The play still landed locally.
		assert_eq!((session.state.down, session.state.distance), (3, 2));
		assert_eq!(session.log.len(), 1);

		// Once offline, later submissions stay local without retrying.
		session.submit_play(rush_play("H44")).await;
		assert_eq!(session.log.len(), 2);
		assert!(backend.submissions.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_coin_toss_stays_local() {
		let backend = RecordingBackend::default();
		let mut session = session_in_drive(&backend).await;

		let play = PlayRecord {
			play_type: Some(PlayType::Game),
			result_code: Some('G'),
			control: Some(GameControl::CoinToss {
				winner: Side::Home,
				deferred: false,
				receiving: Side::Home,
			}),
			..PlayRecord::default()
		};
		session.submit_play(play).await;

		assert!(backend.submissions.lock().unwrap().is_empty());
		assert_eq!(session.state.coin_toss.map(|t| t.winner), Some(Side::Home));
		assert_eq!(session.log.len(), 1);
	}

	#[tokio::test]
	async fn test_replace_play_deletes_then_resubmits() {
		let backend = RecordingBackend::default();
		let mut session = session_in_drive(&backend).await;

		session.submit_play(rush_play("H41")).await;
		let replacement = session.replace_play(0, rush_play("H43")).await.unwrap();
		assert_eq!(replacement, Some(2));

		assert_eq!(*backend.deletions.lock().unwrap(), vec![1]);
		assert_eq!(backend.submissions.lock().unwrap().len(), 2);
		assert_eq!(session.log.entries()[0].number, 2);
	}

	#[tokio::test]
	async fn test_chain_resolves_and_submits() {
		use scoring_engine::flow::{Advance, PrimaryInput, Sequencer, StageData, TackleDetail};
		use scoring_engine::schema::{PrimaryResult, RushResult};

		let backend = RecordingBackend::default();
		let mut session = session_in_drive(&backend).await;

		let mut seq = Sequencer::new(session.flow_context());
		let mut input = PrimaryInput::new(PlayType::Rush, PrimaryResult::Rush(RushResult::Tackle));
		input.carrier = "22".to_string();
		seq.begin(input).unwrap();

		let Advance::Complete(play) = seq
			.advance(StageData::Tackle(TackleDetail {
				tackler: "54".to_string(),
				assist_tackler: String::new(),
				spot: Spot::parse_opt("H41"),
			}))
			.unwrap()
		else {
			panic!("chain should be complete");
		};

		session.submit_play(*play).await;
		assert_eq!((session.state.down, session.state.distance), (3, 2));
		assert_eq!(session.state.spot.to_string(), "H41");

		let submissions = backend.submissions.lock().unwrap();
		assert_eq!(submissions[0].description, "22 rush for 6 yards (tackled by 54) at H41");
		assert_eq!(submissions[0].new_context, "H,3,2,H41");
	}

	#[tokio::test]
	async fn test_reconcile_preserves_local_only_fields() {
		let backend = RecordingBackend::default();
		let mut session = session_in_drive(&backend).await;
		session.state.coin_toss = Some(scoring_engine::schema::CoinToss {
			winner: Side::Visitor,
			deferred: true,
			receiving: Side::Home,
		});

		let server_state = GameState { down: 3, ..GameState::default() };
		session.reconcile(GameSnapshot {
			game_state: Some(server_state),
			play_log: None,
			stats: None,
		});

		assert_eq!(session.state.down, 3);
		assert_eq!(session.state.coin_toss.map(|t| t.winner), Some(Side::Visitor));
	}
}
