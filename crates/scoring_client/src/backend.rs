use crate::error::BackendError;
use async_trait::async_trait;
use scoring_engine::schema::{GameState, PlayLog, TeamPair, TeamStats};
use scoring_engine::PlayRecord;
use serde::{Deserialize, Serialize};

/// One play as the backend stores it: the record itself plus both sides of
/// the situation transition, serialized as `possession,down,distance,spot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaySubmission {
	pub play: PlayRecord,
	pub description: String,
	pub play_context: String,
	pub new_context: String,
}

/// What the backend hands back. Fields it did not recompute stay `None` and
/// the local copy is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSnapshot {
	pub game_state: Option<GameState>,
	pub play_log: Option<PlayLog>,
	pub stats: Option<TeamPair<TeamStats>>,
}

/// The scoring backend. Implementations own transport; the session layer
/// owns optimistic state and fallback.
#[async_trait]
pub trait GameBackend: Send + Sync {
	async fn load_game(&self, game_id: u64) -> Result<GameSnapshot, BackendError>;

	async fn submit_play(&self, game_id: u64, submission: &PlaySubmission) -> Result<GameSnapshot, BackendError>;

	async fn delete_play(&self, game_id: u64, play_number: u32) -> Result<(), BackendError>;

	async fn refresh_lock(&self, game_id: u64, user_id: &str) -> Result<(), BackendError>;
}
