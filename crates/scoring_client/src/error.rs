use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
	#[error("Backend returned HTTP status {status}: {body}")]
	Http { status: u16, body: String },

	#[error("Transport failure: {0}")]
	Transport(String),

	#[error("Game {game_id} is locked by another scorer")]
	Locked { game_id: u64 },

	#[error("Game {game_id} not found")]
	NotFound { game_id: u64 },

	#[error("Payload error: {source}")]
	Payload {
		#[from]
		source: serde_json::Error,
	},
}

impl BackendError {
	pub fn http_error(status: u16, body: &str) -> Self {
		BackendError::Http {
			status,
			body: body.to_string(),
		}
	}

	pub fn transport_error(message: &str) -> Self {
		BackendError::Transport(message.to_string())
	}
}
