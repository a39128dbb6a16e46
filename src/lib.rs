pub mod core {
	pub mod engine;
	pub mod game;
	pub mod menu;
	pub mod platform;
	pub mod renderer;
	pub mod theme;
}

pub mod cli;
pub mod config;
pub mod games;

// Re-export for convenience
pub use crate::config::HangmanConfig;
pub use crate::core::game::{Scene, SceneChange};
pub use crate::core::platform::{ChannelReporter, LocalPlatform, NoopReporter, ScoreReporter};
pub use crate::games::hangman::{
    GuessOutcome, GuessReport, Round, RoundError, RoundSettings, RoundStatus, Session,
};
