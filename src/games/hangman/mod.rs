//! Hangman: a pure round engine plus its terminal scene.
pub mod error;
pub mod renderer;
pub mod round;
pub mod scene;
pub mod score;
pub mod session;
pub mod word;
pub mod words;

pub use error::RoundError;
pub use renderer::HangmanRenderer;
pub use round::{GuessOutcome, GuessReport, Round, RoundSettings, RoundStatus, RoundSummary};
pub use scene::GameplayScene;
pub use score::{Achievements, Score, ScoreRules};
pub use session::{ReportTargets, Session};
pub use word::{parse_guess, SecretWord};
pub use words::{FixedWord, WordList, WordListError, WordProvider};
