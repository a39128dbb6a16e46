use thiserror::Error;

/// Validation failures raised by the round engine and the gameplay session.
///
/// All of these are caller bugs rather than transient conditions, so nothing
/// retries them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("invalid word {0:?}: expected one or more letters A-Z")]
    InvalidWord(String),

    #[error("invalid guess {0:?}: expected a single letter A-Z")]
    InvalidGuess(String),

    #[error("the round has already ended")]
    RoundAlreadyEnded,

    #[error("max incorrect guesses must be at least 1")]
    InvalidMaxGuesses,

    #[error("no round is in progress")]
    NoActiveRound,
}
