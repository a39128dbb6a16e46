use std::collections::BTreeSet;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::RoundError;
use super::score::{Achievements, Score, ScoreRules};
use super::word::{normalize_guess, SecretWord};

/// Symbol shown in place of a letter that has not been guessed yet.
pub const PLACEHOLDER: char = '_';

/// Separator placed between the symbols of a masked word.
pub const MASK_SEPARATOR: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RoundStatus::InProgress)
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoundStatus::InProgress => "in progress",
            RoundStatus::Won => "won",
            RoundStatus::Lost => "lost",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
    AlreadyGuessed,
}

/// Result of an accepted guess: what happened and where the round now stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessReport {
    pub letter: char,
    pub outcome: GuessOutcome,
    pub status: RoundStatus,
    pub masked: String,
}

/// Per-round configuration fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSettings {
    pub max_incorrect_guesses: u8,
    pub scoring: ScoreRules,
}

impl RoundSettings {
    pub const DEFAULT_MAX_INCORRECT_GUESSES: u8 = 6;

    pub fn with_max_incorrect_guesses(max_incorrect_guesses: u8) -> Self {
        Self {
            max_incorrect_guesses,
            ..Self::default()
        }
    }
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            max_incorrect_guesses: Self::DEFAULT_MAX_INCORRECT_GUESSES,
            scoring: ScoreRules::default(),
        }
    }
}

/// One play-through of Hangman, from secret word to won or lost.
///
/// Status is never stored; it is derived from the guessed letters and the
/// miss counter every time it is asked for. The only values written at the
/// terminal transition are the end instant and, for a win, the score.
#[derive(Debug, Clone)]
pub struct Round {
    secret: SecretWord,
    guessed: BTreeSet<char>,
    incorrect: u8,
    settings: RoundSettings,
    started_at: Instant,
    ended_at: Option<Instant>,
    score: Option<Score>,
}

impl Round {
    pub fn start(word: &str, max_incorrect_guesses: u8) -> Result<Self, RoundError> {
        let secret = SecretWord::new(word)?;
        Self::start_at(
            secret,
            RoundSettings::with_max_incorrect_guesses(max_incorrect_guesses),
            Instant::now(),
        )
    }

    pub fn start_at(
        secret: SecretWord,
        settings: RoundSettings,
        started_at: Instant,
    ) -> Result<Self, RoundError> {
        if settings.max_incorrect_guesses == 0 {
            return Err(RoundError::InvalidMaxGuesses);
        }
        info!(
            letters = secret.len(),
            max_incorrect = settings.max_incorrect_guesses,
            "round started"
        );
        Ok(Self {
            secret,
            guessed: BTreeSet::new(),
            incorrect: 0,
            settings,
            started_at,
            ended_at: None,
            score: None,
        })
    }

    pub fn submit_guess(&mut self, letter: char) -> Result<GuessReport, RoundError> {
        self.submit_guess_at(letter, Instant::now())
    }

    /// Applies a guess as of `now`. A rejected guess leaves the round untouched.
    pub fn submit_guess_at(&mut self, letter: char, now: Instant) -> Result<GuessReport, RoundError> {
        if self.status().is_terminal() {
            debug!(%letter, "guess after round end rejected");
            return Err(RoundError::RoundAlreadyEnded);
        }
        let letter = normalize_guess(letter)?;

        if !self.guessed.insert(letter) {
            return Ok(self.report(letter, GuessOutcome::AlreadyGuessed));
        }

        let outcome = if self.secret.contains(letter) {
            GuessOutcome::Correct
        } else {
            self.incorrect += 1;
            GuessOutcome::Incorrect
        };
        debug!(%letter, ?outcome, incorrect = self.incorrect, "guess applied");

        let report = self.report(letter, outcome);
        if report.status.is_terminal() {
            self.finish(report.status, now);
        }
        Ok(report)
    }

    fn report(&self, letter: char, outcome: GuessOutcome) -> GuessReport {
        GuessReport {
            letter,
            outcome,
            status: self.status(),
            masked: self.masked_word(),
        }
    }

    fn finish(&mut self, status: RoundStatus, now: Instant) {
        self.ended_at = Some(now);
        let elapsed = self.elapsed();
        if status == RoundStatus::Won {
            let score = Score::compute(
                &self.settings.scoring,
                self.secret.len(),
                elapsed,
                self.incorrect,
            );
            info!(total = score.total, elapsed_ms = score.elapsed_ms, "round won");
            self.score = Some(score);
        } else {
            info!(elapsed_ms = elapsed.as_millis() as u64, "round lost");
        }
    }

    pub fn status(&self) -> RoundStatus {
        if self.secret.letters().all(|c| self.guessed.contains(&c)) {
            RoundStatus::Won
        } else if self.incorrect >= self.settings.max_incorrect_guesses {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        }
    }

    /// Masked display form, e.g. `H _ N G _ _ N`. One symbol per letter of
    /// the secret word, separated by [`MASK_SEPARATOR`], no trailing separator.
    pub fn masked_word(&self) -> String {
        let mut masked = String::with_capacity(self.secret.len() * 2);
        for (i, c) in self.secret.letters().enumerate() {
            if i > 0 {
                masked.push(MASK_SEPARATOR);
            }
            masked.push(if self.guessed.contains(&c) { c } else { PLACEHOLDER });
        }
        masked
    }

    pub fn remaining_guesses(&self) -> u8 {
        self.settings
            .max_incorrect_guesses
            .saturating_sub(self.incorrect)
    }

    pub fn incorrect_guesses(&self) -> u8 {
        self.incorrect
    }

    pub fn max_incorrect_guesses(&self) -> u8 {
        self.settings.max_incorrect_guesses
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn wrong_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.guessed
            .iter()
            .copied()
            .filter(|c| !self.secret.contains(*c))
    }

    pub fn correct_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.guessed
            .iter()
            .copied()
            .filter(|c| self.secret.contains(*c))
    }

    pub fn secret(&self) -> &SecretWord {
        &self.secret
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<Instant> {
        self.ended_at
    }

    /// Time from start to the terminal guess, or to now while in progress.
    pub fn elapsed(&self) -> Duration {
        let end = self.ended_at.unwrap_or_else(Instant::now);
        end.saturating_duration_since(self.started_at)
    }

    /// Score of a won round, frozen at the winning guess.
    pub fn score(&self) -> Option<&Score> {
        self.score.as_ref()
    }

    pub fn achievements(&self) -> Option<Achievements> {
        self.score.as_ref().map(Score::achievements)
    }

    pub fn summary(&self) -> RoundSummary {
        let status = self.status();
        RoundSummary {
            masked: self.masked_word(),
            word: status.is_terminal().then(|| self.secret.to_string()),
            guessed: self.guessed.iter().copied().collect(),
            incorrect_guesses: self.incorrect,
            remaining_guesses: self.remaining_guesses(),
            status,
            score: self.score,
            achievements: self.achievements(),
        }
    }
}

/// Serializable snapshot of a round. The word is only revealed once the
/// round is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub masked: String,
    pub word: Option<String>,
    pub guessed: Vec<char>,
    pub incorrect_guesses: u8,
    pub remaining_guesses: u8,
    pub status: RoundStatus,
    pub score: Option<Score>,
    pub achievements: Option<Achievements>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(word: &str, max: u8) -> Round {
        Round::start(word, max).unwrap()
    }

    #[test]
    fn fresh_round_is_fully_masked() {
        let r = round("cat", 6);
        assert_eq!(r.status(), RoundStatus::InProgress);
        assert_eq!(r.masked_word(), "_ _ _");
        assert_eq!(r.remaining_guesses(), 6);
        assert!(r.guessed_letters().is_empty());
        assert!(r.score().is_none());
    }

    #[test]
    fn zero_max_guesses_rejected() {
        assert_eq!(Round::start("cat", 0).unwrap_err(), RoundError::InvalidMaxGuesses);
    }

    #[test]
    fn empty_word_rejected() {
        assert!(matches!(Round::start("", 6), Err(RoundError::InvalidWord(_))));
    }

    #[test]
    fn correct_guess_reveals_every_position() {
        let mut r = round("banana", 6);
        let report = r.submit_guess('a').unwrap();
        assert_eq!(report.letter, 'A');
        assert_eq!(report.outcome, GuessOutcome::Correct);
        assert_eq!(report.masked, "_ A _ A _ A");
        assert_eq!(r.incorrect_guesses(), 0);
    }

    #[test]
    fn incorrect_guess_costs_one() {
        let mut r = round("cat", 6);
        let report = r.submit_guess('z').unwrap();
        assert_eq!(report.outcome, GuessOutcome::Incorrect);
        assert_eq!(r.remaining_guesses(), 5);
        assert_eq!(r.wrong_letters().collect::<Vec<_>>(), vec!['Z']);
    }

    #[test]
    fn repeated_guess_is_idempotent() {
        let mut r = round("cat", 6);
        r.submit_guess('z').unwrap();
        let again = r.submit_guess('Z').unwrap();
        assert_eq!(again.outcome, GuessOutcome::AlreadyGuessed);
        assert_eq!(r.incorrect_guesses(), 1);
        assert_eq!(r.guessed_letters().len(), 1);
    }

    #[test]
    fn invalid_guess_leaves_round_untouched() {
        let mut r = round("cat", 6);
        assert_eq!(r.submit_guess('3'), Err(RoundError::InvalidGuess("3".into())));
        assert!(r.guessed_letters().is_empty());
        assert_eq!(r.incorrect_guesses(), 0);
    }

    #[test]
    fn ended_round_rejects_guesses() {
        let mut r = round("a", 1);
        r.submit_guess('a').unwrap();
        assert_eq!(r.status(), RoundStatus::Won);
        assert_eq!(r.submit_guess('b'), Err(RoundError::RoundAlreadyEnded));
        assert_eq!(r.submit_guess('a'), Err(RoundError::RoundAlreadyEnded));
        assert_eq!(r.guessed_letters().len(), 1);
    }

    #[test]
    fn score_is_frozen_at_winning_guess() {
        let start = Instant::now();
        let secret = SecretWord::new("ab").unwrap();
        let mut r = Round::start_at(secret, RoundSettings::default(), start).unwrap();
        r.submit_guess_at('a', start + Duration::from_secs(2)).unwrap();
        r.submit_guess_at('b', start + Duration::from_secs(5)).unwrap();

        let first = *r.score().unwrap();
        assert_eq!(first.total, 1150);
        assert_eq!(r.ended_at(), Some(start + Duration::from_secs(5)));
        assert_eq!(r.elapsed(), Duration::from_secs(5));
        assert_eq!(r.score().copied(), Some(first));
    }

    #[test]
    fn lost_round_has_no_score() {
        let start = Instant::now();
        let secret = SecretWord::new("ab").unwrap();
        let settings = RoundSettings::with_max_incorrect_guesses(1);
        let mut r = Round::start_at(secret, settings, start).unwrap();
        r.submit_guess_at('x', start + Duration::from_secs(1)).unwrap();
        assert_eq!(r.status(), RoundStatus::Lost);
        assert!(r.score().is_none());
        assert!(r.achievements().is_none());
        assert_eq!(r.elapsed(), Duration::from_secs(1));
    }

    #[test]
    fn summary_hides_word_until_the_end() {
        let mut r = round("ox", 6);
        r.submit_guess('o').unwrap();
        let live = r.summary();
        assert_eq!(live.word, None);
        assert_eq!(live.masked, "O _");

        r.submit_guess('x').unwrap();
        let done = r.summary();
        assert_eq!(done.word.as_deref(), Some("OX"));
        assert_eq!(done.status, RoundStatus::Won);
        assert!(done.score.is_some());
    }
}
