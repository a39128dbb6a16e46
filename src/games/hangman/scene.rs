use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use tracing::warn;

use crate::core::game::{Scene, SceneChange};
use crate::core::menu::MenuStatus;
use crate::core::platform::ScoreReporter;
use crate::core::renderer::GameRenderer;
use crate::core::theme::Theme;

use super::error::RoundError;
use super::renderer::{HangmanRenderer, RoundScreen};
use super::round::{GuessOutcome, RoundStatus};
use super::session::Session;
use super::words::WordProvider;

pub const RULES: [&str; 3] = [
    "Guess the hidden word letter by letter",
    "Each incorrect guess adds to the hangman",
    "Solve the word before the hangman is complete",
];

impl<W: WordProvider, R: ScoreReporter> MenuStatus for Session<W, R> {
    fn title(&self) -> &str {
        "HANGMAN"
    }

    fn status_line(&self) -> Option<String> {
        if !self.reporter().is_available() {
            return Some("Offline: scores are not recorded".into());
        }
        self.best_score().map(|best| format!("Best score: {best}"))
    }

    fn rules(&self) -> &[&str] {
        &RULES
    }
}

/// Gameplay screen: turns key presses into guesses on the session's round.
#[derive(Debug, Default)]
pub struct GameplayScene {
    message: String,
    renderer: HangmanRenderer,
}

impl GameplayScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn start<W: WordProvider, R: ScoreReporter>(&mut self, session: &mut Session<W, R>) {
        self.message = match session.begin_round() {
            Ok(round) => format!("New word: {} letters. Good luck!", round.secret().len()),
            Err(e) => {
                warn!(error = %e, "could not start round");
                format!("Could not start a round: {e}")
            }
        };
    }

    fn guess<W: WordProvider, R: ScoreReporter>(&mut self, letter: char, session: &mut Session<W, R>) {
        self.message = match session.guess(letter) {
            Ok(report) => match (report.outcome, report.status) {
                (_, RoundStatus::Won) => format!("🎉 '{}' completes the word!", report.letter),
                (_, RoundStatus::Lost) => format!("💀 '{}' was your last miss.", report.letter),
                (GuessOutcome::Correct, _) => format!("Good guess! '{}' is in the word.", report.letter),
                (GuessOutcome::Incorrect, _) => format!("Sorry, '{}' is not in the word.", report.letter),
                (GuessOutcome::AlreadyGuessed, _) => format!("Letter '{}' already guessed.", report.letter),
            },
            Err(RoundError::InvalidGuess(_)) => "Please guess a letter A-Z".into(),
            Err(e) => e.to_string(),
        };
    }
}

impl<W: WordProvider, R: ScoreReporter> Scene<Session<W, R>> for GameplayScene {
    fn on_enter(&mut self, session: &mut Session<W, R>) {
        self.start(session);
    }

    fn on_leave(&mut self, session: &mut Session<W, R>) {
        session.abandon_round();
        self.message.clear();
    }

    fn handle_key(&mut self, key: KeyEvent, session: &mut Session<W, R>) -> SceneChange {
        if key.code == KeyCode::Esc {
            return SceneChange::Menu;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return SceneChange::Stay;
        }

        let ended = session.round().map_or(true, |r| r.status().is_terminal());
        match key.code {
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') if ended => {
                self.start(session);
            }
            KeyCode::Char(c) if !ended => self.guess(c, session),
            _ => {}
        }
        SceneChange::Stay
    }

    fn render(&self, frame: &mut Frame, session: &Session<W, R>, theme: &Theme) {
        let screen = RoundScreen {
            round: session.round(),
            message: &self.message,
        };
        self.renderer.render(frame, &screen, theme);
    }
}
