use std::time::Instant;

use tracing::{debug, info};

use crate::core::platform::ScoreReporter;

use super::error::RoundError;
use super::round::{GuessReport, Round, RoundSettings, RoundStatus};
use super::words::WordProvider;

/// Where wins get reported on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTargets {
    pub leaderboard_id: String,
    pub fast_solve_achievement: String,
    pub perfect_solve_achievement: String,
}

impl Default for ReportTargets {
    fn default() -> Self {
        Self {
            leaderboard_id: "hangman.best_score".into(),
            fast_solve_achievement: "hangman.fast_solve".into(),
            perfect_solve_achievement: "hangman.perfect_solve".into(),
        }
    }
}

/// Gameplay context: the active round plus the collaborators it needs.
///
/// At most one round exists at a time. Starting a new one discards the old
/// one; nothing carries over between rounds.
pub struct Session<W, R> {
    words: W,
    reporter: R,
    settings: RoundSettings,
    targets: ReportTargets,
    round: Option<Round>,
}

impl<W: WordProvider, R: ScoreReporter> Session<W, R> {
    pub fn new(words: W, reporter: R, settings: RoundSettings, targets: ReportTargets) -> Self {
        Self {
            words,
            reporter,
            settings,
            targets,
            round: None,
        }
    }

    pub fn begin_round(&mut self) -> Result<&Round, RoundError> {
        self.begin_round_at(Instant::now())
    }

    pub fn begin_round_at(&mut self, now: Instant) -> Result<&Round, RoundError> {
        let word = self.words.next_word();
        let round = Round::start_at(word, self.settings, now)?;
        Ok(&*self.round.insert(round))
    }

    pub fn abandon_round(&mut self) {
        if let Some(round) = self.round.take() {
            debug!(status = %round.status(), "round discarded");
        }
    }

    pub fn guess(&mut self, letter: char) -> Result<GuessReport, RoundError> {
        self.guess_at(letter, Instant::now())
    }

    pub fn guess_at(&mut self, letter: char, now: Instant) -> Result<GuessReport, RoundError> {
        let round = self.round.as_mut().ok_or(RoundError::NoActiveRound)?;
        let report = round.submit_guess_at(letter, now)?;
        // A guess into a finished round errors above, so this fires once.
        if report.status == RoundStatus::Won {
            self.report_win();
        }
        Ok(report)
    }

    fn report_win(&self) {
        let Some(round) = &self.round else { return };
        let Some(score) = round.score() else { return };

        if !self.reporter.is_available() {
            debug!("reporter unavailable, win not reported");
            return;
        }

        self.reporter
            .report_score(score.leaderboard_value(), &self.targets.leaderboard_id);

        let earned = score.achievements();
        if earned.fast_solve {
            self.reporter
                .report_achievement_progress(&self.targets.fast_solve_achievement, 100.0);
        }
        if earned.perfect_solve {
            self.reporter
                .report_achievement_progress(&self.targets.perfect_solve_achievement, 100.0);
        }
        info!(
            score = score.total,
            fast_solve = earned.fast_solve,
            perfect_solve = earned.perfect_solve,
            "win reported"
        );
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn settings(&self) -> &RoundSettings {
        &self.settings
    }

    pub fn targets(&self) -> &ReportTargets {
        &self.targets
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn best_score(&self) -> Option<u32> {
        self.reporter.best_score(&self.targets.leaderboard_id)
    }
}
