//! Local social-gaming platform: sign-in, leaderboards and achievements.
///
/// Games only see the [`ScoreReporter`] seam. Reports travel over a channel
/// to a background task, so reporting never blocks a frame and a failed
/// report never reaches game state.
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Outbound interface for score and achievement events.
pub trait ScoreReporter {
    /// Whether reports would be accepted (signed in, platform reachable).
    fn is_available(&self) -> bool;

    fn report_score(&self, score: u32, board_id: &str);

    fn report_achievement_progress(&self, id: &str, percent: f64);

    fn best_score(&self, _board_id: &str) -> Option<u32> {
        None
    }
}

impl<R: ScoreReporter + ?Sized> ScoreReporter for Arc<R> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn report_score(&self, score: u32, board_id: &str) {
        (**self).report_score(score, board_id)
    }

    fn report_achievement_progress(&self, id: &str, percent: f64) {
        (**self).report_achievement_progress(id, percent)
    }

    fn best_score(&self, board_id: &str) -> Option<u32> {
        (**self).best_score(board_id)
    }
}

/// Reporter for offline play. Never available, drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ScoreReporter for NoopReporter {
    fn is_available(&self) -> bool {
        false
    }

    fn report_score(&self, _score: u32, _board_id: &str) {}

    fn report_achievement_progress(&self, _id: &str, _percent: f64) {}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlatformRequest {
    SubmitScore { board_id: String, score: u32 },
    ReportAchievement { id: String, percent: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlatformError {
    #[error("player not authenticated")]
    NotAuthenticated,

    #[error("achievement {0} already completed")]
    AchievementCompleted(String),

    #[error("platform task has shut down")]
    Closed,
}

/// Leaderboards and achievement progress for the signed-in player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformState {
    leaderboards: HashMap<String, Vec<u32>>,
    achievements: HashMap<String, f64>,
}

impl PlatformState {
    pub fn apply(&mut self, request: PlatformRequest) -> Result<(), PlatformError> {
        match request {
            PlatformRequest::SubmitScore { board_id, score } => {
                let board = self.leaderboards.entry(board_id).or_default();
                let pos = board.partition_point(|&s| s >= score);
                board.insert(pos, score);
                Ok(())
            }
            PlatformRequest::ReportAchievement { id, percent } => {
                let current = self.achievements.get(&id).copied().unwrap_or(0.0);
                if current >= 100.0 {
                    return Err(PlatformError::AchievementCompleted(id));
                }
                let percent = percent.clamp(0.0, 100.0);
                self.achievements.insert(id, current.max(percent));
                Ok(())
            }
        }
    }

    pub fn best_score(&self, board_id: &str) -> Option<u32> {
        self.leaderboards.get(board_id).and_then(|b| b.first().copied())
    }

    /// Scores on a board, best first.
    pub fn scores(&self, board_id: &str) -> &[u32] {
        self.leaderboards
            .get(board_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn achievement_progress(&self, id: &str) -> f64 {
        self.achievements.get(id).copied().unwrap_or(0.0)
    }
}

pub type SharedPlatformState = Arc<RwLock<PlatformState>>;

/// In-process stand-in for an online games service.
#[derive(Debug, Clone)]
pub struct LocalPlatform {
    player: Option<String>,
    state: SharedPlatformState,
}

impl LocalPlatform {
    /// Signs a player in. `None` means the player declined; the platform
    /// then refuses every report.
    pub fn sign_in(player: Option<String>) -> Self {
        match &player {
            Some(name) => info!(player = %name, "platform: player authenticated"),
            None => info!("platform: player declined to sign in"),
        }
        Self {
            player,
            state: SharedPlatformState::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.player.is_some()
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    pub fn state(&self) -> SharedPlatformState {
        Arc::clone(&self.state)
    }

    /// Starts the platform task. Must be called inside a tokio runtime.
    pub fn spawn(self) -> (ChannelReporter, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let reporter = ChannelReporter {
            tx,
            authenticated: self.is_authenticated(),
            state: self.state(),
        };
        let handle = tokio::spawn(self.serve(rx));
        (reporter, handle)
    }

    async fn serve(self, mut rx: mpsc::UnboundedReceiver<PlatformRequest>) {
        while let Some(request) = rx.recv().await {
            match self.handle(request.clone()).await {
                Ok(()) => debug!(?request, "platform: request applied"),
                Err(PlatformError::AchievementCompleted(id)) => {
                    debug!(%id, "platform: achievement already completed")
                }
                Err(e) => warn!(error = %e, ?request, "platform: request dropped"),
            }
        }
        debug!("platform: all reporters dropped, shutting down");
    }

    async fn handle(&self, request: PlatformRequest) -> Result<(), PlatformError> {
        if !self.is_authenticated() {
            return Err(PlatformError::NotAuthenticated);
        }
        self.state.write().await.apply(request)
    }
}

/// Fire-and-forget reporter backed by the platform task's channel.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<PlatformRequest>,
    authenticated: bool,
    state: SharedPlatformState,
}

impl ChannelReporter {
    fn send(&self, request: PlatformRequest) {
        if let Err(e) = self.tx.send(request) {
            warn!(error = %PlatformError::Closed, request = ?e.0, "platform: report lost");
        }
    }
}

impl ScoreReporter for ChannelReporter {
    fn is_available(&self) -> bool {
        self.authenticated && !self.tx.is_closed()
    }

    fn report_score(&self, score: u32, board_id: &str) {
        self.send(PlatformRequest::SubmitScore {
            board_id: board_id.to_string(),
            score,
        });
    }

    fn report_achievement_progress(&self, id: &str, percent: f64) {
        self.send(PlatformRequest::ReportAchievement {
            id: id.to_string(),
            percent,
        });
    }

    fn best_score(&self, board_id: &str) -> Option<u32> {
        // A frame must never wait on the platform; a busy lock reads as unknown.
        self.state.try_read().ok()?.best_score(board_id)
    }
}
