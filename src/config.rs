use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::theme::ThemeMode;
use crate::games::hangman::{
    FixedWord, ReportTargets, RoundSettings, ScoreRules, SecretWord, WordList, WordProvider,
};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "hangman.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Signed-in player; unset means play offline.
    pub player: Option<String>,
    pub leaderboard_id: String,
    pub fast_solve_achievement: String,
    pub perfect_solve_achievement: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        let targets = ReportTargets::default();
        Self {
            player: None,
            leaderboard_id: targets.leaderboard_id,
            fast_solve_achievement: targets.fast_solve_achievement,
            perfect_solve_achievement: targets.perfect_solve_achievement,
        }
    }
}

impl PlatformConfig {
    pub fn targets(&self) -> ReportTargets {
        ReportTargets {
            leaderboard_id: self.leaderboard_id.clone(),
            fast_solve_achievement: self.fast_solve_achievement.clone(),
            perfect_solve_achievement: self.perfect_solve_achievement.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HangmanConfig {
    pub max_incorrect_guesses: u8,
    /// Play every round with this word.
    pub word: Option<String>,
    /// Newline-separated word list; ignored when `word` is set.
    pub word_list: Option<PathBuf>,
    pub theme: ThemeMode,
    pub tick_ms: u64,
    pub scoring: ScoreRules,
    pub platform: PlatformConfig,
}

impl HangmanConfig {
    pub const DEFAULT_TICK_MS: u64 = 33;

    /// Loads `path`, or `hangman.toml` from the working directory if present,
    /// or falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !candidate.exists() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&raw)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_incorrect_guesses == 0 {
            bail!("max_incorrect_guesses must be at least 1");
        }
        if self.tick_ms == 0 {
            bail!("tick_ms must be at least 1");
        }
        if let Some(word) = &self.word {
            SecretWord::new(word).context("invalid `word`")?;
        }
        Ok(())
    }

    pub fn round_settings(&self) -> RoundSettings {
        RoundSettings {
            max_incorrect_guesses: self.max_incorrect_guesses,
            scoring: self.scoring,
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Builds the word source: fixed word, then word list file, then built-ins.
    pub fn word_provider(&self) -> Result<Box<dyn WordProvider>> {
        if let Some(word) = &self.word {
            return Ok(Box::new(FixedWord::new(SecretWord::new(word)?)));
        }
        if let Some(path) = &self.word_list {
            return Ok(Box::new(WordList::from_file(path)?));
        }
        Ok(Box::new(WordList::builtin()))
    }
}

impl Default for HangmanConfig {
    fn default() -> Self {
        Self {
            max_incorrect_guesses: RoundSettings::DEFAULT_MAX_INCORRECT_GUESSES,
            word: None,
            word_list: None,
            theme: ThemeMode::default(),
            tick_ms: Self::DEFAULT_TICK_MS,
            scoring: ScoreRules::default(),
            platform: PlatformConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(HangmanConfig::from_toml("").unwrap(), HangmanConfig::default());
    }

    #[test]
    fn partial_file_overrides_fields() {
        let config = HangmanConfig::from_toml(
            r#"
            max_incorrect_guesses = 8
            theme = "light"

            [scoring]
            miss_penalty = 150

            [platform]
            player = "ada"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_incorrect_guesses, 8);
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.scoring.miss_penalty, 150);
        assert_eq!(config.scoring.letter_points, ScoreRules::DEFAULT_LETTER_POINTS);
        assert_eq!(config.platform.player.as_deref(), Some("ada"));
        assert_eq!(config.platform.leaderboard_id, "hangman.best_score");
    }

    #[test]
    fn zero_guesses_rejected() {
        assert!(HangmanConfig::from_toml("max_incorrect_guesses = 0").is_err());
    }

    #[test]
    fn bad_fixed_word_rejected() {
        assert!(HangmanConfig::from_toml("word = \"two words\"").is_err());
    }

    #[test]
    fn fixed_word_wins_over_list() {
        let config = HangmanConfig {
            word: Some("owl".into()),
            word_list: Some(PathBuf::from("/does/not/exist")),
            ..Default::default()
        };
        let mut words = config.word_provider().unwrap();
        assert_eq!(words.next_word().as_str(), "OWL");
    }

    #[test]
    fn missing_word_list_is_an_error() {
        let config = HangmanConfig {
            word_list: Some(PathBuf::from("/does/not/exist")),
            ..Default::default()
        };
        assert!(config.word_provider().is_err());
    }
}
