use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::HangmanConfig;
use crate::core::engine::Engine;
use crate::core::menu::MenuScene;
use crate::core::platform::LocalPlatform;
use crate::core::theme::{Theme, ThemeMode};
use crate::games::hangman::{
    GameplayScene, GuessReport, Round, RoundError, RoundSettings, RoundSummary, SecretWord,
    Session, WordList,
};

#[derive(Parser)]
#[command(name = "hangman")]
#[command(about = "🎩 Hangman in your terminal")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./hangman.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (the game screen owns the terminal)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play in the terminal (default)
    Play(PlayArgs),
    /// Play one round from a fixed guess sequence and print a JSON report
    Replay {
        /// Secret word
        word: String,

        /// Guesses, one letter each; commas and spaces are ignored
        guesses: String,

        /// Incorrect guesses allowed
        #[arg(short, long)]
        max_misses: Option<u8>,
    },
    /// Check a word list and report how many words are usable
    Words {
        /// Word list file (defaults to the built-in list)
        path: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
pub struct PlayArgs {
    /// Play every round with this word
    #[arg(long)]
    pub word: Option<String>,

    /// Draw words from this file, one per line
    #[arg(long)]
    pub words: Option<PathBuf>,

    /// Incorrect guesses allowed
    #[arg(short, long)]
    pub max_misses: Option<u8>,

    #[arg(long, value_enum)]
    pub theme: Option<ThemeMode>,

    /// Sign in to the leaderboard as this player
    #[arg(long)]
    pub player: Option<String>,
}

impl PlayArgs {
    pub fn apply(&self, config: &mut HangmanConfig) {
        if let Some(word) = &self.word {
            config.word = Some(word.clone());
        }
        if let Some(words) = &self.words {
            config.word = None;
            config.word_list = Some(words.clone());
        }
        if let Some(max) = self.max_misses {
            config.max_incorrect_guesses = max;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(player) = &self.player {
            config.platform.player = Some(player.clone());
        }
    }
}

/// Installs the global subscriber. Logs go to `log_file` when given,
/// otherwise to stderr unless the terminal UI is about to take over.
pub fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Play(PlayArgs::default()));
    let interactive = matches!(command, Commands::Play(_));
    init_tracing(cli.log_file.as_deref(), interactive)?;

    let mut config = HangmanConfig::load(cli.config.as_deref())?;

    match command {
        Commands::Play(args) => {
            args.apply(&mut config);
            config.validate()?;
            play(config).await
        }
        Commands::Replay { word, guesses, max_misses } => {
            let mut settings = config.round_settings();
            if let Some(max) = max_misses {
                settings.max_incorrect_guesses = max;
            }
            let report = replay(&word, &guesses, settings)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Commands::Words { path } => {
            let count = match path {
                Some(path) => WordList::from_file(&path)?.len(),
                None => WordList::builtin().len(),
            };
            println!("{count} usable words");
            Ok(())
        }
    }
}

async fn play(config: HangmanConfig) -> Result<()> {
    let words = config.word_provider()?;
    let platform = LocalPlatform::sign_in(config.platform.player.clone());
    let (reporter, platform_task) = platform.spawn();
    let session = Session::new(
        words,
        reporter,
        config.round_settings(),
        config.platform.targets(),
    );

    info!(theme = config.theme.label(), "starting terminal session");
    let engine = Engine::new(
        session,
        Box::new(MenuScene::new()),
        Box::new(GameplayScene::new()),
        Theme::new(config.theme),
        config.tick(),
    );

    let terminal = ratatui::init();
    let result = engine.run(terminal).await;
    ratatui::restore();

    // Dropping the session drops the last reporter, which ends the task.
    drop(result?);
    platform_task.await.context("platform task panicked")?;
    Ok(())
}

/// One guess of a replay: its report or why it was rejected.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReplayStep {
    Applied(GuessReport),
    Rejected { letter: char, error: String },
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
    pub summary: RoundSummary,
}

pub fn replay(word: &str, guesses: &str, settings: RoundSettings) -> Result<ReplayReport, RoundError> {
    let secret = SecretWord::new(word)?;
    let mut round = Round::start_at(secret, settings, std::time::Instant::now())?;
    let steps = guesses
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|letter| match round.submit_guess(letter) {
            Ok(report) => ReplayStep::Applied(report),
            Err(e) => ReplayStep::Rejected {
                letter,
                error: e.to_string(),
            },
        })
        .collect();
    Ok(ReplayReport {
        steps,
        summary: round.summary(),
    })
}
