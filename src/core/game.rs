//! Core scene interface for the hangman terminal frontend
use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::core::theme::Theme;

/// What the engine should do after a scene handled a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneChange {
    Stay,
    Menu,
    Play,
    ToggleTheme,
    Quit,
}

/// A screen the engine can show. `C` is the shared context every scene
/// reads from and mutates (the gameplay session for this game).
pub trait Scene<C> {
    /// Called when the engine switches to this scene
    fn on_enter(&mut self, _ctx: &mut C) {}

    /// Called when the engine switches away from this scene
    fn on_leave(&mut self, _ctx: &mut C) {}

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut C) -> SceneChange;

    fn render(&self, frame: &mut Frame, ctx: &C, theme: &Theme);
}
