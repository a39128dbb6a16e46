//! Generic renderer trait: pure drawing from state, no game logic
use ratatui::Frame;

use crate::core::theme::Theme;

pub trait GameRenderer<State> {
    fn render(&self, frame: &mut Frame, state: &State, theme: &Theme);
}
