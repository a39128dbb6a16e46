use ratatui::{
    layout::{Alignment, Constraint, Layout},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use crossterm::event::{KeyCode, KeyEvent};

use crate::core::game::{Scene, SceneChange};
use crate::core::theme::Theme;

/// Information the menu shows about the game behind it.
pub trait MenuStatus {
    fn title(&self) -> &str;

    /// One-line status (best score, sign-in state), if any.
    fn status_line(&self) -> Option<String> {
        None
    }

    /// How-to-play text, one rule per entry.
    fn rules(&self) -> &[&str] {
        &[]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    HowToPlay,
    Theme,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [MenuItem::Play, MenuItem::HowToPlay, MenuItem::Theme, MenuItem::Quit];

    fn label(self, theme: &Theme) -> String {
        match self {
            MenuItem::Play => "Play".into(),
            MenuItem::HowToPlay => "How to Play".into(),
            MenuItem::Theme => format!("Theme: {}", theme.mode.label()),
            MenuItem::Quit => "Quit".into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MenuScene {
    pub selected: usize,
    pub show_rules: bool,
}

impl MenuScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.selected.min(MenuItem::ALL.len() - 1)]
    }

    fn activate(&mut self, item: MenuItem) -> SceneChange {
        match item {
            MenuItem::Play => SceneChange::Play,
            MenuItem::HowToPlay => {
                self.show_rules = true;
                SceneChange::Stay
            }
            MenuItem::Theme => SceneChange::ToggleTheme,
            MenuItem::Quit => SceneChange::Quit,
        }
    }
}

impl<C: MenuStatus> Scene<C> for MenuScene {
    fn on_enter(&mut self, _ctx: &mut C) {
        self.show_rules = false;
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut C) -> SceneChange {
        if self.show_rules {
            // Any key closes the instructions panel
            self.show_rules = false;
            return SceneChange::Stay;
        }

        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                SceneChange::Stay
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(MenuItem::ALL.len() - 1);
                SceneChange::Stay
            }
            KeyCode::Enter => self.activate(self.selected_item()),
            KeyCode::Char('p') => self.activate(MenuItem::Play),
            KeyCode::Char('h') => self.activate(MenuItem::HowToPlay),
            KeyCode::Char('t') => self.activate(MenuItem::Theme),
            KeyCode::Char('q') | KeyCode::Esc => SceneChange::Quit,
            _ => SceneChange::Stay,
        }
    }

    fn render(&self, f: &mut Frame, ctx: &C, theme: &Theme) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .margin(2)
        .areas(f.area());

        f.render_widget(
            Paragraph::new(format!(" {} ", ctx.title()))
                .style(theme.title())
                .block(Block::default().borders(Borders::ALL).border_style(theme.border()))
                .alignment(Alignment::Center),
            header,
        );

        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == self.selected {
                    theme.highlight()
                } else {
                    theme.base()
                };
                let marker = if i == self.selected { "»" } else { " " };
                ListItem::new(format!(" {} {}", marker, item.label(theme))).style(style)
            })
            .collect();

        f.render_widget(
            List::new(items).block(
                Block::default()
                    .title(" MENU ")
                    .borders(Borders::ALL)
                    .border_style(theme.border()),
            ),
            body,
        );

        let mut hints = vec![Line::from("[↑/↓] Navigate  [Enter] Select  [P] Play  [H] Help  [T] Theme  [Q] Quit")];
        if let Some(status) = ctx.status_line() {
            hints.insert(0, Line::styled(status, theme.good()));
        }
        f.render_widget(
            Paragraph::new(hints).style(theme.base()).alignment(Alignment::Center),
            footer,
        );

        if self.show_rules {
            let [_, panel, _] = Layout::vertical([
                Constraint::Percentage(15),
                Constraint::Percentage(70),
                Constraint::Percentage(15),
            ])
            .areas(body);
            let mut lines: Vec<Line> = ctx
                .rules()
                .iter()
                .enumerate()
                .map(|(i, rule)| Line::from(format!("{}. {}", i + 1, rule)))
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::styled("Press any key to close", theme.highlight()));

            f.render_widget(Clear, panel);
            f.render_widget(
                Paragraph::new(lines)
                    .style(theme.base())
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .title(format!(" How to Play {} ", ctx.title()))
                            .borders(Borders::ALL)
                            .border_style(theme.title()),
                    ),
                panel,
            );
        }
    }
}
