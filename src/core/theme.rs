//! Light/dark colour palettes handed to every render call.
use clap::ValueEnum;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: Color,
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self {
                mode,
                background: Color::Rgb(242, 242, 247),
                primary: Color::Rgb(0, 191, 191),
                secondary: Color::Rgb(229, 229, 234),
                text: Color::Rgb(28, 28, 30),
                accent: Color::Rgb(0, 217, 217),
                success: Color::Rgb(76, 217, 100),
                error: Color::Rgb(255, 59, 48),
            },
            ThemeMode::Dark => Self {
                mode,
                background: Color::Rgb(28, 28, 31),
                primary: Color::Rgb(0, 166, 166),
                secondary: Color::Rgb(72, 72, 74),
                text: Color::White,
                accent: Color::Rgb(0, 191, 191),
                success: Color::Rgb(52, 199, 89),
                error: Color::Rgb(255, 69, 58),
            },
        }
    }

    pub fn toggled(&self) -> Self {
        Self::new(self.mode.toggled())
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn title(&self) -> Style {
        self.base().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        self.base().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        self.base().fg(self.secondary)
    }

    pub fn good(&self) -> Style {
        self.base().fg(self.success)
    }

    pub fn bad(&self) -> Style {
        self.base().fg(self.error)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        let theme = Theme::new(ThemeMode::Light);
        assert_eq!(theme.toggled().mode, ThemeMode::Dark);
        assert_eq!(theme.toggled().toggled(), theme);
    }

    #[test]
    fn modes_parse_lowercase() {
        let mode: ThemeMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(mode, ThemeMode::Light);
    }
}
