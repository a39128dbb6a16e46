//! Hangman-specific renderer: draws a round, never touches it
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::renderer::GameRenderer;
use crate::core::theme::Theme;
use crate::games::hangman::round::{Round, RoundStatus};

const GALLOWS: [&str; 7] = [
    "  +---+\n  |   |\n      |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n      |\n=========",
];

/// Which gallows frame to draw, scaled to the round's miss allowance.
pub fn gallows_stage(round: &Round) -> usize {
    let last = GALLOWS.len() - 1;
    if round.status() == RoundStatus::Lost {
        return last;
    }
    let max = usize::from(round.max_incorrect_guesses()).max(1);
    (usize::from(round.incorrect_guesses()) * last / max).min(last)
}

/// Everything the gameplay screen shows.
pub struct RoundScreen<'a> {
    pub round: Option<&'a Round>,
    pub message: &'a str,
}

#[derive(Debug, Default)]
pub struct HangmanRenderer;

impl HangmanRenderer {
    fn status_lines(round: &Round, theme: &Theme) -> Vec<Line<'static>> {
        match round.status() {
            RoundStatus::InProgress => vec![Line::from(
                "Type a letter to guess  [Esc] Menu",
            )],
            RoundStatus::Won => {
                let mut lines = vec![Line::styled("You solved it!", theme.good())];
                if let Some(score) = round.score() {
                    lines.push(Line::from(format!(
                        "Score {} = {} letters + {} time bonus - {} penalty ({:.1}s)",
                        score.total,
                        score.base,
                        score.time_bonus,
                        score.error_penalty,
                        score.elapsed().as_secs_f64()
                    )));
                    let earned = score.achievements();
                    let mut badges = Vec::new();
                    if earned.fast_solve {
                        badges.push("Fast Solve");
                    }
                    if earned.perfect_solve {
                        badges.push("Perfect Solve");
                    }
                    if !badges.is_empty() {
                        lines.push(Line::styled(
                            format!("Achievements: {}", badges.join(", ")),
                            theme.highlight(),
                        ));
                    }
                }
                lines.push(Line::from("[Enter/N] Play again  [Esc] Menu"));
                lines
            }
            RoundStatus::Lost => vec![
                Line::styled(format!("Out of guesses! The word was {}", round.secret()), theme.bad()),
                Line::from("[Enter/N] Play again  [Esc] Menu"),
            ],
        }
    }
}

impl<'a> GameRenderer<RoundScreen<'a>> for HangmanRenderer {
    fn render(&self, f: &mut Frame, screen: &RoundScreen<'a>, theme: &Theme) {
        let [header, board, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(6),
        ])
        .margin(1)
        .areas(f.area());

        f.render_widget(
            Paragraph::new(" HANGMAN ")
                .style(theme.title())
                .block(Block::default().borders(Borders::ALL).border_style(theme.border()))
                .alignment(Alignment::Center),
            header,
        );

        let Some(round) = screen.round else {
            f.render_widget(
                Paragraph::new(screen.message).style(theme.bad()),
                board,
            );
            return;
        };

        let [drawing, details] =
            Layout::horizontal([Constraint::Length(14), Constraint::Min(0)]).areas(board);

        f.render_widget(
            Paragraph::new(GALLOWS[gallows_stage(round)])
                .style(theme.base())
                .block(Block::default().borders(Borders::ALL).border_style(theme.border())),
            drawing,
        );

        let wrong: String = round.wrong_letters().collect();
        let correct: String = round.correct_letters().collect();
        let remaining = round.remaining_guesses();
        let details_text = vec![
            Line::from(""),
            Line::styled(format!("Word: {}", round.masked_word()), theme.highlight()),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("Guesses remaining: {} ", remaining), theme.base()),
                Span::styled("❤".repeat(usize::from(remaining)), theme.bad()),
            ]),
            Line::styled(format!("Correct: {}", correct), theme.good()),
            Line::styled(format!("Wrong:   {}", wrong), theme.bad()),
        ];
        f.render_widget(
            Paragraph::new(details_text)
                .style(theme.base())
                .block(Block::default().borders(Borders::ALL).border_style(theme.border())),
            details,
        );

        let mut lines = vec![Line::from(format!("📢 {}", screen.message))];
        lines.extend(Self::status_lines(round, theme));
        f.render_widget(
            Paragraph::new(lines)
                .style(theme.base())
                .block(Block::default().borders(Borders::TOP).border_style(theme.border())),
            footer,
        );
    }
}
