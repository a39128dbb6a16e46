use crate::core::game::{Scene, SceneChange};
use crate::core::theme::Theme;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::widgets::Block;
use ratatui::{DefaultTerminal, Frame};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveScene {
    Menu,
    Play,
}

/// Frame loop: draw the active scene, feed it keys, switch scenes on request.
pub struct Engine<C> {
    ctx: C,
    menu: Box<dyn Scene<C>>,
    play: Box<dyn Scene<C>>,
    active: ActiveScene,
    theme: Theme,
    tick: Duration,
}

impl<C> Engine<C> {
    pub fn new(
        ctx: C,
        menu: Box<dyn Scene<C>>,
        play: Box<dyn Scene<C>>,
        theme: Theme,
        tick: Duration,
    ) -> Self {
        Self {
            ctx,
            menu,
            play,
            active: ActiveScene::Menu,
            theme,
            tick,
        }
    }

    pub fn active(&self) -> ActiveScene {
        self.active
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<C> {
        self.enter();

        loop {
            terminal.draw(|f| self.render(f))?;

            // INPUT (non-blocking); the tick sleep below paces the loop
            if event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && !self.dispatch(key) {
                        break;
                    }
                }
            }

            tokio::time::sleep(self.tick).await;
        }

        self.leave();
        Ok(self.ctx)
    }

    /// Routes a key to the active scene. Returns false once the player quits.
    pub fn dispatch(&mut self, key: KeyEvent) -> bool {
        let Self { ctx, menu, play, active, .. } = self;
        let change = match active {
            ActiveScene::Menu => menu.handle_key(key, ctx),
            ActiveScene::Play => play.handle_key(key, ctx),
        };
        self.apply(change)
    }

    fn apply(&mut self, change: SceneChange) -> bool {
        match change {
            SceneChange::Stay => {}
            SceneChange::Menu => self.switch(ActiveScene::Menu),
            SceneChange::Play => self.switch(ActiveScene::Play),
            SceneChange::ToggleTheme => {
                self.theme = self.theme.toggled();
                debug!(theme = self.theme.mode.label(), "theme changed");
            }
            SceneChange::Quit => return false,
        }
        true
    }

    fn switch(&mut self, to: ActiveScene) {
        if self.active == to {
            return;
        }
        debug!(from = ?self.active, ?to, "scene change");
        self.leave();
        self.active = to;
        self.enter();
    }

    fn enter(&mut self) {
        let Self { ctx, menu, play, active, .. } = self;
        match active {
            ActiveScene::Menu => menu.on_enter(ctx),
            ActiveScene::Play => play.on_enter(ctx),
        }
    }

    fn leave(&mut self) {
        let Self { ctx, menu, play, active, .. } = self;
        match active {
            ActiveScene::Menu => menu.on_leave(ctx),
            ActiveScene::Play => play.on_leave(ctx),
        }
    }

    fn render(&self, frame: &mut Frame) {
        frame.render_widget(Block::default().style(self.theme.base()), frame.area());
        let scene = match self.active {
            ActiveScene::Menu => &self.menu,
            ActiveScene::Play => &self.play,
        };
        scene.render(frame, &self.ctx, &self.theme);
    }
}
