/// Pop surface: the clickable figure, its counter, login and the ranking.

pub mod actions;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::api::ApiError;
use crate::config::Config;
use crate::input::{ClickState, InputEvent};
use crate::log;

use logic::Effect;
use state::{LeaderboardEntry, SurfaceState};

pub struct PopSurface {
    pub state: SurfaceState,
}

impl PopSurface {
    pub fn new(config: &Config) -> Self {
        Self {
            state: SurfaceState::new(config),
        }
    }

    pub fn restore(&mut self, stored: Option<u64>) {
        logic::restore(&mut self.state, stored);
    }

    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) -> Vec<Effect> {
        let state = &mut self.state;
        match event {
            InputEvent::Key(c) => logic::key(state, *c),
            InputEvent::Backspace => {
                logic::backspace(state);
                Vec::new()
            }
            InputEvent::Enter => logic::enter(state),
            InputEvent::Escape => {
                logic::escape(state);
                Vec::new()
            }
            InputEvent::Scroll(rows) => {
                logic::scroll_leaderboard(state, *rows);
                Vec::new()
            }
            InputEvent::PointerDown(target) => logic::pointer_down(state, *target, now_ms),
            InputEvent::PointerUp => {
                logic::pointer_up(state);
                Vec::new()
            }
            InputEvent::TouchStart(target) => logic::touch_start(state, *target, now_ms),
            InputEvent::TouchEnd => {
                logic::touch_end(state);
                Vec::new()
            }
        }
    }

    /// Any touch on the page, including ones that miss the grid.
    pub fn note_touch(&mut self) {
        logic::note_touch(&mut self.state);
    }

    pub fn resize(&mut self, screen_rows: u16) {
        logic::resize(&mut self.state, screen_rows);
    }

    pub fn tick(&mut self, now_ms: f64) -> Vec<Effect> {
        logic::tick(&mut self.state, now_ms)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }

    // ── Network results ─────────────────────────────────────────

    pub fn login_succeeded(&mut self, username: String, token: String, clicked: u64) -> Vec<Effect> {
        logic::login_succeeded(&mut self.state, username, token, clicked)
    }

    pub fn login_failed(&mut self) {
        logic::login_failed(&mut self.state);
    }

    pub fn logout_succeeded(&mut self) -> Vec<Effect> {
        logic::logout_succeeded(&mut self.state)
    }

    pub fn logout_failed(&mut self) {
        logic::logout_failed(&mut self.state);
    }

    pub fn leaderboard_loaded(&mut self, entries: Vec<LeaderboardEntry>) {
        logic::leaderboard_loaded(&mut self.state, entries);
    }

    /// The ranking could not be refreshed. Entries already shown are kept.
    pub fn leaderboard_failed(&self, err: &ApiError) {
        log::warn(&format!("{err}; keeping {} cached entries", self.state.leaderboard.len()));
    }

    pub fn teardown(&mut self) {
        logic::teardown(&mut self.state);
    }
}
