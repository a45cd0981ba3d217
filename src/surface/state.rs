/// Interaction surface state definitions.

use crate::config::{Config, FeatureSet, TouchReport};
use crate::time::{Debounce, Pulse};

/// Longest username the login field accepts.
pub const USERNAME_MAX_LEN: usize = 24;

/// Ranking popup rows that are not entries: two borders, the close line
/// and the ▲/▼ scroll rows.
pub const LEADERBOARD_CHROME: u16 = 5;

/// Entry rows the ranking popup shows on a screen `screen_rows` tall.
pub fn leaderboard_rows(screen_rows: u16) -> usize {
    screen_rows.saturating_sub(LEADERBOARD_CHROME) as usize
}

/// An authenticated backend session.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub username: String,
    pub token: String,
}

/// One row of the ranking.
#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    pub id: String,
    pub display_name: String,
    pub click_count: u64,
}

/// Where a pop came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PopOrigin {
    Mouse,
    Touch,
}

/// Transient input flags. Reset on every page load.
#[derive(Clone, Debug, Default)]
pub struct InteractionState {
    pub pointer_down: bool,
    pub touch_down: bool,
    pub leaderboard_open: bool,
    /// Set by the first touch event and never cleared. Mouse input is
    /// ignored from then on.
    pub touch_device: bool,
    /// Index of the first ranking entry on screen.
    pub leaderboard_scroll: usize,
    /// Terminal height seen by the last frame. 0 until the first draw.
    pub screen_rows: u16,
}

/// The username field and the inline message under it.
#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub focused: bool,
    pub error: Option<String>,
    /// A login or logout request is on the wire.
    pub in_flight: bool,
}

pub struct SurfaceState {
    pub app_id: String,
    pub feature_set: FeatureSet,
    pub touch_report: TouchReport,

    pub click_count: u64,
    /// True once the stored count was read back. Pops and writes wait for it.
    pub initialized: bool,

    pub session: Option<Session>,
    /// Sorted by `click_count`, highest first.
    pub leaderboard: Vec<LeaderboardEntry>,

    pub interaction: InteractionState,
    pub login: LoginForm,

    /// Counter "bump" after each pop.
    pub animation: Pulse,
    /// Coalesced click report, carrying the latest session token.
    pub pending_report: Debounce<String>,
}

impl SurfaceState {
    pub fn new(config: &Config) -> Self {
        Self {
            app_id: config.app_id.clone(),
            feature_set: config.feature_set,
            touch_report: config.touch_report,
            click_count: 0,
            initialized: false,
            session: None,
            leaderboard: Vec::new(),
            interaction: InteractionState::default(),
            login: LoginForm::default(),
            animation: Pulse::new(config.pop_anim_ms),
            pending_report: Debounce::new(config.debounce_ms),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The figure shows its open-mouth frame.
    pub fn is_pressed(&self) -> bool {
        (self.interaction.pointer_down || self.interaction.touch_down)
            && !self.interaction.leaderboard_open
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_active()
    }

    /// Largest scroll offset that still fills the popup. Before the first
    /// frame the screen height is unknown and only the last entry bounds it.
    pub fn max_leaderboard_scroll(&self) -> usize {
        let len = self.leaderboard.len();
        match self.interaction.screen_rows {
            0 => len.saturating_sub(1),
            rows => len.saturating_sub(leaderboard_rows(rows)),
        }
    }
}
