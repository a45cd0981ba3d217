//! Semantic action IDs for the surface's click targets.
//!
//! Anything under the pointer that is not one of these is the figure itself,
//! and a press there counts as a pop.

// ── Leaderboard ─────────────────────────────────────────────────
pub const TOGGLE_LEADERBOARD: u16 = 10;
pub const CLOSE_LEADERBOARD: u16 = 11;
pub const SCROLL_LEADERBOARD_UP: u16 = 12;
pub const SCROLL_LEADERBOARD_DOWN: u16 = 13;

// ── Session ─────────────────────────────────────────────────────
pub const FOCUS_USERNAME: u16 = 20;
pub const SUBMIT_LOGIN: u16 = 21;
pub const LOGOUT: u16 = 22;
