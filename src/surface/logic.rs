//! Surface transitions as pure functions.
//!
//! Every transition mutates the state and returns the side effects the shell
//! has to carry out (sound, storage, network). Results of network effects come
//! back in through `login_succeeded`, `leaderboard_loaded` and friends.

use crate::config::TouchReport;

use super::actions::{
    CLOSE_LEADERBOARD, FOCUS_USERNAME, LOGOUT, SCROLL_LEADERBOARD_DOWN, SCROLL_LEADERBOARD_UP,
    SUBMIT_LOGIN, TOGGLE_LEADERBOARD,
};
use super::state::{
    leaderboard_rows, LeaderboardEntry, PopOrigin, Session, SurfaceState, USERNAME_MAX_LEN,
};

pub const LOGIN_ERROR: &str = "An error occurred. Please try again.";
pub const LOGOUT_ERROR: &str = "An error occurred during logout. Please try again.";
pub const EMPTY_USERNAME_ERROR: &str = "Please enter a username.";

/// A side effect requested by a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    PlayPopSound,
    /// Write the click count to local storage.
    PersistCount(u64),
    /// Attribute one click to the session with this token.
    ReportClick(String),
    FetchLeaderboard,
    Login(String),
    Logout,
}

fn persist(state: &SurfaceState) -> Option<Effect> {
    state
        .initialized
        .then_some(Effect::PersistCount(state.click_count))
}

/// Apply the value read back from local storage. Runs once per page load.
pub fn restore(state: &mut SurfaceState, stored: Option<u64>) {
    if state.initialized {
        return;
    }
    state.click_count = stored.unwrap_or(0);
    state.initialized = true;
}

/// Mouse button pressed. `target` is the control under the pointer, if any.
pub fn pointer_down(state: &mut SurfaceState, target: Option<u16>, now_ms: f64) -> Vec<Effect> {
    // Touch browsers emit a synthetic mousedown after each tap.
    if state.interaction.touch_device {
        return Vec::new();
    }
    match target {
        Some(action) => activate(state, action),
        None => pop(state, PopOrigin::Mouse, now_ms),
    }
}

pub fn pointer_up(state: &mut SurfaceState) {
    state.interaction.pointer_down = false;
}

/// A touch was seen anywhere on the page, on the grid or not.
pub fn note_touch(state: &mut SurfaceState) {
    state.interaction.touch_device = true;
}

pub fn touch_start(state: &mut SurfaceState, target: Option<u16>, now_ms: f64) -> Vec<Effect> {
    note_touch(state);
    match target {
        Some(action) => activate(state, action),
        None => pop(state, PopOrigin::Touch, now_ms),
    }
}

pub fn touch_end(state: &mut SurfaceState) {
    state.interaction.touch_down = false;
}

/// Count one pop on the figure.
pub fn pop(state: &mut SurfaceState, origin: PopOrigin, now_ms: f64) -> Vec<Effect> {
    if state.interaction.leaderboard_open || !state.initialized {
        return Vec::new();
    }

    state.click_count = state.click_count.saturating_add(1);
    match origin {
        PopOrigin::Mouse => state.interaction.pointer_down = true,
        PopOrigin::Touch => state.interaction.touch_down = true,
    }
    state.animation.fire(now_ms);

    let mut effects = vec![Effect::PlayPopSound];
    effects.extend(persist(state));

    if let Some(session) = &state.session {
        let token = session.token.clone();
        if origin == PopOrigin::Touch && state.touch_report == TouchReport::Immediate {
            effects.push(Effect::ReportClick(token));
        } else {
            state.pending_report.trigger(token, now_ms);
        }
    }
    effects
}

/// Advance timers: clear the bump and release a due click report.
pub fn tick(state: &mut SurfaceState, now_ms: f64) -> Vec<Effect> {
    state.animation.poll(now_ms);
    match state.pending_report.poll(now_ms) {
        Some(token) => vec![Effect::ReportClick(token)],
        None => Vec::new(),
    }
}

/// Run the control bound to `action`.
pub fn activate(state: &mut SurfaceState, action: u16) -> Vec<Effect> {
    if action != FOCUS_USERNAME {
        state.login.focused = false;
    }
    match action {
        TOGGLE_LEADERBOARD => toggle_leaderboard(state),
        CLOSE_LEADERBOARD => {
            state.interaction.leaderboard_open = false;
            Vec::new()
        }
        FOCUS_USERNAME => {
            if state.feature_set.is_full() && state.session.is_none() {
                state.login.focused = true;
            }
            Vec::new()
        }
        SCROLL_LEADERBOARD_UP => {
            scroll_leaderboard(state, -page_step(state));
            Vec::new()
        }
        SCROLL_LEADERBOARD_DOWN => {
            scroll_leaderboard(state, page_step(state));
            Vec::new()
        }
        SUBMIT_LOGIN => submit_login(state),
        LOGOUT => logout(state),
        _ => Vec::new(),
    }
}

pub fn toggle_leaderboard(state: &mut SurfaceState) -> Vec<Effect> {
    if !state.feature_set.is_full() {
        return Vec::new();
    }
    state.interaction.leaderboard_open = !state.interaction.leaderboard_open;
    if state.interaction.leaderboard_open {
        state.interaction.leaderboard_scroll = 0;
        vec![Effect::FetchLeaderboard]
    } else {
        Vec::new()
    }
}

/// Sort highest tally first. Ties keep their incoming order.
pub fn sort_leaderboard(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| b.click_count.cmp(&a.click_count));
}

/// Replace the ranking with a fresh fetch.
pub fn leaderboard_loaded(state: &mut SurfaceState, mut entries: Vec<LeaderboardEntry>) {
    sort_leaderboard(&mut entries);
    state.leaderboard = entries;
    state.interaction.leaderboard_scroll = state
        .interaction
        .leaderboard_scroll
        .min(state.max_leaderboard_scroll());
}

/// Move the ranking window by `delta` rows, clamped so the popup stays full.
pub fn scroll_leaderboard(state: &mut SurfaceState, delta: isize) {
    if !state.interaction.leaderboard_open {
        return;
    }
    let max = state.max_leaderboard_scroll();
    let from = state.interaction.leaderboard_scroll.min(max);
    state.interaction.leaderboard_scroll = from.saturating_add_signed(delta).min(max);
}

/// ▲/▼ move by a page less one row, so the edge entry stays in view.
fn page_step(state: &SurfaceState) -> isize {
    leaderboard_rows(state.interaction.screen_rows).saturating_sub(1).max(1) as isize
}

/// Record the terminal height of the frame about to be drawn.
pub fn resize(state: &mut SurfaceState, screen_rows: u16) {
    state.interaction.screen_rows = screen_rows;
}

/// Keyboard input. Typing goes to the username field while it has focus.
pub fn key(state: &mut SurfaceState, c: char) -> Vec<Effect> {
    if state.login.focused {
        if !c.is_control() && state.login.username.chars().count() < USERNAME_MAX_LEN {
            state.login.username.push(c);
        }
        return Vec::new();
    }
    match c {
        'r' | 'R' => toggle_leaderboard(state),
        'l' | 'L' => activate(state, FOCUS_USERNAME),
        _ => Vec::new(),
    }
}

pub fn backspace(state: &mut SurfaceState) {
    if state.login.focused {
        state.login.username.pop();
    }
}

pub fn enter(state: &mut SurfaceState) -> Vec<Effect> {
    if state.login.focused {
        submit_login(state)
    } else {
        Vec::new()
    }
}

/// Blur the field first, then close the ranking.
pub fn escape(state: &mut SurfaceState) {
    if state.login.focused {
        state.login.focused = false;
    } else {
        state.interaction.leaderboard_open = false;
    }
}

pub fn submit_login(state: &mut SurfaceState) -> Vec<Effect> {
    if !state.feature_set.is_full() || state.session.is_some() || state.login.in_flight {
        return Vec::new();
    }
    let username = state.login.username.trim().to_string();
    if username.is_empty() {
        state.login.error = Some(EMPTY_USERNAME_ERROR.to_string());
        return Vec::new();
    }
    state.login.error = None;
    state.login.focused = false;
    state.login.in_flight = true;
    vec![Effect::Login(username)]
}

/// The backend accepted the login. Its tally replaces the local count.
pub fn login_succeeded(
    state: &mut SurfaceState,
    username: String,
    token: String,
    clicked: u64,
) -> Vec<Effect> {
    state.login.in_flight = false;
    state.login.error = None;
    state.login.username = username.clone();
    state.session = Some(Session { username, token });
    state.click_count = clicked;

    let mut effects: Vec<Effect> = persist(state).into_iter().collect();
    effects.push(Effect::FetchLeaderboard);
    effects
}

pub fn login_failed(state: &mut SurfaceState) {
    state.login.in_flight = false;
    state.login.error = Some(LOGIN_ERROR.to_string());
}

pub fn logout(state: &mut SurfaceState) -> Vec<Effect> {
    if state.session.is_none() || state.login.in_flight {
        return Vec::new();
    }
    state.login.in_flight = true;
    vec![Effect::Logout]
}

/// Session gone: count back to zero, field cleared, unsent report dropped.
pub fn logout_succeeded(state: &mut SurfaceState) -> Vec<Effect> {
    state.login.in_flight = false;
    state.login.error = None;
    state.login.username.clear();
    state.session = None;
    state.pending_report.cancel();
    state.click_count = 0;
    persist(state).into_iter().collect()
}

pub fn logout_failed(state: &mut SurfaceState) {
    state.login.in_flight = false;
    state.login.error = Some(LOGOUT_ERROR.to_string());
}

/// The page is going away. An unsent report is dropped, not flushed.
///
/// A page brought back from the back/forward cache resumes with nothing
/// pending, so the next click starts a fresh report window.
pub fn teardown(state: &mut SurfaceState) {
    state.pending_report.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, FeatureSet};
    use crate::surface::save;

    fn ready() -> SurfaceState {
        let mut state = SurfaceState::new(&Config::default());
        restore(&mut state, None);
        state
    }

    fn logged_in(token: &str, clicked: u64) -> SurfaceState {
        let mut state = ready();
        state.login.username = "alice".into();
        submit_login(&mut state);
        login_succeeded(&mut state, "alice".into(), token.into(), clicked);
        state
    }

    fn entry(id: &str, clicks: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            id: id.into(),
            display_name: id.into(),
            click_count: clicks,
        }
    }

    fn count_reports(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::ReportClick(_)))
            .count()
    }

    // ── restore / persistence ───────────────────────────────────

    #[test]
    fn restore_shows_stored_value() {
        let mut state = SurfaceState::new(&Config::default());
        restore(&mut state, Some(42));
        assert_eq!(state.click_count, 42);
        assert!(state.initialized);
    }

    #[test]
    fn restore_absent_starts_at_zero() {
        let mut state = SurfaceState::new(&Config::default());
        restore(&mut state, None);
        assert_eq!(state.click_count, 0);
    }

    #[test]
    fn restore_runs_once() {
        let mut state = SurfaceState::new(&Config::default());
        restore(&mut state, Some(7));
        restore(&mut state, Some(100));
        assert_eq!(state.click_count, 7);
    }

    #[test]
    fn pop_before_restore_ignored() {
        let mut state = SurfaceState::new(&Config::default());
        let effects = pointer_down(&mut state, None, 0.0);
        assert!(effects.is_empty());
        assert_eq!(state.click_count, 0);
    }

    #[test]
    fn pop_persists_new_count() {
        let mut state = ready();
        let effects = pointer_down(&mut state, None, 0.0);
        assert_eq!(effects, vec![Effect::PlayPopSound, Effect::PersistCount(1)]);
    }

    // ── pops ────────────────────────────────────────────────────

    #[test]
    fn pop_sets_pressed_and_animating() {
        let mut state = ready();
        pointer_down(&mut state, None, 100.0);
        assert!(state.is_pressed());
        assert!(state.is_animating());
        pointer_up(&mut state);
        assert!(!state.is_pressed());
    }

    #[test]
    fn animation_clears_by_timer_not_input() {
        let mut state = ready();
        pointer_down(&mut state, None, 100.0);
        tick(&mut state, 110.0);
        assert!(state.is_animating());
        tick(&mut state, 116.0);
        assert!(!state.is_animating());
        // Still pressed: only the timer cleared the bump
        assert!(state.is_pressed());
    }

    #[test]
    fn pop_while_leaderboard_open_is_noop() {
        let mut state = ready();
        toggle_leaderboard(&mut state);
        let effects = pointer_down(&mut state, None, 0.0);
        assert!(effects.is_empty());
        assert_eq!(state.click_count, 0);
        assert!(!state.is_animating());
    }

    #[test]
    fn local_only_pop_schedules_no_report() {
        let mut state = ready();
        pointer_down(&mut state, None, 0.0);
        assert!(!state.pending_report.is_pending());
        assert!(tick(&mut state, 5000.0).is_empty());
    }

    #[test]
    fn oversized_stored_count_stays_at_max() {
        let mut state = SurfaceState::new(&Config::default());
        restore(&mut state, save::decode_count("99999999999999999999999"));
        assert_eq!(state.click_count, u64::MAX);

        let effects = pointer_down(&mut state, None, 0.0);
        assert_eq!(state.click_count, u64::MAX);
        assert!(effects.contains(&Effect::PersistCount(u64::MAX)));
        pointer_up(&mut state);
        touch_start(&mut state, None, 10.0);
        assert_eq!(state.click_count, u64::MAX);
    }

    #[test]
    fn backend_tally_at_max_keeps_counting_and_reporting() {
        let mut state = logged_in("t1", u64::MAX - 1);
        pointer_down(&mut state, None, 0.0);
        pointer_up(&mut state);
        pointer_down(&mut state, None, 10.0);
        assert_eq!(state.click_count, u64::MAX);
        assert_eq!(tick(&mut state, 1010.0), vec![Effect::ReportClick("t1".into())]);
    }

    #[test]
    fn control_press_is_not_a_pop() {
        let mut state = ready();
        let effects = pointer_down(&mut state, Some(TOGGLE_LEADERBOARD), 0.0);
        assert_eq!(effects, vec![Effect::FetchLeaderboard]);
        assert_eq!(state.click_count, 0);
        assert!(!state.interaction.pointer_down);
    }

    // ── touch ───────────────────────────────────────────────────

    #[test]
    fn touch_counts_and_marks_device() {
        let mut state = ready();
        touch_start(&mut state, None, 0.0);
        assert_eq!(state.click_count, 1);
        assert!(state.interaction.touch_device);
        assert!(state.is_pressed());
        touch_end(&mut state);
        assert!(!state.is_pressed());
    }

    #[test]
    fn mouse_ignored_after_touch() {
        let mut state = ready();
        touch_start(&mut state, None, 0.0);
        touch_end(&mut state);
        let effects = pointer_down(&mut state, None, 5.0);
        assert!(effects.is_empty());
        assert_eq!(state.click_count, 1);
    }

    #[test]
    fn synthetic_mouse_on_control_does_not_double_toggle() {
        let mut state = ready();
        touch_start(&mut state, Some(TOGGLE_LEADERBOARD), 0.0);
        pointer_down(&mut state, Some(TOGGLE_LEADERBOARD), 5.0);
        assert!(state.interaction.leaderboard_open);
    }

    #[test]
    fn touch_report_debounced_by_default() {
        let mut state = logged_in("t1", 0);
        let effects = touch_start(&mut state, None, 0.0);
        assert_eq!(count_reports(&effects), 0);
        assert_eq!(state.pending_report.pending(), Some(&"t1".to_string()));
    }

    #[test]
    fn touch_report_immediate_when_configured() {
        let mut state = logged_in("t1", 0);
        state.touch_report = TouchReport::Immediate;
        let effects = touch_start(&mut state, None, 0.0);
        assert_eq!(count_reports(&effects), 1);
        assert!(!state.pending_report.is_pending());
    }

    #[test]
    fn touch_off_grid_still_blocks_mouse() {
        let mut state = ready();
        note_touch(&mut state);
        assert_eq!(state.click_count, 0);
        assert!(pointer_down(&mut state, None, 0.0).is_empty());
        assert!(pointer_down(&mut state, Some(TOGGLE_LEADERBOARD), 0.0).is_empty());
        assert_eq!(state.click_count, 0);
        assert!(!state.interaction.leaderboard_open);
    }

    // ── session ─────────────────────────────────────────────────

    #[test]
    fn login_overwrites_count_then_click_schedules_report() {
        let mut state = SurfaceState::new(&Config::default());
        restore(&mut state, Some(99));
        state.login.username = "alice".into();
        assert_eq!(submit_login(&mut state), vec![Effect::Login("alice".into())]);

        let effects = login_succeeded(&mut state, "alice".into(), "t1".into(), 5);
        assert_eq!(state.click_count, 5);
        assert!(effects.contains(&Effect::PersistCount(5)));
        assert!(effects.contains(&Effect::FetchLeaderboard));

        let effects = pointer_down(&mut state, None, 1000.0);
        assert_eq!(state.click_count, 6);
        // Scheduled, not sent
        assert_eq!(count_reports(&effects), 0);
        assert_eq!(state.pending_report.pending(), Some(&"t1".to_string()));
        assert_eq!(tick(&mut state, 2000.0), vec![Effect::ReportClick("t1".into())]);
    }

    #[test]
    fn ten_quick_clicks_one_report() {
        let mut state = logged_in("t1", 0);
        let mut reports = 0;
        for i in 0..10 {
            let now = i as f64 * 20.0; // all within 200ms
            reports += count_reports(&pointer_down(&mut state, None, now));
            pointer_up(&mut state);
            reports += count_reports(&tick(&mut state, now));
        }
        let mut now = 200.0;
        while now < 3000.0 {
            reports += count_reports(&tick(&mut state, now));
            now += 16.0;
        }
        assert_eq!(state.click_count, 10);
        assert_eq!(reports, 1);
    }

    #[test]
    fn empty_username_rejected_inline() {
        let mut state = ready();
        state.login.username = "   ".into();
        assert!(submit_login(&mut state).is_empty());
        assert_eq!(state.login.error.as_deref(), Some(EMPTY_USERNAME_ERROR));
        assert!(!state.login.in_flight);
    }

    #[test]
    fn login_failure_leaves_state() {
        let mut state = SurfaceState::new(&Config::default());
        restore(&mut state, Some(3));
        state.login.username = "alice".into();
        submit_login(&mut state);
        login_failed(&mut state);
        assert_eq!(state.click_count, 3);
        assert!(!state.is_authenticated());
        assert_eq!(state.login.error.as_deref(), Some(LOGIN_ERROR));
        assert_eq!(state.login.username, "alice");
    }

    #[test]
    fn double_submit_while_in_flight_ignored() {
        let mut state = ready();
        state.login.username = "alice".into();
        assert_eq!(submit_login(&mut state).len(), 1);
        assert!(submit_login(&mut state).is_empty());
    }

    #[test]
    fn logout_resets_count() {
        let mut state = logged_in("t1", 500);
        assert_eq!(logout(&mut state), vec![Effect::Logout]);
        let effects = logout_succeeded(&mut state);
        assert_eq!(state.click_count, 0);
        assert!(!state.is_authenticated());
        assert!(state.login.username.is_empty());
        assert_eq!(effects, vec![Effect::PersistCount(0)]);
    }

    #[test]
    fn logout_drops_pending_report() {
        let mut state = logged_in("t1", 0);
        pointer_down(&mut state, None, 0.0);
        logout(&mut state);
        logout_succeeded(&mut state);
        assert!(tick(&mut state, 5000.0).is_empty());
    }

    #[test]
    fn logout_failure_keeps_session() {
        let mut state = logged_in("t1", 8);
        logout(&mut state);
        logout_failed(&mut state);
        assert!(state.is_authenticated());
        assert_eq!(state.click_count, 8);
        assert_eq!(state.login.error.as_deref(), Some(LOGOUT_ERROR));
    }

    #[test]
    fn logout_without_session_ignored() {
        let mut state = ready();
        assert!(logout(&mut state).is_empty());
    }

    #[test]
    fn teardown_cancels_pending_report() {
        let mut state = logged_in("t1", 0);
        pointer_down(&mut state, None, 0.0);
        teardown(&mut state);
        assert!(tick(&mut state, 5000.0).is_empty());
    }

    // ── leaderboard ─────────────────────────────────────────────

    #[test]
    fn toggle_fetches_only_on_open() {
        let mut state = ready();
        assert_eq!(toggle_leaderboard(&mut state), vec![Effect::FetchLeaderboard]);
        assert!(toggle_leaderboard(&mut state).is_empty());
        assert!(!state.interaction.leaderboard_open);
    }

    fn long_ranking(n: usize, screen_rows: u16) -> SurfaceState {
        let mut state = ready();
        resize(&mut state, screen_rows);
        toggle_leaderboard(&mut state);
        let entries = (0..n).map(|i| entry(&format!("user{i}"), (n - i) as u64)).collect();
        leaderboard_loaded(&mut state, entries);
        state
    }

    #[test]
    fn long_ranking_scrolls_to_last_entry() {
        let mut state = long_ranking(60, 30);
        for _ in 0..100 {
            scroll_leaderboard(&mut state, 1);
        }
        // 25 entry rows on a 30-row screen
        assert_eq!(state.interaction.leaderboard_scroll, 35);
        scroll_leaderboard(&mut state, -1);
        assert_eq!(state.interaction.leaderboard_scroll, 34);
        scroll_leaderboard(&mut state, -100);
        assert_eq!(state.interaction.leaderboard_scroll, 0);
    }

    #[test]
    fn scroll_buttons_page_through_ranking() {
        let mut state = long_ranking(60, 30);
        activate(&mut state, SCROLL_LEADERBOARD_DOWN);
        assert_eq!(state.interaction.leaderboard_scroll, 24);
        activate(&mut state, SCROLL_LEADERBOARD_DOWN);
        assert_eq!(state.interaction.leaderboard_scroll, 35);
        activate(&mut state, SCROLL_LEADERBOARD_UP);
        assert_eq!(state.interaction.leaderboard_scroll, 11);
        assert_eq!(state.click_count, 0);
    }

    #[test]
    fn short_ranking_does_not_scroll() {
        let mut state = long_ranking(3, 30);
        scroll_leaderboard(&mut state, 5);
        assert_eq!(state.interaction.leaderboard_scroll, 0);
    }

    #[test]
    fn ranking_scroll_resets_on_reopen_and_clamps_on_reload() {
        let mut state = long_ranking(60, 30);
        scroll_leaderboard(&mut state, 30);
        leaderboard_loaded(&mut state, (0..40).map(|i| entry(&i.to_string(), 1)).collect());
        assert_eq!(state.interaction.leaderboard_scroll, 15);

        toggle_leaderboard(&mut state);
        scroll_leaderboard(&mut state, 5);
        assert_eq!(state.interaction.leaderboard_scroll, 15);
        toggle_leaderboard(&mut state);
        assert_eq!(state.interaction.leaderboard_scroll, 0);
    }

    #[test]
    fn leaderboard_replaced_and_sorted() {
        let mut state = ready();
        leaderboard_loaded(&mut state, vec![entry("old", 1)]);
        leaderboard_loaded(&mut state, vec![entry("a", 3), entry("b", 10), entry("c", 7)]);
        let ids: Vec<&str> = state.leaderboard.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn leaderboard_ties_keep_order() {
        let mut state = ready();
        leaderboard_loaded(
            &mut state,
            vec![entry("x", 5), entry("y", 9), entry("z", 5), entry("w", 5)],
        );
        let ids: Vec<&str> = state.leaderboard.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "x", "z", "w"]);
    }

    #[test]
    fn close_button_closes() {
        let mut state = ready();
        toggle_leaderboard(&mut state);
        activate(&mut state, CLOSE_LEADERBOARD);
        assert!(!state.interaction.leaderboard_open);
    }

    // ── keyboard ────────────────────────────────────────────────

    #[test]
    fn typing_into_focused_field() {
        let mut state = ready();
        activate(&mut state, FOCUS_USERNAME);
        for c in "alicex".chars() {
            key(&mut state, c);
        }
        backspace(&mut state);
        assert_eq!(state.login.username, "alice");
        // 'r' typed into the field does not open the ranking
        key(&mut state, 'r');
        assert!(!state.interaction.leaderboard_open);
        assert_eq!(state.login.username, "alicer");
    }

    #[test]
    fn username_length_capped() {
        let mut state = ready();
        activate(&mut state, FOCUS_USERNAME);
        for _ in 0..100 {
            key(&mut state, 'a');
        }
        assert_eq!(state.login.username.len(), USERNAME_MAX_LEN);
    }

    #[test]
    fn enter_submits_and_escape_blurs() {
        let mut state = ready();
        key(&mut state, 'l');
        assert!(state.login.focused);
        key(&mut state, 'b');
        key(&mut state, 'o');
        assert_eq!(enter(&mut state), vec![Effect::Login("bo".into())]);

        let mut state = ready();
        key(&mut state, 'l');
        escape(&mut state);
        assert!(!state.login.focused);
    }

    #[test]
    fn shortcuts_when_unfocused() {
        let mut state = ready();
        assert_eq!(key(&mut state, 'r'), vec![Effect::FetchLeaderboard]);
        escape(&mut state);
        assert!(!state.interaction.leaderboard_open);
    }

    // ── feature set ─────────────────────────────────────────────

    #[test]
    fn minimal_feature_set_blocks_session_and_leaderboard() {
        let mut config = Config::default();
        config.feature_set = FeatureSet::Minimal;
        let mut state = SurfaceState::new(&config);
        restore(&mut state, None);

        assert!(toggle_leaderboard(&mut state).is_empty());
        assert!(!state.interaction.leaderboard_open);
        activate(&mut state, FOCUS_USERNAME);
        assert!(!state.login.focused);
        state.login.username = "alice".into();
        assert!(submit_login(&mut state).is_empty());
        assert!(key(&mut state, 'r').is_empty());

        // Local counting still works
        pointer_down(&mut state, None, 0.0);
        assert_eq!(state.click_count, 1);
    }
}
