//! Deadline-based timers polled from the render loop.
//!
//! `draw_web()` runs at ~60fps. Instead of scheduling browser timeouts, the
//! surface stores deadlines and the loop feeds the current `performance.now()`
//! into `poll()`. Timers stay plain values, deterministic and fully testable.

/// Current time in milliseconds: `performance.now()`, or wall-clock
/// `Date.now()` where the Performance API is missing.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Coalesces bursts of triggers into a single delivery.
///
/// Each `trigger` replaces the pending value and pushes the deadline to
/// `now + window`. `poll` hands the latest value out once the window elapsed
/// with no further trigger.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    window_ms: f64,
    pending: Option<(T, f64)>,
}

impl<T> Debounce<T> {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            pending: None,
        }
    }

    pub fn trigger(&mut self, value: T, now_ms: f64) {
        self.pending = Some((value, now_ms + self.window_ms));
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now_ms >= *deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(v, _)| v)
    }
}

/// A flag that switches itself off a fixed time after the last `fire`.
#[derive(Debug, Clone)]
pub struct Pulse {
    duration_ms: f64,
    until: Option<f64>,
}

impl Pulse {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            until: None,
        }
    }

    pub fn fire(&mut self, now_ms: f64) {
        self.until = Some(now_ms + self.duration_ms);
    }

    /// Clear the flag once expired. Returns true if it was cleared by this call.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.until {
            Some(until) if now_ms >= until => {
                self.until = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.until.is_some()
    }
}
