//! Build-time configuration.
//!
//! Values come from environment variables captured when the wasm bundle is
//! built (`BACKEND_URL=... trunk build`). The page URL may override the
//! feature set with `?features=minimal` or `?features=full`.

/// Backend used when `BACKEND_URL` is not set at build time.
const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// App identifier used in the title and the storage key.
const DEFAULT_APP_ID: &str = "Roselia";

/// Remote click reports within this window are coalesced into one.
pub const REPORT_DEBOUNCE_MS: f64 = 1000.0;

/// How long the counter stays in its "bumped" style after a pop.
pub const POP_ANIM_MS: f64 = 15.0;

/// Which parts of the surface are reachable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureSet {
    /// Local counting only: no login, no leaderboard.
    Minimal,
    /// Login, remote click reports and leaderboard.
    Full,
}

impl FeatureSet {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Some(FeatureSet::Minimal),
            "full" => Some(FeatureSet::Full),
            _ => None,
        }
    }

    pub fn is_full(self) -> bool {
        self == FeatureSet::Full
    }
}

/// How a touch-originated pop reaches the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchReport {
    /// Same debounced path as mouse pops.
    Debounced,
    /// Report every tap right away, bypassing the debounce window.
    Immediate,
}

impl TouchReport {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debounced" => Some(TouchReport::Debounced),
            "immediate" => Some(TouchReport::Immediate),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the backend, without a trailing slash.
    pub backend_url: String,
    pub app_id: String,
    pub feature_set: FeatureSet,
    pub touch_report: TouchReport,
    pub debounce_ms: f64,
    pub pop_anim_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            app_id: DEFAULT_APP_ID.to_string(),
            feature_set: FeatureSet::Full,
            touch_report: TouchReport::Debounced,
            debounce_ms: REPORT_DEBOUNCE_MS,
            pop_anim_ms: POP_ANIM_MS,
        }
    }
}

impl Config {
    /// Assemble the configuration from build-time environment values.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("BACKEND_URL"),
            option_env!("APP_ID"),
            option_env!("FEATURE_SET"),
            option_env!("TOUCH_CLICK_REPORT"),
        )
    }

    /// Unknown or empty values fall back to the defaults.
    pub fn from_values(
        backend_url: Option<&str>,
        app_id: Option<&str>,
        feature_set: Option<&str>,
        touch_report: Option<&str>,
    ) -> Self {
        let mut config = Config::default();
        if let Some(url) = backend_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.backend_url = url.trim_end_matches('/').to_string();
        }
        if let Some(id) = app_id.map(str::trim).filter(|i| !i.is_empty()) {
            config.app_id = id.to_string();
        }
        if let Some(fs) = feature_set.and_then(FeatureSet::parse) {
            config.feature_set = fs;
        }
        if let Some(tr) = touch_report.and_then(TouchReport::parse) {
            config.touch_report = tr;
        }
        config
    }

    /// Apply `?features=...` from the page's query string, if present.
    pub fn apply_query(&mut self, query: &str) {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&') {
            if let Some(("features", value)) = pair.split_once('=') {
                if let Some(fs) = FeatureSet::parse(value) {
                    self.feature_set = fs;
                }
            }
        }
    }

    /// localStorage key holding the click count.
    pub fn storage_key(&self) -> String {
        format!("clicked_{}", self.app_id)
    }
}
