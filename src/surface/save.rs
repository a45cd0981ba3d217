//! Click count persistence in localStorage.
//!
//! The value is a plain decimal string under `clicked_<app>`. Failures never
//! reach the surface: they are logged and the page keeps counting in memory.

use crate::log;

pub fn encode_count(count: u64) -> String {
    count.to_string()
}

/// Parse a stored count. Leading whitespace and trailing junk are tolerated
/// (`"42px"` reads as 42); anything without leading digits is `None`.
pub fn decode_count(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate instead of dropping an absurdly large stored tally.
    Some(digits[..end].parse::<u64>().unwrap_or(u64::MAX))
}

fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Read the stored count. Missing or unreadable values come back as `None`.
pub fn load_count(key: &str) -> Option<u64> {
    let storage = match get_storage() {
        Some(s) => s,
        None => {
            log::warn("localStorage unavailable, starting from 0");
            return None;
        }
    };

    let raw = match storage.get_item(key) {
        Ok(Some(v)) => v,
        Ok(None) => return None,
        Err(e) => {
            log::warn(&format!("failed to read {key}: {e:?}"));
            return None;
        }
    };

    let count = decode_count(&raw);
    if count.is_none() {
        log::warn(&format!("ignoring unparseable {key}={raw:?}"));
    }
    count
}

pub fn save_count(key: &str, count: u64) {
    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(key, &encode_count(count)) {
            log::warn(&format!("failed to write {key}: {e:?}"));
        }
    }
}
