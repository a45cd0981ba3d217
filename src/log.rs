//! Console logging.
//!
//! In the browser every line goes to the devtools console with a `pop:` prefix.
//! Native builds (unit tests) print to stderr instead.

const PREFIX: &str = "pop";

#[cfg(target_arch = "wasm32")]
pub fn info(msg: &str) {
    web_sys::console::log_1(&format!("{PREFIX}: {msg}").into());
}

#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&format!("{PREFIX}: {msg}").into());
}

#[cfg(target_arch = "wasm32")]
pub fn error(msg: &str) {
    web_sys::console::error_1(&format!("{PREFIX}: {msg}").into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn info(msg: &str) {
    eprintln!("{PREFIX}: {msg}");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(msg: &str) {
    eprintln!("{PREFIX} [warn]: {msg}");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn error(msg: &str) {
    eprintln!("{PREFIX} [error]: {msg}");
}
