//! Global output-mode flags shared by subcommands.
//!
//! Set once at startup from the top-level CLI flags, read everywhere.

use std::sync::atomic::{AtomicBool, Ordering};

static JSON: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Record the top-level output flags. Call once, before any command runs.
pub fn init(json: bool, quiet: bool) {
    JSON.store(json, Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Whether `--json` was passed.
pub fn is_json() -> bool {
    JSON.load(Ordering::Relaxed)
}

/// Whether `--quiet` was passed.
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}
