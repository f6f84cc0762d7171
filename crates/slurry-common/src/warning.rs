//! Parser warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the scanner and parser to report markup they had to repair.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<BTreeSet<String>> = Mutex::new(BTreeSet::new());

fn warned() -> MutexGuard<'static, BTreeSet<String>> {
    // A panic while holding the lock cannot leave the set half-updated.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about repaired markup (prints once per unique message).
///
/// Returns `true` if the warning was printed, `false` if an identical warning
/// was already reported since the last [`clear_warnings`].
///
/// # Example
/// ```
/// use slurry_common::warning::warn_once;
///
/// assert!(warn_once("HTML Parser", "ignored unmatched end tag </span>"));
/// assert!(!warn_once("HTML Parser", "ignored unmatched end tag </span>"));
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let should_print = warned().insert(key(component, message));

    if should_print {
        eprintln!("{}", format!("[slurry {component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Returns true if this warning has been reported since the last clear.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    warned().contains(&key(component, message))
}

/// Clear all recorded warnings (call when starting a new document).
pub fn clear_warnings() {
    warned().clear();
}
