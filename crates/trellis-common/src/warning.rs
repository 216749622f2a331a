//! Render advisories with colored terminal output.
//!
//! Some pipeline conditions are tolerated by design instead of failing the
//! render (a buffered slot without an area name, an unterminated
//! field-access marker). Those still deserve a trace for editors debugging
//! a page, so they go through this channel. Deduplication keeps a grid
//! rendering hundreds of items from repeating the same advisory.

use owo_colors::OwoColorize;
use std::collections::HashSet;
use std::sync::Mutex;

/// Advisories already reported in this process, for deduplication.
static REPORTED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Report a render advisory (prints once per unique component/message pair).
///
/// # Example
/// ```ignore
/// warn_once("slot", "buffered slot body without an area name was dropped");
/// ```
///
/// # Panics
/// Panics if the advisory set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("{component}: {message}");
    let first = REPORTED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first {
        eprintln!("{} {message}", format!("[trellis {component}]").yellow());
    }
}

/// Forget all reported advisories (call at the start of a new render pass).
///
/// # Panics
/// Panics if the advisory set mutex is poisoned.
pub fn clear_warnings() {
    let mut reported = REPORTED.lock().unwrap();
    if let Some(set) = reported.as_mut() {
        set.clear();
    }
}
