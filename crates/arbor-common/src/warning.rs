//! Deduplicated parser warnings.
//!
//! Reports constructs the parser accepts but does not fully support (table
//! content without foster parenting, undecoded character references). Each
//! distinct message is logged once per process until [`clear_warnings`].

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already logged (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about an unsupported construct (logged once per unique message)
///
/// # Example
/// ```
/// arbor_common::warning::warn_once("HTML", "table content is not foster-parented");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first_time {
        log::warn!(target: "arbor", "[{component}] {message}");
    }
}

/// Returns true if `warn_once` has already logged this message.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call before parsing an unrelated document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_records_message() {
        warn_once("Test", "recorded message");
        assert!(was_warned("Test", "recorded message"));
        assert!(!was_warned("Test", "never logged"));

        clear_warnings();
        assert!(!was_warned("Test", "recorded message"));
    }
}
