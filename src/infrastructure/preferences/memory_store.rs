//! In-memory preference store for tests and the CLI default.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::gateways::PreferenceStore;

#[derive(Debug, Default)]
struct UserPrefs {
    pinned: Vec<String>,
    flags: BTreeMap<String, bool>,
}

/// Settings held only for the process lifetime.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<BTreeMap<String, UserPrefs>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, UserPrefs>> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn pinned_links(&self, uid: &str) -> Vec<String> {
        self.lock().get(uid).map(|p| p.pinned.clone()).unwrap_or_default()
    }

    fn set_pinned_links(&self, uid: &str, keys: &[String]) {
        self.lock().entry(uid.to_string()).or_default().pinned = keys.to_vec();
    }

    fn get_flag(&self, uid: &str, name: &str) -> bool {
        self.lock()
            .get(uid)
            .and_then(|p| p.flags.get(name).copied())
            .unwrap_or(false)
    }

    fn set_flag(&self, uid: &str, name: &str, value: bool) {
        self.lock()
            .entry(uid.to_string())
            .or_default()
            .flags
            .insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_empty_and_false() {
        let store = MemoryStore::new();
        assert!(store.pinned_links("user-1").is_empty());
        assert!(!store.get_flag("user-1", "anything"));
    }

    #[test]
    fn test_set_and_get() {
        let store = MemoryStore::new();
        store.set_pinned_links("user-1", &["abc123".to_string()]);
        store.set_flag("user-1", "DeleteExpired", true);

        assert_eq!(store.pinned_links("user-1"), vec!["abc123"]);
        assert!(store.get_flag("user-1", "DeleteExpired"));
    }
}
