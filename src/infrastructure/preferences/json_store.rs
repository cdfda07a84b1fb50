//! JSON-file-backed preference store.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::domain::gateways::PreferenceStore;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct UserPrefs {
    #[serde(default)]
    pinned: Vec<String>,
    #[serde(default)]
    flags: BTreeMap<String, bool>,
}

type Prefs = BTreeMap<String, UserPrefs>;

/// Per-user settings persisted as a single JSON file.
///
/// The whole file is rewritten on every mutation through a temporary file
/// plus rename, so a crash mid-write leaves the previous state intact.
/// Storage failures are logged and swallowed.
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<Prefs>,
}

impl JsonFileStore {
    /// Opens the store, starting empty when the file is absent or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "preference file unreadable, starting empty");
                Prefs::default()
            }),
            Err(_) => Prefs::default(),
        };

        Self {
            path,
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Prefs> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn persist(&self, prefs: &Prefs) {
        let raw = match serde_json::to_string_pretty(prefs) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize preferences");
                return;
            }
        };

        let tmp = self.path.with_extension("tmp");
        if let Err(e) = std::fs::write(&tmp, raw).and_then(|_| std::fs::rename(&tmp, &self.path)) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist preferences");
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn pinned_links(&self, uid: &str) -> Vec<String> {
        self.lock().get(uid).map(|p| p.pinned.clone()).unwrap_or_default()
    }

    fn set_pinned_links(&self, uid: &str, keys: &[String]) {
        let mut prefs = self.lock();
        prefs.entry(uid.to_string()).or_default().pinned = keys.to_vec();
        self.persist(&prefs);
    }

    fn get_flag(&self, uid: &str, name: &str) -> bool {
        self.lock()
            .get(uid)
            .and_then(|p| p.flags.get(name).copied())
            .unwrap_or(false)
    }

    fn set_flag(&self, uid: &str, name: &str, value: bool) {
        let mut prefs = self.lock();
        prefs
            .entry(uid.to_string())
            .or_default()
            .flags
            .insert(name.to_string(), value);
        self.persist(&prefs);
    }
}
