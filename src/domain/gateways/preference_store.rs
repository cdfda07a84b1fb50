//! Per-user settings storage boundary.

/// Key-value settings scoped by the signed-in user's identifier.
///
/// Holds the pinned short-URL list and boolean toggles. Writes are best
/// effort: implementations log and swallow storage failures the way a
/// settings layer should, so a broken disk never fails a link operation.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStore: Send + Sync {
    /// Short URLs the user pinned, in pin order.
    fn pinned_links(&self, uid: &str) -> Vec<String>;

    /// Replaces the pinned short-URL list.
    fn set_pinned_links(&self, uid: &str, keys: &[String]);

    /// Reads a boolean toggle, defaulting to false when never set.
    fn get_flag(&self, uid: &str, name: &str) -> bool;

    fn set_flag(&self, uid: &str, name: &str, value: bool);
}

/// Toggle name: delete expired links instead of appending them on fetch.
pub const DELETE_EXPIRED_FLAG: &str = "DeleteExpired";
