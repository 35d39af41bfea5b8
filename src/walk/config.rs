//! Configuration for the bundle walker

/// Configuration for walking behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Sort each directory's entries by name. Without this, entries come in
    /// whatever order the file system enumerates them.
    pub sort_entries: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self { sort_entries: true }
    }
}
