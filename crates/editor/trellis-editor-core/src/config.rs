//! Session configuration.

use serde::{Deserialize, Serialize};

/// Tunables for one editor session.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Minimum milliseconds between tick-driven label/selector refreshes of
    /// the same node. Ticks arriving earlier are skipped, never queued.
    pub label_refresh_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            label_refresh_ms: 250,
        }
    }
}
