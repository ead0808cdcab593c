use serde::{Deserialize, Serialize};

/// Seven days. Must exceed the timestamp jitter publishers apply to group
/// events, or a resync can skip messages.
pub const DEFAULT_SYNC_SLACK_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Subtracted from the last sync time when planning a resync. Values
    /// below `DEFAULT_SYNC_SLACK_SECS` are raised to it; see `sync_slack`.
    pub sync_slack_secs: u64,
    /// Upper bound on merged relays; `None` keeps every hint.
    pub relay_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sync_slack_secs: DEFAULT_SYNC_SLACK_SECS,
            relay_limit: None,
        }
    }
}

impl EngineConfig {
    /// Effective slack. Never shorter than the publishers' jitter window.
    pub fn sync_slack(&self) -> u64 {
        self.sync_slack_secs.max(DEFAULT_SYNC_SLACK_SECS)
    }
}
