use std::path::Path;

use anyhow::Context;
use gk_core::config::DEFAULT_SYNC_SLACK_SECS;
use gk_core::EngineConfig;
use tracing::{debug, warn};

use crate::paths::config_file;

/// Explicit path must exist; the default location is optional.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let path = config_file()?;
            if path.exists() {
                read_config(&path)
            } else {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(EngineConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> anyhow::Result<EngineConfig> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let config: EngineConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing config {}", path.display()))?;
    if config.sync_slack_secs < DEFAULT_SYNC_SLACK_SECS {
        warn!(
            configured = config.sync_slack_secs,
            applied = config.sync_slack(),
            "sync slack below the jitter window, raising it"
        );
    }
    debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}
