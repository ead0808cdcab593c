use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayMode {
    Read,
    Write,
}

/// Relay list entry. `read`/`write` default to enabled when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relay {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<bool>,
}

impl Relay {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            read: None,
            write: None,
        }
    }

    pub fn supports(&self, mode: RelayMode) -> bool {
        match mode {
            RelayMode::Read => self.read != Some(false),
            RelayMode::Write => self.write != Some(false),
        }
    }
}

/// Canonical form used to dedupe relay urls. `None` for blank input.
pub fn normalize_relay_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_case_whitespace_and_trailing_slash() {
        assert_eq!(
            normalize_relay_url("  WSS://Relay.Example/ "),
            Some("wss://relay.example".to_string())
        );
        assert_eq!(normalize_relay_url(" / "), None);
    }

    #[test]
    fn legacy_score_field_is_ignored() {
        let relay: Relay =
            serde_json::from_str(r#"{"url":"wss://r","score":0.7,"read":false}"#).unwrap();
        assert_eq!(relay, Relay { read: Some(false), ..Relay::new("wss://r") });
        assert!(!relay.supports(RelayMode::Read));
        assert!(relay.supports(RelayMode::Write));
    }
}
