//! Scenario files replayed as the backend event stream.

use anyhow::{Context, Result};
use appcache_core::{CacheEventId, CacheStatus};
use serde::Deserialize;

/// A scripted backend session.
#[derive(Debug, Default, Deserialize)]
pub struct Scenario {
    /// Status seeded into the backend before the first script poll.
    pub status: Option<CacheStatus>,

    /// Lifecycle events replayed after cache selection.
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

/// One backend event in a scenario.
#[derive(Debug, Deserialize)]
pub struct ScenarioEvent {
    /// Event name, e.g. "Checking" or "Progress".
    pub kind: String,

    /// Resource URL (Progress events).
    pub url: Option<String>,

    /// Total resources (Progress events).
    pub total: Option<u32>,

    /// Completed resources (Progress events).
    pub complete: Option<u32>,

    /// Error description (Error events).
    pub message: Option<String>,
}

impl Scenario {
    /// Load a scenario from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse scenario: {}", path))
    }
}

impl ScenarioEvent {
    /// Resolve the event name to an event id.
    pub fn event_id(&self) -> Result<CacheEventId> {
        Ok(self.kind.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario() {
        let scenario: Scenario = toml::from_str(
            r#"
status = "checking"

[[events]]
kind = "Checking"

[[events]]
kind = "Progress"
url = "http://example.com/logo.png"
total = 4
complete = 1

[[events]]
kind = "Error"
message = "manifest fetch failed"
"#,
        )
        .unwrap();

        assert_eq!(scenario.status, Some(CacheStatus::Checking));
        assert_eq!(scenario.events.len(), 3);
        assert_eq!(
            scenario.events[1].event_id().unwrap(),
            CacheEventId::Progress
        );
        assert_eq!(scenario.events[1].total, Some(4));
    }

    #[test]
    fn test_unknown_event_kind_is_rejected() {
        let event = ScenarioEvent {
            kind: "Swapping".to_string(),
            url: None,
            total: None,
            complete: None,
            message: None,
        };
        assert!(event.event_id().is_err());
    }
}
