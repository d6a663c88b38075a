//! Cache lifecycle events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A cache lifecycle event raised by the backend.
///
/// The discriminant values are the wire ordinals; `ALL` lists the variants
/// in ordinal order and a test pins the correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CacheEventId {
    Checking = 0,
    Error = 1,
    NoUpdate = 2,
    Downloading = 3,
    Progress = 4,
    UpdateReady = 5,
    Cached = 6,
    Obsolete = 7,
}

impl CacheEventId {
    /// Every event in ordinal order.
    pub const ALL: [CacheEventId; 8] = [
        Self::Checking,
        Self::Error,
        Self::NoUpdate,
        Self::Downloading,
        Self::Progress,
        Self::UpdateReady,
        Self::Cached,
        Self::Obsolete,
    ];

    /// Display name used in console log messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Checking => "Checking",
            Self::Error => "Error",
            Self::NoUpdate => "NoUpdate",
            Self::Downloading => "Downloading",
            Self::Progress => "Progress",
            Self::UpdateReady => "UpdateReady",
            Self::Cached => "Cached",
            Self::Obsolete => "Obsolete",
        }
    }

    /// Wire ordinal of this event.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for CacheEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error parsing an event name.
#[derive(Debug, thiserror::Error)]
#[error("unknown cache event: {0}")]
pub struct ParseEventError(String);

impl FromStr for CacheEventId {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|event| event.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ParseEventError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_match_positions() {
        for (index, event) in CacheEventId::ALL.iter().enumerate() {
            assert_eq!(event.ordinal() as usize, index);
        }
    }

    #[test]
    fn test_names_are_unique() {
        for a in CacheEventId::ALL {
            for b in CacheEventId::ALL {
                if a != b {
                    assert_ne!(a.name(), b.name());
                }
            }
        }
    }

    #[test]
    fn test_event_from_str_roundtrip() {
        for event in CacheEventId::ALL {
            let parsed: CacheEventId = event.name().parse().unwrap();
            assert_eq!(parsed, event);
        }
        assert!("Swapping".parse::<CacheEventId>().is_err());
    }
}
