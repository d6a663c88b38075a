//! Script-visible cache status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of a host's cache association, as observed by script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    /// No cache is associated with the host.
    #[default]
    Uncached,
    /// A cache is associated and up to date.
    Idle,
    /// The backend is checking the manifest for updates.
    Checking,
    /// A new version of the cache is being downloaded.
    Downloading,
    /// A newer cache version is ready to be swapped in.
    UpdateReady,
    /// The associated cache has been made obsolete.
    Obsolete,
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncached => write!(f, "UNCACHED"),
            Self::Idle => write!(f, "IDLE"),
            Self::Checking => write!(f, "CHECKING"),
            Self::Downloading => write!(f, "DOWNLOADING"),
            Self::UpdateReady => write!(f, "UPDATEREADY"),
            Self::Obsolete => write!(f, "OBSOLETE"),
        }
    }
}

/// Error parsing a status name.
#[derive(Debug, thiserror::Error)]
#[error("unknown cache status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for CacheStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uncached" => Ok(Self::Uncached),
            "idle" => Ok(Self::Idle),
            "checking" => Ok(Self::Checking),
            "downloading" => Ok(Self::Downloading),
            "updateready" => Ok(Self::UpdateReady),
            "obsolete" => Ok(Self::Obsolete),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_uncached() {
        assert_eq!(CacheStatus::default(), CacheStatus::Uncached);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", CacheStatus::UpdateReady), "UPDATEREADY");
    }

    #[test]
    fn test_status_from_str() {
        let status: CacheStatus = "Downloading".parse().unwrap();
        assert_eq!(status, CacheStatus::Downloading);
        assert!("stale".parse::<CacheStatus>().is_err());
    }
}
