//! Host configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a cache host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// URL schemes eligible for caching.
    #[serde(default = "default_schemes")]
    pub supported_schemes: Vec<String>,
}

fn default_schemes() -> Vec<String> {
    vec!["http".to_string(), "https".to_string()]
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            supported_schemes: default_schemes(),
        }
    }
}

impl HostConfig {
    /// Set the supported schemes.
    pub fn with_schemes(mut self, schemes: Vec<&str>) -> Self {
        self.supported_schemes = schemes.into_iter().map(String::from).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schemes() {
        let config = HostConfig::default();
        assert_eq!(config.supported_schemes, vec!["http", "https"]);
    }

    #[test]
    fn test_with_schemes() {
        let config = HostConfig::default().with_schemes(vec!["https"]);
        assert_eq!(config.supported_schemes, vec!["https"]);
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: HostConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.supported_schemes, vec!["http", "https"]);
    }
}
