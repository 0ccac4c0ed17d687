//! Delivery pacing from TOML (`[delivery]` section)

use newsquiz_application::PacingPolicy;
use newsquiz_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDeliveryConfig {
    pub pacing_min_secs: u64,
    pub pacing_max_secs: u64,
}

impl Default for FileDeliveryConfig {
    fn default() -> Self {
        Self {
            pacing_min_secs: 5,
            pacing_max_secs: 9,
        }
    }
}

impl FileDeliveryConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.pacing_min_secs > self.pacing_max_secs {
            vec![ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "delivery.pacing_min_secs".to_string(),
                },
                format!(
                    "delivery.pacing_min_secs ({}) is greater than pacing_max_secs ({})",
                    self.pacing_min_secs, self.pacing_max_secs
                ),
            )]
        } else {
            Vec::new()
        }
    }

    pub fn to_pacing(&self) -> PacingPolicy {
        PacingPolicy::new(
            Duration::from_secs(self.pacing_min_secs),
            Duration::from_secs(self.pacing_max_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_bounds_are_error() {
        let config = FileDeliveryConfig {
            pacing_min_secs: 10,
            pacing_max_secs: 2,
        };
        assert!(ConfigIssue::has_errors(&config.validate()));
    }

    #[test]
    fn test_zero_pacing_is_none() {
        let config = FileDeliveryConfig {
            pacing_min_secs: 0,
            pacing_max_secs: 0,
        };
        assert!(config.validate().is_empty());
        assert!(config.to_pacing().is_none());
    }
}
