use anyhow::{Context, Result};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use vigil_config::RulesConfig;

/// Suppression and threshold rules applied during normalization.
///
/// Built once from configuration before any fetch starts, then read-only
/// for the rest of the run.
#[derive(Debug)]
pub struct SuppressionRules {
    /// Devices never reported as inactive, whatever their staleness.
    pub ignored_device_ids: HashSet<String>,

    /// Per-device inactivity timeouts in days, overriding the default.
    pub timeout_overrides: HashMap<String, i64>,

    /// Opt-in set: only these controller devices are battery-checked.
    pub low_battery_device_ids: HashSet<String>,

    pub low_battery_threshold: u8,

    /// A log key matched anywhere by any of these patterns is dropped.
    pub ignored_log_patterns: Vec<Regex>,

    pub default_timeout_days: i64,
}

impl SuppressionRules {
    /// Compile the raw configured rules. Fails on an invalid regex pattern.
    pub fn from_config(config: &RulesConfig) -> Result<Self> {
        let ignored_log_patterns = config
            .ignored_log_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("invalid ignored log pattern: {:?}", pattern))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ignored_device_ids: config.ignored_device_ids.iter().cloned().collect(),
            timeout_overrides: config.timeout_overrides.clone(),
            low_battery_device_ids: config.low_battery_device_ids.iter().cloned().collect(),
            low_battery_threshold: config.low_battery_threshold,
            ignored_log_patterns,
            default_timeout_days: config.default_timeout_days,
        })
    }

    /// Inactivity timeout for one device: the per-device override when
    /// present, else the configured default.
    pub fn effective_timeout(&self, idx: &str) -> i64 {
        self.timeout_overrides
            .get(idx)
            .copied()
            .unwrap_or(self.default_timeout_days)
    }

    /// Whether any ignored pattern matches anywhere in the derived log key.
    pub fn is_ignored_log_key(&self, key: &str) -> bool {
        self.ignored_log_patterns.iter().any(|p| p.is_match(key))
    }
}

impl Default for SuppressionRules {
    fn default() -> Self {
        Self {
            ignored_device_ids: HashSet::new(),
            timeout_overrides: HashMap::new(),
            low_battery_device_ids: HashSet::new(),
            low_battery_threshold: 20,
            ignored_log_patterns: Vec::new(),
            default_timeout_days: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = RulesConfig {
            ignored_device_ids: vec!["15".to_string()],
            timeout_overrides: [("12".to_string(), 14)].into_iter().collect(),
            low_battery_device_ids: vec!["4".to_string()],
            low_battery_threshold: 25,
            ignored_log_patterns: vec!["heartbeat".to_string()],
            default_timeout_days: 5,
        };

        let rules = SuppressionRules::from_config(&config).unwrap();
        assert!(rules.ignored_device_ids.contains("15"));
        assert_eq!(rules.effective_timeout("12"), 14);
        assert_eq!(rules.effective_timeout("99"), 5);
        assert!(rules.is_ignored_log_key("lost heartbeat from node 7"));
        assert!(!rules.is_ignored_log_key("disk full on /tmp"));
    }

    #[test]
    fn test_from_config_rejects_bad_pattern() {
        let config = RulesConfig {
            ignored_log_patterns: vec!["[unclosed".to_string()],
            ..Default::default()
        };

        let err = SuppressionRules::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("invalid ignored log pattern"));
    }

    #[test]
    fn test_pattern_matches_as_substring_search() {
        let config = RulesConfig {
            ignored_log_patterns: vec!["node \\d+ unreachable".to_string()],
            ..Default::default()
        };

        let rules = SuppressionRules::from_config(&config).unwrap();
        // Matching anywhere inside the key is enough.
        assert!(rules.is_ignored_log_key("Error: node 42 unreachable, retrying"));
        assert!(!rules.is_ignored_log_key("Error: node unreachable"));
    }
}
