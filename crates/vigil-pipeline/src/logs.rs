use std::collections::HashMap;
use vigil_types::{LogError, LogRecord};

use crate::rules::SuppressionRules;

/// Fixed-width timestamp/severity prefix on every controller log line.
const LOG_PREFIX_LEN: usize = 32;

/// Collapse raw error-log entries into distinct recurring messages.
///
/// The anomaly key is the message with its fixed-width prefix stripped, so
/// repeats of the same error at different times collapse into one entry.
/// Keys matched anywhere by an ignored pattern are dropped. Output is
/// sorted descending by count; ties keep first-seen order (stable sort over
/// first-seen accumulation), so the result only depends on the multiset of
/// input messages.
pub fn recurring_log_errors(records: &[LogRecord], rules: &SuppressionRules) -> Vec<LogError> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for record in records {
        // A short message (or one cut mid-character) degrades to an empty
        // key rather than panicking.
        let key = record.message.get(LOG_PREFIX_LEN..).unwrap_or("");

        if rules.is_ignored_log_key(key) {
            continue;
        }

        match counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                counts.insert(key, 1);
                first_seen.push(key);
            }
        }
    }

    let mut errors: Vec<LogError> = first_seen
        .into_iter()
        .map(|key| LogError {
            text: key.to_string(),
            count: counts[key],
        })
        .collect();

    errors.sort_by(|a, b| b.count.cmp(&a.count));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_config::RulesConfig;

    /// Builds a log line with the fixed-width 32-char prefix the
    /// controller writes, varying the seconds field per call.
    fn record(second: usize, text: &str) -> LogRecord {
        let prefix = format!("2024-01-01 00:00:0{}.000 Error:  ", second % 10);
        assert_eq!(prefix.len(), LOG_PREFIX_LEN);
        LogRecord {
            message: format!("{}{}", prefix, text),
        }
    }

    #[test]
    fn test_repeats_collapse_into_one_entry() {
        let records = vec![
            record(0, "disk full on /tmp"),
            record(1, "disk full on /tmp"),
        ];

        let errors = recurring_log_errors(&records, &SuppressionRules::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].text, "disk full on /tmp");
        assert_eq!(errors[0].count, 2);
    }

    #[test]
    fn test_sorted_descending_by_count() {
        let records = vec![
            record(0, "rare failure happened"),
            record(1, "frequent failure here"),
            record(2, "frequent failure here"),
            record(3, "frequent failure here"),
        ];

        let errors = recurring_log_errors(&records, &SuppressionRules::default());
        assert_eq!(errors[0].text, "frequent failure here");
        assert_eq!(errors[0].count, 3);
        assert_eq!(errors[1].count, 1);
    }

    #[test]
    fn test_equal_counts_keep_first_seen_order() {
        let records = vec![
            record(0, "seen first, same count"),
            record(1, "seen later, same count"),
            record(2, "seen first, same count"),
            record(3, "seen later, same count"),
        ];

        let errors = recurring_log_errors(&records, &SuppressionRules::default());
        assert_eq!(errors[0].text, "seen first, same count");
        assert_eq!(errors[1].text, "seen later, same count");
    }

    #[test]
    fn test_output_invariant_under_input_reordering() {
        let mut records = vec![
            record(0, "alpha failure occurred"),
            record(1, "beta failure occurred!"),
            record(2, "alpha failure occurred"),
            record(3, "alpha failure occurred"),
        ];

        let forward = recurring_log_errors(&records, &SuppressionRules::default());
        records.reverse();
        let backward = recurring_log_errors(&records, &SuppressionRules::default());

        let forward_pairs: Vec<(String, u64)> =
            forward.iter().map(|e| (e.text.clone(), e.count)).collect();
        let mut backward_pairs: Vec<(String, u64)> =
            backward.iter().map(|e| (e.text.clone(), e.count)).collect();

        // The (key, count) multiset does not depend on arrival order.
        backward_pairs.sort();
        let mut sorted_forward = forward_pairs.clone();
        sorted_forward.sort();
        assert_eq!(sorted_forward, backward_pairs);

        // And both outputs are sorted descending by count.
        assert!(forward.windows(2).all(|w| w[0].count >= w[1].count));
        assert!(backward.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_ignored_pattern_suppresses_key() {
        let config = RulesConfig {
            ignored_log_patterns: vec!["disk full".to_string()],
            ..Default::default()
        };
        let rules = SuppressionRules::from_config(&config).unwrap();

        let records = vec![
            record(0, "disk full on /tmp"),
            record(1, "unrelated failure here"),
        ];

        let errors = recurring_log_errors(&records, &rules);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].text, "unrelated failure here");
    }

    #[test]
    fn test_short_message_degrades_to_empty_key() {
        let records = vec![LogRecord {
            message: "too short".to_string(),
        }];

        let errors = recurring_log_errors(&records, &SuppressionRules::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].text, "");
        assert_eq!(errors[0].count, 1);
    }

    #[test]
    fn test_no_records_yield_no_errors() {
        let errors = recurring_log_errors(&[], &SuppressionRules::default());
        assert!(errors.is_empty());
    }
}
