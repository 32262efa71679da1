//! Region-name daylight-saving heuristic.
//!
//! The rule only looks at the month and at the prefix of the IANA-style zone name.
//! It ignores the actual transition days and historical rule changes: a birth in
//! early March in New York is reported as summer time, one in early April in Sydney
//! as standard time. Callers get the heuristic's answer in
//! [`ConversionResult::dst`](crate::timezone::ConversionResult::dst).

use serde::{Deserialize, Serialize};

/// Months during which a region observes summer time, inclusive, possibly wrapping the
/// new year (`start > end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DstWindow {
    pub start_month: u8,
    pub end_month: u8,
}

impl DstWindow {
    pub fn contains(&self, month: u8) -> bool {
        if self.start_month <= self.end_month {
            (self.start_month..=self.end_month).contains(&month)
        } else {
            month >= self.start_month || month <= self.end_month
        }
    }
}

const RULES: &[(&str, DstWindow)] = &[
    ("America/", DstWindow { start_month: 3, end_month: 11 }),
    ("US/", DstWindow { start_month: 3, end_month: 11 }),
    ("Canada/", DstWindow { start_month: 3, end_month: 11 }),
    ("Europe/", DstWindow { start_month: 3, end_month: 10 }),
    ("Australia/", DstWindow { start_month: 10, end_month: 3 }),
    ("Pacific/Auckland", DstWindow { start_month: 9, end_month: 4 }),
];

/// Summer-time window for a timezone name, if its region has one.
pub fn dst_window(timezone: &str) -> Option<DstWindow> {
    RULES
        .iter()
        .find(|(prefix, _)| timezone.contains(prefix))
        .map(|(_, window)| *window)
}

/// Whether the heuristic puts `month` of `timezone` in summer time.
pub fn is_dst_active(timezone: &str, month: u8) -> bool {
    dst_window(timezone).is_some_and(|w| w.contains(month))
}

#[cfg(test)]
mod dst_test {
    use super::*;

    #[test]
    fn test_northern_windows() {
        assert!(is_dst_active("America/New_York", 3));
        assert!(is_dst_active("America/New_York", 11));
        assert!(!is_dst_active("America/New_York", 12));
        assert!(is_dst_active("Europe/Paris", 10));
        assert!(!is_dst_active("Europe/Paris", 11));
        assert!(is_dst_active("US/Pacific", 7));
    }

    #[test]
    fn test_southern_windows_wrap() {
        assert!(is_dst_active("Australia/Sydney", 1));
        assert!(is_dst_active("Australia/Sydney", 10));
        assert!(!is_dst_active("Australia/Sydney", 6));
        assert!(is_dst_active("Pacific/Auckland", 4));
        assert!(!is_dst_active("Pacific/Auckland", 5));
    }

    #[test]
    fn test_regions_without_dst() {
        assert!(!is_dst_active("Asia/Kolkata", 7));
        assert!(!is_dst_active("Asia/Tokyo", 1));
        assert!(!is_dst_active("UTC+05:00", 6));
        assert_eq!(dst_window("Africa/Lagos"), None);
    }
}
