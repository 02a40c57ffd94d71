//! Time-range helpers for slot handling
//!
//! Slots are half-open intervals `[start, end)`: two slots overlap iff
//! `a.start < b.end && b.start < a.end`. Touching endpoints do not overlap,
//! so back-to-back consultations are allowed.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Half-open interval overlap test.
pub fn ranges_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whether `[start, end)` overlaps any of the given `(start, end)` slots.
pub fn has_overlap(
    existing: &[(DateTime<Utc>, DateTime<Utc>)],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> bool {
    existing
        .iter()
        .any(|&(s, e)| ranges_overlap(s, e, start, end))
}

/// A weekly recurring availability window, e.g. Mondays 09:00–17:00.
///
/// `day_of_week` is 0 = Sunday … 6 = Saturday. Times are "HH:MM" strings;
/// the end bound is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

/// Whether the given instant falls inside the window.
pub fn is_within_availability(window: &AvailabilityWindow, at: DateTime<Utc>) -> bool {
    if u8::try_from(at.weekday().num_days_from_sunday()).unwrap_or(7) != window.day_of_week {
        return false;
    }
    let current = format!("{:02}:{:02}", at.hour(), at.minute());
    current.as_str() >= window.start_time.as_str() && current.as_str() < window.end_time.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        // 2025-06-02 is a Monday
        Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
    }

    #[test]
    fn overlapping_ranges_overlap() {
        assert!(ranges_overlap(at(10, 0), at(10, 30), at(10, 15), at(10, 45)));
        assert!(ranges_overlap(at(10, 15), at(10, 45), at(10, 0), at(10, 30)));
    }

    #[test]
    fn contained_range_overlaps() {
        assert!(ranges_overlap(at(10, 0), at(11, 0), at(10, 15), at(10, 30)));
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        // [10:00, 10:30) and [10:30, 11:00) touch but do not intersect
        assert!(!ranges_overlap(at(10, 0), at(10, 30), at(10, 30), at(11, 0)));
        assert!(!ranges_overlap(at(10, 30), at(11, 0), at(10, 0), at(10, 30)));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        assert!(!ranges_overlap(at(9, 0), at(9, 30), at(10, 0), at(10, 30)));
    }

    #[test]
    fn has_overlap_scans_all_slots() {
        let existing = vec![(at(9, 0), at(9, 30)), (at(11, 0), at(11, 30))];
        assert!(has_overlap(&existing, at(11, 15), at(11, 45)));
        assert!(!has_overlap(&existing, at(9, 30), at(10, 0)));
        assert!(!has_overlap(&[], at(9, 0), at(10, 0)));
    }

    #[test]
    fn availability_window_matches_day_and_time() {
        let window = AvailabilityWindow {
            day_of_week: 1, // Monday
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
        };

        assert!(is_within_availability(&window, at(9, 0)));
        assert!(is_within_availability(&window, at(16, 59)));
        // end bound is exclusive
        assert!(!is_within_availability(&window, at(17, 0)));
        assert!(!is_within_availability(&window, at(8, 59)));
    }

    #[test]
    fn availability_window_rejects_other_days() {
        let window = AvailabilityWindow {
            day_of_week: 2, // Tuesday
            start_time: "00:00".to_string(),
            end_time: "23:59".to_string(),
        };
        assert!(!is_within_availability(&window, at(12, 0)));
    }
}
