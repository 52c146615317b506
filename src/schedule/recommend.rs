// Slot recommender — walks forward from a reference time through the
// platform's best-time table.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use super::tables::Platform;

/// How far ahead to look for slots. Every table has at least one slot per
/// week, so four weeks always yields something for small counts.
pub const SEARCH_DAYS: i64 = 28;

/// The next `count` recommended posting times strictly after `after`.
///
/// Results are in chronological order. Fewer than `count` are returned only
/// when the search window runs out.
pub fn recommend(platform: Platform, after: NaiveDateTime, count: usize) -> Vec<NaiveDateTime> {
    let mut slots = Vec::with_capacity(count);
    if count == 0 {
        return slots;
    }

    let start = after.date();
    for offset in 0..SEARCH_DAYS {
        let day = start + Duration::days(offset);
        if !platform.best_days().contains(&day.weekday()) {
            continue;
        }
        for &hour in platform.best_hours() {
            let Some(slot) = day.and_hms_opt(hour, 0, 0) else {
                continue;
            };
            if slot <= after {
                continue;
            }
            slots.push(slot);
            if slots.len() == count {
                return slots;
            }
        }
    }

    slots
}

/// Is `at` inside one of the platform's best slots (same weekday and hour)?
pub fn is_good_time(platform: Platform, at: NaiveDateTime) -> bool {
    platform.best_days().contains(&at.weekday()) && platform.best_hours().contains(&at.hour())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_linkedin_from_monday_morning() {
        // 2026-10-12 is a Monday
        let slots = recommend(Platform::LinkedIn, at(2026, 10, 12, 9, 0), 4);
        assert_eq!(
            slots,
            vec![
                at(2026, 10, 13, 8, 0),
                at(2026, 10, 13, 12, 0),
                at(2026, 10, 13, 17, 0),
                at(2026, 10, 14, 8, 0),
            ]
        );
    }

    #[test]
    fn test_same_day_later_slot() {
        // Tuesday 12:30 — the 17:00 slot today is still ahead
        let slots = recommend(Platform::LinkedIn, at(2026, 10, 13, 12, 30), 1);
        assert_eq!(slots, vec![at(2026, 10, 13, 17, 0)]);
    }

    #[test]
    fn test_exact_slot_time_is_excluded() {
        let slots = recommend(Platform::X, at(2026, 10, 12, 9, 0), 1);
        assert_eq!(slots, vec![at(2026, 10, 12, 12, 0)]);
    }

    #[test]
    fn test_weekend_rolls_to_next_week() {
        // Saturday 2026-10-17 — X posts resume Monday
        let slots = recommend(Platform::X, at(2026, 10, 17, 10, 0), 1);
        assert_eq!(slots, vec![at(2026, 10, 19, 9, 0)]);
    }

    #[test]
    fn test_zero_count() {
        assert!(recommend(Platform::TikTok, at(2026, 10, 12, 0, 0), 0).is_empty());
    }

    #[test]
    fn test_recommendations_are_sorted_and_good() {
        let after = at(2026, 10, 15, 15, 45);
        for platform in Platform::ALL {
            let slots = recommend(platform, after, 10);
            assert_eq!(slots.len(), 10, "{platform} should fill 10 slots");
            assert!(slots.windows(2).all(|w| w[0] < w[1]));
            assert!(slots.iter().all(|s| *s > after));
            assert!(slots.iter().all(|s| is_good_time(platform, *s)));
        }
    }

    #[test]
    fn test_is_good_time() {
        // Wednesday 13:20 on Facebook
        assert!(is_good_time(Platform::Facebook, at(2026, 10, 14, 13, 20)));
        // Wednesday 14:00 is not in the table
        assert!(!is_good_time(Platform::Facebook, at(2026, 10, 14, 14, 0)));
        // Monday is not a Facebook day
        assert!(!is_good_time(Platform::Facebook, at(2026, 10, 12, 9, 0)));
    }
}
