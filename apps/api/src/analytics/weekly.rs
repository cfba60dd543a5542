//! Weekly Histogram Builder — submissions per week over a rolling 12-week window.
//!
//! The window is recomputed from `now` on every call. Its start is `now - 12
//! weeks` moved back to the Monday on or before it, keeping the time of day.
//! Buckets are half-open `[start, start + 1 week)`, so a submission exactly on
//! a boundary lands in the later week.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::models::application::ApplicationRecord;

pub const WINDOW_WEEKS: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    pub week_start: DateTime<Utc>,
    pub count: u64,
}

impl WeekBucket {
    pub fn week_end(&self) -> DateTime<Utc> {
        self.week_start + Duration::weeks(1)
    }

    /// "Week of MM/DD" using the bucket's Monday.
    pub fn label(&self) -> String {
        self.week_start.format("Week of %m/%d").to_string()
    }

    fn contains(&self, at: DateTime<Utc>) -> bool {
        self.week_start <= at && at < self.week_end()
    }
}

/// Exactly `WINDOW_WEEKS` buckets, oldest first.
///
/// Serialized as a JSON object `{label: count}` whose keys keep bucket order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyHistogram(Vec<WeekBucket>);

impl WeeklyHistogram {
    pub fn buckets(&self) -> &[WeekBucket] {
        &self.0
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|b| b.count).sum()
    }
}

impl Serialize for WeeklyHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for bucket in &self.0 {
            map.serialize_entry(&bucket.label(), &bucket.count)?;
        }
        map.end()
    }
}

/// Monday on or before `now - 12 weeks`, same time of day as `now`.
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let back = now - Duration::weeks(WINDOW_WEEKS as i64);
    back - Duration::days(i64::from(back.weekday().num_days_from_monday()))
}

pub fn build_weekly_histogram(records: &[ApplicationRecord], now: DateTime<Utc>) -> WeeklyHistogram {
    let start = window_start(now);

    let buckets = (0..WINDOW_WEEKS)
        .map(|i| {
            let mut bucket = WeekBucket {
                week_start: start + Duration::weeks(i as i64),
                count: 0,
            };
            bucket.count = records
                .iter()
                .filter_map(|r| r.date_applied)
                .filter(|applied| bucket.contains(*applied))
                .count() as u64;
            bucket
        })
        .collect();

    WeeklyHistogram(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::ApplicationStatus;
    use chrono::{TimeZone, Weekday};
    use uuid::Uuid;

    // Wednesday 2024-06-12 15:30 UTC
    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 12, 15, 30, 0).unwrap()
    }

    fn applied_at(at: Option<DateTime<Utc>>) -> ApplicationRecord {
        ApplicationRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            status: ApplicationStatus::Applied,
            date_applied: at,
            updated_at: fixed_now(),
        }
    }

    #[test]
    fn test_window_start_is_monday_twelve_weeks_back() {
        let start = window_start(fixed_now());
        // 2024-06-12 minus 12 weeks = Wed 2024-03-20 → Monday 2024-03-18
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 18, 15, 30, 0).unwrap());
        assert_eq!(start.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_window_start_on_monday_stays_put() {
        let monday = Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap();
        assert_eq!(window_start(monday), monday - Duration::weeks(12));
    }

    #[test]
    fn test_empty_input_has_twelve_zero_buckets() {
        let histogram = build_weekly_histogram(&[], fixed_now());
        assert_eq!(histogram.buckets().len(), WINDOW_WEEKS);
        assert!(histogram.buckets().iter().all(|b| b.count == 0));
        assert_eq!(histogram.total(), 0);
    }

    #[test]
    fn test_buckets_are_consecutive_weeks_oldest_first() {
        let histogram = build_weekly_histogram(&[], fixed_now());
        for pair in histogram.buckets().windows(2) {
            assert_eq!(pair[1].week_start - pair[0].week_start, Duration::weeks(1));
        }
        assert_eq!(histogram.buckets()[0].label(), "Week of 03/18");
        assert_eq!(histogram.buckets()[11].label(), "Week of 06/03");
    }

    #[test]
    fn test_boundary_belongs_to_later_week() {
        let start = window_start(fixed_now());
        let boundary = start + Duration::weeks(3);
        let histogram = build_weekly_histogram(&[applied_at(Some(boundary))], fixed_now());

        assert_eq!(histogram.buckets()[2].count, 0);
        assert_eq!(histogram.buckets()[3].count, 1);
        assert_eq!(histogram.total(), 1);
    }

    #[test]
    fn test_out_of_window_and_missing_dates_excluded() {
        let start = window_start(fixed_now());
        let records = vec![
            applied_at(None),
            applied_at(Some(start - Duration::seconds(1))),
            applied_at(Some(start)),
            applied_at(Some(start + Duration::weeks(12))),
            applied_at(Some(start + Duration::weeks(12) - Duration::seconds(1))),
        ];
        let histogram = build_weekly_histogram(&records, fixed_now());

        assert_eq!(histogram.buckets()[0].count, 1);
        assert_eq!(histogram.buckets()[11].count, 1);
        assert_eq!(histogram.total(), 2);
    }

    #[test]
    fn test_serializes_as_ordered_label_map() {
        let start = window_start(fixed_now());
        let histogram =
            build_weekly_histogram(&[applied_at(Some(start + Duration::days(8)))], fixed_now());
        let json = serde_json::to_string(&histogram).unwrap();

        assert!(json.starts_with(r#"{"Week of 03/18":0,"Week of 03/25":1,"#), "{json}");
        assert!(json.ends_with(r#""Week of 06/03":0}"#), "{json}");
    }
}
