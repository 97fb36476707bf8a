use std::{collections::BTreeMap, fmt::Display};

use chrono::{Datelike, IsoWeek, NaiveDate};
use serde::Serialize;

use crate::journal::sessions::Session;

/// Which calendar unit a summary accumulates into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucketing {
    Daily,
    Weekly,
}

/// Bucket identity. Typed keys keep the report chronological; the rendered
/// form matches the journal's own date style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BucketKey {
    Day(NaiveDate),
    Week(IsoWeek),
}

impl Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketKey::Day(date) => write!(f, "{}", date.format("%d.%m.%Y")),
            BucketKey::Week(week) => write!(f, "{}-W{:02}", week.year(), week.week()),
        }
    }
}

/// Accumulates minutes per bucket. Sessions bucket under their arrival;
/// only strictly positive durations count, so reversed or zero-length pairs
/// vanish instead of corrupting a day.
pub fn accumulate(sessions: &[Session], bucketing: Bucketing) -> BTreeMap<BucketKey, i64> {
    let mut buckets = BTreeMap::new();

    for session in sessions {
        let minutes = session.minutes();
        if minutes <= 0 {
            continue;
        }
        let key = match bucketing {
            Bucketing::Daily => BucketKey::Day(session.arrived.date()),
            Bucketing::Weekly => BucketKey::Week(session.arrived.date().iso_week()),
        };
        *buckets.entry(key).or_insert(0) += minutes;
    }

    buckets
}

/// Row shape of the `--json` output.
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub key: String,
    pub minutes: i64,
}

pub fn to_rows(buckets: &BTreeMap<BucketKey, i64>) -> Vec<SummaryRow> {
    buckets
        .iter()
        .map(|(key, minutes)| SummaryRow {
            key: key.to_string(),
            minutes: *minutes,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::journal::sessions::Session;

    use super::{accumulate, to_rows, BucketKey, Bucketing};

    fn at(y: i32, mo: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn session(y: i32, mo: u32, d: u32, from_h: u32, to_h: u32) -> Session {
        Session {
            arrived: at(y, mo, d, from_h),
            left: at(y, mo, d, to_h),
        }
    }

    #[test]
    fn daily_buckets_accumulate_per_date() {
        let sessions = [
            session(2025, 3, 7, 8, 12),
            session(2025, 3, 7, 13, 17),
            session(2025, 3, 10, 9, 10),
        ];
        let buckets = accumulate(&sessions, Bucketing::Daily);

        assert_eq!(buckets.len(), 2);
        assert_eq!(
            buckets[&BucketKey::Day(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap())],
            8 * 60
        );
        assert_eq!(
            buckets[&BucketKey::Day(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())],
            60
        );
    }

    #[test]
    fn non_positive_sessions_are_dropped() {
        let sessions = [
            session(2025, 3, 7, 12, 8),
            Session {
                arrived: at(2025, 3, 7, 9),
                left: at(2025, 3, 7, 9),
            },
        ];
        assert!(accumulate(&sessions, Bucketing::Daily).is_empty());
    }

    #[test]
    fn weekly_buckets_follow_iso_weeks() {
        // Monday 2024-12-30 already belongs to ISO week 2025-W01.
        let sessions = [
            session(2024, 12, 30, 8, 10),
            session(2025, 1, 2, 8, 10),
            session(2024, 12, 27, 8, 9),
        ];
        let buckets = accumulate(&sessions, Bucketing::Weekly);
        let rows = to_rows(&buckets);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "2024-W52");
        assert_eq!(rows[0].minutes, 60);
        assert_eq!(rows[1].key, "2025-W01");
        assert_eq!(rows[1].minutes, 240);
    }

    #[test]
    fn buckets_come_out_chronologically() {
        // Lexicographic DD.MM.YYYY ordering would put January after March.
        let sessions = [session(2025, 3, 1, 8, 9), session(2025, 1, 9, 8, 9)];
        let rows = to_rows(&accumulate(&sessions, Bucketing::Daily));

        assert_eq!(rows[0].key, "09.01.2025");
        assert_eq!(rows[1].key, "01.03.2025");
    }

    #[test]
    fn sessions_bucket_under_their_arrival_day() {
        let overnight = Session {
            arrived: at(2025, 3, 7, 22),
            left: at(2025, 3, 8, 2),
        };
        let buckets = accumulate(&[overnight], Bucketing::Daily);

        assert_eq!(buckets.len(), 1);
        assert_eq!(
            buckets[&BucketKey::Day(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap())],
            240
        );
    }
}
