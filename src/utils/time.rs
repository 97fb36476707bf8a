use chrono::{DateTime, Duration, NaiveTime, TimeZone};

/// On-disk timestamp layout, `DD.MM.YYYY,HH:MM:SS`. The comma doubles as the
/// field separator of the journal line itself.
pub const STAMP_FORMAT: &str = "%d.%m.%Y,%H:%M:%S";

/// Renders accumulated minutes the way the summaries display them, `H:MM`.
pub fn format_hours_minutes(minutes: i64) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Returns start of the next day.
pub fn next_day_start<Tz: TimeZone>(date: DateTime<Tz>) -> DateTime<Tz> {
    (date + Duration::days(1)).with_time(NaiveTime::MIN).unwrap()
}
