use std::{fmt::Display, path::Path};

use ansi_term::Style;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime};
use chrono_english::parse_date_string;
use clap::{CommandFactory, ValueEnum};
use now::DateTimeNow;
use serde::Serialize;

use crate::{
    i18n::Texts,
    journal::store::Journal,
    utils::time::{format_hours_minutes, next_day_start},
};

use super::{
    output::{
        collect_sessions, scan_journal,
        summary::{accumulate, to_rows, BucketKey, Bucketing},
    },
    Args,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct RangeArgs {
    #[arg(
        long = "from",
        short,
        help = "Start of the range. Examples are \"yesterday\", \"2 weeks ago\", \"15/03/2025\". Defaults to the whole journal"
    )]
    from: Option<String>,
    #[arg(
        long = "to",
        short,
        help = "End of the range. Examples are \"yesterday\", \"1 hour ago\", \"15/03/2025\". Defaults to the whole journal"
    )]
    to: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

/// Widens parsed bounds to whole days, so `--from yesterday --to yesterday`
/// covers all of yesterday.
fn parse_range(
    RangeArgs {
        from,
        to,
        date_style,
    }: RangeArgs,
    now: DateTime<Local>,
) -> Result<(Option<NaiveDateTime>, Option<NaiveDateTime>)> {
    let dialect: chrono_english::Dialect = date_style.into();

    let from = match from.map(|s| parse_date_string(&s, now, dialect)) {
        Some(Ok(v)) => Some(v.with_timezone(&Local).beginning_of_day()),
        Some(Err(e)) => {
            return Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!("Failed to validate start date {e}"),
                )
                .into());
        }
        None => None,
    };
    let to = match to.map(|s| parse_date_string(&s, now, dialect)) {
        Some(Ok(v)) => Some(next_day_start(v.with_timezone(&Local))),
        Some(Err(e)) => {
            return Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!("Failed to validate end date {e}"),
                )
                .into());
        }
        None => None,
    };

    Ok((
        from.map(|v: DateTime<Local>| v.naive_local()),
        to.map(|v| v.naive_local()),
    ))
}

/// Command to process `daily` and `weekly`. Renders the accumulated minutes
/// per bucket the way the original summary dialogs did.
pub async fn process_summary_command(
    app_dir: &Path,
    bucketing: Bucketing,
    range: RangeArgs,
    texts: &Texts,
    json: bool,
) -> Result<()> {
    let journal = Journal::new(app_dir)?;
    let (from, to) = parse_range(range, Local::now())?;
    let sessions = collect_sessions(&journal, from, to).await?;
    let buckets = accumulate(&sessions, bucketing);

    if json {
        println!("{}", serde_json::to_string_pretty(&to_rows(&buckets))?);
        return Ok(());
    }

    let header = match bucketing {
        Bucketing::Daily => texts.daily_summary_header,
        Bucketing::Weekly => texts.weekly_summary_header,
    };
    println!("{}", Style::new().bold().paint(header));
    println!();
    println!("{}: {}", texts.entries_label, buckets.len());
    println!();

    for (key, minutes) in &buckets {
        let rendered = format_hours_minutes(*minutes);
        match key {
            BucketKey::Day(_) => println!("{key}: {rendered} {}", texts.hours),
            BucketKey::Week(_) => println!("{} {key}: {rendered} {}", texts.week, texts.hours),
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct StatusReport {
    arrived: Option<String>,
    worked_minutes: i64,
    tracking: bool,
}

/// Command to process `status`: the open session's arrival plus minutes
/// worked today, the CLI stand-in for the arrival label and running timer.
pub async fn process_status_command(app_dir: &Path, texts: &Texts, json: bool) -> Result<()> {
    let journal = Journal::new(app_dir)?;
    let scan = scan_journal(&journal).await?;

    let now = Local::now().naive_local();
    let report = StatusReport {
        arrived: scan.open.map(|at| at.format("%H:%M:%S").to_string()),
        worked_minutes: scan.minutes_on(now.date(), now),
        tracking: scan.open.is_some(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &report.arrived {
        Some(arrived) => {
            println!("{}: {arrived}", texts.arrival_label);
            println!("{}", texts.status_tracking);
        }
        None => println!("{}", texts.status_stopped),
    }
    println!(
        "{}: {} {}",
        texts.worked_today,
        format_hours_minutes(report.worked_minutes),
        texts.hours
    );

    Ok(())
}
