use std::{env, path::Path};

use anyhow::Result;
use chrono::Local;
use tracing::info;

use crate::{
    i18n::Texts,
    journal::{entry::LogEntry, event::LogEvent, store::Journal},
};

use super::process::{kill_running_trackers, restart_tracker};

/// Command to process `arrive`: recover a crashed session, get a tracker
/// running and punch in.
pub async fn process_arrive_command(app_dir: &Path, texts: &Texts) -> Result<()> {
    let journal = Journal::new(app_dir)?;
    journal.recover().await?;

    restart_tracker(app_dir)?;

    let now = Local::now();
    journal
        .append(&LogEntry::new(now.naive_local(), LogEvent::Arrive))
        .await?;
    info!("Punched in at {now}");

    println!("{}: {}", texts.arrival_label, now.format("%H:%M:%S"));
    println!("{}", texts.status_tracking);
    Ok(())
}

/// Command to process `leave`: punch out. The tracker stays up, just like
/// the original app kept ticking after its Leave button.
pub async fn process_leave_command(app_dir: &Path, texts: &Texts) -> Result<()> {
    let journal = Journal::new(app_dir)?;
    let now = Local::now();
    journal
        .append(&LogEntry::new(now.naive_local(), LogEvent::Leave))
        .await?;
    info!("Punched out at {now}");

    println!("{}", texts.status_stopped);
    Ok(())
}

/// Command to process `stop`: terminate the tracker. Its shutdown path
/// appends the closing leave entry on its own.
pub fn process_stop_command() -> Result<()> {
    let process_name = env::current_exe()?;
    kill_running_trackers(&process_name);
    Ok(())
}

/// Command to process `log`: point at the journal, optionally dumping it.
pub async fn process_log_command(app_dir: &Path, texts: &Texts, path_only: bool) -> Result<()> {
    let journal = Journal::new(app_dir)?;
    println!("{}: {}", texts.log_file_label, journal.path().display());
    if path_only {
        return Ok(());
    }

    match journal.read_raw().await? {
        Some(content) => print!("{content}"),
        None => println!("{}", texts.error_file_not_found),
    }
    Ok(())
}
