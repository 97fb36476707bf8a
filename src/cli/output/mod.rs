pub mod summary;

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::journal::{
    sessions::{scan_sessions, Session, SessionScan},
    store::Journal,
};

/// Scans the whole journal once and keeps sessions whose arrival falls into
/// `[from, to)`. `None` bounds leave that side open; the default report
/// covers everything ever logged, like the original tool's dialogs did.
pub async fn collect_sessions(
    journal: &Journal,
    from: Option<NaiveDateTime>,
    to: Option<NaiveDateTime>,
) -> Result<Vec<Session>> {
    let scan = scan_journal(journal).await?;
    let mut sessions = scan.sessions;
    if let Some(from) = from {
        sessions.retain(|s| s.arrived >= from);
    }
    if let Some(to) = to {
        sessions.retain(|s| s.arrived < to);
    }
    Ok(sessions)
}

pub async fn scan_journal(journal: &Journal) -> Result<SessionScan> {
    Ok(scan_sessions(journal.entries().await?).await)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::journal::{entry::LogEntry, event::LogEvent, store::Journal};

    use super::collect_sessions;

    #[tokio::test]
    async fn range_bounds_are_half_open() -> Result<()> {
        let dir = tempdir()?;
        let journal = Journal::new(dir.path())?;
        for (day, hour, event) in [
            (3, 8, LogEvent::Arrive),
            (3, 16, LogEvent::Leave),
            (4, 8, LogEvent::Arrive),
            (4, 16, LogEvent::Leave),
            (5, 8, LogEvent::Arrive),
            (5, 16, LogEvent::Leave),
        ] {
            journal
                .append(&LogEntry::new(
                    NaiveDate::from_ymd_opt(2025, 3, day)
                        .unwrap()
                        .and_hms_opt(hour, 0, 0)
                        .unwrap(),
                    event,
                ))
                .await?;
        }

        let day4 = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let sessions = collect_sessions(
            &journal,
            Some(day4.and_hms_opt(0, 0, 0).unwrap()),
            Some(day4.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap()),
        )
        .await?;

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].arrived.date(), day4);
        Ok(())
    }
}
