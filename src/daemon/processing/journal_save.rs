use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::{
    daemon::tick::TickEvent,
    journal::{
        entry::LogEntry,
        event::LogEvent,
        store::Journal,
    },
    utils::clock::Clock,
};

use super::module::EventSink;

/// Bridges the tick loop and the [Journal]: plain ticks refresh the
/// crash-recovery snapshot, hibernation gaps close the session over the gap,
/// and shutdown leaves the `LEAVE (app closed)` mark behind.
pub struct JournalSaver {
    journal: Journal,
    clock: Box<dyn Clock>,
}

impl JournalSaver {
    pub fn new(journal: Journal, clock: Box<dyn Clock>) -> Self {
        Self { journal, clock }
    }
}

/// Journal lines carry local wall-clock time without a zone.
fn local_stamp(at: DateTime<Utc>) -> NaiveDateTime {
    at.with_timezone(&Local).naive_local()
}

#[async_trait]
impl EventSink for JournalSaver {
    async fn process_next(&mut self, event: TickEvent) -> Result<()> {
        match event {
            TickEvent::Tick { at } => {
                self.journal
                    .write_snapshot(&LogEntry::new(local_stamp(at), LogEvent::LeaveTerminated))
                    .await
            }
            TickEvent::HibernationGap { slept_at, woke_at } => {
                self.journal
                    .append_many(&[
                        LogEntry::new(local_stamp(slept_at), LogEvent::LeaveHibernation),
                        LogEntry::new(local_stamp(woke_at), LogEvent::ArriveHibernation),
                    ])
                    .await
            }
        }
    }

    async fn finalize(&mut self) -> Result<()> {
        self.journal
            .append(&LogEntry::new(
                local_stamp(self.clock.time()),
                LogEvent::LeaveClosed,
            ))
            .await?;
        self.journal.clear_snapshot().await
    }
}
