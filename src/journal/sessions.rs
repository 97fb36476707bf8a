use chrono::{NaiveDate, NaiveDateTime};
use futures::{future, Stream, StreamExt};

use super::{entry::LogEntry, event::EventKind};

/// One arrive entry paired with the next leave entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub arrived: NaiveDateTime,
    pub left: NaiveDateTime,
}

impl Session {
    /// Whole minutes between arrival and departure. May be non-positive for
    /// out-of-order entries; such sessions are never counted.
    pub fn minutes(&self) -> i64 {
        (self.left - self.arrived).num_minutes()
    }
}

/// Result of one linear pass over the journal: all closed sessions plus the
/// arrival of a still-open one, if the last arrive has no leave yet.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SessionScan {
    pub sessions: Vec<Session>,
    pub open: Option<NaiveDateTime>,
}

impl SessionScan {
    /// Minutes worked on `date`: closed sessions arriving that day plus the
    /// open session counted up to `now`. Hibernation gaps do not inflate
    /// this because the tracker splits them into separate sessions.
    pub fn minutes_on(&self, date: NaiveDate, now: NaiveDateTime) -> i64 {
        let closed: i64 = self
            .sessions
            .iter()
            .filter(|s| s.arrived.date() == date && s.minutes() > 0)
            .map(Session::minutes)
            .sum();

        let running = match self.open {
            Some(arrived) if arrived.date() == date => (now - arrived).num_minutes().max(0),
            _ => 0,
        };

        closed + running
    }
}

/// Pairs entries into sessions with a two-state machine: an arrive entry
/// opens a session, the next leave entry closes it. An arrive while a
/// session is open and a leave while none is are both ignored.
pub async fn scan_sessions(entries: impl Stream<Item = LogEntry>) -> SessionScan {
    entries
        .fold(SessionScan::default(), |mut scan, entry| {
            match (entry.kind, scan.open) {
                (EventKind::Arrive, None) => scan.open = Some(entry.at),
                (EventKind::Leave, Some(arrived)) => {
                    scan.sessions.push(Session {
                        arrived,
                        left: entry.at,
                    });
                    scan.open = None;
                }
                _ => {}
            }
            future::ready(scan)
        })
        .await
}
