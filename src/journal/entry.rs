use chrono::NaiveDateTime;

use crate::utils::time::STAMP_FORMAT;

use super::event::{EventKind, LogEvent};

/// One parsed journal line: local wall-clock timestamp plus how the label
/// pairs up. The raw label is kept around for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub at: NaiveDateTime,
    pub kind: EventKind,
    pub label: String,
}

impl LogEntry {
    pub fn new(at: NaiveDateTime, event: LogEvent) -> Self {
        Self {
            at,
            kind: event.kind(),
            label: event.label().to_string(),
        }
    }

    /// Renders the entry as a journal line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!("{},{}", self.at.format(STAMP_FORMAT), self.label)
    }

    /// Parses a `DD.MM.YYYY,HH:MM:SS,LABEL` line. Returns `None` for
    /// anything malformed; callers skip those lines instead of failing the
    /// whole scan.
    pub fn parse_line(line: &str) -> Option<LogEntry> {
        let mut commas = line.char_indices().filter(|(_, c)| *c == ',');
        commas.next()?;
        let (label_start, _) = commas.next()?;

        let stamp = &line[..label_start];
        let label = &line[label_start + 1..];

        let at = NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()?;
        let kind = EventKind::classify(label)?;

        Some(LogEntry {
            at,
            kind,
            label: label.to_string(),
        })
    }
}
