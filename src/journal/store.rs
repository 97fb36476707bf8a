use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Result;
use fs4::tokio::AsyncFileExt;
use futures::{future, stream, Stream, StreamExt};
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
};
use tokio_stream::wrappers::LinesStream;
use tracing::{info, warn};

use super::entry::LogEntry;

const JOURNAL_FILE: &str = "timelog.txt";
const SNAPSHOT_FILE: &str = "timelog.tmp";

/// The append-only journal plus its crash-recovery snapshot. Both the CLI
/// and a running tracker may touch the journal at the same time, so every
/// access goes through an advisory file lock.
pub struct Journal {
    journal_path: PathBuf,
    snapshot_path: PathBuf,
}

impl Journal {
    pub fn new(dir: &Path) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(dir)?;

        Ok(Self {
            journal_path: dir.join(JOURNAL_FILE),
            snapshot_path: dir.join(SNAPSHOT_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.journal_path
    }

    pub async fn append(&self, entry: &LogEntry) -> Result<()> {
        self.append_many(std::slice::from_ref(entry)).await
    }

    pub async fn append_many(&self, entries: &[LogEntry]) -> Result<()> {
        let mut buffer = String::new();
        for entry in entries {
            buffer.push_str(&entry.to_line());
            buffer.push('\n');
        }
        self.append_raw(&buffer).await
    }

    async fn append_raw(&self, content: &str) -> Result<()> {
        let mut file = File::options()
            .append(true)
            .create(true)
            .open(&self.journal_path)
            .await?;

        // Semi-safe acquire-release for a file
        file.lock_exclusive()?;
        let result = Self::write_with_file(&mut file, content).await;
        file.unlock_async().await?;
        result
    }

    async fn write_with_file(file: &mut File, content: &str) -> Result<()> {
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Overwrites the snapshot with a single entry. The snapshot only ever
    /// holds the latest tick's `LEAVE (app forcefully terminated)` line, so
    /// this truncates instead of appending.
    pub async fn write_snapshot(&self, entry: &LogEntry) -> Result<()> {
        tokio::fs::write(&self.snapshot_path, format!("{}\n", entry.to_line())).await?;
        Ok(())
    }

    pub async fn clear_snapshot(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.snapshot_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Crash recovery. A snapshot that survived to the next start means the
    /// previous tracker died without its graceful-shutdown write; its last
    /// snapshotted departure becomes part of the journal. Returns whether
    /// anything was recovered.
    pub async fn recover(&self) -> Result<bool> {
        let mut leftover = match tokio::fs::read_to_string(&self.snapshot_path).await {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        if !leftover.is_empty() && !leftover.ends_with('\n') {
            leftover.push('\n');
        }

        self.append_raw(&leftover).await?;
        tokio::fs::remove_file(&self.snapshot_path).await?;
        info!("Recovered interrupted session from {:?}", self.snapshot_path);
        Ok(true)
    }

    /// Reads the whole journal verbatim under the shared lock, malformed
    /// lines included. `None` means no journal exists yet.
    pub async fn read_raw(&self) -> Result<Option<String>> {
        let mut file = match File::open(&self.journal_path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        file.lock_shared()?;
        let mut content = String::new();
        let result = file.read_to_string(&mut content).await;
        file.unlock_async().await?;
        result?;
        Ok(Some(content))
    }

    /// Streams the journal's parseable entries in file order. Malformed
    /// lines are skipped with a warning; a missing journal yields an empty
    /// stream. The shared lock is released when the stream, and with it the
    /// file handle, is dropped.
    pub async fn entries(&self) -> Result<impl Stream<Item = LogEntry>> {
        let file = match File::open(&self.journal_path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(stream::empty::<LogEntry>().left_stream());
            }
            Err(e) => return Err(e.into()),
        };
        file.lock_shared()?;

        let path = self.journal_path.clone();
        let lines = LinesStream::new(BufReader::new(file).lines());
        Ok(lines
            .filter_map(move |line| {
                future::ready(match line {
                    Ok(line) if line.trim().is_empty() => None,
                    Ok(line) => {
                        let parsed = LogEntry::parse_line(&line);
                        if parsed.is_none() {
                            // ignore illegal lines. Might happen after shutdowns
                            warn!("During parsing in path {:?} found illegal line {line}", path);
                        }
                        parsed
                    }
                    Err(e) => {
                        warn!("Failed reading a line from {:?}: {e}", path);
                        None
                    }
                })
            })
            .right_stream())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use futures::StreamExt;
    use tempfile::tempdir;

    use crate::journal::{
        entry::LogEntry,
        event::{EventKind, LogEvent},
    };

    use super::Journal;

    fn entry(day: u32, hour: u32, event: LogEvent) -> LogEntry {
        LogEntry::new(
            NaiveDate::from_ymd_opt(2025, 3, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            event,
        )
    }

    #[tokio::test]
    async fn append_then_read_back() -> Result<()> {
        let dir = tempdir()?;
        let journal = Journal::new(dir.path())?;

        journal.append(&entry(3, 8, LogEvent::Arrive)).await?;
        journal.append(&entry(3, 16, LogEvent::Leave)).await?;

        let entries = journal.entries().await?.collect::<Vec<_>>().await;
        assert_eq!(
            entries,
            vec![entry(3, 8, LogEvent::Arrive), entry(3, 16, LogEvent::Leave)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn missing_journal_reads_as_empty() -> Result<()> {
        let dir = tempdir()?;
        let journal = Journal::new(dir.path())?;

        let entries = journal.entries().await?.collect::<Vec<_>>().await;
        assert!(entries.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_lines_are_skipped() -> Result<()> {
        let dir = tempdir()?;
        let journal = Journal::new(dir.path())?;

        journal.append(&entry(3, 8, LogEvent::Arrive)).await?;
        tokio::fs::write(
            journal.path(),
            "07.03.2025,08:00:00,ARRIVE\ngarbage\n\n99.99.9999,08:00:00,LEAVE\n07.03.2025,16:00:00,LEAVE\n",
        )
        .await?;

        let entries = journal.entries().await?.collect::<Vec<_>>().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EventKind::Arrive);
        assert_eq!(entries[1].kind, EventKind::Leave);
        Ok(())
    }

    #[tokio::test]
    async fn raw_read_returns_the_file_verbatim() -> Result<()> {
        let dir = tempdir()?;
        let journal = Journal::new(dir.path())?;

        assert_eq!(journal.read_raw().await?, None);

        journal.append(&entry(3, 8, LogEvent::Arrive)).await?;
        journal.append(&entry(3, 16, LogEvent::Leave)).await?;
        assert_eq!(
            journal.read_raw().await?.as_deref(),
            Some("03.03.2025,08:00:00,ARRIVE\n03.03.2025,16:00:00,LEAVE\n")
        );
        Ok(())
    }

    #[tokio::test]
    async fn snapshot_overwrites_instead_of_appending() -> Result<()> {
        let dir = tempdir()?;
        let journal = Journal::new(dir.path())?;

        journal
            .write_snapshot(&entry(3, 9, LogEvent::LeaveTerminated))
            .await?;
        journal
            .write_snapshot(&entry(3, 10, LogEvent::LeaveTerminated))
            .await?;

        let content = tokio::fs::read_to_string(dir.path().join("timelog.tmp")).await?;
        assert_eq!(content, "03.03.2025,10:00:00,LEAVE (app forcefully terminated)\n");
        Ok(())
    }

    #[tokio::test]
    async fn recovery_moves_snapshot_into_journal() -> Result<()> {
        let dir = tempdir()?;
        let journal = Journal::new(dir.path())?;

        journal.append(&entry(3, 8, LogEvent::Arrive)).await?;
        journal
            .write_snapshot(&entry(3, 11, LogEvent::LeaveTerminated))
            .await?;

        assert!(journal.recover().await?);

        let entries = journal.entries().await?.collect::<Vec<_>>().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].kind, EventKind::Leave);
        assert!(!dir.path().join("timelog.tmp").exists());

        // Nothing left to recover the second time around.
        assert!(!journal.recover().await?);
        Ok(())
    }

    #[tokio::test]
    async fn clear_snapshot_tolerates_absence() -> Result<()> {
        let dir = tempdir()?;
        let journal = Journal::new(dir.path())?;

        journal.clear_snapshot().await?;
        journal
            .write_snapshot(&entry(3, 9, LogEvent::LeaveTerminated))
            .await?;
        journal.clear_snapshot().await?;
        assert!(!dir.path().join("timelog.tmp").exists());
        Ok(())
    }
}
