use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use hibernation::HibernationDetector;
use processing::{journal_save::JournalSaver, ProcessingModule};
use tick::{TickEvent, TickModule};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::{
    journal::store::Journal,
    utils::clock::{Clock, DefaultClock},
};

pub mod hibernation;
pub mod processing;
pub mod shutdown;
pub mod tick;

/// How often the tracker wakes up to refresh the crash-recovery snapshot.
const TICK_INTERVAL: Duration = Duration::from_secs(60);
/// A tick arriving this much later than the previous one means the machine
/// slept in between, not that the loop ran late.
const HIBERNATION_THRESHOLD_S: i64 = 120;

/// Represents the starting point for the tracker process.
pub async fn start_tracker(dir: PathBuf) -> Result<()> {
    std::env::set_current_dir("/")?;

    let journal = Journal::new(&dir)?;
    journal.recover().await?;

    let (sender, receiver) = mpsc::channel::<TickEvent>(10);
    let shutdown_token = CancellationToken::new();

    let ticker = create_ticker(sender, &shutdown_token, DefaultClock);
    let writer = create_writer(journal, receiver, DefaultClock);

    let (_, tick_result, write_result) = tokio::join!(
        shutdown::detect_shutdown(shutdown_token),
        ticker.run(),
        writer.run(),
    );

    if let Err(tick_result) = tick_result {
        error!("Tick module got an error {:?}", tick_result);
    }

    if let Err(write_result) = write_result {
        error!("Journal writer got an error {:?}", write_result);
    }

    Ok(())
}

fn create_ticker(
    sender: mpsc::Sender<TickEvent>,
    shutdown_token: &CancellationToken,
    clock: impl Clock,
) -> TickModule {
    TickModule::new(
        sender,
        shutdown_token.clone(),
        HibernationDetector::from_seconds(HIBERNATION_THRESHOLD_S),
        TICK_INTERVAL,
        Box::new(clock),
    )
}

fn create_writer(
    journal: Journal,
    receiver: mpsc::Receiver<TickEvent>,
    clock: impl Clock,
) -> ProcessingModule<JournalSaver> {
    ProcessingModule::new(receiver, JournalSaver::new(journal, Box::new(clock)))
}
