use anyhow::Result;
use module::EventSink;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, error};

use super::tick::TickEvent;

pub mod journal_save;
pub mod module;

/// Drains tick events into an [EventSink]. Once the sending side hangs up
/// the sink gets one finalize call, which is where the graceful-shutdown
/// journal write happens.
pub struct ProcessingModule<Sink> {
    receiver: Receiver<TickEvent>,
    sink: Sink,
}

impl<S: EventSink> ProcessingModule<S> {
    pub fn new(receiver: Receiver<TickEvent>, sink: S) -> Self {
        Self { receiver, sink }
    }

    pub async fn run(mut self) -> Result<()> {
        while let Some(event) = self.receiver.recv().await {
            debug!("Processing event {:?}", event);
            if let Err(e) = self.sink.process_next(event.clone()).await {
                error!("Error processing event {:?}: {e:?}", event);
            }
        }

        let result = self.sink.finalize().await;
        self.receiver.close();
        result
    }
}
