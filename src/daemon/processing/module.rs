use anyhow::Result;
use async_trait::async_trait;

use crate::daemon::tick::TickEvent;

/// Consumer of tick events. The single realization writes to the journal,
/// but the seam keeps the tick loop testable without a filesystem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventSink: Send {
    async fn process_next(&mut self, event: TickEvent) -> Result<()>;

    /// Runs once after the event stream ends, i.e. on graceful shutdown.
    async fn finalize(&mut self) -> Result<()>;
}
