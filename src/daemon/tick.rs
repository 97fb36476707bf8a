use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::utils::clock::Clock;

use super::hibernation::HibernationDetector;

/// What a tick of the tracker loop produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    /// An ordinary tick; the sink refreshes the crash-recovery snapshot.
    Tick { at: DateTime<Utc> },
    /// The loop woke up far later than scheduled. `slept_at` is the last
    /// tick before the gap, `woke_at` the first one after it.
    HibernationGap {
        slept_at: DateTime<Utc>,
        woke_at: DateTime<Utc>,
    },
}

pub struct TickModule {
    next: mpsc::Sender<TickEvent>,
    shutdown: CancellationToken,
    gap_detector: HibernationDetector,
    tick_interval: Duration,
    clock: Box<dyn Clock>,
}

impl TickModule {
    pub fn new(
        next: mpsc::Sender<TickEvent>,
        shutdown: CancellationToken,
        gap_detector: HibernationDetector,
        tick_interval: Duration,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            next,
            shutdown,
            gap_detector,
            tick_interval,
            clock,
        }
    }

    /// Executes the tick event loop. The first tick fires immediately so a
    /// fresh tracker snapshots right away.
    pub async fn run(self) -> Result<()> {
        let mut last_active = self.clock.time();
        let mut wake_point = self.clock.instant();
        loop {
            let now = self.clock.time();

            if self.gap_detector.is_gap(now - last_active) {
                info!(
                    "Hibernation gap detected between {last_active} and {now}, closing the session over it"
                );
                self.next
                    .send(TickEvent::HibernationGap {
                        slept_at: last_active,
                        woke_at: now,
                    })
                    .await
                    .inspect_err(|e| error!("Unexpected error during sending {e:?}"))?;
            }

            debug!("Tick at {now}");
            self.next
                .send(TickEvent::Tick { at: now })
                .await
                .inspect_err(|e| error!("Unexpected error during sending {e:?}"))?;

            last_active = now;
            wake_point += self.tick_interval;

            tokio::select! {
                // Cancelation stops the event loop, drops the sender channel
                // and consequently lets the processing module finalize.
                _ = self.shutdown.cancelled() => {
                    return Ok(())
                }
                _ = self.clock.sleep_until(wake_point) => ()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
    use tokio::{sync::mpsc, time::Instant};
    use tokio_util::sync::CancellationToken;

    use crate::{
        daemon::hibernation::HibernationDetector,
        utils::{clock::Clock, logging::TEST_LOGGING},
    };

    use super::{TickEvent, TickModule};

    const TEST_START_DATE: NaiveDateTime =
        NaiveDateTime::new(NaiveDate::from_ymd_opt(2018, 7, 4).unwrap(), NaiveTime::MIN);

    /// Clock whose wall time runs `factor` times faster than tokio's paused
    /// time, so a 60 s sleep can look like a multi-minute hibernation.
    struct WarpClock {
        start_time: DateTime<Utc>,
        reference: Instant,
        factor: i32,
    }

    impl WarpClock {
        fn new(factor: i32) -> Self {
            Self {
                start_time: Utc.from_utc_datetime(&TEST_START_DATE),
                reference: Instant::now(),
                factor,
            }
        }
    }

    #[async_trait]
    impl Clock for WarpClock {
        fn time(&self) -> DateTime<Utc> {
            self.start_time + self.reference.elapsed() * self.factor as u32
        }

        fn instant(&self) -> Instant {
            Instant::now()
        }

        async fn sleep_until(&self, instant: Instant) {
            tokio::time::sleep_until(instant).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn steady_ticks_without_gaps() -> Result<()> {
        *TEST_LOGGING;
        let (sender, mut receiver) = mpsc::channel(10);
        let shutdown = CancellationToken::new();
        let module = TickModule::new(
            sender,
            shutdown.clone(),
            HibernationDetector::from_seconds(120),
            Duration::from_secs(60),
            Box::new(WarpClock::new(1)),
        );
        let handle = tokio::spawn(module.run());

        for _ in 0..3 {
            let event = receiver.recv().await.unwrap();
            assert!(matches!(event, TickEvent::Tick { .. }));
        }

        shutdown.cancel();
        handle.await??;
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn long_sleep_emits_a_hibernation_pair() -> Result<()> {
        *TEST_LOGGING;
        let (sender, mut receiver) = mpsc::channel(10);
        let shutdown = CancellationToken::new();
        // Each 60 s sleep advances wall time by 5 minutes.
        let module = TickModule::new(
            sender,
            shutdown.clone(),
            HibernationDetector::from_seconds(120),
            Duration::from_secs(60),
            Box::new(WarpClock::new(5)),
        );
        let handle = tokio::spawn(module.run());

        let first = receiver.recv().await.unwrap();
        let TickEvent::Tick { at: first_tick } = first else {
            panic!("first event should be a plain tick, got {first:?}");
        };

        let second = receiver.recv().await.unwrap();
        let TickEvent::HibernationGap { slept_at, woke_at } = second else {
            panic!("expected a hibernation gap, got {second:?}");
        };
        assert_eq!(slept_at, first_tick);
        assert!(woke_at - slept_at > chrono::Duration::seconds(120));

        let third = receiver.recv().await.unwrap();
        assert_eq!(third, TickEvent::Tick { at: woke_at });

        shutdown.cancel();
        handle.await??;
        Ok(())
    }
}
