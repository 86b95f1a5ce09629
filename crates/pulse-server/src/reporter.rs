//! Once-per-second throughput reporter.
//!
//! Drains the request counter on a fixed 1-second cadence and logs the
//! result as `RPS: <count>`. The interval is scheduled from task start, so a
//! slow log emission shifts a single tick without accumulating drift.

use pulse_core::RequestCounter;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tracing::info;

use crate::shutdown::ShutdownSignal;

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

pub struct RateReporter {
    counter: RequestCounter,
}

impl RateReporter {
    pub fn new(counter: RequestCounter) -> Self {
        Self { counter }
    }

    /// Drain the counter and emit one report line. Returns the drained
    /// count.
    pub fn report_once(&self) -> u64 {
        let count = self.counter.drain();
        info!("RPS: {count}");
        count
    }

    /// Spawn the reporting loop. The task stops when `shutdown` fires and
    /// is meant to be joined by the caller.
    pub fn spawn(self, mut shutdown: ShutdownSignal) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut tick = interval(REPORT_INTERVAL);
            // The first tick of a tokio interval completes immediately;
            // consume it so the first report covers a full second.
            tick.tick().await;
            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        self.report_once();
                    }
                    _ = shutdown.wait() => break,
                }
            }
        })
    }
}
