//! Shutdown signalling and the bounded graceful-stop sequence.
//!
//! A `watch` channel carries the single-fire shutdown trigger: the
//! controller side flips it exactly once (repeat triggers are no-ops), and
//! every task that must stop holds a cloned [`ShutdownSignal`]. The
//! [`Coordinator`] owns the sequencing: once the trigger fires it lets the
//! serve future drain its in-flight requests, bounded by the configured
//! grace period.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Create a linked controller/signal pair.
pub fn channel() -> (ShutdownController, ShutdownSignal) {
    let (sender, receiver) = watch::channel(false);
    (
        ShutdownController {
            sender: Arc::new(sender),
        },
        ShutdownSignal { receiver },
    )
}

/// Trigger side of the shutdown channel.
#[derive(Clone)]
pub struct ShutdownController {
    sender: Arc<watch::Sender<bool>>,
}

impl ShutdownController {
    /// Fire the shutdown trigger. Firing twice is the same as firing once;
    /// only the first call starts a shutdown sequence.
    pub fn trigger(&self) {
        let fired = self.sender.send_if_modified(|triggered| {
            if *triggered {
                false
            } else {
                *triggered = true;
                true
            }
        });
        if fired {
            info!("shutdown triggered");
        }
    }
}

/// Wait side of the shutdown channel. Cloned into every task that must stop.
#[derive(Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once shutdown has been triggered.
    pub async fn wait(&mut self) {
        while !*self.receiver.borrow_and_update() {
            if self.receiver.changed().await.is_err() {
                // Controller dropped: treat as shutdown.
                break;
            }
        }
    }

    /// Non-blocking check.
    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }
}

/// Block until SIGTERM or SIGINT arrives. Returns the signal name.
///
/// Fails only if the OS refuses to install the handlers.
#[cfg(unix)]
pub async fn wait_for_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

/// Block until Ctrl+C arrives (non-unix).
#[cfg(not(unix))]
pub async fn wait_for_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("CTRL_C")
}

/// Result of the shutdown sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// The server drained and stopped within the grace period.
    Stopped,
    /// The grace period elapsed first; the wait was abandoned.
    TimedOut,
}

/// Sequences the graceful stop.
///
/// States: running until the trigger fires, then shutting down until the
/// serve future completes or the grace period elapses. A stop error is
/// logged but never blocks progress toward exit.
pub struct Coordinator {
    grace: Duration,
}

impl Coordinator {
    pub fn new(grace: Duration) -> Self {
        Self { grace }
    }

    /// Drive `server` to completion.
    ///
    /// `server` must itself begin draining when `signal` fires; axum's
    /// `with_graceful_shutdown` wired to a clone of the same signal does
    /// exactly that. Returns once the server has stopped or the grace
    /// period has elapsed after the trigger. A stop that fails resolves the
    /// serve future, leaving nothing to drain, so the coordinator returns
    /// right away rather than idling out the remainder of the grace period;
    /// the error is logged and exit proceeds.
    pub async fn run<F>(&self, mut signal: ShutdownSignal, server: F) -> ShutdownOutcome
    where
        F: Future<Output = io::Result<()>> + Send + 'static,
    {
        let mut handle = tokio::spawn(server);

        tokio::select! {
            res = &mut handle => {
                // Server finished before any trigger: the accept loop died.
                // There is nothing left to drain.
                match res {
                    Ok(Ok(())) => info!("server stopped before shutdown was requested"),
                    Ok(Err(e)) => error!(error = %e, "server exited with error"),
                    Err(e) => error!(error = %e, "server task panicked"),
                }
                return ShutdownOutcome::Stopped;
            }
            _ = signal.wait() => {}
        }

        info!(grace_secs = self.grace.as_secs(), "shutting down");

        match timeout(self.grace, &mut handle).await {
            Ok(Ok(Ok(()))) => {
                info!("server stopped cleanly");
                ShutdownOutcome::Stopped
            }
            Ok(Ok(Err(e))) => {
                error!(error = %e, "graceful stop failed");
                ShutdownOutcome::Stopped
            }
            Ok(Err(e)) => {
                error!(error = %e, "server task panicked");
                ShutdownOutcome::Stopped
            }
            Err(_) => {
                // Deadline elapsed with work still in flight. The wait is
                // abandoned; remaining connections are left to process exit.
                warn!(
                    grace_secs = self.grace.as_secs(),
                    "graceful shutdown timed out"
                );
                ShutdownOutcome::TimedOut
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_initially_not_triggered() {
        let (_controller, signal) = channel();
        assert!(!signal.is_triggered());
    }

    #[tokio::test]
    async fn trigger_fires_and_repeats_are_noops() {
        let (controller, signal) = channel();

        controller.trigger();
        assert!(signal.is_triggered());

        controller.trigger();
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn wait_completes_on_trigger() {
        let (controller, mut signal) = channel();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            controller.trigger();
        });

        let waited = timeout(Duration::from_secs(1), signal.wait()).await;
        assert!(waited.is_ok());
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn cloned_signals_share_the_trigger() {
        let (controller, signal) = channel();
        let mut a = signal.clone();
        let mut b = signal.clone();

        controller.trigger();

        timeout(Duration::from_secs(1), a.wait()).await.unwrap();
        timeout(Duration::from_secs(1), b.wait()).await.unwrap();
    }

    #[tokio::test]
    async fn coordinator_stops_when_server_drains_in_time() {
        let (controller, signal) = channel();

        // Stand-in server: drains instantly once the trigger fires.
        let server = {
            let mut drain = signal.clone();
            async move {
                drain.wait().await;
                Ok(())
            }
        };

        let run = tokio::spawn({
            let signal = signal.clone();
            async move { Coordinator::new(Duration::from_secs(30)).run(signal, server).await }
        });

        controller.trigger();
        controller.trigger(); // second signal must not start a second sequence

        let outcome = timeout(Duration::from_secs(5), run).await.unwrap().unwrap();
        assert_eq!(outcome, ShutdownOutcome::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn coordinator_times_out_when_server_never_drains() {
        let (controller, signal) = channel();

        // Stand-in server that ignores the trigger entirely.
        let server = async move {
            std::future::pending::<()>().await;
            Ok(())
        };

        let run = tokio::spawn({
            let signal = signal.clone();
            async move { Coordinator::new(Duration::from_secs(30)).run(signal, server).await }
        });

        controller.trigger();

        let outcome = run.await.unwrap();
        assert_eq!(outcome, ShutdownOutcome::TimedOut);
    }

    #[tokio::test]
    async fn coordinator_stops_promptly_when_graceful_stop_fails() {
        let (controller, signal) = channel();

        // Stand-in server whose stop reports an error once triggered.
        let server = {
            let mut drain = signal.clone();
            async move {
                drain.wait().await;
                Err(io::Error::new(io::ErrorKind::Other, "drain failed"))
            }
        };

        let run = tokio::spawn({
            let signal = signal.clone();
            async move { Coordinator::new(Duration::from_secs(30)).run(signal, server).await }
        });

        controller.trigger();

        // The failure is logged and the sequence completes without waiting
        // out the rest of the grace period.
        let outcome = timeout(Duration::from_secs(5), run).await.unwrap().unwrap();
        assert_eq!(outcome, ShutdownOutcome::Stopped);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn wait_for_signal_resolves_on_sigterm() {
        let task = tokio::spawn(wait_for_signal());

        // Let the handlers install before raising the signal.
        tokio::time::sleep(Duration::from_millis(100)).await;
        let status = std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("kill -TERM {}", std::process::id()))
            .status()
            .unwrap();
        assert!(status.success());

        let name = timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(name, "SIGTERM");
    }

    #[tokio::test]
    async fn coordinator_handles_server_failure_before_trigger() {
        let (_controller, signal) = channel();

        let server = async { Err(io::Error::new(io::ErrorKind::Other, "accept failed")) };

        let outcome = Coordinator::new(Duration::from_secs(30))
            .run(signal, server)
            .await;
        assert_eq!(outcome, ShutdownOutcome::Stopped);
    }
}
