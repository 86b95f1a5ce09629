//! pulse-server binary.
//!
//! Wiring: counted root endpoint, diagnostics mount under `/debug/pprof`,
//! once-per-second RPS reporter, and a bounded graceful shutdown on
//! SIGINT/SIGTERM.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::process;

use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use pulse_core::RequestCounter;
use pulse_server::{
    app_state::AppState,
    config, diag,
    reporter::RateReporter,
    router, shutdown,
};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cfg = match config::load_or_default(config::DEFAULT_PATH) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "config load failed");
            process::exit(1);
        }
    };

    // Already validated, but never panic on startup input.
    let listen: SocketAddr = match cfg.server.listen.parse() {
        Ok(addr) => addr,
        Err(_) => {
            error!(listen = %cfg.server.listen, "server.listen is not a valid socket address");
            process::exit(1);
        }
    };
    let grace = cfg.server.shutdown_grace();

    let counter = RequestCounter::new();
    let state = AppState::new(cfg, counter.clone());
    let app = router::build_router(state, diag::router());

    let listener = match tokio::net::TcpListener::bind(listen).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%listen, error = %e, "failed to bind");
            process::exit(1);
        }
    };
    info!(%listen, "listening");

    let (controller, signal) = shutdown::channel();

    let watcher = tokio::spawn({
        let controller = controller.clone();
        async move {
            match shutdown::wait_for_signal().await {
                Ok(name) => info!(signal = name, "termination signal received"),
                // No handlers means no way to request a stop later; treat
                // install failure as an immediate shutdown.
                Err(e) => error!(error = %e, "failed to install signal handlers"),
            }
            controller.trigger();
        }
    });

    let reporter = RateReporter::new(counter).spawn(signal.clone());

    let server = axum::serve(listener, app).with_graceful_shutdown({
        let mut drain = signal.clone();
        async move { drain.wait().await }
    });

    let outcome = shutdown::Coordinator::new(grace)
        .run(signal, server.into_future())
        .await;

    // The server may have died without any signal; make sure the reporter
    // sees a trigger before we join it.
    controller.trigger();
    let _ = reporter.await;
    watcher.abort();

    info!(?outcome, "pulse-server exit");
}
