//! Shared application state for pulse-server.

use std::sync::Arc;

use pulse_core::RequestCounter;

use crate::config::ServerConfig;

/// Cloneable state handed to every request handler.
///
/// The counter is injected at construction rather than living in a global,
/// so tests can build independent server instances.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    counter: RequestCounter,
}

struct AppStateInner {
    cfg: ServerConfig,
}

impl AppState {
    pub fn new(cfg: ServerConfig, counter: RequestCounter) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            counter,
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn counter(&self) -> &RequestCounter {
        &self.counter
    }
}
