//! Shutdown coordination for the relay.
//!
//! Backed by a `watch` channel holding a single flag, so a signal that fires
//! before the server subscribes is still observed.

use tokio::sync::watch;

/// Owner side of the shutdown flag. Held by `main` or by a test harness.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Waiting side handed to `HttpServer::run`.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Raise the flag. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once the flag is raised or the owner is dropped.
    pub async fn wait(mut self) {
        // `wait_for` checks the current value first, then each change.
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}
