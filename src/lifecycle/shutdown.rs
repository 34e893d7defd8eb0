//! Shutdown coordination.
//!
//! `hello-api` has one long-running task, the HTTP server. It subscribes
//! before serving and stops accepting connections once the signal fires.

use tokio::sync::broadcast;

use crate::lifecycle::signals::wait_for_signal;

/// Broadcasts a single "stop serving" event to every subscriber.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the shutdown event. Harmless when nothing is subscribed.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Wait for Ctrl+C or SIGTERM, then fire the shutdown event.
    ///
    /// Returns the name of the signal that was received.
    pub async fn trigger_on_signal(&self) -> std::io::Result<&'static str> {
        let signal = wait_for_signal().await?;
        tracing::info!(signal, "Initiating graceful shutdown");
        self.trigger();
        Ok(signal)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
