//! Graceful shutdown plumbing shared by `main` and the shutdown endpoint.
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::info;

/// Delay between answering a shutdown request and stopping the server,
/// so the response reaches the caller first
pub const SHUTDOWN_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Default)]
pub struct ShutdownSignal {
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.notify.notify_one();
    }

    /// Trigger the signal from a background task after `delay`
    pub fn trigger_after(&self, delay: Duration) {
        let signal = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            info!("Shutdown requested, stopping server");
            signal.trigger();
        });
    }

    /// Resolves once the signal has been triggered
    pub async fn wait(&self) {
        self.notify.notified().await;
    }
}

/// Future for `with_graceful_shutdown`: Ctrl-C or an explicit request
pub async fn shutdown_requested(signal: ShutdownSignal) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received, stopping server"),
        _ = signal.wait() => {}
    }
}
