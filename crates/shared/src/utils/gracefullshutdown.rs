use std::{future::Future, io};
use tokio::signal;
use tracing::{error, info};

pub async fn shutdown_signal() {
    let ctrl_c = wait_for_signal(signal::ctrl_c(), "Ctrl+C");

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("🛑 Received SIGTERM, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Resolves when `listener` reports the signal. A listener that fails to
/// install never resolves, so it cannot trigger a shutdown.
async fn wait_for_signal<F>(listener: F, name: &str)
where
    F: Future<Output = io::Result<()>>,
{
    match listener.await {
        Ok(()) => info!("🛑 Received {name}, shutting down"),
        Err(e) => {
            error!("Failed to listen for {name}: {e}");
            std::future::pending::<()>().await;
        }
    }
}
