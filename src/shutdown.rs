use crate::components::ComponentManager;
use std::io;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

/// Wait for a termination signal, stop every component, then release the main task
pub async fn handle_signals(
    shutdown_send: oneshot::Sender<()>,
    component_manager: Arc<ComponentManager>,
) {
    if let Err(e) = wait_for_signal().await {
        // Without platform signals Ctrl+C is still available
        warn!("Platform signal handlers unavailable ({}), waiting for Ctrl+C", e);
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Cannot listen for shutdown signals: {}", e);
            return;
        }
    }

    // Live sessions lose their buttons before the fetch actor stops
    if let Err(e) = component_manager.shutdown_all().await {
        error!("Error shutting down components: {:?}", e);
    } else {
        info!("All components shut down");
    }

    let _ = shutdown_send.send(());
}

#[cfg(unix)]
async fn wait_for_signal() -> io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("Received SIGINT, shutting down"),
    }
    Ok(())
}

#[cfg(windows)]
async fn wait_for_signal() -> io::Result<()> {
    use tokio::signal::windows::{ctrl_break, ctrl_c};

    let mut ctrlc = ctrl_c()?;
    let mut ctrlbreak = ctrl_break()?;

    tokio::select! {
        _ = ctrlc.recv() => info!("Received Ctrl+C, shutting down"),
        _ = ctrlbreak.recv() => info!("Received Ctrl+Break, shutting down"),
    }
    Ok(())
}
