use std::io;

use log::{info, warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::tray::MenuAction;

/// Installs the signal handlers and spawns the task that serves them.
///
/// SIGTERM and SIGINT cancel `shutdown`. Without a tray to click on, SIGUSR1
/// stands in for the "Reset" menu entry.
#[cfg(unix)]
pub fn listen(
    shutdown: CancellationToken,
    menu_actions: mpsc::UnboundedSender<MenuAction>,
) -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut reset = signal(SignalKind::user_defined1())?;

    tokio::spawn(async move {
        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = terminate.recv() => {
                    info!("SIGTERM received");
                    shutdown.cancel();
                }
                _ = interrupt.recv() => {
                    info!("SIGINT received");
                    shutdown.cancel();
                }
                _ = reset.recv() => {
                    info!("SIGUSR1 received");
                    if menu_actions.send(MenuAction::Reset).is_err() {
                        warn!("event loop is gone, reset dropped");
                        break;
                    }
                }
            }
        }
    });
    Ok(())
}

#[cfg(not(unix))]
pub fn listen(
    shutdown: CancellationToken,
    _menu_actions: mpsc::UnboundedSender<MenuAction>,
) -> io::Result<()> {
    tokio::spawn(async move {
        tokio::select! {
            () = shutdown.cancelled() => {}
            result = tokio::signal::ctrl_c() => {
                match result {
                    Ok(()) => {
                        info!("interrupt received");
                        shutdown.cancel();
                    }
                    Err(e) => warn!("cannot listen for interrupts: {e}"),
                }
            }
        }
    });
    Ok(())
}
