use log::{debug, error};
use tokio::sync::mpsc;

use crate::{
    notification::StateUpdate,
    tray::{Tray, TrayError},
};

/// Updates sent from the event loop to a tray backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayUpdate {
    State(StateUpdate),
    Shutdown,
}

/// Forwards state changes to a tray backend running elsewhere, typically on
/// the platform's UI thread.
#[derive(Debug)]
pub struct ChannelTray {
    updates: mpsc::UnboundedSender<TrayUpdate>,
}

impl ChannelTray {
    /// Returns the tray together with the receiver the backend consumes.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TrayUpdate>) {
        let (updates, receiver) = mpsc::unbounded_channel();
        (Self { updates }, receiver)
    }
}

impl Tray for ChannelTray {
    fn apply(&mut self, update: &StateUpdate) -> Result<(), TrayError> {
        self.updates
            .send(TrayUpdate::State(update.clone()))
            .map_err(|_| TrayError::Disconnected)
    }

    fn shutdown(&mut self) {
        // the backend may already be gone at shutdown
        let _ = self.updates.send(TrayUpdate::Shutdown);
    }
}

/// Applies `updates` to `backend` until the sending side shuts the tray down
/// or goes away.
pub async fn drive<T: Tray>(mut backend: T, mut updates: mpsc::UnboundedReceiver<TrayUpdate>) {
    while let Some(update) = updates.recv().await {
        match update {
            TrayUpdate::State(state) => {
                if let Err(e) = backend.apply(&state) {
                    error!("tray backend rejected {state}: {e}");
                }
            }
            TrayUpdate::Shutdown => break,
        }
    }
    debug!("tray backend stopping");
    backend.shutdown();
}
