//! The boundary to whatever renders the tray icon.
//!
//! The event loop hands every [`StateUpdate`] to a [`Tray`] and receives the
//! user's [`MenuAction`]s back through a channel.

mod channel_tray;
mod log_tray;
mod menu;

use thiserror::Error;

use crate::notification::StateUpdate;

pub use channel_tray::ChannelTray;
#[cfg(test)]
pub use channel_tray::TrayUpdate;
pub use channel_tray::drive;
pub use log_tray::LogTray;
pub use menu::MenuAction;
pub use menu::build_menu;

#[derive(Error, Debug)]
pub enum TrayError {
    #[error("tray backend is gone")]
    Disconnected,
}

pub trait Tray {
    /// Shows `update`: icon variant, visibility, tooltip and notification.
    fn apply(&mut self, update: &StateUpdate) -> Result<(), TrayError>;

    /// Removes the icon and any pending notification.
    fn shutdown(&mut self);
}
