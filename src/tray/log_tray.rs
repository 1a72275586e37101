use log::{debug, info};

use crate::{
    config::{Config, Palette},
    notification::{NotificationUpdate, StateUpdate},
    tray::{Tray, TrayError, build_menu},
};

const NOTIFICATION_SUMMARY: &str = "New messages available";

/// Headless tray that reports every state change to the log.
#[derive(Debug)]
pub struct LogTray {
    palette: Palette,
    visible: Option<bool>,
}

impl LogTray {
    pub fn new(config: &Config) -> Self {
        for item in build_menu(config) {
            debug!("menu item {:?} => {:?}", item.label, item.action);
        }
        Self {
            palette: *config.colors(),
            visible: None,
        }
    }
}

impl Tray for LogTray {
    fn apply(&mut self, update: &StateUpdate) -> Result<(), TrayError> {
        let colors = self.palette.colors_for(update.icon());
        info!(
            "icon {} (fill {:?}, outline {:?})",
            update.icon(),
            colors.fill,
            colors.outline
        );
        if self.visible != Some(update.visible()) {
            info!("icon {}", if update.visible() { "shown" } else { "hidden" });
            self.visible = Some(update.visible());
        }
        info!("tooltip {:?}", update.title());
        match update.notify() {
            NotificationUpdate::Keep => {}
            NotificationUpdate::Show(text) => info!("notification {NOTIFICATION_SUMMARY}:\n{text}"),
            NotificationUpdate::Withdraw => debug!("notification withdrawn"),
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        info!("removing tray icon");
        self.visible = None;
    }
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use rstest::*;

    use super::*;
    use crate::notification::IconVariant;

    #[rstest]
    fn test_log_tray_tracks_visibility() {
        let mut tray = LogTray::new(&Config::default());
        assert_none!(tray.visible);

        let update = StateUpdate::new(
            IconVariant::NewMail,
            true,
            "   1 Work/INBOX".to_string(),
            NotificationUpdate::Show("   1 Work/INBOX".to_string()),
        );
        assert_ok!(tray.apply(&update));
        assert_eq!(Some(true), tray.visible);

        tray.shutdown();
        assert_none!(tray.visible);
    }
}
