use crate::config::Config;

/// Actions the user can trigger from the tray context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Consider all unseen messages seen.
    Reset,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
}

impl MenuAction {
    /// Whether the configuration offers this action to the user.
    pub fn is_enabled(self, config: &Config) -> bool {
        match self {
            MenuAction::Reset => config.reset_menu(),
            MenuAction::Quit => config.quit_menu(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            MenuAction::Reset => "Reset message counter",
            MenuAction::Quit => "Quit",
        }
    }
}

/// Builds the context menu offered by the tray.
pub fn build_menu(config: &Config) -> Vec<MenuItem> {
    [MenuAction::Reset, MenuAction::Quit]
        .into_iter()
        .filter(|action| action.is_enabled(config))
        .map(|action| MenuItem {
            label: action.label(),
            action,
        })
        .collect()
}
