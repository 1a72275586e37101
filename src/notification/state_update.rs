use std::fmt::Display;

use derive_getters::Getters;

/// The discrete look of the tray icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconVariant {
    /// No event processed yet, unseen mail unknown.
    Indifferent,
    NewMail,
    /// Unseen mail is left in some folder after another one was read.
    SomeMail,
    NoMail,
}

impl Display for IconVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconVariant::Indifferent => write!(f, "indifferent"),
            IconVariant::NewMail => write!(f, "new mail"),
            IconVariant::SomeMail => write!(f, "some mail"),
            IconVariant::NoMail => write!(f, "no mail"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationUpdate {
    /// Leave a pending notification as it is.
    Keep,
    Show(String),
    Withdraw,
}

/// What the tray should display after an event.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StateUpdate {
    #[getter(skip)]
    icon: IconVariant,
    visible: bool,
    title: String,
    notify: NotificationUpdate,
}

impl StateUpdate {
    pub fn new(icon: IconVariant, visible: bool, title: String, notify: NotificationUpdate) -> Self {
        Self {
            icon,
            visible,
            title,
            notify,
        }
    }

    pub fn icon(&self) -> IconVariant {
        self.icon
    }
}

impl Display for StateUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "icon={} visible={} title={:?}",
            self.icon, self.visible, self.title
        )
    }
}
