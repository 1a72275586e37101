use log::{debug, info};
use thiserror::Error;

use crate::{
    config::Config,
    notification::{
        IconVariant, NotificationUpdate, StateUpdate,
        title::{self, NO_UNSEEN_MESSAGES},
    },
    protocol::{Event, MessageEvent},
    tracker::{FolderUnreadTracker, UnknownFolderError},
};

const WAITING_TITLE: &str = "Waiting for mail client";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApplyError {
    #[error("event references a folder outside the monitored folders")]
    UnknownFolder(#[from] UnknownFolderError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Update(StateUpdate),
    Quit,
}

#[derive(Debug, Clone, Copy)]
struct Policy {
    notify: bool,
    show_read_icon: bool,
}

/// Derives the tray state from the events of the mail client.
#[derive(Debug)]
pub struct NotificationStateMachine {
    policy: Policy,
    tracker: FolderUnreadTracker,
    current: StateUpdate,
}

impl NotificationStateMachine {
    pub fn new(config: &Config) -> Self {
        Self {
            policy: Policy {
                notify: config.notify(),
                show_read_icon: config.show_read_icon(),
            },
            tracker: FolderUnreadTracker::default(),
            current: StateUpdate::new(
                IconVariant::Indifferent,
                true,
                WAITING_TITLE.to_string(),
                NotificationUpdate::Keep,
            ),
        }
    }

    /// The state produced by the last successfully applied event.
    pub fn current(&self) -> &StateUpdate {
        &self.current
    }

    #[cfg(test)]
    pub fn tracker(&self) -> &FolderUnreadTracker {
        &self.tracker
    }

    /// Applies `event`. A rejected event leaves all state untouched.
    pub fn apply(&mut self, event: &Event) -> Result<Outcome, ApplyError> {
        let update = match event {
            Event::Quit => {
                info!("mail client is quitting");
                return Ok(Outcome::Quit);
            }
            Event::Start(snapshot) => {
                self.tracker.reconcile(&snapshot.folders);
                self.idle()
            }
            Event::New(message_event) => self.new_mail(message_event)?,
            Event::Read(message_event) => self.read_mail(message_event)?,
        };
        debug!("{} => {update}", event.name());
        self.current = update.clone();
        Ok(Outcome::Update(update))
    }

    /// Considers all tracked mail seen, as requested by the user.
    pub fn reset(&mut self) -> StateUpdate {
        info!("resetting unseen messages");
        self.tracker.reset_all();
        let update = self.idle();
        self.current = update.clone();
        update
    }

    fn new_mail(&mut self, event: &MessageEvent) -> Result<StateUpdate, ApplyError> {
        let MessageEvent { snapshot, message } = event;
        self.prepare(event)?;
        if !self
            .tracker
            .mark_new(&message.folder, message.message_id.clone())?
        {
            debug!("{} already known as unseen", message.message_id);
        }

        let title = title::render(snapshot, &self.tracker);
        let notify = if self.policy.notify {
            NotificationUpdate::Show(title.clone())
        } else {
            NotificationUpdate::Keep
        };
        Ok(StateUpdate::new(IconVariant::NewMail, true, title, notify))
    }

    fn read_mail(&mut self, event: &MessageEvent) -> Result<StateUpdate, ApplyError> {
        let MessageEvent { snapshot, message } = event;
        self.prepare(event)?;
        let cleared = self.tracker.mark_read(&message.folder)?;
        debug!("{cleared} messages in {} seen", message.folder);

        let (icon, visible) = if self.tracker.any_unread() {
            (IconVariant::SomeMail, true)
        } else {
            (IconVariant::NoMail, self.policy.show_read_icon)
        };
        Ok(StateUpdate::new(
            icon,
            visible,
            title::render(snapshot, &self.tracker),
            self.withdraw_notification(),
        ))
    }

    /// Rejects events about folders the mail client does not monitor before
    /// the tracker is touched, then brings the tracker in line with `snapshot`.
    fn prepare(&mut self, event: &MessageEvent) -> Result<(), ApplyError> {
        let folder = &event.message.folder;
        if !event.snapshot.contains(folder) {
            return Err(UnknownFolderError(folder.clone()).into());
        }
        self.tracker.reconcile(&event.snapshot.folders);
        Ok(())
    }

    fn idle(&self) -> StateUpdate {
        StateUpdate::new(
            IconVariant::NoMail,
            self.policy.show_read_icon,
            NO_UNSEEN_MESSAGES.to_string(),
            self.withdraw_notification(),
        )
    }

    fn withdraw_notification(&self) -> NotificationUpdate {
        if self.policy.notify {
            NotificationUpdate::Withdraw
        } else {
            NotificationUpdate::Keep
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assertables::*;
    use rstest::*;

    use super::*;
    use crate::{
        protocol::{Account, FolderSnapshot, MessageRef},
        repository::FolderKey,
    };

    fn config(notify: bool, show_read_icon: bool) -> Config {
        let config = format!("notify = {notify}\nshow_read_icon = {show_read_icon}\n");
        assert_ok!(toml::from_str(&config))
    }

    #[fixture]
    fn folder_a() -> FolderKey {
        FolderKey::new("account1", "/INBOX")
    }

    #[fixture]
    fn folder_b() -> FolderKey {
        FolderKey::new("account2", "/INBOX")
    }

    #[fixture]
    fn snapshot(folder_a: FolderKey, folder_b: FolderKey) -> FolderSnapshot {
        FolderSnapshot {
            folders: vec![folder_a, folder_b],
            accounts: HashMap::from([
                (
                    "account1".to_string(),
                    Account {
                        name: "Work".to_string(),
                    },
                ),
                (
                    "account2".to_string(),
                    Account {
                        name: "Home".to_string(),
                    },
                ),
            ]),
        }
    }

    #[fixture]
    fn machine(snapshot: FolderSnapshot) -> NotificationStateMachine {
        let mut machine = NotificationStateMachine::new(&config(false, false));
        assert_ok!(machine.apply(&Event::Start(snapshot)));
        machine
    }

    fn message(snapshot: &FolderSnapshot, folder: &FolderKey, id: &str) -> MessageEvent {
        MessageEvent {
            snapshot: snapshot.clone(),
            message: MessageRef {
                folder: folder.clone(),
                message_id: id.into(),
            },
        }
    }

    fn update(outcome: Outcome) -> StateUpdate {
        match outcome {
            Outcome::Update(update) => update,
            Outcome::Quit => panic!("expected a state update"),
        }
    }

    #[rstest]
    fn test_initial_state_is_indifferent() {
        let machine = NotificationStateMachine::new(&Config::default());
        assert_eq!(IconVariant::Indifferent, machine.current().icon());
        assert!(machine.current().visible());
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_start_shows_no_mail(snapshot: FolderSnapshot, #[case] show_read_icon: bool) {
        let mut machine = NotificationStateMachine::new(&config(false, show_read_icon));
        let update = update(assert_ok!(machine.apply(&Event::Start(snapshot))));
        assert_eq!(
            StateUpdate::new(
                IconVariant::NoMail,
                show_read_icon,
                NO_UNSEEN_MESSAGES.to_string(),
                NotificationUpdate::Keep
            ),
            update
        );
        assert_eq!(&update, machine.current());
    }

    #[rstest]
    fn test_new_mail_shows_count_in_title(
        mut machine: NotificationStateMachine,
        snapshot: FolderSnapshot,
        folder_a: FolderKey,
    ) {
        let event = Event::New(message(&snapshot, &folder_a, "m1"));
        let update = update(assert_ok!(machine.apply(&event)));
        assert_eq!(IconVariant::NewMail, update.icon());
        assert!(update.visible());
        assert!(update.title().contains("   1 Work/INBOX"));
        assert_eq!(&NotificationUpdate::Keep, update.notify());
    }

    #[rstest]
    fn test_new_mail_notifies_when_enabled(snapshot: FolderSnapshot, folder_b: FolderKey) {
        let mut machine = NotificationStateMachine::new(&config(true, false));
        let start = update(assert_ok!(machine.apply(&Event::Start(snapshot.clone()))));
        assert_eq!(&NotificationUpdate::Withdraw, start.notify());

        let update = update(assert_ok!(
            machine.apply(&Event::New(message(&snapshot, &folder_b, "m1")))
        ));
        assert_eq!(
            &NotificationUpdate::Show("   1 Home/INBOX".to_string()),
            update.notify()
        );
    }

    #[rstest]
    fn test_read_keeps_some_mail_while_other_folders_are_unseen(
        mut machine: NotificationStateMachine,
        snapshot: FolderSnapshot,
        folder_a: FolderKey,
        folder_b: FolderKey,
    ) {
        for (folder, id) in [(&folder_a, "m1"), (&folder_a, "m2"), (&folder_b, "m3")] {
            assert_ok!(machine.apply(&Event::New(message(&snapshot, folder, id))));
        }

        let update = update(assert_ok!(
            machine.apply(&Event::Read(message(&snapshot, &folder_a, "m1")))
        ));
        assert_eq!(IconVariant::SomeMail, update.icon());
        assert!(update.visible());
        assert_eq!("   1 Home/INBOX", update.title());
        assert_eq!(0, machine.tracker().count_for(&folder_a));
        assert_eq!(1, machine.tracker().count_for(&folder_b));
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_read_of_last_unseen_folder_shows_no_mail(
        snapshot: FolderSnapshot,
        folder_a: FolderKey,
        #[case] show_read_icon: bool,
    ) {
        let mut machine = NotificationStateMachine::new(&config(true, show_read_icon));
        assert_ok!(machine.apply(&Event::Start(snapshot.clone())));
        assert_ok!(machine.apply(&Event::New(message(&snapshot, &folder_a, "m1"))));

        let update = update(assert_ok!(
            machine.apply(&Event::Read(message(&snapshot, &folder_a, "m1")))
        ));
        assert_eq!(
            StateUpdate::new(
                IconVariant::NoMail,
                show_read_icon,
                NO_UNSEEN_MESSAGES.to_string(),
                NotificationUpdate::Withdraw
            ),
            update
        );
    }

    #[rstest]
    fn test_read_twice_yields_the_same_state(
        mut machine: NotificationStateMachine,
        snapshot: FolderSnapshot,
        folder_a: FolderKey,
    ) {
        let read = Event::Read(message(&snapshot, &folder_a, "m1"));
        let first = assert_ok!(machine.apply(&read));
        let second = assert_ok!(machine.apply(&read));
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_unknown_folder_is_rejected_without_mutation(
        mut machine: NotificationStateMachine,
        snapshot: FolderSnapshot,
        folder_a: FolderKey,
        folder_b: FolderKey,
    ) {
        assert_ok!(machine.apply(&Event::New(message(&snapshot, &folder_a, "m1"))));
        let before = machine.current().clone();

        let mut shrunk = snapshot.clone();
        shrunk.folders.retain(|folder| folder != &folder_a);
        let unknown = FolderKey::new("account3", "/Spam");
        for event in [
            Event::New(message(&snapshot, &unknown, "m2")),
            Event::Read(message(&shrunk, &folder_a, "m1")),
        ] {
            assert!(matches!(
                assert_err!(machine.apply(&event)),
                ApplyError::UnknownFolder(_)
            ));
        }

        assert_eq!(&before, machine.current());
        assert_eq!(1, machine.tracker().count_for(&folder_a));
        assert!(machine.tracker().keys().any(|key| key == &folder_b));
    }

    #[rstest]
    fn test_events_drop_folders_no_longer_monitored(
        mut machine: NotificationStateMachine,
        snapshot: FolderSnapshot,
        folder_a: FolderKey,
        folder_b: FolderKey,
    ) {
        assert_ok!(machine.apply(&Event::New(message(&snapshot, &folder_b, "m1"))));
        let mut shrunk = snapshot.clone();
        shrunk.folders.retain(|folder| folder != &folder_b);

        let update = update(assert_ok!(
            machine.apply(&Event::Read(message(&shrunk, &folder_a, "m2")))
        ));
        assert_eq!(IconVariant::NoMail, update.icon());
        assert_eq!(
            vec![&folder_a],
            machine.tracker().keys().collect::<Vec<_>>()
        );
    }

    #[rstest]
    fn test_reset_clears_all_folders(
        mut machine: NotificationStateMachine,
        snapshot: FolderSnapshot,
        folder_a: FolderKey,
        folder_b: FolderKey,
    ) {
        assert_ok!(machine.apply(&Event::New(message(&snapshot, &folder_a, "m1"))));
        assert_ok!(machine.apply(&Event::New(message(&snapshot, &folder_b, "m2"))));

        let update = machine.reset();
        assert_eq!(IconVariant::NoMail, update.icon());
        assert!(!update.visible());
        assert_eq!(NO_UNSEEN_MESSAGES, update.title());
        assert!(!machine.tracker().any_unread());
        assert_eq!(&update, machine.current());
    }

    #[rstest]
    fn test_quit_leaves_state_untouched(mut machine: NotificationStateMachine) {
        let before = machine.current().clone();
        assert_eq!(Outcome::Quit, assert_ok!(machine.apply(&Event::Quit)));
        assert_eq!(&before, machine.current());
    }
}
