mod state_machine;
mod state_update;
mod title;

pub use state_machine::NotificationStateMachine;
pub use state_machine::Outcome;
pub use state_update::IconVariant;
pub use state_update::NotificationUpdate;
pub use state_update::StateUpdate;
#[cfg(test)]
pub use title::NO_UNSEEN_MESSAGES;
