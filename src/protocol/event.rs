use std::{collections::HashMap, str::Utf8Error};

use serde::Deserialize;
use thiserror::Error;

use crate::repository::{FolderKey, MessageId};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("payload is not valid UTF-8")]
    Utf8(#[from] Utf8Error),
    #[error("payload is not a valid event")]
    Json(#[from] serde_json::Error),
}

/// Display metadata of a mail account.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
}

/// The folders currently monitored by the mail client, in the order the user
/// configured them, together with the accounts owning them.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct FolderSnapshot {
    pub folders: Vec<FolderKey>,
    #[serde(default)]
    pub accounts: HashMap<String, Account>,
}

impl FolderSnapshot {
    pub fn contains(&self, folder: &FolderKey) -> bool {
        self.folders.contains(folder)
    }

    pub fn account_name(&self, folder: &FolderKey) -> Option<&str> {
        self.accounts
            .get(folder.account_id())
            .map(|account| account.name.as_str())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageRef {
    pub folder: FolderKey,
    pub message_id: MessageId,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    #[serde(flatten)]
    pub snapshot: FolderSnapshot,
    pub message: MessageRef,
}

/// An event sent by the mail client extension.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum Event {
    Start(FolderSnapshot),
    New(MessageEvent),
    Read(MessageEvent),
    Quit,
}

impl Event {
    pub fn from_payload(payload: &[u8]) -> Result<Self, DecodeError> {
        let json = std::str::from_utf8(payload)?;
        Ok(serde_json::from_str(json)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Start(_) => "start",
            Event::New(_) => "new",
            Event::Read(_) => "read",
            Event::Quit => "quit",
        }
    }
}
