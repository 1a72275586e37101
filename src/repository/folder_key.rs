use std::fmt::Display;

use serde::Deserialize;

/// A monitored mail folder, unique across all accounts of the mail client.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct FolderKey {
    account_id: String,
    path: String,
}

impl FolderKey {
    #[cfg(test)]
    pub fn new(account_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            path: path.into(),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Display for FolderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.account_id, self.path)
    }
}
