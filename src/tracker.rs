use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use thiserror::Error;

use crate::repository::{FolderKey, MessageId};

#[derive(Error, Debug, PartialEq, Eq)]
#[error("folder {0} is not monitored")]
pub struct UnknownFolderError(pub FolderKey);

/// Messages that arrived during this session and have not been seen yet,
/// grouped by folder.
#[derive(Debug, Default)]
pub struct FolderUnreadTracker {
    unseen: HashMap<FolderKey, HashSet<MessageId>>,
}

impl FolderUnreadTracker {
    /// Makes the tracked folders exactly `folders`: new folders start without
    /// unseen messages, folders no longer monitored are forgotten.
    pub fn reconcile<'a>(&mut self, folders: impl IntoIterator<Item = &'a FolderKey>) {
        let monitored: HashSet<&FolderKey> = folders.into_iter().collect();
        self.unseen.retain(|folder, _| {
            let keep = monitored.contains(folder);
            if !keep {
                debug!("no longer monitoring {folder}");
            }
            keep
        });
        for folder in monitored {
            if !self.unseen.contains_key(folder) {
                debug!("monitoring {folder}");
                self.unseen.insert(folder.clone(), HashSet::new());
            }
        }
    }

    /// Returns whether the message was not yet known as unseen.
    pub fn mark_new(
        &mut self,
        folder: &FolderKey,
        message_id: MessageId,
    ) -> Result<bool, UnknownFolderError> {
        let unseen = self.folder_mut(folder)?;
        trace!("{message_id} arrived in {folder}");
        Ok(unseen.insert(message_id))
    }

    /// Considers every message of `folder` seen and returns how many were unseen.
    pub fn mark_read(&mut self, folder: &FolderKey) -> Result<usize, UnknownFolderError> {
        let unseen = self.folder_mut(folder)?;
        let cleared = unseen.len();
        unseen.clear();
        Ok(cleared)
    }

    pub fn reset_all(&mut self) {
        self.unseen.values_mut().for_each(HashSet::clear);
    }

    pub fn any_unread(&self) -> bool {
        self.unseen.values().any(|unseen| !unseen.is_empty())
    }

    pub fn count_for(&self, folder: &FolderKey) -> usize {
        self.unseen.get(folder).map_or(0, HashSet::len)
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &FolderKey> {
        self.unseen.keys()
    }

    fn folder_mut(
        &mut self,
        folder: &FolderKey,
    ) -> Result<&mut HashSet<MessageId>, UnknownFolderError> {
        self.unseen
            .get_mut(folder)
            .ok_or_else(|| UnknownFolderError(folder.clone()))
    }
}
