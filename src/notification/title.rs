use std::fmt::Write as _;

use log::warn;

use crate::{protocol::FolderSnapshot, tracker::FolderUnreadTracker};

pub const NO_UNSEEN_MESSAGES: &str = "No unseen messages";

/// Renders one `"{count:>4} {account}{path}"` line per folder holding unseen
/// mail, in the order the mail client lists the folders.
pub fn render(snapshot: &FolderSnapshot, tracker: &FolderUnreadTracker) -> String {
    let mut title = String::new();
    for folder in &snapshot.folders {
        let count = tracker.count_for(folder);
        if count == 0 {
            continue;
        }
        let account = snapshot.account_name(folder).unwrap_or_else(|| {
            warn!("no account metadata for {}", folder.account_id());
            folder.account_id()
        });
        if !title.is_empty() {
            title.push('\n');
        }
        write!(title, "{count:>4} {account}{}", folder.path())
            .expect("writing to a String should succeed");
    }
    if title.is_empty() {
        title.push_str(NO_UNSEEN_MESSAGES);
    }
    title
}
