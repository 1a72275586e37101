mod folder_key;
mod message_id;

pub use folder_key::FolderKey;
pub use message_id::MessageId;
