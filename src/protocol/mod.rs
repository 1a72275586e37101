mod event;
mod frame_codec;

#[cfg(test)]
pub use event::Account;
pub use event::Event;
pub use event::FolderSnapshot;
pub use event::MessageEvent;
#[cfg(test)]
pub use event::MessageRef;
pub use frame_codec::FrameCodec;
pub use frame_codec::FrameError;

/// Payload acknowledging a processed event: the JSON string `"{}"`.
pub const ACKNOWLEDGEMENT: &[u8] = br#""{}""#;
