use std::io;

use bytes::{Buf as _, BufMut as _, Bytes, BytesMut};
use log::trace;
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};

const LENGTH_PREFIX: usize = size_of::<u32>();

/// Largest payload accepted in either direction.
pub const MAX_FRAME_LENGTH: usize = 64 * 1024 * 1024;

/// Errors after which message boundaries on the stream can no longer be trusted.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("frame i/o failed")]
    Io(#[from] io::Error),
    #[error("stream ended inside a frame after {received} of {expected} bytes")]
    Truncated { received: usize, expected: usize },
    #[error("frame of {0} bytes exceeds the limit of {MAX_FRAME_LENGTH} bytes")]
    TooLarge(usize),
}

/// Native messaging framing: a native-endian `u32` length followed by that many
/// bytes of payload.
#[derive(Debug, Default)]
pub struct FrameCodec {
    payload_length: Option<usize>,
}

impl FrameCodec {
    fn read_length(src: &mut BytesMut) -> Result<Option<usize>, FrameError> {
        if src.len() < LENGTH_PREFIX {
            src.reserve(LENGTH_PREFIX - src.len());
            return Ok(None);
        }
        let length = usize::try_from(src.get_u32_ne()).unwrap_or(usize::MAX);
        if length > MAX_FRAME_LENGTH {
            return Err(FrameError::TooLarge(length));
        }
        src.reserve(length);
        Ok(Some(length))
    }
}

impl Decoder for FrameCodec {
    type Item = Bytes;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let length = match self.payload_length {
            Some(length) => length,
            None => match Self::read_length(src)? {
                Some(length) => {
                    self.payload_length = Some(length);
                    length
                }
                None => return Ok(None),
            },
        };

        if src.len() < length {
            return Ok(None);
        }
        self.payload_length = None;
        trace!("decoded frame of {length} bytes");
        Ok(Some(src.split_to(length).freeze()))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        match self.payload_length {
            None if src.is_empty() => Ok(None),
            None => Err(FrameError::Truncated {
                received: src.len(),
                expected: LENGTH_PREFIX,
            }),
            Some(expected) => Err(FrameError::Truncated {
                received: src.len(),
                expected,
            }),
        }
    }
}

impl Encoder<&[u8]> for FrameCodec {
    type Error = FrameError;

    fn encode(&mut self, payload: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        let length = payload.len();
        let prefix = u32::try_from(length)
            .ok()
            .filter(|_| length <= MAX_FRAME_LENGTH)
            .ok_or(FrameError::TooLarge(length))?;
        dst.reserve(LENGTH_PREFIX + length);
        dst.put_u32_ne(prefix);
        dst.extend_from_slice(payload);
        Ok(())
    }
}
