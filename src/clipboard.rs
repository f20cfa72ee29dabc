//! Clipboard transport for figure lists.
//!
//! The editor never talks to a platform clipboard directly. It serializes
//! the selected figures into an opaque byte payload and hands that to a
//! [`Clipboard`] implementation; the host decides where the bytes live.

use serde::{Deserialize, Serialize};

use crate::figure::Figure;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard is empty or holds foreign data")]
    Empty,
    #[error("failed to encode figures: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode figures: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Byte-level clipboard the host supplies. Implementations store the most
/// recently put payload and return it on get.
pub trait Clipboard {
    fn put(&mut self, payload: Vec<u8>);
    fn get(&self) -> Option<Vec<u8>>;
}

/// Process-local clipboard, the default when no platform integration exists.
/// Also what the tests use.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    payload: Option<Vec<u8>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn put(&mut self, payload: Vec<u8>) {
        self.payload = Some(payload);
    }

    fn get(&self) -> Option<Vec<u8>> {
        self.payload.clone()
    }
}

/// Versioned payload wrapper so foreign clipboard bytes fail decoding
/// cleanly instead of producing garbage figures.
#[derive(Serialize, Deserialize)]
struct Payload {
    figures: Vec<Figure>,
}

pub fn encode(figures: &[Figure]) -> Result<Vec<u8>, ClipboardError> {
    let payload = Payload {
        figures: figures.to_vec(),
    };
    serde_json::to_vec(&payload).map_err(ClipboardError::Encode)
}

pub fn decode(bytes: &[u8]) -> Result<Vec<Figure>, ClipboardError> {
    let payload: Payload = serde_json::from_slice(bytes).map_err(ClipboardError::Decode)?;
    Ok(payload.figures)
}
