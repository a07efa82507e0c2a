//! Frame encoding and decoding for the push feed.
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - LENGTH (1 byte): payload length (0-250)
//! - TYPE (1 byte): event type identifier
//! - PAYLOAD (0-250 bytes): postcard-encoded data item
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE, and all PAYLOAD bytes

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// Maximum complete frame size (START + LENGTH + TYPE + MAX_PAYLOAD + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + 4;

/// Errors that can occur while framing or unframing events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Length byte out of range
    InvalidLength,
    /// Unknown event type
    UnknownType,
    /// Payload is not a valid data item
    InvalidPayload,
    /// Output buffer too small
    BufferTooSmall,
}

/// A single framed event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Event type identifier
    pub kind: u8,
    /// Payload bytes
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Build a frame, rejecting payloads that do not fit
    pub fn new(kind: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { kind, payload })
    }

    fn checksum(length: u8, kind: u8, payload: &[u8]) -> u8 {
        payload.iter().fold(length ^ kind, |acc, b| acc ^ b)
    }

    /// Total size of this frame on the wire
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + 4
    }

    /// Write this frame into `out`, returning the number of bytes used
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        if out.len() < len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;
        let body_end = 3 + self.payload.len();
        out[0] = FRAME_START;
        out[1] = length;
        out[2] = self.kind;
        out[3..body_end].copy_from_slice(&self.payload);
        out[body_end] = Self::checksum(length, self.kind, &self.payload);

        Ok(len)
    }

    /// Encode into an owned buffer
    pub fn to_bytes(&self) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut out = [0u8; MAX_FRAME_SIZE];
        // MAX_FRAME_SIZE always fits a frame built through `new`
        let len = self.encode(&mut out).unwrap_or(0);
        let mut bytes = Vec::new();
        let _ = bytes.extend_from_slice(&out[..len]);
        bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Sync,
    Length,
    Kind,
    Payload,
    Checksum,
}

/// Incremental frame parser
///
/// Bytes arrive in arbitrary chunks from the feed; the parser keeps its
/// position between calls and resynchronizes on the next START byte after
/// any error.
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    length: u8,
    kind: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a parser waiting for a START byte
    pub fn new() -> Self {
        Self {
            stage: Stage::Sync,
            length: 0,
            kind: 0,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.stage = Stage::Sync;
        self.length = 0;
        self.kind = 0;
        self.payload.clear();
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(frame))` once a frame completes, `Ok(None)` while
    /// more bytes are needed.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.stage {
            Stage::Sync => {
                if byte == FRAME_START {
                    self.stage = Stage::Length;
                }
            }
            Stage::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidLength);
                }
                self.length = byte;
                self.stage = Stage::Kind;
            }
            Stage::Kind => {
                self.kind = byte;
                self.payload.clear();
                self.stage = if self.length == 0 {
                    Stage::Checksum
                } else {
                    Stage::Payload
                };
            }
            Stage::Payload => {
                // Capacity is MAX_PAYLOAD_SIZE and length was bounds-checked
                let _ = self.payload.push(byte);
                if self.payload.len() == self.length as usize {
                    self.stage = Stage::Checksum;
                }
            }
            Stage::Checksum => {
                let expected = Frame::checksum(self.length, self.kind, &self.payload);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }
                let frame = Frame {
                    kind: self.kind,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
