//! Data events of the push feed
//!
//! Each frame carries one event about one data item:
//! - `DATA_CHANGED`: the item was created or replaced
//! - `DATA_DELETED`: the item was removed on the phone

use crate::data::DataItem;
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Event type IDs
pub const MSG_DATA_CHANGED: u8 = 0x01;
pub const MSG_DATA_DELETED: u8 = 0x02;

/// What happened to the item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataEventType {
    Changed,
    Deleted,
}

impl DataEventType {
    /// Parse from the frame type byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            MSG_DATA_CHANGED => Some(DataEventType::Changed),
            MSG_DATA_DELETED => Some(DataEventType::Deleted),
            _ => None,
        }
    }

    /// Wire value of this event type
    pub fn to_byte(self) -> u8 {
        match self {
            DataEventType::Changed => MSG_DATA_CHANGED,
            DataEventType::Deleted => MSG_DATA_DELETED,
        }
    }
}

/// One event from the push feed
#[derive(Debug, Clone, PartialEq)]
pub struct DataEvent {
    pub kind: DataEventType,
    pub item: DataItem,
}

impl DataEvent {
    /// An item was created or replaced
    pub fn changed(item: DataItem) -> Self {
        Self {
            kind: DataEventType::Changed,
            item,
        }
    }

    /// An item was removed
    pub fn deleted(item: DataItem) -> Self {
        Self {
            kind: DataEventType::Deleted,
            item,
        }
    }

    /// Decode an event from a received frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let kind = DataEventType::from_byte(frame.kind).ok_or(FrameError::UnknownType)?;
        let item: DataItem =
            postcard::from_bytes(&frame.payload).map_err(|_| FrameError::InvalidPayload)?;
        Ok(Self { kind, item })
    }

    /// Encode this event into a frame (used by the companion and tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let mut buf = [0u8; MAX_PAYLOAD_SIZE];
        let used = postcard::to_slice(&self.item, &mut buf).map_err(|e| match e {
            postcard::Error::SerializeBufferFull => FrameError::PayloadTooLarge,
            _ => FrameError::InvalidPayload,
        })?;
        Frame::new(self.kind.to_byte(), used)
    }
}
