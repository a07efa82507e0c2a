//! Nimbus push-feed protocol
//!
//! This crate defines the wire format of the inbound push feed: the paired
//! phone publishes data items (weather readings plus a reference to an icon
//! asset) and the watch receives them as framed data events.
//!
//! # Protocol Overview
//!
//! All events use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–250B      │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! The payload is a postcard-encoded [`DataItem`]: a topic path plus a small
//! map of typed values. Binary blobs never travel inline; they are named by
//! an [`AssetRef`] and fetched out-of-band.

#![no_std]
#![deny(unsafe_code)]

pub mod data;
pub mod frame;
pub mod messages;

pub use data::{AssetRef, DataItem, DataMap, DataValue, WEATHER_PATH};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{DataEvent, DataEventType};
