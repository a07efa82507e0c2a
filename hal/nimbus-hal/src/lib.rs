//! Nimbus Hardware Abstraction Layer
//!
//! This crate defines the contracts between the watch face and the platform
//! services it borrows rather than owns. Each platform (the host build, a
//! watch SoC) implements them once; the core logic is written against the
//! traits only.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  nimbus-core (engine, sync, cache)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nimbus-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ file-backed   │       │ companion     │
//! │ stores        │       │ transport     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`storage::KeyValueStore`] - Durable named 64-bit entries
//! - [`storage::BlobStore`] - Durable named binary blobs
//! - [`transport::AssetTransport`] - Bounded-time asset fetches

#![no_std]
#![deny(unsafe_code)]

pub mod storage;
pub mod transport;

// Re-export key traits at crate root for convenience
pub use storage::{BlobStore, KeyValueStore, StorageError, StorageKey};
pub use transport::{AssetTransport, TransportError};
