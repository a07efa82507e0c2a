//! Weather sync and persistence
//!
//! ```text
//! push feed ──> WeatherSyncChannel ──> listener (rendering context)
//!                   │      │
//!                   │      └──> Cache ──> KeyValueStore + BlobStore
//!                   └──> AssetResolver ──> AssetTransport + ImageCodec
//! ```
//!
//! Everything here runs on the sync context. Asset resolution blocks for up
//! to `ASSET_CONNECT_TIMEOUT_MS` and must never run on the rendering context.

pub mod asset;
pub mod cache;
pub mod snapshot;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use asset::{
    AssetError, AssetResolver, ConnectionState, ASSET_CONNECT_TIMEOUT_MS, MAX_ICON_BYTES,
};
pub use cache::{Cache, CacheError, SaveReport};
pub use snapshot::WeatherSnapshot;
pub use sync::{SnapshotListener, SyncError, SyncOutcome, WeatherSyncChannel};
