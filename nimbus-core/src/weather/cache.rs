//! Weather cache
//!
//! Two temperature entries in a key/value store, written together, and the
//! icon as a compressed blob. Loading never fails: anything missing or
//! unreadable falls back to zero temperatures and no icon. Saving never
//! blocks the caller on a failed icon write; the temperatures stand on
//! their own and the previous icon blob stays in place.

use alloc::vec;

use nimbus_display::{CodecError, Image, ImageCodec, MAX_IMAGE_PIXELS};
use nimbus_hal::{BlobStore, KeyValueStore, StorageError, StorageKey};

use super::snapshot::WeatherSnapshot;

/// Largest icon blob read back at start-up
pub const MAX_ICON_BLOB_BYTES: usize = MAX_IMAGE_PIXELS * 4 + 4096;

/// Why a cache write failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CacheError {
    Storage(StorageError),
    Codec(CodecError),
}

impl From<StorageError> for CacheError {
    fn from(e: StorageError) -> Self {
        CacheError::Storage(e)
    }
}

impl From<CodecError> for CacheError {
    fn from(e: CodecError) -> Self {
        CacheError::Codec(e)
    }
}

/// Outcome of one `save`, for callers that care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SaveReport {
    pub temperatures: Result<(), CacheError>,
    /// `None` when the snapshot had no icon to write
    pub icon: Option<Result<(), CacheError>>,
}

/// Durable copy of the last weather snapshot
pub struct Cache<K, B, C> {
    prefs: K,
    blobs: B,
    codec: C,
}

impl<K, B, C> Cache<K, B, C>
where
    K: KeyValueStore,
    B: BlobStore,
    C: ImageCodec,
{
    pub fn new(prefs: K, blobs: B, codec: C) -> Self {
        Self {
            prefs,
            blobs,
            codec,
        }
    }

    /// Read the cached snapshot, defaulting anything absent
    pub fn load(&mut self) -> WeatherSnapshot {
        let max_temp = self.load_temp(StorageKey::MaxTemp);
        let min_temp = self.load_temp(StorageKey::MinTemp);

        let icon = self.load_icon();
        debug!("cache loaded: {} / {}", max_temp, min_temp);
        WeatherSnapshot::new(max_temp, min_temp, icon)
    }

    fn load_icon(&mut self) -> Option<Image> {
        if !self.blobs.exists(StorageKey::WeatherIcon) {
            return None;
        }
        let mut buffer = vec![0u8; MAX_ICON_BLOB_BYTES];
        match self.blobs.read(StorageKey::WeatherIcon, &mut buffer) {
            Ok(len) => match self.codec.decode(&buffer[..len]) {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!("cached icon unreadable: {:?}", e);
                    None
                }
            },
            Err(StorageError::NotFound) => None,
            Err(e) => {
                warn!("cached icon not loaded: {:?}", e);
                None
            }
        }
    }

    /// Persist `snapshot`
    ///
    /// Both temperatures go in one `put_all`. The icon, if any, is written
    /// afterwards and independently.
    pub fn save(&mut self, snapshot: &WeatherSnapshot) -> SaveReport {
        let temperatures = self
            .prefs
            .put_all(&[
                (StorageKey::MaxTemp, snapshot.max_temp().to_bits()),
                (StorageKey::MinTemp, snapshot.min_temp().to_bits()),
            ])
            .map_err(CacheError::from);
        if let Err(e) = temperatures {
            warn!("temperatures not cached: {:?}", e);
        }

        let icon = snapshot.icon().map(|image| {
            let result = self
                .codec
                .encode(image)
                .map_err(CacheError::from)
                .and_then(|bytes| {
                    self.blobs
                        .write(StorageKey::WeatherIcon, &bytes)
                        .map_err(CacheError::from)
                });
            if let Err(e) = result {
                warn!("icon not cached: {:?}", e);
            }
            result
        });

        SaveReport { temperatures, icon }
    }

    fn load_temp(&mut self, key: StorageKey) -> f64 {
        match self.prefs.get(key) {
            Ok(Some(bits)) => f64::from_bits(bits),
            Ok(None) => 0.0,
            Err(e) => {
                warn!("cached {} unreadable: {:?}", key.name(), e);
                0.0
            }
        }
    }
}
