//! Persistent storage abstractions
//!
//! Two stores back the weather cache:
//! - a key/value store of 64-bit entries (the temperatures, stored as raw
//!   `f64` bit patterns)
//! - a blob store of named files (the compressed icon)

/// Storage keys for cached data
///
/// Each key has a stable name used by file- or preference-backed stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Forecast high, `f64` bits
    MaxTemp = 0,
    /// Forecast low, `f64` bits
    MinTemp = 1,
    /// Compressed condition icon
    WeatherIcon = 2,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::MaxTemp),
            1 => Some(StorageKey::MinTemp),
            2 => Some(StorageKey::WeatherIcon),
            _ => None,
        }
    }

    /// Stable name of this entry
    pub fn name(self) -> &'static str {
        match self {
            StorageKey::MaxTemp => "max_temp",
            StorageKey::MinTemp => "min_temp",
            StorageKey::WeatherIcon => "weather",
        }
    }
}

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying medium failed
    Io,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Stored data could not be read back
    Corrupted,
    /// Storage is full
    Full,
}

/// Durable store of named 64-bit entries
pub trait KeyValueStore {
    /// Read an entry
    ///
    /// Returns `Ok(None)` if the key was never written.
    fn get(&mut self, key: StorageKey) -> Result<Option<u64>, StorageError>;

    /// Write several entries as one unit
    ///
    /// Implementations must make either all of `entries` visible to later
    /// reads or none of them.
    fn put_all(&mut self, entries: &[(StorageKey, u64)]) -> Result<(), StorageError>;
}

/// Durable store of named binary blobs
pub trait BlobStore {
    /// Read a blob into `buffer`
    ///
    /// Returns the number of bytes read. Fails with `NotFound` for a blob
    /// that was never written and `BufferTooSmall` if it does not fit.
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError>;

    /// Replace a blob
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError>;

    /// Check if a blob exists
    fn exists(&mut self, key: StorageKey) -> bool;
}
