//! File-backed stores
//!
//! Temperatures live in one preferences file holding a postcard-encoded map
//! from key byte to raw bits. Every `put_all` writes the whole map to a
//! sibling temp file and renames it over the old one, so readers see
//! either the old map or the new one. Blobs are one file per key, named by
//! the key's stable name and replaced the same way.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use log::warn;

use nimbus_hal::{BlobStore, KeyValueStore, StorageError, StorageKey};

use super::PlatformError;

/// File name of the preferences map inside the storage directory
pub const PREFERENCES_FILE: &str = "weather.prefs";

fn io_error(e: io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound,
        ErrorKind::StorageFull => StorageError::Full,
        _ => StorageError::Io,
    }
}

/// Write `data` next to `path` and rename it into place
fn replace_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)
}

fn ensure_dir(dir: &Path) -> Result<(), PlatformError> {
    fs::create_dir_all(dir).map_err(|source| PlatformError::Prepare {
        path: dir.to_path_buf(),
        source,
    })
}

/// Key/value store in a single preferences file
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Use `dir/weather.prefs`, creating `dir` if needed
    pub fn open(dir: &Path) -> Result<Self, PlatformError> {
        ensure_dir(dir)?;
        Ok(Self {
            path: dir.join(PREFERENCES_FILE),
        })
    }

    /// Read the map back, dropping entries under keys this build does not know
    fn read_map(&self) -> Result<BTreeMap<StorageKey, u64>, StorageError> {
        let raw: BTreeMap<u8, u64> = match fs::read(&self.path) {
            Ok(bytes) => postcard::from_bytes(&bytes).map_err(|_| StorageError::Corrupted)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(io_error(e)),
        };
        Ok(raw
            .into_iter()
            .filter_map(|(byte, bits)| match StorageKey::from_u8(byte) {
                Some(key) => Some((key, bits)),
                None => {
                    warn!("Dropping unknown preference key {}", byte);
                    None
                }
            })
            .collect())
    }
}

impl KeyValueStore for FilePreferences {
    fn get(&mut self, key: StorageKey) -> Result<Option<u64>, StorageError> {
        Ok(self.read_map()?.get(&key).copied())
    }

    fn put_all(&mut self, entries: &[(StorageKey, u64)]) -> Result<(), StorageError> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StorageError::Corrupted) => {
                warn!("Replacing corrupted {}", self.path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        map.extend(entries.iter().copied());
        let raw: BTreeMap<u8, u64> = map.into_iter().map(|(key, bits)| (key.as_u8(), bits)).collect();
        let bytes = postcard::to_allocvec(&raw).map_err(|_| StorageError::Io)?;
        replace_file(&self.path, &bytes).map_err(io_error)
    }
}

/// Blob store with one file per key
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn open(dir: &Path) -> Result<Self, PlatformError> {
        ensure_dir(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(key.name())
    }
}

impl BlobStore for FileBlobStore {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let data = fs::read(self.path(key)).map_err(io_error)?;
        let dest = buffer
            .get_mut(..data.len())
            .ok_or(StorageError::BufferTooSmall)?;
        dest.copy_from_slice(&data);
        Ok(data.len())
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        replace_file(&self.path(key), data).map_err(io_error)
    }

    fn exists(&mut self, key: StorageKey) -> bool {
        self.path(key).is_file()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fresh directory under the system temp dir
    pub(crate) fn scratch_dir(name: &str) -> PathBuf {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let dir = std::env::temp_dir().join(format!(
            "nimbus-{}-{}-{}",
            name,
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_preferences_persist_across_instances() {
        let dir = scratch_dir("prefs");
        let mut prefs = FilePreferences::open(&dir).unwrap();
        assert_eq!(prefs.get(StorageKey::MaxTemp), Ok(None));

        prefs
            .put_all(&[
                (StorageKey::MaxTemp, 72.5f64.to_bits()),
                (StorageKey::MinTemp, 58.0f64.to_bits()),
            ])
            .unwrap();

        let mut reopened = FilePreferences::open(&dir).unwrap();
        assert_eq!(reopened.get(StorageKey::MaxTemp), Ok(Some(72.5f64.to_bits())));
        assert_eq!(reopened.get(StorageKey::MinTemp), Ok(Some(58.0f64.to_bits())));
        assert!(!dir.join("weather.prefs.tmp").exists());
    }

    #[test]
    fn test_put_all_keeps_other_entries() {
        let dir = scratch_dir("merge");
        let mut prefs = FilePreferences::open(&dir).unwrap();
        prefs.put_all(&[(StorageKey::MaxTemp, 1)]).unwrap();
        prefs.put_all(&[(StorageKey::MinTemp, 2)]).unwrap();

        assert_eq!(prefs.get(StorageKey::MaxTemp), Ok(Some(1)));
        assert_eq!(prefs.get(StorageKey::MinTemp), Ok(Some(2)));
    }

    #[test]
    fn test_corrupted_preferences() {
        let dir = scratch_dir("corrupt");
        let mut prefs = FilePreferences::open(&dir).unwrap();
        fs::write(dir.join(PREFERENCES_FILE), [0xff; 3]).unwrap();

        assert_eq!(prefs.get(StorageKey::MaxTemp), Err(StorageError::Corrupted));
        prefs.put_all(&[(StorageKey::MaxTemp, 7)]).unwrap();
        assert_eq!(prefs.get(StorageKey::MaxTemp), Ok(Some(7)));
    }

    #[test]
    fn test_unknown_keys_dropped_on_rewrite() {
        let dir = scratch_dir("unknown-key");
        let mut prefs = FilePreferences::open(&dir).unwrap();
        let stale: BTreeMap<u8, u64> = [(StorageKey::MaxTemp.as_u8(), 5), (9, 99)].into();
        fs::write(dir.join(PREFERENCES_FILE), postcard::to_allocvec(&stale).unwrap()).unwrap();

        assert_eq!(prefs.get(StorageKey::MaxTemp), Ok(Some(5)));
        prefs.put_all(&[(StorageKey::MinTemp, 1)]).unwrap();

        let raw: BTreeMap<u8, u64> =
            postcard::from_bytes(&fs::read(dir.join(PREFERENCES_FILE)).unwrap()).unwrap();
        assert_eq!(raw.len(), 2);
        assert!(!raw.contains_key(&9));
    }

    #[test]
    fn test_blob_named_after_key() {
        let dir = scratch_dir("blob");
        let mut blobs = FileBlobStore::open(&dir).unwrap();
        assert!(!blobs.exists(StorageKey::WeatherIcon));

        blobs.write(StorageKey::WeatherIcon, b"icon bytes").unwrap();
        assert!(dir.join("weather").is_file());
        assert!(blobs.exists(StorageKey::WeatherIcon));

        let mut buffer = [0u8; 32];
        let len = blobs.read(StorageKey::WeatherIcon, &mut buffer).unwrap();
        assert_eq!(&buffer[..len], b"icon bytes");
    }

    #[test]
    fn test_blob_errors() {
        let dir = scratch_dir("blob-errors");
        let mut blobs = FileBlobStore::open(&dir).unwrap();
        let mut small = [0u8; 4];

        assert_eq!(
            blobs.read(StorageKey::WeatherIcon, &mut small),
            Err(StorageError::NotFound)
        );
        blobs.write(StorageKey::WeatherIcon, &[1; 8]).unwrap();
        assert_eq!(
            blobs.read(StorageKey::WeatherIcon, &mut small),
            Err(StorageError::BufferTooSmall)
        );
    }
}
