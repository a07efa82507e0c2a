//! In-memory collaborators for tests

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use nimbus_display::{CodecError, Image, ImageCodec};
use nimbus_hal::{AssetTransport, BlobStore, KeyValueStore, StorageError, StorageKey, TransportError};

#[derive(Default)]
struct TransportInner {
    assets: BTreeMap<String, Vec<u8>>,
    connect_error: Option<TransportError>,
    connected: bool,
    connects: usize,
    disconnects: usize,
    last_timeout: Option<u32>,
}

/// Transport serving assets from a map; clones share state
#[derive(Clone, Default)]
pub struct FakeTransport(Rc<RefCell<TransportInner>>);

impl FakeTransport {
    pub fn insert(&self, digest: &str, bytes: Vec<u8>) {
        self.0.borrow_mut().assets.insert(digest.into(), bytes);
    }

    pub fn fail_connect(&self, error: TransportError) {
        self.0.borrow_mut().connect_error = Some(error);
    }

    pub fn connects(&self) -> usize {
        self.0.borrow().connects
    }

    pub fn disconnects(&self) -> usize {
        self.0.borrow().disconnects
    }

    pub fn last_timeout(&self) -> Option<u32> {
        self.0.borrow().last_timeout
    }
}

impl AssetTransport for FakeTransport {
    fn connect(&mut self, timeout_ms: u32) -> Result<(), TransportError> {
        let mut inner = self.0.borrow_mut();
        inner.connects += 1;
        inner.last_timeout = Some(timeout_ms);
        if let Some(e) = inner.connect_error {
            return Err(e);
        }
        inner.connected = true;
        Ok(())
    }

    fn fetch(&mut self, digest: &str, buffer: &mut [u8]) -> Result<usize, TransportError> {
        let inner = self.0.borrow();
        if !inner.connected {
            return Err(TransportError::NotConnected);
        }
        let bytes = inner.assets.get(digest).ok_or(TransportError::UnknownAsset)?;
        let dst = buffer
            .get_mut(..bytes.len())
            .ok_or(TransportError::BufferTooSmall)?;
        dst.copy_from_slice(bytes);
        Ok(bytes.len())
    }

    fn disconnect(&mut self) {
        let mut inner = self.0.borrow_mut();
        if inner.connected {
            inner.disconnects += 1;
        }
        inner.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.0.borrow().connected
    }
}

/// Trivial codec: `IMG`, width and height (LE), then raw RGBA
#[derive(Clone, Default)]
pub struct FakeCodec {
    pub fail_encode: bool,
}

impl FakeCodec {
    pub fn bytes_for(image: &Image) -> Vec<u8> {
        let mut out = Vec::from(&b"IMG"[..]);
        out.extend_from_slice(&image.width().to_le_bytes());
        out.extend_from_slice(&image.height().to_le_bytes());
        out.extend_from_slice(image.as_rgba());
        out
    }
}

impl ImageCodec for FakeCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Image, CodecError> {
        if bytes.len() < 11 || &bytes[..3] != b"IMG" {
            return Err(CodecError::InvalidFormat);
        }
        let width = u32::from_le_bytes([bytes[3], bytes[4], bytes[5], bytes[6]]);
        let height = u32::from_le_bytes([bytes[7], bytes[8], bytes[9], bytes[10]]);
        Image::from_rgba(width, height, bytes[11..].to_vec())
    }

    fn encode(&self, image: &Image) -> Result<Vec<u8>, CodecError> {
        if self.fail_encode {
            return Err(CodecError::Compression);
        }
        Ok(Self::bytes_for(image))
    }
}

#[derive(Default)]
struct PrefsInner {
    values: BTreeMap<StorageKey, u64>,
    fail: bool,
}

/// Key/value store in memory; clones share state
#[derive(Clone, Default)]
pub struct MemoryPrefs(Rc<RefCell<PrefsInner>>);

impl MemoryPrefs {
    pub fn set_failing(&self, fail: bool) {
        self.0.borrow_mut().fail = fail;
    }

    pub fn raw(&self, key: StorageKey) -> Option<u64> {
        self.0.borrow().values.get(&key).copied()
    }
}

impl KeyValueStore for MemoryPrefs {
    fn get(&mut self, key: StorageKey) -> Result<Option<u64>, StorageError> {
        Ok(self.0.borrow().values.get(&key).copied())
    }

    fn put_all(&mut self, entries: &[(StorageKey, u64)]) -> Result<(), StorageError> {
        let mut inner = self.0.borrow_mut();
        if inner.fail {
            return Err(StorageError::Io);
        }
        for &(key, value) in entries {
            inner.values.insert(key, value);
        }
        Ok(())
    }
}

#[derive(Default)]
struct BlobsInner {
    blobs: BTreeMap<StorageKey, Vec<u8>>,
    fail_writes: bool,
    reads: usize,
}

/// Blob store in memory; clones share state
#[derive(Clone, Default)]
pub struct MemoryBlobs(Rc<RefCell<BlobsInner>>);

impl MemoryBlobs {
    pub fn set_failing(&self, fail: bool) {
        self.0.borrow_mut().fail_writes = fail;
    }

    pub fn get(&self, key: StorageKey) -> Option<Vec<u8>> {
        self.0.borrow().blobs.get(&key).cloned()
    }

    pub fn put(&self, key: StorageKey, data: Vec<u8>) {
        self.0.borrow_mut().blobs.insert(key, data);
    }

    /// Number of `read` calls so far
    pub fn reads(&self) -> usize {
        self.0.borrow().reads
    }
}

impl BlobStore for MemoryBlobs {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
        self.0.borrow_mut().reads += 1;
        let inner = self.0.borrow();
        let data = inner.blobs.get(&key).ok_or(StorageError::NotFound)?;
        let dst = buffer
            .get_mut(..data.len())
            .ok_or(StorageError::BufferTooSmall)?;
        dst.copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        let mut inner = self.0.borrow_mut();
        if inner.fail_writes {
            return Err(StorageError::Full);
        }
        inner.blobs.insert(key, data.to_vec());
        Ok(())
    }

    fn exists(&mut self, key: StorageKey) -> bool {
        self.0.borrow().blobs.contains_key(&key)
    }
}
