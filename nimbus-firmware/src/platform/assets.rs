//! Directory-backed asset transport
//!
//! The companion drops each asset into the asset directory under its
//! digest. "Connecting" waits for that directory to be reachable, polling
//! until the timeout runs out, which is how a mounted share or a companion
//! that has not started yet behaves.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use nimbus_hal::{AssetTransport, TransportError};

/// Interval between reachability checks while connecting
const CONNECT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub struct DirAssetTransport {
    dir: PathBuf,
    connected: bool,
}

impl DirAssetTransport {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            connected: false,
        }
    }
}

/// Digests are plain names; anything that could leave the directory is refused
fn is_plain_name(digest: &str) -> bool {
    !digest.is_empty()
        && digest != "."
        && digest != ".."
        && !digest.contains(['/', '\\'])
}

impl AssetTransport for DirAssetTransport {
    fn connect(&mut self, timeout_ms: u32) -> Result<(), TransportError> {
        let deadline = Instant::now() + Duration::from_millis(u64::from(timeout_ms));
        loop {
            if self.dir.is_dir() {
                self.connected = true;
                return Ok(());
            }
            let now = Instant::now();
            if now >= deadline {
                debug!("Asset directory {} unreachable", self.dir.display());
                return Err(TransportError::Timeout);
            }
            thread::sleep(CONNECT_POLL.min(deadline - now));
        }
    }

    fn fetch(&mut self, digest: &str, buffer: &mut [u8]) -> Result<usize, TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        if !is_plain_name(digest) {
            return Err(TransportError::UnknownAsset);
        }
        let data = fs::read(self.dir.join(digest)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TransportError::UnknownAsset,
            _ => TransportError::ConnectionFailed,
        })?;
        let dest = buffer
            .get_mut(..data.len())
            .ok_or(TransportError::BufferTooSmall)?;
        dest.copy_from_slice(&data);
        Ok(data.len())
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
