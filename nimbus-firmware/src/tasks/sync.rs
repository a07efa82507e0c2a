//! Sync context
//!
//! A dedicated thread follows the push feed file, decodes frames into data
//! events and runs them through the weather sync channel. Icon fetches
//! block this thread only; each snapshot reaches the rendering context
//! through the `WEATHER` signal.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};

use nimbus_core::weather::AssetResolver;
use nimbus_core::{Cache, WeatherSnapshot, WeatherSyncChannel};
use nimbus_display::png::PngCodec;
use nimbus_protocol::{DataEvent, FrameParser};

use crate::channels::WEATHER;
use crate::platform::{DirAssetTransport, FileBlobStore, FilePreferences};

/// Cache over the host stores
pub type WeatherCache = Cache<FilePreferences, FileBlobStore, PngCodec>;

type HostSyncChannel = WeatherSyncChannel<DirAssetTransport, FilePreferences, FileBlobStore, PngCodec>;

/// Wait between reads once the feed is drained
const FEED_POLL: Duration = Duration::from_millis(200);

/// Turns raw feed bytes into delivered snapshots
pub struct FeedReader {
    parser: FrameParser,
    channel: HostSyncChannel,
}

impl FeedReader {
    pub fn new(channel: HostSyncChannel) -> Self {
        Self {
            parser: FrameParser::new(),
            channel,
        }
    }

    /// Feed a chunk of bytes; returns the number of snapshots delivered
    ///
    /// Frames may span chunks. Corrupt frames and undecodable payloads are
    /// dropped and the parser resynchronises on the next frame.
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        let mut delivered = 0;
        for &byte in bytes {
            let frame = match self.parser.feed(byte) {
                Ok(Some(frame)) => frame,
                Ok(None) => continue,
                Err(e) => {
                    debug!("Dropping frame: {:?}", e);
                    continue;
                }
            };
            match DataEvent::from_frame(&frame) {
                Ok(event) => delivered += self.channel.on_data_changed(&[event]),
                Err(e) => debug!("Dropping event: {:?}", e),
            }
        }
        delivered
    }

    /// Follow `reader` forever, polling once it is drained
    pub fn follow<R: Read>(&mut self, mut reader: R) -> io::Result<()> {
        let mut buffer = [0u8; 512];
        loop {
            let n = reader.read(&mut buffer)?;
            if n == 0 {
                thread::sleep(FEED_POLL);
                continue;
            }
            self.feed(&buffer[..n]);
        }
    }
}

/// Wait for the feed file to appear and open it
fn open_feed(path: &Path) -> File {
    let mut warned = false;
    loop {
        match File::open(path) {
            Ok(file) => return file,
            Err(e) => {
                if !warned {
                    info!("Waiting for feed {}: {}", path.display(), e);
                    warned = true;
                }
                thread::sleep(FEED_POLL);
            }
        }
    }
}

/// Start the sync thread
///
/// The channel is built on the thread itself; it never leaves it.
pub fn spawn_sync(
    feed_path: PathBuf,
    asset_dir: PathBuf,
    cache: WeatherCache,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("weather-sync".into())
        .spawn(move || {
            let resolver = AssetResolver::new(DirAssetTransport::new(asset_dir), PngCodec);
            let mut channel = WeatherSyncChannel::new(resolver, cache);
            if let Err(e) = channel.register_listener(|snapshot: WeatherSnapshot| {
                WEATHER.signal(snapshot)
            }) {
                warn!("Weather listener not registered: {:?}", e);
            }

            let mut reader = FeedReader::new(channel);
            let feed = open_feed(&feed_path);
            info!("Following feed {}", feed_path.display());
            if let Err(e) = reader.follow(feed) {
                warn!("Feed {} failed: {}", feed_path.display(), e);
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::tests::scratch_dir;
    use nimbus_display::{Image, ImageCodec};
    use nimbus_hal::{KeyValueStore, StorageKey};
    use nimbus_protocol::{AssetRef, DataItem};
    use std::sync::{Arc, Mutex};

    struct Rig {
        reader: FeedReader,
        received: Arc<Mutex<Vec<WeatherSnapshot>>>,
        storage: PathBuf,
        assets: PathBuf,
    }

    fn rig(name: &str) -> Rig {
        let storage = scratch_dir(name);
        let assets = storage.join("assets");
        std::fs::create_dir_all(&assets).unwrap();

        let cache = Cache::new(
            FilePreferences::open(&storage).unwrap(),
            FileBlobStore::open(&storage).unwrap(),
            PngCodec,
        );
        let mut channel = WeatherSyncChannel::new(
            AssetResolver::new(DirAssetTransport::new(assets.clone()), PngCodec),
            cache,
        );
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        channel
            .register_listener(move |s: WeatherSnapshot| sink.lock().unwrap().push(s))
            .unwrap();

        Rig {
            reader: FeedReader::new(channel),
            received,
            storage,
            assets,
        }
    }

    fn frame_bytes(event: &DataEvent) -> Vec<u8> {
        event.to_frame().unwrap().to_bytes().to_vec()
    }

    #[test]
    fn test_feed_delivers_and_caches() {
        let mut rig = rig("sync-feed");
        let icon = Image::filled(4, 4, [0x20, 0x40, 0x60, 0xFF]).unwrap();
        std::fs::write(rig.assets.join("d1"), PngCodec.encode(&icon).unwrap()).unwrap();

        let event = DataEvent::changed(DataItem::weather(
            72.5,
            58.0,
            Some(AssetRef::new("d1").unwrap()),
        ));
        assert_eq!(rig.reader.feed(&frame_bytes(&event)), 1);

        let received = rig.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].icon(), Some(&icon));

        let mut prefs = FilePreferences::open(&rig.storage).unwrap();
        assert_eq!(prefs.get(StorageKey::MaxTemp), Ok(Some(72.5f64.to_bits())));
        assert!(rig.storage.join("weather").is_file());
    }

    #[test]
    fn test_frames_split_across_chunks_and_garbage() {
        let mut rig = rig("sync-split");
        let mut bytes = vec![0x00, 0x13, 0x37];
        bytes.extend(frame_bytes(&DataEvent::changed(DataItem::weather(1.0, 0.0, None))));
        bytes.extend(frame_bytes(&DataEvent::changed(DataItem::weather(2.0, 1.0, None))));

        let (head, tail) = bytes.split_at(bytes.len() / 2);
        let delivered = rig.reader.feed(head) + rig.reader.feed(tail);
        assert_eq!(delivered, 2);
        assert_eq!(rig.received.lock().unwrap()[1].max_temp(), 2.0);
    }

    #[test]
    fn test_corrupt_frame_dropped() {
        let mut rig = rig("sync-corrupt");
        let mut bad = frame_bytes(&DataEvent::changed(DataItem::weather(9.0, 8.0, None)));
        let last = bad.len() - 1;
        bad[last] ^= 0xFF;
        bad.extend(frame_bytes(&DataEvent::changed(DataItem::weather(3.0, 2.0, None))));

        assert_eq!(rig.reader.feed(&bad), 1);
        assert_eq!(rig.received.lock().unwrap()[0].max_temp(), 3.0);
    }

    #[test]
    fn test_missing_asset_still_delivers_temperatures() {
        let mut rig = rig("sync-missing");
        let event = DataEvent::changed(DataItem::weather(
            10.0,
            5.0,
            Some(AssetRef::new("absent").unwrap()),
        ));

        assert_eq!(rig.reader.feed(&frame_bytes(&event)), 1);
        let received = rig.received.lock().unwrap();
        assert_eq!(received[0].min_temp(), 5.0);
        assert!(!received[0].has_icon());
    }
}
