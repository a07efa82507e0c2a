//! Nimbus - Weather Watch Face
//!
//! Host build of the face. Runs the rendering context on an embassy
//! executor and stands in for the watch platform: file-backed weather
//! cache, a push feed read from a file, icon assets from a directory and
//! lifecycle events typed on stdin. Every painted frame is saved as a PNG.
//!
//! Named after the rain cloud: the face spends most of its life dimmed,
//! waking once a second to tick and whenever the paired phone pushes
//! fresh weather.

use embassy_executor::Spawner;
use log::{error, info};
use thiserror::Error;

use nimbus_core::{FaceEvent, TimeSource, WatchFaceEngine};
use nimbus_display::png::PngCodec;

use crate::channels::FACE_EVENTS;
use crate::config::{ConfigError, FirmwareConfig};
use crate::platform::{FileBlobStore, FilePreferences, FrameSurface, LocalZone, PlatformError, SystemClock};
use crate::tasks::WeatherCache;

mod channels;
mod config;
mod platform;
mod tasks;

/// Anything that stops the face from starting
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error("cannot start thread: {0}")]
    Thread(#[from] std::io::Error),
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Nimbus watch face starting...");

    if let Err(e) = run(spawner).await {
        error!("Startup failed: {}", e);
        std::process::exit(1);
    }
    info!("Nimbus watch face stopped");
    std::process::exit(0);
}

async fn run(spawner: Spawner) -> Result<(), StartupError> {
    let config = FirmwareConfig::load()?;
    let style = config.face.style;
    info!(
        "Style: peek {:?}, background {:?}, system time {}, taps {}",
        style.peek_mode,
        style.background_visibility,
        style.show_system_ui_time,
        style.accepts_tap_events
    );

    // Warm start from the cache, before the feed can write to it
    let mut cache: WeatherCache = nimbus_core::Cache::new(
        FilePreferences::open(&config.storage_dir)?,
        FileBlobStore::open(&config.storage_dir)?,
        PngCodec,
    );
    let snapshot = cache.load();
    info!(
        "Cached weather: {} / {}, icon {}",
        snapshot.max_temp(),
        snapshot.min_temp(),
        snapshot.has_icon()
    );

    let engine = WatchFaceEngine::new(
        config.face,
        TimeSource::new(SystemClock, LocalZone),
        snapshot,
    );
    let surface = FrameSurface::new(
        config.surface.width,
        config.surface.height,
        config.frame_path.clone(),
    )?;

    tasks::spawn_sync(config.feed_path.clone(), config.asset_dir.clone(), cache)?;
    tasks::spawn_host_input()?;
    if let Err(e) = spawner.spawn(tasks::zone_watch_task(LocalZone)) {
        error!("Failed to spawn zone watch task: {:?}", e);
    }
    if let Err(e) = spawner.spawn(tasks::ambient_tick_task(SystemClock)) {
        error!("Failed to spawn ambient tick task: {:?}", e);
    }

    // What the framework reports when the face is first attached
    FACE_EVENTS
        .send(FaceEvent::PropertiesChanged {
            low_bit_ambient: config.surface.low_bit_ambient,
        })
        .await;
    FACE_EVENTS
        .send(FaceEvent::InsetsApplied {
            round: config.surface.round,
        })
        .await;
    FACE_EVENTS.send(FaceEvent::VisibilityChanged(true)).await;

    info!("Initialization complete, type `quit` to stop");
    tasks::face_loop(engine, surface).await;
    Ok(())
}
