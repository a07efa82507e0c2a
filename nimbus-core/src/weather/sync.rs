//! Weather sync channel
//!
//! Consumes data events from the push feed. Each changed `/weather` item
//! becomes a new `WeatherSnapshot` that is handed to the registered
//! listener and then persisted, whether or not its icon resolved.

use alloc::boxed::Box;
use alloc::sync::Arc;

use nimbus_display::ImageCodec;
use nimbus_hal::{AssetTransport, BlobStore, KeyValueStore};
use nimbus_protocol::data::{KEY_ICON, KEY_MAX_TEMP, KEY_MIN_TEMP};
use nimbus_protocol::{DataEvent, DataEventType, WEATHER_PATH};

use super::asset::AssetResolver;
use super::cache::Cache;
use super::snapshot::WeatherSnapshot;

/// Receiver of new snapshots
pub trait SnapshotListener {
    fn on_weather_changed(&mut self, snapshot: WeatherSnapshot);
}

impl<F: FnMut(WeatherSnapshot)> SnapshotListener for F {
    fn on_weather_changed(&mut self, snapshot: WeatherSnapshot) {
        self(snapshot)
    }
}

/// Errors from the sync channel's own bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    /// A listener is already registered
    ListenerAlreadyRegistered,
}

/// What happened to one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncOutcome {
    /// Not a changed weather item
    Ignored,
    /// A snapshot was built, delivered and persisted
    Delivered { icon_resolved: bool },
}

/// Push-feed consumer for the weather topic
pub struct WeatherSyncChannel<T, K, B, C> {
    resolver: AssetResolver<T, C>,
    cache: Cache<K, B, C>,
    listener: Option<Box<dyn SnapshotListener>>,
}

impl<T, K, B, C> WeatherSyncChannel<T, K, B, C>
where
    T: AssetTransport,
    K: KeyValueStore,
    B: BlobStore,
    C: ImageCodec,
{
    pub fn new(resolver: AssetResolver<T, C>, cache: Cache<K, B, C>) -> Self {
        Self {
            resolver,
            cache,
            listener: None,
        }
    }

    /// Register the single listener
    ///
    /// Fails if one is already registered; unregister first to replace it.
    pub fn register_listener<L>(&mut self, listener: L) -> Result<(), SyncError>
    where
        L: SnapshotListener + 'static,
    {
        if self.listener.is_some() {
            return Err(SyncError::ListenerAlreadyRegistered);
        }
        self.listener = Some(Box::new(listener));
        Ok(())
    }

    /// Drop the listener; returns whether one was registered
    pub fn unregister_listener(&mut self) -> bool {
        self.listener.take().is_some()
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Process a batch of events in order
    ///
    /// Returns the number of snapshots delivered.
    pub fn on_data_changed(&mut self, events: &[DataEvent]) -> usize {
        events
            .iter()
            .filter(|event| matches!(self.handle_event(event), SyncOutcome::Delivered { .. }))
            .count()
    }

    /// Process one event
    ///
    /// Blocks while the icon is resolved.
    pub fn handle_event(&mut self, event: &DataEvent) -> SyncOutcome {
        if event.kind != DataEventType::Changed || event.item.path() != WEATHER_PATH {
            trace!("ignoring event on {}", event.item.path());
            return SyncOutcome::Ignored;
        }

        let map = &event.item.map;
        let max_temp = map.get_double(KEY_MAX_TEMP);
        let min_temp = map.get_double(KEY_MIN_TEMP);

        let icon = match self.resolver.resolve(map.get_asset(KEY_ICON)) {
            Ok(image) => Some(Arc::new(image)),
            Err(e) => {
                warn!("weather icon unresolved: {:?}", e);
                None
            }
        };
        let icon_resolved = icon.is_some();
        let snapshot = WeatherSnapshot::with_shared_icon(max_temp, min_temp, icon);

        match self.listener.as_mut() {
            Some(listener) => listener.on_weather_changed(snapshot.clone()),
            None => debug!("no weather listener registered"),
        }
        self.cache.save(&snapshot);

        info!("weather updated: {} / {}", max_temp, min_temp);
        SyncOutcome::Delivered { icon_resolved }
    }
}
