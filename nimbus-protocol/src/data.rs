//! Data items carried by the push feed
//!
//! A data item is a topic path plus a small map of typed values. The phone
//! publishes the current weather as:
//!
//! | Key       | Value              |
//! |-----------|--------------------|
//! | `maxTemp` | `Double`           |
//! | `minTemp` | `Double`           |
//! | `icon`    | `Asset` (optional) |
//!
//! under [`WEATHER_PATH`].

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

/// Topic path of weather items
pub const WEATHER_PATH: &str = "/weather";

/// Key of the forecast high
pub const KEY_MAX_TEMP: &str = "maxTemp";

/// Key of the forecast low
pub const KEY_MIN_TEMP: &str = "minTemp";

/// Key of the condition icon asset
pub const KEY_ICON: &str = "icon";

/// Maximum topic path length
pub const MAX_PATH_LEN: usize = 32;

/// Maximum key length
pub const MAX_KEY_LEN: usize = 16;

/// Maximum text value length
pub const MAX_TEXT_LEN: usize = 48;

/// Maximum asset digest length
pub const MAX_DIGEST_LEN: usize = 64;

/// Maximum entries per item
pub const MAX_ENTRIES: usize = 8;

/// Opaque handle to a binary payload transferred out-of-band
///
/// The digest names the asset on the sync transport; the watch never
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    digest: String<MAX_DIGEST_LEN>,
}

impl AssetRef {
    /// Create a reference from its digest, `None` if the digest is too long
    pub fn new(digest: &str) -> Option<Self> {
        let mut s = String::new();
        s.push_str(digest).ok()?;
        Some(Self { digest: s })
    }

    /// The digest naming this asset on the transport
    pub fn digest(&self) -> &str {
        self.digest.as_str()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AssetRef {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Asset({})", self.digest.as_str());
    }
}

/// A typed value in a data map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Double(f64),
    Long(i64),
    Text(String<MAX_TEXT_LEN>),
    Asset(AssetRef),
}

/// Key/value map of a data item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataMap {
    entries: Vec<(String<MAX_KEY_LEN>, DataValue), MAX_ENTRIES>,
}

impl DataMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    ///
    /// Returns `false` if the key is too long or the map is full.
    pub fn put(&mut self, key: &str, value: DataValue) -> bool {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k.as_str() == key) {
            slot.1 = value;
            return true;
        }
        let mut k = String::new();
        if k.push_str(key).is_err() {
            return false;
        }
        self.entries.push((k, value)).is_ok()
    }

    /// Look up a raw value
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// Read a double, `0.0` when missing or of another type
    pub fn get_double(&self, key: &str) -> f64 {
        match self.get(key) {
            Some(DataValue::Double(v)) => *v,
            _ => 0.0,
        }
    }

    /// Read an asset reference, `None` when missing or of another type
    pub fn get_asset(&self, key: &str) -> Option<&AssetRef> {
        match self.get(key) {
            Some(DataValue::Asset(a)) => Some(a),
            _ => None,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the map holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A published item: topic path plus values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataItem {
    path: String<MAX_PATH_LEN>,
    /// Item values
    pub map: DataMap,
}

impl DataItem {
    /// Create an item with an empty map, `None` if the path is too long
    pub fn new(path: &str) -> Option<Self> {
        let mut p = String::new();
        p.push_str(path).ok()?;
        Some(Self {
            path: p,
            map: DataMap::new(),
        })
    }

    /// Build a weather item the way the phone publishes it
    pub fn weather(max_temp: f64, min_temp: f64, icon: Option<AssetRef>) -> Self {
        let mut item = Self {
            path: String::new(),
            map: DataMap::new(),
        };
        let _ = item.path.push_str(WEATHER_PATH);
        item.map.put(KEY_MAX_TEMP, DataValue::Double(max_temp));
        item.map.put(KEY_MIN_TEMP, DataValue::Double(min_temp));
        if let Some(icon) = icon {
            item.map.put(KEY_ICON, DataValue::Asset(icon));
        }
        item
    }

    /// Topic path of this item
    pub fn path(&self) -> &str {
        self.path.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_double_defaults_to_zero() {
        let map = DataMap::new();
        assert_eq!(map.get_double(KEY_MAX_TEMP), 0.0);
    }

    #[test]
    fn test_mistyped_values() {
        let mut map = DataMap::new();
        assert!(map.put(KEY_MAX_TEMP, DataValue::Long(70)));
        assert!(map.put(KEY_ICON, DataValue::Double(1.0)));

        assert_eq!(map.get_double(KEY_MAX_TEMP), 0.0);
        assert!(map.get_asset(KEY_ICON).is_none());
    }

    #[test]
    fn test_put_replaces_existing_key() {
        let mut map = DataMap::new();
        map.put(KEY_MIN_TEMP, DataValue::Double(1.0));
        map.put(KEY_MIN_TEMP, DataValue::Double(2.0));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get_double(KEY_MIN_TEMP), 2.0);
    }

    #[test]
    fn test_map_capacity() {
        let mut map = DataMap::new();
        for i in 0..MAX_ENTRIES {
            let mut key: String<MAX_KEY_LEN> = String::new();
            let _ = core::fmt::write(&mut key, format_args!("k{}", i));
            assert!(map.put(&key, DataValue::Long(i as i64)));
        }
        assert!(!map.put("overflow", DataValue::Long(0)));
    }

    #[test]
    fn test_weather_item() {
        let icon = AssetRef::new("a1b2c3").unwrap();
        let item = DataItem::weather(72.5, 58.0, Some(icon.clone()));

        assert_eq!(item.path(), WEATHER_PATH);
        assert_eq!(item.map.get_double(KEY_MAX_TEMP), 72.5);
        assert_eq!(item.map.get_double(KEY_MIN_TEMP), 58.0);
        assert_eq!(item.map.get_asset(KEY_ICON), Some(&icon));
    }

    #[test]
    fn test_digest_too_long() {
        let long = [b'a'; MAX_DIGEST_LEN + 1];
        let digest = core::str::from_utf8(&long).unwrap();
        assert!(AssetRef::new(digest).is_none());
    }
}
