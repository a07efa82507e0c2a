//! Weather snapshot

use alloc::sync::Arc;

use nimbus_display::Image;

/// Forecast values and icon currently considered current
///
/// Never mutated after construction; a new event produces a new snapshot.
/// Cloning shares the decoded icon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    max_temp: f64,
    min_temp: f64,
    icon: Option<Arc<Image>>,
}

impl WeatherSnapshot {
    pub fn new(max_temp: f64, min_temp: f64, icon: Option<Image>) -> Self {
        Self::with_shared_icon(max_temp, min_temp, icon.map(Arc::new))
    }

    /// Build a snapshot around an already shared icon
    pub fn with_shared_icon(max_temp: f64, min_temp: f64, icon: Option<Arc<Image>>) -> Self {
        Self {
            max_temp,
            min_temp,
            icon,
        }
    }

    pub fn max_temp(&self) -> f64 {
        self.max_temp
    }

    pub fn min_temp(&self) -> f64 {
        self.min_temp
    }

    pub fn icon(&self) -> Option<&Image> {
        self.icon.as_deref()
    }

    pub fn has_icon(&self) -> bool {
        self.icon.is_some()
    }
}
