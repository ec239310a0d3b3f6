use serde::{Deserialize, Serialize};

use crate::bounds::LatLngBounds;
use crate::geo::{LatLng, Pin};
use crate::math::{lat_to_y, lng_to_x, world_size_px, x_to_lng, y_to_lat};

/// Center used when a pin set gives no better hint.
pub const DEFAULT_CENTER: LatLng = LatLng::new(48.720, 9.152);
pub const DEFAULT_ZOOM: f64 = 6.0;
/// Zoom used when the view follows a single position.
pub const SINGLE_POINT_ZOOM: f64 = 13.0;
/// Highest zoom offered by the tile source.
pub const MAX_ZOOM: u8 = 18;

/// Initial map view: where to look and how close.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub center: LatLng,
    pub zoom: f64,
}

impl ViewState {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }

    pub fn single_point(center: LatLng) -> Self {
        Self::new(center, SINGLE_POINT_ZOOM)
    }

    /// Fixed view rule: a lone pin is shown up close, anything else falls
    /// back to the default region.
    pub fn for_pins(pins: &[Pin]) -> Self {
        match pins {
            [only] => Self::single_point(only.position),
            _ => Self::new(DEFAULT_CENTER, DEFAULT_ZOOM),
        }
    }

    /// Centers on the pins and picks the closest integral zoom at which all of
    /// them fit into `viewport`.
    ///
    /// Fewer than two distinct positions use [`ViewState::for_pins`] rules.
    pub fn fit(pins: &[Pin], viewport: Viewport) -> Self {
        let Some(bounds) = LatLngBounds::from_pins(pins) else {
            return Self::for_pins(pins);
        };
        if bounds.is_point() {
            return Self::single_point(bounds.south_west);
        }

        let west = lng_to_x(bounds.south_west.lng);
        let east = lng_to_x(bounds.north_east.lng);
        let north = lat_to_y(bounds.north_east.lat);
        let south = lat_to_y(bounds.south_west.lat);

        let center = LatLng::new(y_to_lat((north + south) / 2.0), x_to_lng((west + east) / 2.0));

        let (usable_w, usable_h) = viewport.usable_px();
        let zoom = (0..=MAX_ZOOM)
            .rev()
            .find(|&z| {
                let world = world_size_px(z);
                (east - west) * world <= usable_w && (south - north) * world <= usable_h
            })
            .unwrap_or(0);

        Self::new(center, f64::from(zoom))
    }
}

/// Pixel size of the map element, used for view fitting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width_px: u32,
    pub height_px: u32,
    /// Margin kept free on every side.
    #[serde(default)]
    pub padding_px: u32,
}

impl Viewport {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
            padding_px: 0,
        }
    }

    pub fn with_padding(mut self, padding_px: u32) -> Self {
        self.padding_px = padding_px;
        self
    }

    fn usable_px(&self) -> (f64, f64) {
        let pad = 2 * self.padding_px;
        (
            f64::from(self.width_px.saturating_sub(pad).max(1)),
            f64::from(self.height_px.saturating_sub(pad).max(1)),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
