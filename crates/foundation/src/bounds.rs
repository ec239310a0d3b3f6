use crate::geo::{LatLng, Pin};

/// Axis-aligned geographic bounds (no anti-meridian wrapping).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        LatLngBounds {
            south_west,
            north_east,
        }
    }

    pub fn from_point(p: LatLng) -> Self {
        Self::new(p, p)
    }

    /// Smallest bounds covering every pin, or `None` for an empty slice.
    pub fn from_pins(pins: &[Pin]) -> Option<Self> {
        let (first, rest) = pins.split_first()?;
        let mut bounds = Self::from_point(first.position);
        for pin in rest {
            bounds.extend(pin.position);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    pub fn is_point(&self) -> bool {
        self.south_west == self.north_east
    }
}
