use foundation::{LatLng, Pin};
use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerKind};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: LatLng,
}

impl Marker {
    pub fn new(position: LatLng) -> Self {
        Self { position }
    }
}

impl From<&Pin> for Marker {
    fn from(pin: &Pin) -> Self {
        Self::new(pin.position)
    }
}

impl Layer for Marker {
    fn kind(&self) -> LayerKind {
        LayerKind::Marker
    }
}
