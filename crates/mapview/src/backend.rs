use foundation::ViewState;
use layers::{Layer, LayerId, Marker, TileLayer};
use tracing::trace;

use crate::error::MapError;

/// Handle to a map a backend has created.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MapHandle(pub u64);

/// The part of a mapping library the initializers rely on.
pub trait MapBackend {
    /// Creates a map bound to the page element with `element_id`.
    fn create_map(&mut self, element_id: &str) -> Result<MapHandle, MapError>;
    fn set_view(&mut self, map: MapHandle, view: ViewState) -> Result<(), MapError>;
    fn add_tile_layer(&mut self, map: MapHandle, layer: &TileLayer) -> Result<LayerId, MapError>;
    fn add_marker(&mut self, map: MapHandle, marker: &Marker) -> Result<LayerId, MapError>;
}

impl<B: MapBackend + ?Sized> MapBackend for &mut B {
    fn create_map(&mut self, element_id: &str) -> Result<MapHandle, MapError> {
        (**self).create_map(element_id)
    }

    fn set_view(&mut self, map: MapHandle, view: ViewState) -> Result<(), MapError> {
        (**self).set_view(map, view)
    }

    fn add_tile_layer(&mut self, map: MapHandle, layer: &TileLayer) -> Result<LayerId, MapError> {
        (**self).add_tile_layer(map, layer)
    }

    fn add_marker(&mut self, map: MapHandle, marker: &Marker) -> Result<LayerId, MapError> {
        (**self).add_marker(map, marker)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    CreateMap { element_id: String },
    SetView { map: MapHandle, view: ViewState },
    AddTileLayer { map: MapHandle, layer: TileLayer },
    AddMarker { map: MapHandle, marker: Marker },
}

/// Backend that draws nothing and remembers every call in order.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<MapCall>,
    next_id: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[MapCall] {
        &self.calls
    }

    pub fn maps_created(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, MapCall::CreateMap { .. }))
            .count()
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                MapCall::AddMarker { marker, .. } => Some(*marker),
                _ => None,
            })
            .collect()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MapBackend for RecordingBackend {
    fn create_map(&mut self, element_id: &str) -> Result<MapHandle, MapError> {
        self.calls.push(MapCall::CreateMap {
            element_id: element_id.to_string(),
        });
        Ok(MapHandle(self.next_id()))
    }

    fn set_view(&mut self, map: MapHandle, view: ViewState) -> Result<(), MapError> {
        self.calls.push(MapCall::SetView { map, view });
        Ok(())
    }

    fn add_tile_layer(&mut self, map: MapHandle, layer: &TileLayer) -> Result<LayerId, MapError> {
        trace!(kind = ?layer.kind(), "recording layer");
        self.calls.push(MapCall::AddTileLayer {
            map,
            layer: layer.clone(),
        });
        Ok(LayerId(self.next_id()))
    }

    fn add_marker(&mut self, map: MapHandle, marker: &Marker) -> Result<LayerId, MapError> {
        trace!(kind = ?marker.kind(), "recording layer");
        self.calls.push(MapCall::AddMarker {
            map,
            marker: *marker,
        });
        Ok(LayerId(self.next_id()))
    }
}
