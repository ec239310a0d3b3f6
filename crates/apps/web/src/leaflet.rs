//! `MapBackend` over the Leaflet library object (`window.L`).

use foundation::{LatLng, ViewState};
use js_sys::{Array, Object, Reflect};
use layers::{LayerId, Marker, TileLayer};
use mapview::{MapBackend, MapError, MapHandle};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// The `L` namespace object.
    #[derive(Debug, Clone)]
    pub type Leaflet;

    #[wasm_bindgen(method, catch, js_name = map)]
    fn map(this: &Leaflet, element_id: &str) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, catch, js_name = tileLayer)]
    fn tile_layer(
        this: &Leaflet,
        url_template: &str,
        options: &Object,
    ) -> Result<LeafletLayer, JsValue>;

    #[wasm_bindgen(method, catch, js_name = marker)]
    fn marker(this: &Leaflet, lat_lng: &Array) -> Result<LeafletLayer, JsValue>;

    #[derive(Debug, Clone)]
    pub type LeafletMap;

    #[wasm_bindgen(method, catch, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &Array, zoom: f64) -> Result<LeafletMap, JsValue>;

    /// Tile layers and markers alike.
    #[derive(Debug, Clone)]
    pub type LeafletLayer;

    #[wasm_bindgen(method, catch, js_name = addTo)]
    fn add_to(this: &LeafletLayer, map: &LeafletMap) -> Result<LeafletLayer, JsValue>;
}

fn js_err(context: &str, err: JsValue) -> MapError {
    MapError::Backend(format!("{context}: {err:?}"))
}

fn lat_lng(p: LatLng) -> Array {
    Array::of2(&JsValue::from_f64(p.lat), &JsValue::from_f64(p.lng))
}

pub struct LeafletBackend {
    leaflet: Leaflet,
    maps: Vec<LeafletMap>,
    layers: Vec<LeafletLayer>,
}

impl LeafletBackend {
    /// `library` is the value bound to `L`.
    pub fn new(library: JsValue) -> Self {
        Self {
            leaflet: library.unchecked_into(),
            maps: Vec::new(),
            layers: Vec::new(),
        }
    }

    fn map(&self, handle: MapHandle) -> Result<&LeafletMap, MapError> {
        usize::try_from(handle.0)
            .ok()
            .and_then(|i| self.maps.get(i))
            .ok_or_else(|| MapError::Backend(format!("unknown map handle {}", handle.0)))
    }

    fn attach(&mut self, map: MapHandle, layer: LeafletLayer) -> Result<LayerId, MapError> {
        layer
            .add_to(self.map(map)?)
            .map_err(|e| js_err("addTo", e))?;
        self.layers.push(layer);
        Ok(LayerId(self.layers.len() as u64 - 1))
    }
}

impl MapBackend for LeafletBackend {
    fn create_map(&mut self, element_id: &str) -> Result<MapHandle, MapError> {
        let map = self
            .leaflet
            .map(element_id)
            .map_err(|e| js_err("L.map", e))?;
        self.maps.push(map);
        Ok(MapHandle(self.maps.len() as u64 - 1))
    }

    fn set_view(&mut self, map: MapHandle, view: ViewState) -> Result<(), MapError> {
        self.map(map)?
            .set_view(&lat_lng(view.center), view.zoom)
            .map_err(|e| js_err("setView", e))?;
        Ok(())
    }

    fn add_tile_layer(&mut self, map: MapHandle, layer: &TileLayer) -> Result<LayerId, MapError> {
        let options = Object::new();
        Reflect::set(&options, &"attribution".into(), &layer.attribution.as_str().into())
            .map_err(|e| js_err("tile options", e))?;
        Reflect::set(&options, &"maxZoom".into(), &f64::from(layer.max_zoom).into())
            .map_err(|e| js_err("tile options", e))?;
        let tiles = self
            .leaflet
            .tile_layer(&layer.url_template, &options)
            .map_err(|e| js_err("L.tileLayer", e))?;
        self.attach(map, tiles)
    }

    fn add_marker(&mut self, map: MapHandle, marker: &Marker) -> Result<LayerId, MapError> {
        let pin = self
            .leaflet
            .marker(&lat_lng(marker.position))
            .map_err(|e| js_err("L.marker", e))?;
        self.attach(map, pin)
    }
}
