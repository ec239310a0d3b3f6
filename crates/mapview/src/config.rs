use foundation::{LatLng, Pin, SINGLE_POINT_ZOOM, ViewState};
use layers::TileLayer;
use serde::{Deserialize, Serialize};

/// Id of the page element the map attaches to.
pub const MAP_ELEMENT_ID: &str = "map";

/// What to do when a multi-pin page has no pins at all.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPinsPolicy {
    /// No map is created.
    #[default]
    SkipMap,
    /// The map is created with its view and tiles but no markers.
    RenderEmptyMap,
}

/// Settings shared by every map a page draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub element_id: String,
    pub tiles: TileLayer,
    pub empty_pins: EmptyPinsPolicy,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            element_id: MAP_ELEMENT_ID.to_string(),
            tiles: TileLayer::default(),
            empty_pins: EmptyPinsPolicy::default(),
        }
    }
}

/// A map showing one position, e.g. the venue of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinglePointConfig {
    /// Pages without a position show no map.
    pub position: Option<LatLng>,
    #[serde(default = "single_point_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub map: MapOptions,
}

fn single_point_zoom() -> f64 {
    SINGLE_POINT_ZOOM
}

impl SinglePointConfig {
    pub fn new(position: Option<LatLng>) -> Self {
        Self {
            position,
            zoom: SINGLE_POINT_ZOOM,
            map: MapOptions::default(),
        }
    }
}

/// A map with one marker per pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPinConfig {
    pub pins: Vec<Pin>,
    pub view: ViewState,
    #[serde(default)]
    pub map: MapOptions,
}

impl MultiPinConfig {
    pub fn new(pins: Vec<Pin>, view: ViewState) -> Self {
        Self {
            pins,
            view,
            map: MapOptions::default(),
        }
    }

    /// Pins with the view chosen by [`ViewState::for_pins`].
    pub fn for_pins(pins: Vec<Pin>) -> Self {
        let view = ViewState::for_pins(&pins);
        Self::new(pins, view)
    }

    pub fn with_empty_pins(mut self, policy: EmptyPinsPolicy) -> Self {
        self.map.empty_pins = policy;
        self
    }
}

/// Everything a page hands to the map front end in one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapPageConfig {
    SinglePoint(SinglePointConfig),
    MultiPin(MultiPinConfig),
}

#[cfg(test)]
mod tests {
    use super::{EmptyPinsPolicy, MapPageConfig, MultiPinConfig, SinglePointConfig};
    use foundation::{LatLng, Pin};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn minimal_single_point_uses_defaults() {
        let cfg: SinglePointConfig =
            serde_json::from_value(json!({"position": {"lat": 52.5, "lng": 13.4}})).unwrap();
        assert_eq!(cfg, SinglePointConfig::new(Some(LatLng::new(52.5, 13.4))));
        assert_eq!(cfg.map.element_id, "map");
        assert_eq!(cfg.zoom, 13.0);
    }

    #[test]
    fn page_config_is_tagged() {
        let cfg = MapPageConfig::MultiPin(
            MultiPinConfig::for_pins(vec![Pin::new(1.0, 2.0)])
                .with_empty_pins(EmptyPinsPolicy::RenderEmptyMap),
        );
        let value = serde_json::to_value(&cfg).unwrap();
        assert_eq!(value["kind"], "multi_pin");
        assert_eq!(value["map"]["empty_pins"], "render_empty_map");
        assert_eq!(value["view"]["zoom"], 13.0);
        let back: MapPageConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, cfg);
    }
}
