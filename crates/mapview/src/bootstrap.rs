//! The contract between a host page and the map front end: binding names,
//! how binding values are decoded, and the script a page embeds to define
//! them.

use foundation::{LatLng, Pin, ViewState};
use runtime::{GateError, ReadinessSet};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::MapPageConfig;
use crate::error::MapError;

/// Position guard of a single-point page.
pub const EVENT_POS_BINDING: &str = "OFDB_EVENT_POS";
pub const MAP_PINS_BINDING: &str = "OFDB_MAP_PINS";
pub const MAP_ZOOM_BINDING: &str = "OFDB_MAP_ZOOM";
pub const MAP_CENTER_BINDING: &str = "OFDB_MAP_CENTER";
/// The mapping library itself.
pub const LEAFLET_BINDING: &str = "L";
/// A complete [`MapPageConfig`] as one JSON object.
pub const MAP_CONFIG_BINDING: &str = "OFDB_MAP_CONFIG";

/// Bindings a multi-pin page waits for, in callback order.
pub fn multi_pin_readiness_set() -> Result<ReadinessSet, GateError> {
    ReadinessSet::new([
        MAP_PINS_BINDING,
        MAP_ZOOM_BINDING,
        MAP_CENTER_BINDING,
        LEAFLET_BINDING,
    ])
}

/// A binding value that can be read as structured data.
pub trait DecodeBinding {
    fn decode<T: DeserializeOwned>(&self) -> Result<T, String>;
}

impl DecodeBinding for serde_json::Value {
    fn decode<T: DeserializeOwned>(&self) -> Result<T, String> {
        T::deserialize(self).map_err(|e| e.to_string())
    }
}

pub(crate) fn decode_binding<V, T>(name: &str, value: &V) -> Result<T, MapError>
where
    V: DecodeBinding,
    T: DeserializeOwned,
{
    value.decode().map_err(|reason| MapError::Binding {
        name: name.to_string(),
        reason,
    })
}

/// Decodes a position and rejects coordinates outside WGS84 range.
pub(crate) fn decode_position<V: DecodeBinding>(name: &str, value: &V) -> Result<LatLng, MapError> {
    let position: LatLng = decode_binding(name, value)?;
    check_position(name, position)?;
    Ok(position)
}

pub(crate) fn decode_pins<V: DecodeBinding>(name: &str, value: &V) -> Result<Vec<Pin>, MapError> {
    let pins: Vec<Pin> = decode_binding(name, value)?;
    for pin in &pins {
        check_position(name, pin.position)?;
    }
    Ok(pins)
}

fn check_position(name: &str, position: LatLng) -> Result<(), MapError> {
    if position.is_valid() {
        Ok(())
    } else {
        Err(MapError::Binding {
            name: name.to_string(),
            reason: format!("position {},{} is out of range", position.lat, position.lng),
        })
    }
}

/// Script defining the position guard of a single-point page.
pub fn single_point_script(position: LatLng) -> String {
    format!("window.{EVENT_POS_BINDING}={};", js_position(position))
}

/// Script defining the pins, zoom and center of a multi-pin page.
pub fn multi_pin_script(pins: &[Pin], view: ViewState) -> String {
    let pins_js = pins
        .iter()
        .map(|pin| js_position(pin.position))
        .collect::<Vec<_>>()
        .join(",");
    let (zoom, lat, lng) = (view.zoom, view.center.lat, view.center.lng);
    format!(
        "window.{MAP_PINS_BINDING}=[{pins_js}];\
         window.{MAP_ZOOM_BINDING}={zoom};\
         window.{MAP_CENTER_BINDING}=[{lat},{lng}];"
    )
}

/// Script defining [`MAP_CONFIG_BINDING`].
pub fn config_script(config: &MapPageConfig) -> Result<String, MapError> {
    let json = json_for_script(config)?;
    Ok(format!("window.{MAP_CONFIG_BINDING}={json};"))
}

fn js_position(p: LatLng) -> String {
    format!("{{lat:{},lng:{}}}", p.lat, p.lng)
}

// `</` must not appear inside an inline script element.
fn json_for_script<T: Serialize>(value: &T) -> Result<String, MapError> {
    let json = serde_json::to_string(value).map_err(|e| MapError::Encode(e.to_string()))?;
    Ok(json.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use super::{
        DecodeBinding, config_script, multi_pin_readiness_set, multi_pin_script,
        single_point_script,
    };
    use crate::config::{MapPageConfig, SinglePointConfig};
    use foundation::{LatLng, Pin, ViewState};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn readiness_set_lists_data_before_library() {
        let set = multi_pin_readiness_set().unwrap();
        assert_eq!(
            set.names(),
            ["OFDB_MAP_PINS", "OFDB_MAP_ZOOM", "OFDB_MAP_CENTER", "L"]
        );
    }

    #[test]
    fn renders_single_point_guard() {
        assert_eq!(
            single_point_script(LatLng::new(52.5, 13.4)),
            "window.OFDB_EVENT_POS={lat:52.5,lng:13.4};"
        );
    }

    #[test]
    fn renders_multi_pin_globals() {
        let pins = [Pin::new(1.0, 2.0), Pin::new(3.5, 4.0)];
        let script = multi_pin_script(&pins, ViewState::new(LatLng::new(48.72, 9.152), 6.0));
        assert_eq!(
            script,
            "window.OFDB_MAP_PINS=[{lat:1,lng:2},{lat:3.5,lng:4}];\
             window.OFDB_MAP_ZOOM=6;window.OFDB_MAP_CENTER=[48.72,9.152];"
        );
    }

    #[test]
    fn renders_empty_pin_list() {
        let script = multi_pin_script(&[], ViewState::for_pins(&[]));
        assert!(script.starts_with("window.OFDB_MAP_PINS=[];"));
    }

    #[test]
    fn config_script_cannot_close_the_script_element() {
        let mut cfg = SinglePointConfig::new(None);
        cfg.map.tiles.attribution = "</script><b>x</b>".to_string();
        let script = config_script(&MapPageConfig::SinglePoint(cfg)).unwrap();
        assert!(script.starts_with("window.OFDB_MAP_CONFIG={"));
        assert!(!script.contains("</script>"));
    }

    #[test]
    fn decodes_json_bindings() {
        let center: LatLng = json!([2, 3]).decode().unwrap();
        assert_eq!(center, LatLng::new(2.0, 3.0));
        let zoom: f64 = json!(10).decode().unwrap();
        assert_eq!(zoom, 10.0);
        assert!(json!("ten").decode::<f64>().is_err());
    }
}
