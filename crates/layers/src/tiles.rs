use foundation::MAX_ZOOM;
use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerKind};

/// Raster tile template in slippy-map notation; the map library expands `{r}`
/// to `@2x` on high-density displays.
pub const WIKIMEDIA_TILES_URL: &str = "https://maps.wikimedia.org/osm-intl/{z}/{x}/{y}{r}.png";
pub const TILE_ATTRIBUTION: &str = "slowtec GmbH";

/// Background tile layer of a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl TileLayer {
    pub fn new(
        url_template: impl Into<String>,
        attribution: impl Into<String>,
        max_zoom: u8,
    ) -> Self {
        Self {
            url_template: url_template.into(),
            attribution: attribution.into(),
            max_zoom,
        }
    }
}

impl Default for TileLayer {
    fn default() -> Self {
        Self::new(WIKIMEDIA_TILES_URL, TILE_ATTRIBUTION, MAX_ZOOM)
    }
}

impl Layer for TileLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Tiles
    }
}

#[cfg(test)]
mod tests {
    use super::TileLayer;

    #[test]
    fn default_layer_uses_fixed_source() {
        let layer = TileLayer::default();
        assert_eq!(layer.attribution, "slowtec GmbH");
        assert_eq!(layer.max_zoom, 18);
    }

    #[test]
    fn serializes_for_page_config() {
        let json = serde_json::to_value(TileLayer::default()).unwrap();
        assert_eq!(json["max_zoom"], 18);
    }
}
