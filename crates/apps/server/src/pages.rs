use foundation::LatLng;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use mapview::{
    MapError, MapPageConfig, MultiPinConfig, SinglePointConfig, config_script, multi_pin_script,
    single_point_script,
};

const LEAFLET_CSS_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.4.0/leaflet.css";
const LEAFLET_CSS_SHA512: &str = "sha512-puBpdR0798OZvTTbP4A8Ix/l+A4dHDD0DGqYW6RQ+9jxkRFclaxxQb/SJAWZfWAkuyeQUytO7+7N4QKrDh+drA==";
const LEAFLET_JS_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.4.0/leaflet.js";
const LEAFLET_JS_SHA512: &str = "sha512-QVftwZFqvtRNi0ZyCtsznlKSWOStnDORoefr1enyq5mVL4tmKB3S/EnC3rRJcxCPavG10IcrVGSmPh6Qw5lwrg==";

/// Front end export a page's loader calls.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum EntryPoint {
    /// Picks the initializer from the globals the page defined.
    Detect,
    SinglePoint,
    MultiPin,
}

impl EntryPoint {
    fn for_page(style: BootstrapStyle, page: EntryPoint) -> Self {
        match style {
            BootstrapStyle::ConfigObject => EntryPoint::Detect,
            BootstrapStyle::LegacyGlobals => page,
        }
    }

    fn export(self) -> &'static str {
        match self {
            EntryPoint::Detect => "start",
            EntryPoint::SinglePoint => "start_single_point",
            EntryPoint::MultiPin => "start_multi_pin",
        }
    }

    fn loader(self) -> String {
        let export = self.export();
        format!("import init, {{ {export} }} from '/pkg/web.js'; await init(); {export}();")
    }
}

/// How a page hands its map data to the front end.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BootstrapStyle {
    /// One `OFDB_MAP_CONFIG` object.
    ConfigObject,
    /// Separate `OFDB_*` globals, one per value.
    LegacyGlobals,
}

pub fn overview_page(config: &MultiPinConfig, style: BootstrapStyle) -> Result<Markup, MapError> {
    let bootstrap = match style {
        BootstrapStyle::ConfigObject => config_script(&MapPageConfig::MultiPin(config.clone()))?,
        BootstrapStyle::LegacyGlobals => multi_pin_script(&config.pins, config.view),
    };
    Ok(page(
        "Pins",
        html! {
            h1 { "Pins" }
            @if config.pins.is_empty() {
                p class="no-results" { "No pins to show." }
            } @else {
                ul class="pins" {
                    @for (index, pin) in config.pins.iter().enumerate() {
                        li { a href=(format!("/pins/{index}")) { (pin.lat()) ", " (pin.lng()) } }
                    }
                }
            }
            div id=(config.map.element_id) {}
            (map_scripts(&bootstrap, EntryPoint::for_page(style, EntryPoint::MultiPin)))
        },
    ))
}

pub fn pin_page(
    index: usize,
    config: &SinglePointConfig,
    style: BootstrapStyle,
) -> Result<Markup, MapError> {
    let bootstrap = match (style, config.position) {
        (BootstrapStyle::ConfigObject, _) => {
            config_script(&MapPageConfig::SinglePoint(config.clone()))?
        }
        (BootstrapStyle::LegacyGlobals, Some(position)) => single_point_script(position),
        (BootstrapStyle::LegacyGlobals, None) => String::new(),
    };
    Ok(page(
        &format!("Pin {index}"),
        html! {
            h1 { "Pin " (index) }
            @if let Some(LatLng { lat, lng }) = config.position {
                p class="position" { (lat) ", " (lng) }
            }
            div id=(config.map.element_id) {}
            (map_scripts(&bootstrap, EntryPoint::for_page(style, EntryPoint::SinglePoint)))
            p { a href="/" { "All pins" } }
        },
    ))
}

fn page(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                link
                    rel="stylesheet"
                    href=(LEAFLET_CSS_URL)
                    integrity=(LEAFLET_CSS_SHA512)
                    crossorigin="anonymous";
                style { "#map { height: 480px; }" }
            }
            body { (content) }
        }
    }
}

// The library loads asynchronously; the front end waits for it.
fn map_scripts(bootstrap: &str, entry: EntryPoint) -> Markup {
    html! {
        @if !bootstrap.is_empty() {
            script { (PreEscaped(bootstrap)) }
        }
        script
            src=(LEAFLET_JS_URL)
            integrity=(LEAFLET_JS_SHA512)
            crossorigin="anonymous"
            async {}
        script type="module" { (PreEscaped(entry.loader())) }
    }
}

#[cfg(test)]
mod tests {
    use super::{BootstrapStyle, overview_page, pin_page};
    use foundation::{LatLng, Pin};
    use mapview::{MultiPinConfig, SinglePointConfig};

    #[test]
    fn overview_embeds_config_object() {
        let cfg = MultiPinConfig::for_pins(vec![Pin::new(1.0, 2.0), Pin::new(3.0, 4.0)]);
        let html = overview_page(&cfg, BootstrapStyle::ConfigObject)
            .unwrap()
            .into_string();
        assert!(html.contains("window.OFDB_MAP_CONFIG={\"kind\":\"multi_pin\""));
        assert!(html.contains(r#"<div id="map"></div>"#));
        assert!(html.contains(r#"href="/pins/1""#));
        assert!(html.contains("leaflet.js"));
    }

    #[test]
    fn overview_can_embed_legacy_globals() {
        let cfg = MultiPinConfig::for_pins(vec![Pin::new(1.0, 2.0)]);
        let html = overview_page(&cfg, BootstrapStyle::LegacyGlobals)
            .unwrap()
            .into_string();
        assert!(html.contains(
            "window.OFDB_MAP_PINS=[{lat:1,lng:2}];window.OFDB_MAP_ZOOM=13;window.OFDB_MAP_CENTER=[1,2];"
        ));
        assert!(!html.contains("OFDB_MAP_CONFIG"));
        assert!(html.contains("await init(); start_multi_pin();"));
    }

    #[test]
    fn empty_overview_says_so() {
        let cfg = MultiPinConfig::for_pins(Vec::new());
        let html = overview_page(&cfg, BootstrapStyle::ConfigObject)
            .unwrap()
            .into_string();
        assert!(html.contains("No pins to show."));
    }

    #[test]
    fn pin_page_defines_position_guard() {
        let cfg = SinglePointConfig::new(Some(LatLng::new(52.5, 13.4)));
        let html = pin_page(0, &cfg, BootstrapStyle::LegacyGlobals)
            .unwrap()
            .into_string();
        assert!(html.contains("window.OFDB_EVENT_POS={lat:52.5,lng:13.4};"));
        assert!(html.contains("<title>Pin 0</title>"));
        assert!(html.contains("await init(); start_single_point();"));
    }

    #[test]
    fn pin_page_without_position_still_starts_single_point() {
        let cfg = SinglePointConfig::new(None);
        let html = pin_page(3, &cfg, BootstrapStyle::LegacyGlobals)
            .unwrap()
            .into_string();
        assert!(!html.contains("OFDB_EVENT_POS"));
        assert!(html.contains("import init, { start_single_point } from '/pkg/web.js';"));
        assert!(!html.contains("start_multi_pin"));
    }

    #[test]
    fn config_pages_let_the_front_end_detect() {
        let cfg = SinglePointConfig::new(None);
        let html = pin_page(3, &cfg, BootstrapStyle::ConfigObject)
            .unwrap()
            .into_string();
        assert!(html.contains("\"kind\":\"single_point\""));
        assert!(html.contains("await init(); start();"));
    }
}
