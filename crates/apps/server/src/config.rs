use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use foundation::Viewport;
use mapview::{EmptyPinsPolicy, MapOptions};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Serves map pages for a set of pins")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "PINMAP_ADDR", default_value = "127.0.0.1:9200")]
    pub addr: SocketAddr,

    /// JSON file holding an array of `{"lat": .., "lng": ..}` pins
    #[arg(long, env = "PINMAP_PINS")]
    pub pins: Option<PathBuf>,

    /// Directory with the built wasm front end, served under /pkg
    #[arg(long, env = "PINMAP_PKG_DIR", default_value = "crates/apps/web/pkg")]
    pub pkg_dir: PathBuf,

    /// Fit the overview map to its pins instead of the default region
    #[arg(long, env = "PINMAP_FIT_VIEW")]
    pub fit_view: bool,

    /// Map element size used when fitting the view
    #[arg(long, env = "PINMAP_VIEWPORT_WIDTH", default_value_t = 800)]
    pub viewport_width: u32,

    #[arg(long, env = "PINMAP_VIEWPORT_HEIGHT", default_value_t = 480)]
    pub viewport_height: u32,

    /// Draw the overview map even when there are no pins
    #[arg(long, env = "PINMAP_RENDER_EMPTY")]
    pub render_empty: bool,

    /// Define the individual OFDB_* globals instead of one config object
    #[arg(long, env = "PINMAP_LEGACY_GLOBALS")]
    pub legacy_globals: bool,
}

impl ServerConfig {
    pub fn viewport(&self) -> Option<Viewport> {
        self.fit_view
            .then(|| Viewport::new(self.viewport_width, self.viewport_height).with_padding(16))
    }

    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            empty_pins: if self.render_empty {
                EmptyPinsPolicy::RenderEmptyMap
            } else {
                EmptyPinsPolicy::SkipMap
            },
            ..MapOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use clap::Parser;
    use mapview::EmptyPinsPolicy;

    #[test]
    fn defaults() {
        let cfg = ServerConfig::try_parse_from(["server"]).unwrap();
        assert_eq!(cfg.addr.port(), 9200);
        assert!(cfg.viewport().is_none());
        assert_eq!(cfg.map_options().empty_pins, EmptyPinsPolicy::SkipMap);
    }

    #[test]
    fn fit_view_uses_viewport_size() {
        let cfg = ServerConfig::try_parse_from([
            "server",
            "--fit-view",
            "--viewport-width",
            "1024",
            "--render-empty",
        ])
        .unwrap();
        let viewport = cfg.viewport().unwrap();
        assert_eq!(viewport.width_px, 1024);
        assert_eq!(viewport.height_px, 480);
        assert_eq!(cfg.map_options().empty_pins, EmptyPinsPolicy::RenderEmptyMap);
    }
}
