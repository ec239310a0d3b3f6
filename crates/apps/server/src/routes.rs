use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path as AxumPath, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use foundation::{Pin, ViewState, Viewport};
use mapview::{MapOptions, MultiPinConfig, SinglePointConfig};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::pages::{BootstrapStyle, overview_page, pin_page};

#[derive(Clone)]
pub struct AppState {
    pub pins: Arc<Vec<Pin>>,
    /// `Some` fits the overview to its pins.
    pub viewport: Option<Viewport>,
    pub map: MapOptions,
    pub style: BootstrapStyle,
}

impl AppState {
    pub fn overview_config(&self) -> MultiPinConfig {
        let view = match self.viewport {
            Some(viewport) => ViewState::fit(&self.pins, viewport),
            None => ViewState::for_pins(&self.pins),
        };
        MultiPinConfig {
            pins: self.pins.to_vec(),
            view,
            map: self.map.clone(),
        }
    }

    pub fn pin_config(&self, index: usize) -> Option<SinglePointConfig> {
        let pin = self.pins.get(index)?;
        let mut config = SinglePointConfig::new(Some(pin.position));
        config.map = self.map.clone();
        Some(config)
    }
}

pub fn router(state: AppState, pkg_dir: &Path) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(get_overview))
        .route("/pins/:index", get(get_pin))
        .route("/api/map", get(get_map_config))
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn get_overview(State(state): State<AppState>) -> Response {
    match overview_page(&state.overview_config(), state.style) {
        Ok(markup) => markup.into_response(),
        Err(err) => {
            error!("overview page failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "page error").into_response()
        }
    }
}

async fn get_pin(State(state): State<AppState>, AxumPath(index): AxumPath<usize>) -> Response {
    let Some(config) = state.pin_config(index) else {
        return (StatusCode::NOT_FOUND, "no such pin").into_response();
    };
    match pin_page(index, &config, state.style) {
        Ok(markup) => markup.into_response(),
        Err(err) => {
            error!("pin page {index} failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "page error").into_response()
        }
    }
}

async fn get_map_config(State(state): State<AppState>) -> Json<MultiPinConfig> {
    Json(state.overview_config())
}
