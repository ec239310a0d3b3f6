use std::future::Future;
use std::time::Duration;

use foundation::{LatLng, ViewState};
use layers::Marker;
use runtime::{BindingSource, CancelToken, GateError, WaitPolicy, wait_ready};
use tracing::{debug, info, warn};

use crate::backend::{MapBackend, MapHandle};
use crate::bootstrap::{
    DecodeBinding, EVENT_POS_BINDING, LEAFLET_BINDING, MAP_CENTER_BINDING, MAP_PINS_BINDING,
    MAP_ZOOM_BINDING, decode_binding, decode_pins, decode_position, multi_pin_readiness_set,
};
use crate::config::{EmptyPinsPolicy, MapOptions, MapPageConfig, MultiPinConfig, SinglePointConfig};
use crate::error::MapError;

/// Lifecycle of an initializer. Every state but `Idle` and `Waiting` is
/// terminal; `Rendered` means the initializer has run, whether or not it had
/// anything to draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InitState {
    Idle,
    Waiting,
    Rendered,
    Cancelled,
    TimedOut,
    Failed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoPosition,
    NoPins,
    AlreadyRun,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Rendered { map: MapHandle, markers: usize },
    Skipped(SkipReason),
}

fn draw_map<B, I>(
    backend: &mut B,
    options: &MapOptions,
    view: ViewState,
    positions: I,
) -> Result<InitOutcome, MapError>
where
    B: MapBackend + ?Sized,
    I: IntoIterator<Item = LatLng>,
{
    let map = backend.create_map(&options.element_id)?;
    backend.set_view(map, view)?;
    backend.add_tile_layer(map, &options.tiles)?;
    let mut markers = 0;
    for position in positions {
        backend.add_marker(map, &Marker::new(position))?;
        markers += 1;
    }
    Ok(InitOutcome::Rendered { map, markers })
}

/// Centers a map on one position and marks it.
#[derive(Debug)]
pub struct SinglePointInitializer {
    config: SinglePointConfig,
    state: InitState,
}

impl SinglePointInitializer {
    pub fn new(config: SinglePointConfig) -> Self {
        Self {
            config,
            state: InitState::Idle,
        }
    }

    /// Reads the position guard from `source`; an undefined guard yields an
    /// initializer with nothing to draw.
    pub fn from_bindings<S>(source: &S, map: MapOptions) -> Result<Self, MapError>
    where
        S: BindingSource,
        S::Value: DecodeBinding,
    {
        let position = source
            .lookup(EVENT_POS_BINDING)
            .map(|value| decode_position(EVENT_POS_BINDING, &value))
            .transpose()?;
        let mut config = SinglePointConfig::new(position);
        config.map = map;
        Ok(Self::new(config))
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    pub fn run<B: MapBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Result<InitOutcome, MapError> {
        if self.state != InitState::Idle {
            return Ok(InitOutcome::Skipped(SkipReason::AlreadyRun));
        }
        let Some(position) = self.config.position else {
            debug!("no position defined, nothing to render");
            self.state = InitState::Rendered;
            return Ok(InitOutcome::Skipped(SkipReason::NoPosition));
        };

        let view = ViewState::new(position, self.config.zoom);
        match draw_map(backend, &self.config.map, view, [position]) {
            Ok(outcome) => {
                info!(lat = position.lat, lng = position.lng, "single point map rendered");
                self.state = InitState::Rendered;
                Ok(outcome)
            }
            Err(err) => {
                warn!("single point map failed: {err}");
                self.state = InitState::Failed;
                Err(err)
            }
        }
    }
}

/// Draws a marker per pin, optionally after waiting for the page bindings.
#[derive(Debug)]
pub struct MultiPinInitializer {
    state: InitState,
}

impl Default for MultiPinInitializer {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiPinInitializer {
    pub fn new() -> Self {
        Self {
            state: InitState::Idle,
        }
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    pub fn render<B: MapBackend + ?Sized>(
        &mut self,
        config: &MultiPinConfig,
        backend: &mut B,
    ) -> Result<InitOutcome, MapError> {
        if !matches!(self.state, InitState::Idle | InitState::Waiting) {
            return Ok(InitOutcome::Skipped(SkipReason::AlreadyRun));
        }
        if config.pins.is_empty() && config.map.empty_pins == EmptyPinsPolicy::SkipMap {
            debug!("no pins, skipping map");
            self.state = InitState::Rendered;
            return Ok(InitOutcome::Skipped(SkipReason::NoPins));
        }

        let positions = config.pins.iter().map(|pin| pin.position);
        match draw_map(backend, &config.map, config.view, positions) {
            Ok(outcome) => {
                info!(
                    pins = config.pins.len(),
                    zoom = config.view.zoom,
                    "multi pin map rendered"
                );
                self.state = InitState::Rendered;
                Ok(outcome)
            }
            Err(err) => {
                warn!("multi pin map failed: {err}");
                self.state = InitState::Failed;
                Err(err)
            }
        }
    }

    /// Waits for pins, zoom, center and the mapping library to be defined in
    /// `source`, then renders once.
    ///
    /// `make_backend` receives the library binding.
    pub async fn bootstrap<S, Sleep, Fut, Make, B>(
        &mut self,
        source: &S,
        map: MapOptions,
        policy: WaitPolicy,
        cancel: &CancelToken,
        sleep: Sleep,
        make_backend: Make,
    ) -> Result<InitOutcome, MapError>
    where
        S: BindingSource,
        S::Value: DecodeBinding,
        Sleep: FnMut(Duration) -> Fut,
        Fut: Future<Output = ()>,
        Make: FnOnce(S::Value) -> B,
        B: MapBackend,
    {
        if self.state != InitState::Idle {
            return Ok(InitOutcome::Skipped(SkipReason::AlreadyRun));
        }
        let set = multi_pin_readiness_set()?;
        self.state = InitState::Waiting;
        debug!("waiting for bindings {:?}", set.names());

        let values = match wait_ready(source, &set, policy, cancel, sleep).await {
            Ok(values) => values,
            Err(err) => {
                self.state = match err {
                    GateError::Cancelled => InitState::Cancelled,
                    GateError::TimedOut { .. } => InitState::TimedOut,
                    _ => InitState::Failed,
                };
                return Err(err.into());
            }
        };

        let (config, library) = match Self::decode_bindings(values, map) {
            Ok(decoded) => decoded,
            Err(err) => {
                self.state = InitState::Failed;
                return Err(err);
            }
        };
        let mut backend = make_backend(library);
        self.render(&config, &mut backend)
    }

    fn decode_bindings<V: DecodeBinding>(
        values: Vec<V>,
        map: MapOptions,
    ) -> Result<(MultiPinConfig, V), MapError> {
        let [pins, zoom, center, library]: [V; 4] =
            values.try_into().map_err(|_| MapError::Binding {
                name: LEAFLET_BINDING.to_string(),
                reason: "expected four binding values".to_string(),
            })?;
        let config = MultiPinConfig {
            pins: decode_pins(MAP_PINS_BINDING, &pins)?,
            view: ViewState::new(
                decode_position(MAP_CENTER_BINDING, &center)?,
                decode_binding(MAP_ZOOM_BINDING, &zoom)?,
            ),
            map,
        };
        Ok((config, library))
    }
}

/// Renders whatever map `config` describes.
pub fn render_page<B: MapBackend + ?Sized>(
    config: &MapPageConfig,
    backend: &mut B,
) -> Result<InitOutcome, MapError> {
    match config {
        MapPageConfig::SinglePoint(single) => {
            SinglePointInitializer::new(single.clone()).run(backend)
        }
        MapPageConfig::MultiPin(multi) => MultiPinInitializer::new().render(multi, backend),
    }
}
