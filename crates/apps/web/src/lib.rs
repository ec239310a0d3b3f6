//! Browser front end: reads the bootstrap globals a page defines, waits for
//! Leaflet and draws the map once.

mod bindings;
mod leaflet;
mod timer;

use std::cell::RefCell;
use std::sync::OnceLock;

use mapview::{
    DecodeBinding, EVENT_POS_BINDING, InitOutcome, LEAFLET_BINDING, MAP_CONFIG_BINDING,
    MapError, MapOptions, MapPageConfig, MultiPinInitializer, SinglePointInitializer, render_page,
};
use runtime::{BindingSource, CancelToken, ReadinessSet, WaitPolicy, wait_ready};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub use bindings::{JsBinding, WindowBindings};
pub use leaflet::LeafletBackend;

static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

thread_local! {
    static PENDING: RefCell<Option<CancelToken>> = const { RefCell::new(None) };
}

/// Which kind of page the globals describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `OFDB_MAP_CONFIG` holds a complete page config.
    Config,
    /// `OFDB_EVENT_POS` is set.
    SinglePoint,
    MultiPin,
}

impl EntryKind {
    pub fn detect<S: BindingSource>(source: &S) -> Self {
        if source.lookup(MAP_CONFIG_BINDING).is_some() {
            EntryKind::Config
        } else if source.lookup(EVENT_POS_BINDING).is_some() {
            EntryKind::SinglePoint
        } else {
            EntryKind::MultiPin
        }
    }
}

fn init_panic_hook() {
    PANIC_HOOK_SET.get_or_init(|| {
        console_error_panic_hook::set_once();
    });
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn report(result: Result<InitOutcome, MapError>) {
    match result {
        Ok(InitOutcome::Rendered { markers, .. }) => {
            log(&format!("map rendered with {markers} marker(s)"))
        }
        Ok(InitOutcome::Skipped(reason)) => log(&format!("map skipped: {reason:?}")),
        Err(err) => {
            web_sys::console::error_1(&JsValue::from_str(&format!("map init error: {err}")))
        }
    }
}

/// Replaces any wait still in flight with a fresh token.
fn arm() -> CancelToken {
    let token = CancelToken::new();
    PENDING.with(|pending| {
        if let Some(previous) = pending.borrow_mut().replace(token.clone()) {
            previous.cancel();
        }
    });
    token
}

/// Forgets `token` unless a newer wait has replaced it.
fn disarm(token: &CancelToken) {
    PENDING.with(|pending| {
        let mut pending = pending.borrow_mut();
        if pending.as_ref().is_some_and(|current| current.same_as(token)) {
            pending.take();
        }
    });
}

#[wasm_bindgen(start)]
pub fn boot() {
    init_panic_hook();
}

/// Entry point called by the page loader; picks the initializer from the
/// globals the page defined.
#[wasm_bindgen]
pub fn start() {
    match EntryKind::detect(&WindowBindings::new()) {
        EntryKind::Config => start_from_globals(),
        EntryKind::SinglePoint => start_single_point(),
        EntryKind::MultiPin => start_multi_pin(),
    }
}

#[wasm_bindgen]
pub fn start_single_point() {
    let cancel = arm();
    spawn_local(async move {
        let source = WindowBindings::new();
        let result = single_point(&source, &cancel).await;
        disarm(&cancel);
        report(result);
    });
}

async fn single_point(
    source: &WindowBindings,
    cancel: &CancelToken,
) -> Result<InitOutcome, MapError> {
    let mut init = SinglePointInitializer::from_bindings(source, MapOptions::default())?;
    let library = wait_for_leaflet(source, cancel).await?;
    init.run(&mut LeafletBackend::new(library))
}

#[wasm_bindgen]
pub fn start_multi_pin() {
    let cancel = arm();
    spawn_local(async move {
        let source = WindowBindings::new();
        let result = MultiPinInitializer::new()
            .bootstrap(
                &source,
                MapOptions::default(),
                WaitPolicy::default(),
                &cancel,
                timer::sleep,
                |library: JsBinding| LeafletBackend::new(library.into_inner()),
            )
            .await;
        disarm(&cancel);
        report(result);
    });
}

fn start_from_globals() {
    let cancel = arm();
    spawn_local(async move {
        let source = WindowBindings::new();
        let result = from_globals(&source, &cancel).await;
        disarm(&cancel);
        report(result);
    });
}

async fn from_globals(
    source: &WindowBindings,
    cancel: &CancelToken,
) -> Result<InitOutcome, MapError> {
    let set = ReadinessSet::new([MAP_CONFIG_BINDING, LEAFLET_BINDING])?;
    let mut values = wait_ready(source, &set, WaitPolicy::default(), cancel, timer::sleep).await?;
    let (Some(library), Some(config)) = (values.pop(), values.pop()) else {
        return Err(MapError::Backend("gate resolved without values".into()));
    };
    let config: MapPageConfig = config.decode().map_err(|reason| MapError::Binding {
        name: MAP_CONFIG_BINDING.to_string(),
        reason,
    })?;
    render_page(&config, &mut LeafletBackend::new(library.into_inner()))
}

/// Renders the JSON form of a page config once Leaflet is loaded.
#[wasm_bindgen]
pub fn start_with_config(json: &str) -> Result<(), JsValue> {
    let config: MapPageConfig =
        serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let cancel = arm();
    spawn_local(async move {
        let source = WindowBindings::new();
        let result = with_config(&source, &config, &cancel).await;
        disarm(&cancel);
        report(result);
    });
    Ok(())
}

async fn with_config(
    source: &WindowBindings,
    config: &MapPageConfig,
    cancel: &CancelToken,
) -> Result<InitOutcome, MapError> {
    let library = wait_for_leaflet(source, cancel).await?;
    render_page(config, &mut LeafletBackend::new(library))
}

async fn wait_for_leaflet(
    source: &WindowBindings,
    cancel: &CancelToken,
) -> Result<JsValue, MapError> {
    let set = ReadinessSet::new([LEAFLET_BINDING])?;
    let mut values = wait_ready(source, &set, WaitPolicy::default(), cancel, timer::sleep).await?;
    values
        .pop()
        .map(JsBinding::into_inner)
        .ok_or_else(|| MapError::Backend("gate resolved without values".into()))
}

/// Stops a wait still in flight. Returns whether there was one.
#[wasm_bindgen]
pub fn cancel_pending() -> bool {
    PENDING.with(|pending| match pending.borrow_mut().take() {
        Some(token) => {
            token.cancel();
            true
        }
        None => false,
    })
}
