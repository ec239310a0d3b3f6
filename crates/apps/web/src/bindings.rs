//! Page globals as a [`BindingSource`].

use mapview::DecodeBinding;
use runtime::BindingSource;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

/// A value read off the global object.
#[derive(Debug, Clone)]
pub struct JsBinding(pub JsValue);

impl JsBinding {
    pub fn into_inner(self) -> JsValue {
        self.0
    }
}

impl DecodeBinding for JsBinding {
    fn decode<T: DeserializeOwned>(&self) -> Result<T, String> {
        let text = js_sys::JSON::stringify(&self.0)
            .map_err(|e| format!("not serialisable: {e:?}"))?;
        let text = String::from(text);
        serde_json::from_str(&text).map_err(|e| e.to_string())
    }
}

/// Reads `globalThis[name]`. `undefined` and `null` are not defined.
#[derive(Debug, Clone)]
pub struct WindowBindings {
    global: js_sys::Object,
}

impl WindowBindings {
    pub fn new() -> Self {
        Self {
            global: js_sys::global(),
        }
    }
}

impl Default for WindowBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingSource for WindowBindings {
    type Value = JsBinding;

    fn lookup(&self, name: &str) -> Option<JsBinding> {
        let value = js_sys::Reflect::get(&self.global, &JsValue::from_str(name)).ok()?;
        if value.is_undefined() || value.is_null() {
            None
        } else {
            Some(JsBinding(value))
        }
    }
}
