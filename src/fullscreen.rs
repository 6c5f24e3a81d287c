//! Cross-implementation fullscreen bridge.
//!
//! Browsers disagree on the method and property names, so each operation is
//! an ordered list of capability probes: the first one present on the target
//! object wins, and a target with none of them degrades to a no-op. Requests
//! are fire-and-forget; their eventual effect re-enters through the size
//! observer.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Document;

const ENTER_METHODS: [&str; 3] = [
    "requestFullscreen",
    "webkitRequestFullscreen",
    "mozRequestFullScreen",
];

const EXIT_METHODS: [&str; 3] = [
    "exitFullscreen",
    "webkitCancelFullScreen",
    "mozCancelFullScreen",
];

const ELEMENT_PROBES: [&str; 3] = [
    "fullscreenElement",
    "webkitFullscreenElement",
    "mozFullScreenElement",
];

fn capability(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn invoke_first(target: &JsValue, names: &[&str]) {
    for name in names {
        if let Some(method) = capability(target, name) {
            // Best effort: a rejected promise or a throw is silently dropped.
            let _ = method.call0(target);
            return;
        }
    }
}

/// Request fullscreen on the document element, if any implementation exists.
pub fn enter(document: &Document) {
    let Some(root) = document.document_element() else {
        return;
    };
    invoke_first(root.as_ref(), &ENTER_METHODS);
}

/// Leave fullscreen, if any implementation exists.
pub fn exit(document: &Document) {
    invoke_first(document.as_ref(), &EXIT_METHODS);
}

/// True when any fullscreen-element indicator, standard or vendor-prefixed,
/// is currently set.
pub fn is_active(document: &Document) -> bool {
    let doc: &JsValue = document.as_ref();
    ELEMENT_PROBES.iter().any(|name| {
        Reflect::get(doc, &JsValue::from_str(name))
            .map(|value| !value.is_null() && !value.is_undefined())
            .unwrap_or(false)
    })
}

/// Enter fullscreen when no fullscreen element is active, exit otherwise.
pub fn toggle(document: &Document) {
    if is_active(document) {
        exit(document);
    } else {
        enter(document);
    }
}
