//! Bindings to the compiled game engine module.
//!
//! The engine is an opaque collaborator: the shell only loads it and talks
//! through the three entry points its JS glue exports. Everything else about
//! it (rendering, physics, assets) is none of our business.

use js_sys::Promise;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::JsFuture;

const ENGINE_WASM_URL: &str = "./ascii_bomb_ecs_lib_bg.wasm";

// The engine glue is a deploy-time asset served next to the page, not a file
// in this tree, so the specifier must pass through to the generated import
// untouched rather than be bundled as a local snippet.
#[wasm_bindgen(raw_module = "./ascii_bomb_ecs_lib.js")]
extern "C" {
    #[wasm_bindgen(js_name = default)]
    fn init(module_or_path: &str) -> Promise;

    fn run();

    #[wasm_bindgen(js_name = start_game)]
    fn engine_start_game();

    #[wasm_bindgen(js_name = set_input_active)]
    fn engine_set_input_active(active: bool);
}

/// Initialize the engine module and run its bootstrap.
///
/// A failed init used to hang silently; now the error is handed back to the
/// caller so the page can report it.
pub async fn boot() -> Result<(), JsValue> {
    JsFuture::from(init(ENGINE_WASM_URL)).await?;
    run();
    Ok(())
}

/// Transition the engine out of its waiting state. Must be called exactly
/// once; the lifecycle state machine in `lib.rs` enforces that.
pub fn start_game() {
    engine_start_game();
}

/// Forward the on-screen input activity flag. Safe to call any number of
/// times.
pub fn set_input_active(active: bool) {
    engine_set_input_active(active);
}
