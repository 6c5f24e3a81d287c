use ascii_bomb_host::fullscreen;
use ascii_bomb_host::layout::{AspectFix, LayoutContext, Size};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement, ResizeObserver};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window()
        .expect("no window")
        .document()
        .expect("no document")
}

fn attach_div(document: &Document, width_px: f64, height_px: f64) -> HtmlElement {
    let div = document
        .create_element("div")
        .expect("create div")
        .dyn_into::<HtmlElement>()
        .expect("div element");
    let style = div.style();
    style
        .set_property("width", &format!("{width_px}px"))
        .expect("set width");
    style
        .set_property("height", &format!("{height_px}px"))
        .expect("set height");
    document
        .body()
        .expect("no body")
        .append_child(&div)
        .expect("append div");
    div
}

#[wasm_bindgen_test]
fn root_font_size_is_readable_in_pixels() {
    let document = document();
    let root = document.document_element().expect("no root element");
    let style = web_sys::window()
        .expect("no window")
        .get_computed_style(&root)
        .expect("computed style call")
        .expect("computed style");

    let font_size = style.get_property_value("font-size").expect("font-size");
    let px = font_size
        .trim_end_matches("px")
        .parse::<f64>()
        .expect("parse font-size");
    assert!(px > 0.0);
}

#[wasm_bindgen_test]
fn style_writes_round_trip_through_offset_reads() {
    let document = document();
    let div = attach_div(&document, 320.0, 180.0);

    assert_eq!(div.offset_width(), 320);
    assert_eq!(div.offset_height(), 180);

    div.remove();
}

#[wasm_bindgen_test]
fn layout_context_drives_a_live_container() {
    let document = document();
    let game = attach_div(&document, 1600.0, 900.0);
    let container = attach_div(&document, 0.0, 0.0);

    let mut ctx = LayoutContext::new();
    let game_box = Size::new(game.offset_width() as f64, game.offset_height() as f64);
    let plan = ctx.decide(game_box, 16.0);

    let style = container.style();
    style
        .set_property("width", &format!("{}px", plan.canvas_box.width))
        .expect("apply width");
    style
        .set_property("height", &format!("{}px", plan.canvas_box.height))
        .expect("apply height");

    assert_eq!(container.offset_width(), 1008);
    assert_eq!(container.offset_height(), 900);

    ctx.set_snapshot(Size::new(
        container.offset_width() as f64,
        container.offset_height() as f64,
    ));
    let fix = ctx.fit(Size::new(128.0, 144.0));
    assert_eq!(fix, Some(AspectFix::PinHeight(900.0)));
    // Unchanged snapshot and intrinsic size: nothing to write.
    assert_eq!(ctx.fit(Size::new(128.0, 144.0)), None);

    container.remove();
    game.remove();
}

#[wasm_bindgen_test]
fn resize_observer_is_constructible_and_observes() {
    use wasm_bindgen::closure::Closure;

    let document = document();
    let div = attach_div(&document, 100.0, 100.0);

    let noop = Closure::wrap(Box::new(move || {}) as Box<dyn FnMut()>);
    let observer = ResizeObserver::new(noop.as_ref().unchecked_ref()).expect("resize observer");
    observer.observe(&div);
    observer.disconnect();
    noop.forget();

    div.remove();
}

#[wasm_bindgen_test]
fn fullscreen_bridge_is_inert_without_a_gesture() {
    let document = document();

    // No user gesture in a test run, so nothing can actually be active, and
    // both operations must degrade to safe no-ops.
    assert!(!fullscreen::is_active(&document));
    fullscreen::toggle(&document);
    fullscreen::exit(&document);
    assert!(!fullscreen::is_active(&document));
}
