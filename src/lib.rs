//! Host-page shell for the compiled game engine.
//!
//! Keeps the fixed-aspect render surface scaled and positioned inside a
//! responsive page, drives the one-shot splash-to-running transition, and
//! forwards the input-activity flag to the engine. The engine itself is
//! opaque; see `engine.rs` for the three entry points we consume.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    CssStyleDeclaration, Document, Element, Event, HtmlCanvasElement, HtmlElement, ResizeObserver,
    Window,
};

mod engine;
pub mod fullscreen;
pub mod layout;

use layout::{AspectFix, LayoutContext, Orientation, Size};

const CANVAS_ID: &str = "bevy-canvas";
const GAME_CONTAINER_ID: &str = "game-container";
const CANVAS_CONTAINER_ID: &str = "canvas-container";
const CANVAS_INNER_CONTAINER_ID: &str = "canvas-inner-container";
const CONTROLS_ID: &str = "controls";
const BUTTON_BOX_ID: &str = "button-box";
const DEFAULT_REM_PX: f64 = 16.0;

/// One-shot page lifecycle. Running is terminal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Idle,
    Starting,
    Running,
}

fn begin_start(phase: &mut Phase) -> bool {
    if *phase == Phase::Idle {
        *phase = Phase::Starting;
        true
    } else {
        false
    }
}

fn commit_running(phase: &mut Phase) -> bool {
    if *phase == Phase::Starting {
        *phase = Phase::Running;
        true
    } else {
        false
    }
}

struct Shell {
    document: Document,
    canvas: HtmlCanvasElement,
    game_container: HtmlElement,
    canvas_container: HtmlElement,
    canvas_inner_container: HtmlElement,
    layout: LayoutContext,
    phase: Phase,
    touch_device: bool,
}

fn window() -> Window {
    web_sys::window().expect("missing window")
}

fn require_html_element(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing #{id}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
}

/// Looked up fresh every time: the panel is removed on non-touch devices and
/// its absence disables the orientation half of the layout pass.
fn controls_panel(document: &Document) -> Option<HtmlElement> {
    document
        .get_element_by_id(CONTROLS_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn set_status(document: &Document, status: &str) {
    if let Some(el) = document.document_element() {
        let _ = el.set_attribute("data-shell-status", status);
    }
}

fn detect_touch_device(document: &Document) -> bool {
    document
        .document_element()
        .map(|el| Reflect::has(el.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false))
        .unwrap_or(false)
}

/// Current pixel value of 1rem, re-read every pass so runtime zoom and
/// accessibility font-size changes take effect.
fn rem_px(document: &Document) -> f64 {
    let Some(root) = document.document_element() else {
        return DEFAULT_REM_PX;
    };

    window()
        .get_computed_style(&root)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("font-size").ok())
        .and_then(|value| value.trim_end_matches("px").parse::<f64>().ok())
        .unwrap_or(DEFAULT_REM_PX)
}

fn offset_size(element: &HtmlElement) -> Size {
    Size::new(element.offset_width() as f64, element.offset_height() as f64)
}

fn set_px(style: &CssStyleDeclaration, property: &str, value: f64) {
    let _ = style.set_property(property, &format!("{value}px"));
}

fn apply_box(element: &HtmlElement, size: Size) {
    let style = element.style();
    set_px(&style, "width", size.width);
    set_px(&style, "height", size.height);
}

/// Flow properties that only change when the orientation flips: landscape
/// floats the controls beside a left-aligned canvas, portrait stacks them
/// under a centered one.
fn apply_flow(inner: &HtmlElement, controls: &HtmlElement, orientation: Orientation) {
    let inner_style = inner.style();
    let controls_style = controls.style();

    match orientation {
        Orientation::Landscape => {
            let _ = inner_style.set_property("display", "flex");
            let _ = inner_style.set_property("justify-content", "left");
            let _ = controls_style.set_property("float", "right");
            let _ = controls_style.set_property("padding", "0 1rem");
        }
        Orientation::Portrait => {
            let _ = inner_style.set_property("display", "block");
            let _ = inner_style.set_property("justify-content", "center");
            let _ = controls_style.set_property("float", "none");
            let _ = controls_style.set_property("padding", "1rem 0");
        }
    }
}

/// Fit the canvas inside the last snapshotted container box by pinning a
/// single CSS dimension. A replayed identical measurement writes nothing, so
/// the size observer cannot re-trigger itself through this path, while an
/// engine-driven surface resize always gets the corrective write.
fn fit_canvas(shell: &mut Shell) {
    let intrinsic = Size::new(
        shell.canvas.offset_width() as f64,
        shell.canvas.offset_height() as f64,
    );
    let Some(fix) = shell.layout.fit(intrinsic) else {
        return;
    };

    let style = shell.canvas.style();
    match fix {
        AspectFix::PinWidth(px) => {
            let _ = style.remove_property("height");
            set_px(&style, "width", px);
        }
        AspectFix::PinHeight(px) => {
            let _ = style.remove_property("width");
            set_px(&style, "height", px);
        }
    }
}

/// One full layout pass: orientation decision, box assignment, snapshot
/// refresh, aspect fit. Always in that order, within one task.
fn layout_pass(shell: &mut Shell) {
    let rem = rem_px(&shell.document);

    if let Some(controls) = controls_panel(&shell.document) {
        let game = offset_size(&shell.game_container);
        let plan = shell.layout.decide(game, rem);
        if plan.changed {
            apply_flow(&shell.canvas_inner_container, &controls, plan.orientation);
        }

        // Boxes are assigned on every pass: the game area keeps resizing
        // continuously while the orientation stays put.
        apply_box(&shell.canvas_container, plan.canvas_box);
        apply_box(&controls, plan.controls_box);
    }

    shell.layout.set_snapshot(offset_size(&shell.canvas_container));
    fit_canvas(shell);
}

fn start_game_command(state: &Rc<RefCell<Shell>>) {
    let mut shell = state.borrow_mut();
    if !begin_start(&mut shell.phase) {
        return;
    }

    if let Some(button_box) = shell.document.get_element_by_id(BUTTON_BOX_ID) {
        button_box.remove();
    }
    let _ = shell.game_container.remove_attribute("hidden");

    if commit_running(&mut shell.phase) {
        if shell.touch_device {
            // Best effort; a denied request just leaves us windowed.
            fullscreen::enter(&shell.document);
        } else {
            if let Some(controls) = controls_panel(&shell.document) {
                controls.remove();
            }
            let _ = shell.canvas_container.set_attribute("style", "height:100%");
        }

        layout_pass(&mut shell);
        let _ = shell.canvas.focus();
        set_status(&shell.document, "running");
        engine::start_game();
    }
}

/// Install the commands the host markup calls: `startGame()`,
/// `setInputActive(bool)` and `toggleFullscreen()` on `window`.
fn expose_page_commands(win: &Window, state: &Rc<RefCell<Shell>>) -> Result<(), JsValue> {
    let state_start = Rc::clone(state);
    let start_cb = Closure::wrap(Box::new(move || {
        start_game_command(&state_start);
    }) as Box<dyn FnMut()>);
    Reflect::set(win.as_ref(), &JsValue::from_str("startGame"), start_cb.as_ref())?;
    start_cb.forget();

    let input_cb = Closure::wrap(Box::new(move |active: bool| {
        engine::set_input_active(active);
    }) as Box<dyn FnMut(bool)>);
    Reflect::set(
        win.as_ref(),
        &JsValue::from_str("setInputActive"),
        input_cb.as_ref(),
    )?;
    input_cb.forget();

    let state_fullscreen = Rc::clone(state);
    let fullscreen_cb = Closure::wrap(Box::new(move || {
        let shell = state_fullscreen.borrow();
        fullscreen::toggle(&shell.document);
    }) as Box<dyn FnMut()>);
    Reflect::set(
        win.as_ref(),
        &JsValue::from_str("toggleFullscreen"),
        fullscreen_cb.as_ref(),
    )?;
    fullscreen_cb.forget();

    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if let Err(err) = start_impl() {
        if let Some(win) = web_sys::window() {
            if let Some(doc) = win.document() {
                set_status(&doc, "error");
            }
        }
        web_sys::console::error_1(&err);
    }
}

fn start_impl() -> Result<(), JsValue> {
    let win = window();
    let document = win.document().expect("missing document");

    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("Missing render surface"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let game_container = require_html_element(&document, GAME_CONTAINER_ID)?;
    let canvas_container = require_html_element(&document, CANVAS_CONTAINER_ID)?;
    let canvas_inner_container = require_html_element(&document, CANVAS_INNER_CONTAINER_ID)?;

    let touch_device = detect_touch_device(&document);
    set_status(&document, "loading");

    let state = Rc::new(RefCell::new(Shell {
        document: document.clone(),
        canvas,
        game_container,
        canvas_container,
        canvas_inner_container,
        layout: LayoutContext::new(),
        phase: Phase::Idle,
        touch_device,
    }));

    // Engine bootstrap. A failed init is reported instead of leaving the
    // splash screen hanging with no feedback.
    {
        let state_boot = Rc::clone(&state);
        spawn_local(async move {
            match engine::boot().await {
                Ok(()) => {
                    set_status(&state_boot.borrow().document, "ready");
                }
                Err(err) => {
                    set_status(&state_boot.borrow().document, "error");
                    web_sys::console::error_1(&err);
                }
            }
        });
    }

    // The engine resizes the surface itself (fullscreen changes, renderer
    // resize requests); those only need the fit step re-run.
    let state_observer = Rc::clone(&state);
    let on_surface_resize = Closure::wrap(Box::new(move || {
        let mut shell = state_observer.borrow_mut();
        fit_canvas(&mut shell);
    }) as Box<dyn FnMut()>);
    let observer = ResizeObserver::new(on_surface_resize.as_ref().unchecked_ref())?;
    {
        let shell = state.borrow();
        let target: &Element = shell.canvas.as_ref();
        observer.observe(target);
    }
    on_surface_resize.forget();

    // Window resizes re-run the whole pass: orientation, boxes, then fit.
    let state_resize = Rc::clone(&state);
    let on_resize = Closure::wrap(Box::new(move |_event: Event| {
        let mut shell = state_resize.borrow_mut();
        layout_pass(&mut shell);
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    expose_page_commands(&win, &state)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Phase, begin_start, commit_running};

    #[test]
    fn start_transition_fires_exactly_once() {
        let mut phase = Phase::Idle;
        assert!(begin_start(&mut phase));
        assert!(commit_running(&mut phase));
        assert_eq!(phase, Phase::Running);

        // A second press on the (now removed) start button must be inert.
        assert!(!begin_start(&mut phase));
        assert!(!commit_running(&mut phase));
        assert_eq!(phase, Phase::Running);
    }

    #[test]
    fn commit_requires_a_begun_start() {
        let mut phase = Phase::Idle;
        assert!(!commit_running(&mut phase));
        assert_eq!(phase, Phase::Idle);
    }
}
