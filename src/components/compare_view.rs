use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent, TouchList};
use yew::prelude::*;

use crate::model::{ViewMode, ViewerAction, ViewerState};
use crate::state::{GestureController, PaintScheduler, TapTracker, apply_to_targets, transform_value};

const FRAME_STYLE: &str = "position:relative; overflow:hidden; aspect-ratio:4/3; display:flex; align-items:center; justify-content:center; background:#0e1116; border:1px solid #30363d; border-radius:8px; cursor:grab;";

#[derive(Properties, PartialEq, Clone)]
pub struct CompareViewProps {
    pub viewer: UseReducerHandle<ViewerState>,
}

// Innermost image cell under the event target, if any. Gestures only
// initiate over image cells; elsewhere the page scrolls normally.
fn gesture_target(e: &Event) -> Option<Element> {
    let el = e.target()?.dyn_into::<Element>().ok()?;
    el.closest(".cmp-frame").ok().flatten()
}

fn touch_points(touches: &TouchList) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(touches.length() as usize);
    for i in 0..touches.length() {
        if let Some(t) = touches.item(i) {
            points.push((t.client_x() as f64, t.client_y() as f64));
        }
    }
    points
}

fn set_frame_cursor(results: &HtmlElement, value: &str) {
    if let Ok(frames) = results.query_selector_all(".cmp-frame") {
        for i in 0..frames.length() {
            if let Some(node) = frames.item(i) {
                if let Ok(el) = node.dyn_into::<HtmlElement>() {
                    let _ = el.style().set_property("cursor", value);
                }
            }
        }
    }
}

#[function_component(CompareView)]
pub fn compare_view(props: &CompareViewProps) -> Html {
    let results_ref = use_node_ref();
    let controller = use_mut_ref(GestureController::default);
    let taps = use_mut_ref(TapTracker::default);
    let scheduler = use_mut_ref(PaintScheduler::new);
    let paint_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let viewer_ref = use_mut_ref(|| props.viewer.clone());

    // Keep the handle the window-level listeners see current.
    {
        let viewer_ref = viewer_ref.clone();
        use_effect_with(props.viewer.clone(), move |handle| {
            *viewer_ref.borrow_mut() = handle.clone();
            || ()
        });
    }

    // Mount: gesture listeners on the results container, continuation and
    // release listeners on the window so a drag can never get stuck when the
    // pointer leaves the grid.
    {
        let results_ref = results_ref.clone();
        let controller = controller.clone();
        let taps = taps.clone();
        let scheduler = scheduler.clone();
        let paint_ref_setup = paint_ref.clone();
        let viewer_ref_setup = viewer_ref.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let results: HtmlElement = results_ref
                .cast::<HtmlElement>()
                .expect("results container not attached");

            // One coalesced transform write per animation frame; the frame
            // callback reads whatever the state is at paint time.
            let paint: Rc<dyn Fn()> = {
                let scheduler = scheduler.clone();
                let controller = controller.clone();
                let results = results.clone();
                let window = window.clone();
                Rc::new(move || {
                    if !scheduler.borrow().try_begin() {
                        return;
                    }
                    let scheduler = scheduler.clone();
                    let controller = controller.clone();
                    let results = results.clone();
                    let scheduler_frame = scheduler.clone();
                    let frame = Closure::once_into_js(move || {
                        scheduler_frame.borrow().finish();
                        let value = transform_value(&controller.borrow().zoom);
                        if let Ok(targets) = results.query_selector_all("img.cmp-img") {
                            apply_to_targets(&targets, &value);
                        }
                    });
                    if window.request_animation_frame(frame.unchecked_ref()).is_err() {
                        scheduler.borrow().finish();
                    }
                })
            };
            *paint_ref_setup.borrow_mut() = Some(paint.clone());

            // Wheel zoom over an image cell; never let the page scroll.
            let wheel_cb = {
                let controller = controller.clone();
                let paint = paint.clone();
                Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                    if gesture_target(&e).is_none() {
                        return;
                    }
                    e.prevent_default();
                    if controller.borrow_mut().on_wheel(e.delta_y()) {
                        paint();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            results
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .unwrap();

            let mousedown_cb = {
                let controller = controller.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let frame = match gesture_target(&e) {
                        Some(frame) => frame,
                        None => return,
                    };
                    // also suppresses the native image drag ghost
                    e.prevent_default();
                    let mut c = controller.borrow_mut();
                    c.on_pointer_down(e.client_x() as f64, e.client_y() as f64);
                    let dragging = c.is_dragging();
                    drop(c);
                    if dragging {
                        if let Ok(el) = frame.dyn_into::<HtmlElement>() {
                            let _ = el.style().set_property("cursor", "grabbing");
                        }
                    }
                }) as Box<dyn FnMut(_)>)
            };
            results
                .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
                .unwrap();

            let dblclick_cb = {
                let controller = controller.clone();
                let paint = paint.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    if gesture_target(&e).is_none() {
                        return;
                    }
                    e.prevent_default();
                    controller.borrow_mut().reset();
                    paint();
                }) as Box<dyn FnMut(_)>)
            };
            results
                .add_event_listener_with_callback("dblclick", dblclick_cb.as_ref().unchecked_ref())
                .unwrap();

            let touchstart_cb = {
                let controller = controller.clone();
                let taps = taps.clone();
                let paint = paint.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    if gesture_target(&e).is_none() {
                        return;
                    }
                    e.prevent_default();
                    let points = touch_points(&e.touches());
                    if points.len() == 1 && taps.borrow_mut().register(js_sys::Date::now()) {
                        controller.borrow_mut().reset();
                        paint();
                        return;
                    }
                    controller.borrow_mut().on_touch_start(&points);
                }) as Box<dyn FnMut(_)>)
            };
            results
                .add_event_listener_with_callback(
                    "touchstart",
                    touchstart_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let mousemove_cb = {
                let controller = controller.clone();
                let paint = paint.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let mut c = controller.borrow_mut();
                    if !c.is_dragging() {
                        return;
                    }
                    e.prevent_default();
                    let changed = c.on_pointer_move(e.client_x() as f64, e.client_y() as f64);
                    drop(c);
                    if changed {
                        paint();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let mouseup_cb = {
                let controller = controller.clone();
                let results = results.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    let mut c = controller.borrow_mut();
                    let was_dragging = c.is_dragging();
                    c.on_pointer_up();
                    drop(c);
                    if was_dragging {
                        set_frame_cursor(&results, "grab");
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .unwrap();

            let touchmove_cb = {
                let controller = controller.clone();
                let paint = paint.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let mut c = controller.borrow_mut();
                    if !c.is_engaged() {
                        return;
                    }
                    e.prevent_default();
                    let changed = c.on_touch_move(&touch_points(&e.touches()));
                    drop(c);
                    if changed {
                        paint();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback(
                    "touchmove",
                    touchmove_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let touchend_cb = {
                let controller = controller.clone();
                let results = results.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let remaining = touch_points(&e.touches());
                    controller.borrow_mut().on_touch_end(&remaining);
                    if remaining.is_empty() {
                        set_frame_cursor(&results, "grab");
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("touchend", touchend_cb.as_ref().unchecked_ref())
                .unwrap();
            window
                .add_event_listener_with_callback(
                    "touchcancel",
                    touchend_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let keydown_cb = {
                let viewer_ref = viewer_ref_setup.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    let handle = viewer_ref.borrow().clone();
                    if handle.view_mode != ViewMode::Single || handle.filenames.is_empty() {
                        return;
                    }
                    match e.key().as_str() {
                        "ArrowLeft" => handle.dispatch(ViewerAction::NavigatePrev),
                        "ArrowRight" => handle.dispatch(ViewerAction::NavigateNext),
                        _ => {}
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .unwrap();

            let window_clone = window.clone();
            move || {
                let _ = results.remove_event_listener_with_callback(
                    "wheel",
                    wheel_cb.as_ref().unchecked_ref(),
                );
                let _ = results.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = results.remove_event_listener_with_callback(
                    "dblclick",
                    dblclick_cb.as_ref().unchecked_ref(),
                );
                let _ = results.remove_event_listener_with_callback(
                    "touchstart",
                    touchstart_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "touchmove",
                    touchmove_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "touchend",
                    touchend_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "touchcancel",
                    touchend_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                let _keep_alive = (
                    &wheel_cb,
                    &mousedown_cb,
                    &dblclick_cb,
                    &touchstart_cb,
                    &mousemove_cb,
                    &mouseup_cb,
                    &touchmove_cb,
                    &touchend_cb,
                    &keydown_cb,
                );
            }
        });
    }

    // Zoom dies with the displayed content: view-mode or grid-layout change,
    // navigation, or a new folder selection all go back to identity.
    {
        let controller = controller.clone();
        let paint_ref = paint_ref.clone();
        let deps = (
            props.viewer.view_mode,
            props.viewer.grid_layout,
            props.viewer.current_index,
            props.viewer.version,
        );
        use_effect_with(deps, move |_| {
            controller.borrow_mut().reset();
            if let Some(f) = &*paint_ref.borrow() {
                f();
            }
            || ()
        });
    }

    let viewer = &props.viewer;
    let tv = transform_value(&controller.borrow().zoom);
    let single = viewer.view_mode == ViewMode::Single;
    let names: Vec<String> = if single {
        viewer.current_filename().map(str::to_string).into_iter().collect()
    } else {
        viewer.filenames.clone()
    };

    html! {
        <div ref={results_ref} style="display:flex; flex-direction:column; gap:24px; padding:16px;">
            { for names.iter().map(|name| render_unit(viewer, name, &tv, single)) }
        </div>
    }
}

fn render_unit(state: &ViewerState, filename: &str, tv: &str, single: bool) -> Html {
    let unit_style = if single {
        "display:flex; flex-direction:column; gap:10px; min-height:70vh;"
    } else {
        "display:flex; flex-direction:column; gap:10px;"
    };
    html! {
        <div class="cmp-unit" style={unit_style}>
            <div style="display:flex; justify-content:space-between; align-items:baseline;">
                <span style="font-weight:600;">{ filename }</span>
                <span style="font-size:12px; opacity:0.7;">
                    { format!("{} matches", state.match_count(filename)) }
                </span>
            </div>
            <div style={format!(
                "display:grid; grid-template-columns:repeat({}, 1fr); gap:10px;",
                state.grid_layout.columns()
            )}>
                { for state.folders.iter().map(|folder| render_cell(state, filename, folder, tv)) }
            </div>
        </div>
    }
}

fn render_cell(state: &ViewerState, filename: &str, folder: &str, tv: &str) -> Html {
    let content = match state.entry_for(filename, folder) {
        Some(entry) => html! {
            <img
                class="cmp-img"
                src={entry.url.clone()}
                loading="lazy"
                style={format!("max-width:100%; max-height:100%; transform:{};", tv)}
            />
        },
        None => html! {
            <span style="font-size:12px; opacity:0.6;">{"No match"}</span>
        },
    };
    html! {
        <div class="cmp-cell">
            <div class="cmp-frame" style={FRAME_STYLE}>{ content }</div>
            <div style="font-size:12px; opacity:0.7; margin-top:4px; text-align:center; overflow:hidden; text-overflow:ellipsis; white-space:nowrap;">
                { folder }
            </div>
        </div>
    }
}
