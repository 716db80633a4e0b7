//! DOM wiring: input listeners on the container and window, and popup
//! styling.

use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;
use web_time::Instant;

use super::{client_pos, Shared, POPUP_ID};
use crate::camera::Viewport;
use crate::error::GlobeError;
use crate::input::{InputEvent, MouseButton, Touches};
use crate::overlay::PopupPlacement;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Client rectangle of the container.
pub(super) fn viewport_of(container: &web::HtmlElement) -> Viewport {
    let rect = container.get_bounding_client_rect();
    Viewport {
        left: rect.left() as f32,
        top: rect.top() as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}

/// Rendered popup size, `None` while it is hidden (zero-sized).
pub(super) fn measured_size(popup: &web::HtmlElement) -> Option<Vec2> {
    let width = popup.offset_width();
    let height = popup.offset_height();
    (width > 0 && height > 0).then(|| Vec2::new(width as f32, height as f32))
}

pub(super) fn place_popup(popup: &web::HtmlElement, placement: PopupPlacement) {
    let style = popup.style();
    let _ = style.set_property("left", &format!("{:.0}px", placement.left));
    let _ = style.set_property("top", &format!("{:.0}px", placement.top));
}

pub(super) fn show_popup(popup: &web::HtmlElement) {
    let classes = popup.class_list();
    let _ = classes.remove_1("hidden");
    let _ = classes.add_1("open");
}

pub(super) fn hide_popup(popup: &web::HtmlElement) {
    let classes = popup.class_list();
    let _ = classes.remove_1("open");
    let _ = classes.add_1("hidden");
}

fn inside_popup(event: &web::Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(&format!("#{POPUP_ID}")).ok().flatten())
        .is_some()
}

fn touches_of(list: &web::TouchList) -> Touches {
    Touches::from_points(
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| client_pos(t.client_x(), t.client_y())),
    )
}

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

fn listen<E>(
    target: &web::EventTarget,
    kind: &str,
    passive: Option<bool>,
    handler: impl FnMut(E) + 'static,
) -> Result<(), GlobeError>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let result = match passive {
        Some(passive) => {
            let opts = web::AddEventListenerOptions::new();
            opts.set_passive(passive);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &opts,
            )
        }
        None => target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()),
    };
    result.map_err(|err| GlobeError::Web(format!("{kind} listener rejected: {err:?}")))?;
    closure.forget();
    Ok(())
}

fn dispatch(shared: &Shared, event: InputEvent) {
    shared.engine.borrow_mut().handle_input(event);
    shared.flush_events();
}

/// Attach every input listener the globe needs.
///
/// Presses and clicks bind to the container; moves and releases bind to
/// the window so a drag that leaves the container keeps tracking. Touch
/// and wheel listeners are non-passive so they can suppress scrolling and
/// synthesized clicks.
pub(super) fn wire_listeners(shared: &Rc<Shared>) -> Result<(), GlobeError> {
    let window = web::window().ok_or_else(|| GlobeError::Web("no window".into()))?;
    let container: &web::EventTarget = &shared.container;

    let s = Rc::clone(shared);
    listen(container, "mousedown", None, move |ev: web::MouseEvent| {
        if inside_popup(&ev) {
            return;
        }
        dispatch(
            &s,
            InputEvent::PointerDown {
                button: MouseButton::from_dom(ev.button()),
                pos: client_pos(ev.client_x(), ev.client_y()),
                at: Instant::now(),
            },
        );
    })?;

    let s = Rc::clone(shared);
    listen(&window, "mousemove", None, move |ev: web::MouseEvent| {
        dispatch(
            &s,
            InputEvent::PointerMove {
                pos: client_pos(ev.client_x(), ev.client_y()),
                at: Instant::now(),
            },
        );
    })?;

    let s = Rc::clone(shared);
    listen(&window, "mouseup", None, move |ev: web::MouseEvent| {
        dispatch(
            &s,
            InputEvent::PointerUp {
                button: MouseButton::from_dom(ev.button()),
            },
        );
    })?;

    let s = Rc::clone(shared);
    listen(container, "mouseleave", None, move |_: web::MouseEvent| {
        dispatch(&s, InputEvent::PointerLeave);
    })?;

    let s = Rc::clone(shared);
    listen(container, "click", None, move |ev: web::MouseEvent| {
        if inside_popup(&ev) {
            return;
        }
        dispatch(
            &s,
            InputEvent::Click {
                pos: client_pos(ev.client_x(), ev.client_y()),
            },
        );
    })?;

    wire_touch(shared, container)?;

    let s = Rc::clone(shared);
    listen(container, "wheel", Some(false), move |ev: web::WheelEvent| {
        ev.prevent_default();
        dispatch(
            &s,
            InputEvent::Wheel {
                delta_y: ev.delta_y() as f32,
            },
        );
    })?;

    let s = Rc::clone(shared);
    listen(&window, "keydown", None, move |ev: web::KeyboardEvent| {
        let handled = s.engine.borrow_mut().handle_key(&ev.key());
        if handled {
            s.flush_events();
        }
    })?;

    let s = Rc::clone(shared);
    listen(&window, "resize", None, move |_: web::Event| {
        s.sync_viewport();
    })?;

    Ok(())
}

fn wire_touch(shared: &Rc<Shared>, container: &web::EventTarget) -> Result<(), GlobeError> {
    let s = Rc::clone(shared);
    listen(container, "touchstart", Some(false), move |ev: web::TouchEvent| {
        if inside_popup(&ev) {
            return;
        }
        dispatch(
            &s,
            InputEvent::TouchStart {
                touches: touches_of(&ev.touches()),
                at: Instant::now(),
            },
        );
    })?;

    let s = Rc::clone(shared);
    listen(container, "touchmove", Some(false), move |ev: web::TouchEvent| {
        ev.prevent_default();
        dispatch(
            &s,
            InputEvent::TouchMove {
                touches: touches_of(&ev.touches()),
                at: Instant::now(),
            },
        );
    })?;

    let s = Rc::clone(shared);
    listen(container, "touchend", Some(false), move |ev: web::TouchEvent| {
        // taps are picked here; the browser's synthesized click would pick
        // a second time. Popup buttons still need theirs.
        if !inside_popup(&ev) {
            ev.prevent_default();
        }
        let lifted = touches_of(&ev.changed_touches()).first().unwrap_or(Vec2::ZERO);
        dispatch(
            &s,
            InputEvent::TouchEnd {
                remaining: ev.touches().length() as usize,
                pos: lifted,
                at: Instant::now(),
            },
        );
    })?;

    let s = Rc::clone(shared);
    listen(container, "touchcancel", Some(false), move |_: web::TouchEvent| {
        dispatch(&s, InputEvent::TouchCancel);
    })?;

    Ok(())
}
