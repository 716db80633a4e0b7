//! Browser front end (feature `web`).
//!
//! [`GlobeHandle`] owns a [`GlobeEngine`] shared between DOM listeners and
//! a `requestAnimationFrame` loop through `Rc`. Every listener and every
//! frame runs to completion on the main thread, so the engine borrow is
//! never held across a call back into JavaScript.

mod dom;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;
use web_time::Instant;

use crate::engine::{GlobeCommand, GlobeEngine, GlobeEvent, SelectionSource};
use crate::error::GlobeError;
use crate::options::Options;
use crate::scene::MarkerId;

/// Element id of the detail popup; clicks inside it never reach the globe.
pub(crate) const POPUP_ID: &str = "sticker-popout";

impl From<GlobeError> for JsValue {
    fn from(err: GlobeError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// State shared by listeners and the frame loop.
pub(crate) struct Shared {
    pub(crate) engine: RefCell<GlobeEngine>,
    pub(crate) container: web::HtmlElement,
    popup: Option<web::HtmlElement>,
    on_event: RefCell<Option<js_sys::Function>>,
    running: Cell<bool>,
}

impl Shared {
    /// Re-read the container rectangle and push it to the engine.
    pub(crate) fn sync_viewport(&self) {
        let viewport = dom::viewport_of(&self.container);
        self.engine.borrow_mut().resize(viewport);
    }

    /// Drain engine events into popup classes and the JS callback.
    pub(crate) fn flush_events(&self) {
        let events = self.engine.borrow_mut().take_events();
        for event in events {
            if let Some(popup) = &self.popup {
                match event {
                    GlobeEvent::PopupOpened { .. } => dom::show_popup(popup),
                    GlobeEvent::PopupClosed => dom::hide_popup(popup),
                    GlobeEvent::Selected { .. } => {}
                }
            }
            self.notify(&event);
        }
    }

    fn notify(&self, event: &GlobeEvent) {
        let callback = self.on_event.borrow().clone();
        let Some(callback) = callback else {
            return;
        };
        match serde_json::to_string(event) {
            Ok(json) => {
                if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("event callback threw: {err:?}");
                }
            }
            Err(err) => log::warn!("failed to serialize {event:?}: {err}"),
        }
    }

    fn frame(&self) {
        if let Some(popup) = &self.popup {
            let size = dom::measured_size(popup);
            self.engine.borrow_mut().set_popup_size(size);
        }
        self.engine.borrow_mut().update(Instant::now());
        self.flush_events();
        if let Some(popup) = &self.popup {
            if let Some(placement) = self.engine.borrow().popup() {
                dom::place_popup(popup, placement);
            }
        }
    }
}

/// JavaScript-facing handle to a globe attached to a container element.
#[wasm_bindgen]
pub struct GlobeHandle {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl GlobeHandle {
    /// Attach to the element with id `container_id`, wire input listeners,
    /// and start the frame loop.
    ///
    /// `options_toml` may override any tuning; missing keys keep defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_id: &str,
        options_toml: Option<String>,
    ) -> Result<GlobeHandle, JsValue> {
        init_logging();
        let options = match options_toml {
            Some(toml) => Options::from_toml_str(&toml)?,
            None => Options::default(),
        };

        let document = web::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GlobeError::Web("no document".into()))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| GlobeError::Web(format!("missing #{container_id}")))?
            .dyn_into::<web::HtmlElement>()
            .map_err(|_| GlobeError::Web(format!("#{container_id} is not an HTML element")))?;
        let popup = document
            .get_element_by_id(POPUP_ID)
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        if popup.is_none() {
            log::warn!("no #{POPUP_ID} element; popup placement disabled");
        }

        let viewport = dom::viewport_of(&container);
        let shared = Rc::new(Shared {
            engine: RefCell::new(GlobeEngine::new(options, viewport)),
            container,
            popup,
            on_event: RefCell::new(None),
            running: Cell::new(true),
        });
        dom::wire_listeners(&shared)?;
        start_loop(&shared);
        log::info!("globe attached to #{container_id}");
        Ok(Self { shared })
    }

    /// Replace every marker. `lat_lng` holds `[lat, lng]` pairs in degrees;
    /// marker ids are pair indices.
    #[wasm_bindgen(js_name = setMarkers)]
    pub fn set_markers(&self, lat_lng: &[f32]) {
        if lat_lng.len() % 2 != 0 {
            log::warn!("set_markers: odd coordinate count {}", lat_lng.len());
        }
        let markers = lat_lng
            .chunks_exact(2)
            .enumerate()
            .map(|(i, pair)| (MarkerId(i), pair[0], pair[1]));
        self.shared.engine.borrow_mut().set_markers(markers);
        self.shared.flush_events();
    }

    /// Fly to a marker. Returns `false` for unknown indices or during a
    /// drag.
    pub fn select(&self, index: usize) -> bool {
        let selected = self
            .shared
            .engine
            .borrow_mut()
            .select_marker(MarkerId(index), SelectionSource::Command);
        self.shared.flush_events();
        selected
    }

    /// Release the lock and hide the popup.
    #[wasm_bindgen(js_name = closePopup)]
    pub fn close_popup(&self) {
        self.execute(GlobeCommand::ClosePopup);
    }

    /// Return to the startup orbit.
    #[wasm_bindgen(js_name = resetView)]
    pub fn reset_view(&self) {
        self.execute(GlobeCommand::ResetView);
    }

    /// Re-read the container size after a layout change.
    pub fn resize(&self) {
        self.shared.sync_viewport();
    }

    /// Register `callback(json)` for selection and popup events.
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: js_sys::Function) {
        *self.shared.on_event.borrow_mut() = Some(callback);
    }

    /// Column-major view-projection matrix.
    #[wasm_bindgen(js_name = viewProj)]
    pub fn view_proj(&self) -> js_sys::Float32Array {
        let engine = self.shared.engine.borrow();
        let flat: Vec<f32> = engine
            .uniform()
            .view_proj
            .iter()
            .flatten()
            .copied()
            .collect();
        js_sys::Float32Array::from(flat.as_slice())
    }

    /// Raw camera uniform block.
    #[wasm_bindgen(js_name = uniformBytes)]
    pub fn uniform_bytes(&self) -> js_sys::Uint8Array {
        let engine = self.shared.engine.borrow();
        js_sys::Uint8Array::from(bytemuck::bytes_of(engine.uniform()))
    }

    /// Per-marker instance data (position, scale, color, index).
    #[wasm_bindgen(js_name = markerInstances)]
    pub fn marker_instances(&self) -> js_sys::Float32Array {
        let instances = self.shared.engine.borrow().marker_instances();
        js_sys::Float32Array::from(bytemuck::cast_slice::<_, f32>(&instances))
    }

    /// Billboard scale shared by every marker.
    #[wasm_bindgen(js_name = markerScale)]
    pub fn marker_scale(&self) -> f32 {
        self.shared.engine.borrow().marker_scale()
    }

    /// Current camera distance.
    pub fn radius(&self) -> f32 {
        self.shared.engine.borrow().radius()
    }

    /// Index of the locked marker, or -1.
    #[wasm_bindgen(js_name = lockedMarker)]
    pub fn locked_marker(&self) -> i32 {
        self.shared.engine.borrow().uniform().locked_marker
    }

    /// Stop the frame loop. Listeners stay attached but the camera no
    /// longer advances.
    pub fn stop(&self) {
        self.shared.running.set(false);
    }
}

impl GlobeHandle {
    fn execute(&self, command: GlobeCommand) {
        self.shared.engine.borrow_mut().execute(command);
        self.shared.flush_events();
    }
}

fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }
}

fn start_loop(shared: &Rc<Shared>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&tick);
    let shared = Rc::clone(shared);
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !shared.running.get() {
            return;
        }
        shared.frame();
        if let Some(cb) = next.borrow().as_ref() {
            request_frame(cb);
        }
    }) as Box<dyn FnMut()>));
    if let Some(cb) = tick.borrow().as_ref() {
        request_frame(cb);
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) {
    if let Some(w) = web::window() {
        if let Err(err) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {err:?}");
        }
    }
}

/// Client coordinates of a mouse event.
pub(crate) fn client_pos(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32, y as f32)
}
