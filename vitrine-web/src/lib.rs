/// Vitrine web - the showcase views rendered into the page
///
/// Each view draws into a canvas appended to its container element. A single
/// `requestAnimationFrame` chain drives the [`Stage`] until [`stop`] is called,
/// which also removes every listener and canvas the last [`start`] added.
mod canvas;
mod host;

pub use canvas::CanvasRenderer;
pub use host::{BodyTarget, WebHost, WebMount};

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{info, warn};
use vitrine_core::{Config, FrameInput, Host, LoadingScreen, Pointer, Stage, ThemeSwitch};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlElement, MouseEvent, Window};

/// Written by event listeners, read once per frame
#[derive(Debug, Default, Clone, Copy)]
struct InputState {
    scroll_y: f32,
    pointer: Pointer,
}

impl InputState {
    fn snapshot(&self, time: f64) -> FrameInput {
        FrameInput::at(time).with_scroll(self.scroll_y).with_pointer(self.pointer)
    }
}

/// Event listener that unregisters itself when dropped
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let callback: &js_sys::Function = self.callback.as_ref().unchecked_ref();
        if let Err(err) = self.target.remove_event_listener_with_callback(self.event, callback) {
            warn!(event = self.event, error = ?err, "Failed to remove listener");
        }
    }
}

/// The self-rescheduling frame closure and its pending request
struct FrameLoop {
    slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    request: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    fn cancel(self, window: &Window) {
        if let Some(id) = self.request.take() {
            if let Err(err) = window.cancel_animation_frame(id) {
                warn!(error = ?err, "Failed to cancel frame");
            }
        }
        let closure = self.slot.borrow_mut().take();
        drop(closure);
    }
}

struct App {
    host: WebHost,
    stage: Stage<WebHost>,
    input: InputState,
    started_ms: f64,
    listeners: Vec<Listener>,
    frame: Option<FrameLoop>,
}

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
}

/// Entry point for WASM module
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO)
            .build(),
    );
}

/// Mount every view found on the page and start animating.
///
/// `config_json` overrides the defaults; any field may be omitted. A running
/// instance is torn down first, so calling this twice never doubles listeners.
#[wasm_bindgen]
pub fn start(config_json: Option<String>) -> Result<(), JsValue> {
    stop();

    let config = match config_json {
        Some(json) => Config::from_json_str(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => Config::default(),
    };

    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let mut host = WebHost::new(window.clone(), document);

    let seed = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let stage = Stage::bootstrap(&mut host, &config, seed);

    let app = Rc::new(RefCell::new(App {
        host,
        stage,
        input: InputState::default(),
        started_ms: now_ms(&window),
        listeners: Vec::new(),
        frame: None,
    }));

    if let Err(err) = wire(&window, &app, &config) {
        teardown(&app);
        return Err(err);
    }

    APP.with(|slot| *slot.borrow_mut() = Some(app));
    info!("Vitrine started");
    Ok(())
}

/// Stop the animation loop and remove everything [`start`] added to the page
#[wasm_bindgen]
pub fn stop() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    if let Some(app) = app {
        teardown(&app);
        info!("Vitrine stopped");
    }
}

fn wire(window: &Window, app: &Rc<RefCell<App>>, config: &Config) -> Result<(), JsValue> {
    let toggle = {
        let app = app.borrow();
        schedule_loading_screen(&app.host, config)?;
        install_theme_toggle(&app.host, config)?
    };
    let mut listeners = install_listeners(window, app)?;
    listeners.extend(toggle);
    app.borrow_mut().listeners = listeners;

    let frame = start_animation(window, app.clone())?;
    app.borrow_mut().frame = Some(frame);
    Ok(())
}

/// Break the closure cycles and detach the canvases
fn teardown(app: &Rc<RefCell<App>>) {
    let (window, listeners, frame) = {
        let mut app = app.borrow_mut();
        app.stage.stop();
        let window = app.host.window().clone();
        let frame = app.frame.take();
        (window, std::mem::take(&mut app.listeners), frame)
    };
    if let Some(frame) = frame {
        frame.cancel(&window);
    }
    drop(listeners);
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

fn install_theme_toggle(host: &WebHost, config: &Config) -> Result<Option<Listener>, JsValue> {
    let Some(body) = host.document().body() else {
        warn!("Document has no body, theme left unstyled");
        return Ok(None);
    };
    let mut target = BodyTarget::new(body);
    let mut switch = ThemeSwitch::new(config.theme, &mut target);

    let Some(toggle) = host.element(&config.mounts.theme_toggle) else {
        return Ok(None);
    };
    let listener = Listener::attach(&toggle, "click", move |_| {
        switch.toggle(&mut target);
    })?;
    Ok(Some(listener))
}

fn schedule_loading_screen(host: &WebHost, config: &Config) -> Result<(), JsValue> {
    let Some(element) = host
        .element(&config.mounts.loading_screen)
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(());
    };
    let screen = LoadingScreen::new(&config.loading);
    let hide_after = screen.hide_after_fade_ms();
    let window = host.window().clone();

    let fade = Closure::once(move || {
        element.style().set_property("opacity", "0").ok();
        let hide = Closure::once(move || {
            element.style().set_property("display", "none").ok();
        });
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(hide.as_ref().unchecked_ref(), hide_after as i32)
            .ok();
        hide.forget();
    });
    host.window()
        .set_timeout_with_callback_and_timeout_and_arguments_0(fade.as_ref().unchecked_ref(), screen.fade_at_ms() as i32)?;
    fade.forget();
    Ok(())
}

fn install_listeners(window: &Window, app: &Rc<RefCell<App>>) -> Result<Vec<Listener>, JsValue> {
    let on_scroll = {
        let app = app.clone();
        let window = window.clone();
        move |_: Event| {
            app.borrow_mut().input.scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
        }
    };

    let on_mouse_move = {
        let app = app.clone();
        move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let mut app = app.borrow_mut();
            let (width, height) = app.host.viewport_size();
            app.input.pointer = Pointer::from_client(
                event.client_x() as f32,
                event.client_y() as f32,
                width as f32,
                height as f32,
            );
        }
    };

    let on_resize = {
        let app = app.clone();
        move |_: Event| {
            let mut app = app.borrow_mut();
            let App { host, stage, .. } = &mut *app;
            stage.resize(host);
        }
    };

    Ok(vec![
        Listener::attach(window, "scroll", on_scroll)?,
        Listener::attach(window, "mousemove", on_mouse_move)?,
        Listener::attach(window, "resize", on_resize)?,
    ])
}

fn start_animation(window: &Window, app: Rc<RefCell<App>>) -> Result<FrameLoop, JsValue> {
    // The frame closure re-registers itself through this slot
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let request: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let next = slot.clone();
    let pending = request.clone();
    let frame_window = window.clone();

    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending.set(None);
        let running = {
            let mut app = app.borrow_mut();
            let time = (now_ms(&frame_window) - app.started_ms) / 1000.0;
            let input = app.input.snapshot(time);
            app.stage.tick(&input)
        };
        if !running {
            info!("Animation loop ended");
            return;
        }

        if let Some(callback) = next.borrow().as_ref() {
            match frame_window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                Ok(id) => pending.set(Some(id)),
                Err(err) => warn!(error = ?err, "Failed to schedule frame"),
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = slot.borrow().as_ref() {
        request.set(Some(window.request_animation_frame(callback.as_ref().unchecked_ref())?));
    }
    Ok(FrameLoop { slot, request })
}
