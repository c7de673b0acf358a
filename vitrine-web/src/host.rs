/// Browser page as a view host
use crate::canvas::CanvasRenderer;
use tracing::warn;
use vitrine_core::{Host, Mount, ThemeTarget};
use web_sys::{Document, Element, HtmlElement, Window};

/// Container element a canvas is appended to
pub struct WebMount {
    element: Element,
}

impl Mount for WebMount {
    fn size(&self) -> (u32, u32) {
        (
            self.element.client_width().max(0) as u32,
            self.element.client_height().max(0) as u32,
        )
    }
}

pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }
}

impl Host for WebHost {
    type Mount = WebMount;
    type Renderer = CanvasRenderer;

    fn find_mount(&self, id: &str) -> Option<WebMount> {
        self.element(id).map(|element| WebMount { element })
    }

    fn create_renderer(&mut self, mount: &WebMount) -> CanvasRenderer {
        CanvasRenderer::attach(&self.document, &mount.element)
    }

    fn viewport_size(&self) -> (u32, u32) {
        let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
        };
        (dimension(self.window.inner_width()), dimension(self.window.inner_height()))
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }
}

/// `document.body` styled by the theme switch
pub struct BodyTarget {
    body: HtmlElement,
}

impl BodyTarget {
    pub fn new(body: HtmlElement) -> Self {
        Self { body }
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(err) = self.body.style().set_property(property, value) {
            warn!(property, error = ?err, "Failed to set body style");
        }
    }
}

impl ThemeTarget for BodyTarget {
    fn add_class(&mut self, class: &str) {
        self.body.class_list().add_1(class).ok();
    }

    fn remove_class(&mut self, class: &str) {
        self.body.class_list().remove_1(class).ok();
    }

    fn set_background(&mut self, value: &str) {
        self.set_style("background", value);
    }

    fn set_color(&mut self, value: &str) {
        self.set_style("color", value);
    }
}
