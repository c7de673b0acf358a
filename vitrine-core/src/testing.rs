/// In-memory host used by the unit tests

use crate::host::{Host, Mount, Renderer, ThemeTarget};
use crate::projection::Camera;
use crate::scene::Scene;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone)]
pub struct FakeMount {
    size: Rc<Cell<(u32, u32)>>,
}

impl Mount for FakeMount {
    fn size(&self) -> (u32, u32) {
        self.size.get()
    }
}

/// What a renderer was asked to do, readable after the stage owns it
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderLog {
    pub size: (u32, u32),
    pub pixel_ratio: f64,
    pub frames: usize,
    pub last_mesh_count: usize,
    pub detached: usize,
}

pub struct RecordingRenderer {
    log: Rc<RefCell<RenderLog>>,
}

impl RecordingRenderer {
    pub fn log(&self) -> RenderLog {
        self.log.borrow().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.log.borrow_mut().size = (width, height);
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.log.borrow_mut().pixel_ratio = ratio;
    }

    fn render(&mut self, scene: &Scene, _camera: &Camera) {
        let mut log = self.log.borrow_mut();
        log.frames += 1;
        log.last_mesh_count = scene.meshes().len();
    }

    fn detach(&mut self) {
        self.log.borrow_mut().detached += 1;
    }
}

pub struct FakeHost {
    mounts: HashMap<String, Rc<Cell<(u32, u32)>>>,
    viewport: (u32, u32),
    pixel_ratio: f64,
    pub renderers_created: usize,
}

impl FakeHost {
    pub fn new(viewport: (u32, u32)) -> Self {
        Self {
            mounts: HashMap::new(),
            viewport,
            pixel_ratio: 1.0,
            renderers_created: 0,
        }
    }

    /// Host exposing every default mount id at `size`
    pub fn with_all_mounts(size: (u32, u32)) -> Self {
        let mut host = Self::new(size);
        for id in ["canvas-container", "hero-3d", "product-3d-1", "product-3d-2", "tech-3d"] {
            host.add_mount(id, size);
        }
        host
    }

    pub fn add_mount(&mut self, id: &str, size: (u32, u32)) {
        self.mounts.insert(id.to_string(), Rc::new(Cell::new(size)));
    }

    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }

    /// Resize the viewport and every mount
    pub fn resize_all(&mut self, size: (u32, u32)) {
        self.viewport = size;
        for mount in self.mounts.values() {
            mount.set(size);
        }
    }
}

impl Host for FakeHost {
    type Mount = FakeMount;
    type Renderer = RecordingRenderer;

    fn find_mount(&self, id: &str) -> Option<FakeMount> {
        self.mounts.get(id).map(|size| FakeMount { size: size.clone() })
    }

    fn create_renderer(&mut self, _mount: &FakeMount) -> RecordingRenderer {
        self.renderers_created += 1;
        RecordingRenderer {
            log: Rc::new(RefCell::new(RenderLog::default())),
        }
    }

    fn viewport_size(&self) -> (u32, u32) {
        self.viewport
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }
}

/// Page body with a class list and two style properties
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FakeBody {
    pub classes: Vec<String>,
    pub background: Option<String>,
    pub color: Option<String>,
}

impl ThemeTarget for FakeBody {
    fn add_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    fn set_background(&mut self, value: &str) {
        self.background = Some(value.to_string());
    }

    fn set_color(&mut self, value: &str) {
        self.color = Some(value.to_string());
    }
}
