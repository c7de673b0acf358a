/// The single frame driver
///
/// [`Stage`] owns every mounted view together with its renderer. A host calls
/// [`Stage::tick`] once per display frame until [`Stage::stop`] is called.

use crate::config::Config;
use crate::host::{Host, Mount, Renderer};
use crate::input::FrameInput;
use crate::view::{self, View, ViewKey};
use tracing::{debug, info};

struct MountedView<H: Host> {
    view: Box<dyn View>,
    mount: H::Mount,
    renderer: H::Renderer,
}

pub struct Stage<H: Host> {
    views: Vec<MountedView<H>>,
    running: bool,
}

impl<H: Host> Stage<H> {
    /// Mount every view whose container exists on the host.
    ///
    /// `fallback_seed` is used when the config does not pin one.
    pub fn bootstrap(host: &mut H, config: &Config, fallback_seed: u64) -> Self {
        let seed = config.seed.unwrap_or(fallback_seed);
        let pixel_ratio = host.device_pixel_ratio().min(config.max_pixel_ratio);
        let mut views = Vec::with_capacity(ViewKey::ALL.len());

        for key in ViewKey::ALL {
            let mount_id = config.mounts.for_view(key);
            let Some(mount) = host.find_mount(mount_id) else {
                debug!(view = %key, mount = mount_id, "Mount not found, skipping view");
                continue;
            };

            let (width, height) = surface_size(host, &mount, key);
            let view = view::build(key, config, width, height, seed);
            let mut renderer = host.create_renderer(&mount);
            renderer.set_pixel_ratio(pixel_ratio);
            renderer.set_size(width, height);

            info!(view = %key, width, height, "View mounted");
            views.push(MountedView { view, mount, renderer });
        }

        info!(count = views.len(), seed, "Stage ready");
        Self { views, running: true }
    }

    /// Update then render every view for one frame.
    ///
    /// Returns `false` once the stage has been stopped.
    pub fn tick(&mut self, input: &FrameInput) -> bool {
        if !self.running {
            return false;
        }
        for mounted in &mut self.views {
            mounted.view.update(input);
            mounted.renderer.render(mounted.view.scene(), mounted.view.camera());
        }
        true
    }

    /// Re-read every surface size and propagate it to cameras and renderers
    pub fn resize(&mut self, host: &H) {
        for mounted in &mut self.views {
            let (width, height) = surface_size(host, &mounted.mount, mounted.view.key());
            mounted.view.camera_mut().set_viewport(width, height);
            mounted.renderer.set_size(width, height);
            debug!(view = %mounted.view.key(), width, height, "View resized");
        }
    }

    /// Halt ticking and detach every renderer from its surface
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        for mounted in &mut self.views {
            mounted.renderer.detach();
        }
        info!(count = self.views.len(), "Stage stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Keys of the mounted views, in bootstrap order
    pub fn keys(&self) -> impl Iterator<Item = ViewKey> + '_ {
        self.views.iter().map(|mounted| mounted.view.key())
    }

    pub fn view(&self, key: ViewKey) -> Option<&dyn View> {
        self.find(key).map(|mounted| mounted.view.as_ref())
    }

    pub fn renderer(&self, key: ViewKey) -> Option<&H::Renderer> {
        self.find(key).map(|mounted| &mounted.renderer)
    }

    pub fn renderer_mut(&mut self, key: ViewKey) -> Option<&mut H::Renderer> {
        self.views
            .iter_mut()
            .find(|mounted| mounted.view.key() == key)
            .map(|mounted| &mut mounted.renderer)
    }

    fn find(&self, key: ViewKey) -> Option<&MountedView<H>> {
        self.views.iter().find(|mounted| mounted.view.key() == key)
    }
}

fn surface_size<H: Host>(host: &H, mount: &H::Mount, key: ViewKey) -> (u32, u32) {
    if key.fills_viewport() {
        host.viewport_size()
    } else {
        mount.size()
    }
}
