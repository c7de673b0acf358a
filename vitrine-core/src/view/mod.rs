/// The five showcase views
///
/// Each view owns its scene and camera, keeps named handles to the nodes it
/// animates, and recomputes them from a [`FrameInput`] every frame.

pub mod background;
pub mod hero;
pub mod product;
pub mod tech;

use crate::config::Config;
use crate::error::Error;
use crate::input::FrameInput;
use crate::light::Light;
use crate::projection::Camera;
use crate::rng::SceneRng;
use crate::scene::Scene;
use std::fmt;
use std::str::FromStr;

pub use background::{BackgroundView, FloatingCube};
pub use hero::{HeroView, RobotParts};
pub use product::{ProductParts, ProductView};
pub use tech::{CircuitBoard, TechView};

/// Accent color shared by the key lights of every view
pub(crate) const ACCENT: u32 = 0x00d4ff;
pub(crate) const AMBIENT: u32 = 0x404040;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewKey {
    Background,
    Hero,
    Processor,
    Interface,
    Tech,
}

impl ViewKey {
    /// Bootstrap order
    pub const ALL: [ViewKey; 5] = [
        ViewKey::Background,
        ViewKey::Hero,
        ViewKey::Processor,
        ViewKey::Interface,
        ViewKey::Tech,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKey::Background => "background",
            ViewKey::Hero => "hero",
            ViewKey::Processor => "product1",
            ViewKey::Interface => "product2",
            ViewKey::Tech => "tech",
        }
    }

    /// Views sized to the whole viewport rather than their container
    pub fn fills_viewport(&self) -> bool {
        matches!(self, ViewKey::Background)
    }

    fn stream(&self) -> u64 {
        *self as u64 + 1
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::UnknownView(s.to_string()))
    }
}

/// A mounted scene plus its per-frame updater
pub trait View {
    fn key(&self) -> ViewKey;

    /// Recompute every animated property for this frame
    fn update(&mut self, input: &FrameInput);

    fn scene(&self) -> &Scene;

    fn camera(&self) -> &Camera;

    fn camera_mut(&mut self) -> &mut Camera;
}

/// Build the view for `key` sized to `width` x `height`
pub fn build(key: ViewKey, config: &Config, width: u32, height: u32, seed: u64) -> Box<dyn View> {
    let mut rng = SceneRng::new(seed).fork(key.stream());
    match key {
        ViewKey::Background => Box::new(BackgroundView::new(&config.background, width, height, &mut rng)),
        ViewKey::Hero => Box::new(HeroView::new(&config.hero, width, height)),
        ViewKey::Processor => Box::new(ProductView::processor(&config.product, width, height, &mut rng)),
        ViewKey::Interface => Box::new(ProductView::interface(&config.product, width, height, &mut rng)),
        ViewKey::Tech => Box::new(TechView::new(&config.tech, width, height, &mut rng)),
    }
}

/// Ambient fill plus one accent key light
pub(crate) fn light_scene(scene: &mut Scene, ambient_intensity: f32, key_light: Light) {
    scene.add_light(Light::ambient(AMBIENT, ambient_intensity));
    scene.add_light(key_light);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match_registry_names() {
        let names: Vec<&str> = ViewKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, ["background", "hero", "product1", "product2", "tech"]);
        assert!(ViewKey::Background.fills_viewport());
        assert!(!ViewKey::Tech.fills_viewport());
    }

    #[test]
    fn test_parse_key() {
        assert_eq!("product2".parse::<ViewKey>().unwrap(), ViewKey::Interface);
        assert!(matches!("robot".parse::<ViewKey>(), Err(Error::UnknownView(_))));
    }

    #[test]
    fn test_build_every_view() {
        let config = Config::default();
        for key in ViewKey::ALL {
            let view = build(key, &config, 640, 480, 3);
            assert_eq!(view.key(), key);
            assert!(!view.scene().is_empty());
            assert_eq!(view.scene().lights().len(), 2);
            assert!((view.camera().aspect - 640.0 / 480.0).abs() < 1e-6);
        }
    }
}
