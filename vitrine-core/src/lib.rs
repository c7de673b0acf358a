/// Vitrine core library - scene building and animation for the showcase page
///
/// Holds everything that does not depend on where the views are displayed:
/// geometry, scene graph, camera math, the five view builders with their
/// per-frame updaters, configuration, theme state and the [`Stage`] that
/// drives them. Hosts plug in through the traits in [`host`].

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod light;
pub mod loading;
pub mod material;
pub mod projection;
pub mod render;
pub mod rng;
pub mod scene;
pub mod stage;
pub mod theme;
pub mod transform;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use color::Color;
pub use config::Config;
pub use error::{Error, Result};
pub use geometry::{Mesh, Triangle, Vertex};
pub use host::{Host, Mount, Renderer, ThemeTarget};
pub use input::{FrameInput, Pointer};
pub use loading::{LoadingPhase, LoadingScreen};
pub use projection::Camera;
pub use scene::{NodeId, Scene};
pub use stage::Stage;
pub use theme::{Theme, ThemeSwitch};
pub use transform::{RotationState, Transform};
pub use view::{View, ViewKey};
