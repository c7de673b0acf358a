/// Configuration loading and validation
///
/// Every visual constant has a default, so an empty document is a valid
/// config. Hosts load TOML (terminal) or JSON (browser).

use crate::color::Color;
use crate::error::{Error, Result};
use crate::theme::Theme;
use crate::view::ViewKey;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Seed for procedural placement; the host picks one when unset
    #[serde(default)]
    pub seed: Option<u64>,
    /// Upper bound applied to the host's device pixel ratio
    #[serde(default = "default_max_pixel_ratio")]
    pub max_pixel_ratio: f64,
    /// Theme applied at startup
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub mounts: MountConfig,
    #[serde(default)]
    pub background: BackgroundConfig,
    #[serde(default)]
    pub hero: HeroConfig,
    #[serde(default)]
    pub product: ProductConfig,
    #[serde(default)]
    pub tech: TechConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            max_pixel_ratio: default_max_pixel_ratio(),
            theme: Theme::default(),
            mounts: MountConfig::default(),
            background: BackgroundConfig::default(),
            hero: HeroConfig::default(),
            product: ProductConfig::default(),
            tech: TechConfig::default(),
            loading: LoadingConfig::default(),
        }
    }
}

fn default_max_pixel_ratio() -> f64 {
    2.0
}

/// Element ids the views attach to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountConfig {
    #[serde(default = "default_background_mount")]
    pub background: String,
    #[serde(default = "default_hero_mount")]
    pub hero: String,
    #[serde(default = "default_processor_mount")]
    pub processor: String,
    #[serde(default = "default_interface_mount")]
    pub interface: String,
    #[serde(default = "default_tech_mount")]
    pub tech: String,
    /// Control that flips the theme
    #[serde(default = "default_theme_toggle")]
    pub theme_toggle: String,
    /// Overlay hidden once the page has settled
    #[serde(default = "default_loading_screen")]
    pub loading_screen: String,
}

impl MountConfig {
    pub fn for_view(&self, key: ViewKey) -> &str {
        match key {
            ViewKey::Background => &self.background,
            ViewKey::Hero => &self.hero,
            ViewKey::Processor => &self.processor,
            ViewKey::Interface => &self.interface,
            ViewKey::Tech => &self.tech,
        }
    }
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            background: default_background_mount(),
            hero: default_hero_mount(),
            processor: default_processor_mount(),
            interface: default_interface_mount(),
            tech: default_tech_mount(),
            theme_toggle: default_theme_toggle(),
            loading_screen: default_loading_screen(),
        }
    }
}

fn default_background_mount() -> String {
    "canvas-container".to_string()
}

fn default_hero_mount() -> String {
    "hero-3d".to_string()
}

fn default_processor_mount() -> String {
    "product-3d-1".to_string()
}

fn default_interface_mount() -> String {
    "product-3d-2".to_string()
}

fn default_tech_mount() -> String {
    "tech-3d".to_string()
}

fn default_theme_toggle() -> String {
    "modeToggle".to_string()
}

fn default_loading_screen() -> String {
    "loadingScreen".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    /// Number of floating cubes arranged on the ring
    #[serde(default = "default_cube_count")]
    pub cube_count: usize,
    /// Cube colors as `0xRRGGBB`, cycled by index
    #[serde(default = "default_palette")]
    pub palette: Vec<Color>,
    #[serde(default = "default_background_distance")]
    pub camera_distance: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            cube_count: default_cube_count(),
            palette: default_palette(),
            camera_distance: default_background_distance(),
        }
    }
}

fn default_cube_count() -> usize {
    6
}

fn default_palette() -> Vec<Color> {
    [0x00d4ff, 0x00ffff, 0x0066ff, 0x0099ff].into_iter().map(Color::from_hex).collect()
}

fn default_background_distance() -> f32 {
    20.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroConfig {
    /// Camera shift per unit of normalized pointer offset
    #[serde(default = "default_parallax")]
    pub parallax: f32,
    #[serde(default = "default_hero_distance")]
    pub camera_distance: f32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            parallax: default_parallax(),
            camera_distance: default_hero_distance(),
        }
    }
}

fn default_parallax() -> f32 {
    0.25
}

fn default_hero_distance() -> f32 {
    5.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    /// Yaw added to the processor every reference frame (radians)
    #[serde(default = "default_processor_spin")]
    pub processor_spin: f32,
    /// Yaw removed from the interface every reference frame (radians)
    #[serde(default = "default_interface_spin")]
    pub interface_spin: f32,
    #[serde(default = "default_product_distance")]
    pub camera_distance: f32,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            processor_spin: default_processor_spin(),
            interface_spin: default_interface_spin(),
            camera_distance: default_product_distance(),
        }
    }
}

fn default_processor_spin() -> f32 {
    0.003
}

fn default_interface_spin() -> f32 {
    0.002
}

fn default_product_distance() -> f32 {
    3.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechConfig {
    #[serde(default = "default_trace_count")]
    pub trace_count: usize,
    #[serde(default = "default_component_count")]
    pub component_count: usize,
    #[serde(default = "default_tech_distance")]
    pub camera_distance: f32,
}

impl Default for TechConfig {
    fn default() -> Self {
        Self {
            trace_count: default_trace_count(),
            component_count: default_component_count(),
            camera_distance: default_tech_distance(),
        }
    }
}

fn default_trace_count() -> usize {
    20
}

fn default_component_count() -> usize {
    15
}

fn default_tech_distance() -> f32 {
    8.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingConfig {
    /// Time the overlay stays fully visible
    #[serde(default = "default_loading_delay")]
    pub delay_ms: u32,
    /// Length of the fade before the overlay is removed
    #[serde(default = "default_loading_fade")]
    pub fade_ms: u32,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_loading_delay(),
            fade_ms: default_loading_fade(),
        }
    }
}

fn default_loading_delay() -> u32 {
    2000
}

fn default_loading_fade() -> u32 {
    500
}

impl Config {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Config = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.background.cube_count == 0 {
            return Err(invalid("background.cube_count", "must be at least 1"));
        }
        if self.background.palette.is_empty() {
            return Err(invalid("background.palette", "needs at least one color"));
        }
        if !(self.max_pixel_ratio > 0.0) {
            return Err(invalid("max_pixel_ratio", "must be positive"));
        }
        let distances = [
            ("background.camera_distance", self.background.camera_distance),
            ("hero.camera_distance", self.hero.camera_distance),
            ("product.camera_distance", self.product.camera_distance),
            ("tech.camera_distance", self.tech.camera_distance),
        ];
        for (field, distance) in distances {
            if !(distance > 0.0) {
                return Err(invalid(field, "must be positive"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> Error {
    Error::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.mounts.for_view(ViewKey::Hero), "hero-3d");
        assert_eq!(config.background.palette.len(), 4);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = Config::from_toml_str(
            r#"
            seed = 99
            theme = "light"

            [background]
            cube_count = 9

            [mounts]
            tech = "circuit"
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.background.cube_count, 9);
        assert_eq!(config.background.palette, default_palette());
        assert_eq!(config.mounts.for_view(ViewKey::Tech), "circuit");
        assert_eq!(config.mounts.for_view(ViewKey::Background), "canvas-container");
    }

    #[test]
    fn test_palette_reads_packed_colors() {
        let config = Config::from_toml_str("[background]\npalette = [0xff0000, 65280]").unwrap();
        assert_eq!(config.background.palette, vec![Color::new(1.0, 0.0, 0.0), Color::new(0.0, 1.0, 0.0)]);

        let json = serde_json::to_string(&config.background).unwrap();
        assert!(json.contains("[16711680,65280]"), "{json}");
    }

    #[test]
    fn test_json_config() {
        let config = Config::from_json_str(r#"{"hero": {"parallax": 0.0}, "max_pixel_ratio": 1.5}"#).unwrap();
        assert_eq!(config.hero.parallax, 0.0);
        assert_eq!(config.hero.camera_distance, 5.0);
        assert_eq!(config.max_pixel_ratio, 1.5);
    }

    #[test]
    fn test_validation_errors() {
        let err = Config::from_toml_str("[background]\ncube_count = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "background.cube_count", .. }));

        let err = Config::from_toml_str("[background]\npalette = []").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "background.palette", .. }));

        assert!(matches!(Config::from_toml_str("seed = \"x\""), Err(Error::Toml(_))));
        assert!(matches!(Config::from_json_str("{"), Err(Error::Json(_))));
    }
}
