/// Light/dark page theme
use crate::host::ThemeTarget;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Fixed body styling for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyle {
    pub class: &'static str,
    pub stale_class: &'static str,
    pub background: &'static str,
    pub color: &'static str,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn style(self) -> ThemeStyle {
        match self {
            Theme::Dark => ThemeStyle {
                class: "dark",
                stale_class: "light",
                background: "#0a0a0a",
                color: "#fff",
            },
            Theme::Light => ThemeStyle {
                class: "light",
                stale_class: "dark",
                background: "#fff",
                color: "#000",
            },
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Owns the theme flag and writes its style onto the page body
#[derive(Debug, Clone)]
pub struct ThemeSwitch {
    current: Theme,
}

impl ThemeSwitch {
    /// Create the switch and apply `initial` so later toggles start from a
    /// known body state
    pub fn new<T: ThemeTarget + ?Sized>(initial: Theme, target: &mut T) -> Self {
        let switch = Self { current: initial };
        switch.apply(target);
        switch
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn toggle<T: ThemeTarget + ?Sized>(&mut self, target: &mut T) -> Theme {
        self.current = self.current.toggled();
        self.apply(target);
        info!(theme = ?self.current, "Theme switched");
        self.current
    }

    fn apply<T: ThemeTarget + ?Sized>(&self, target: &mut T) {
        let style = self.current.style();
        target.remove_class(style.stale_class);
        target.add_class(style.class);
        target.set_background(style.background);
        target.set_color(style.color);
    }
}
