/// Loading overlay timeline
use crate::config::LoadingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    /// Overlay fully shown
    Visible,
    /// Opacity set to zero, element still laid out
    FadingOut,
    /// Element removed from layout
    Hidden,
}

#[derive(Debug, Clone, Copy)]
pub struct LoadingScreen {
    delay_ms: u32,
    fade_ms: u32,
}

impl LoadingScreen {
    pub fn new(config: &LoadingConfig) -> Self {
        Self {
            delay_ms: config.delay_ms,
            fade_ms: config.fade_ms,
        }
    }

    /// Delay before the fade starts
    pub fn fade_at_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Delay, counted from the start of the fade, before the overlay is removed
    pub fn hide_after_fade_ms(&self) -> u32 {
        self.fade_ms
    }

    pub fn phase(&self, elapsed_ms: u64) -> LoadingPhase {
        let fade_at = u64::from(self.delay_ms);
        let hide_at = fade_at + u64::from(self.fade_ms);
        if elapsed_ms < fade_at {
            LoadingPhase::Visible
        } else if elapsed_ms < hide_at {
            LoadingPhase::FadingOut
        } else {
            LoadingPhase::Hidden
        }
    }
}

impl Default for LoadingScreen {
    fn default() -> Self {
        Self::new(&LoadingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeline() {
        let screen = LoadingScreen::default();
        assert_eq!(screen.phase(0), LoadingPhase::Visible);
        assert_eq!(screen.phase(1999), LoadingPhase::Visible);
        assert_eq!(screen.phase(2000), LoadingPhase::FadingOut);
        assert_eq!(screen.phase(2499), LoadingPhase::FadingOut);
        assert_eq!(screen.phase(2500), LoadingPhase::Hidden);
        assert_eq!(screen.fade_at_ms(), 2000);
        assert_eq!(screen.hide_after_fade_ms(), 500);
    }

    #[test]
    fn test_zero_fade_hides_immediately() {
        let screen = LoadingScreen::new(&LoadingConfig { delay_ms: 10, fade_ms: 0 });
        assert_eq!(screen.phase(10), LoadingPhase::Hidden);
    }
}
