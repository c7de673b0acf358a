/// Per-frame input snapshot handed to every view updater

/// Pointer position normalized to [-1, 1] on both axes, +y up
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Normalize a position given in surface pixels (origin top-left)
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }
        Self {
            x: (client_x / width) * 2.0 - 1.0,
            y: -(client_y / height) * 2.0 + 1.0,
        }
    }
}

/// Everything an updater may read for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Seconds since the driver started
    pub time: f64,
    /// Vertical scroll offset in pixels
    pub scroll_y: f32,
    pub pointer: Pointer,
}

impl FrameInput {
    pub fn at(time: f64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    pub fn with_scroll(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    pub fn with_pointer(mut self, pointer: Pointer) -> Self {
        self.pointer = pointer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_corners() {
        let top_left = Pointer::from_client(0.0, 0.0, 800.0, 600.0);
        assert_eq!(top_left, Pointer::new(-1.0, 1.0));

        let bottom_right = Pointer::from_client(800.0, 600.0, 800.0, 600.0);
        assert_eq!(bottom_right, Pointer::new(1.0, -1.0));

        let center = Pointer::from_client(400.0, 300.0, 800.0, 600.0);
        assert!(center.x.abs() < 1e-6 && center.y.abs() < 1e-6);
    }

    #[test]
    fn test_time_keeps_frame_spacing() {
        let t = 172_800.0;
        let next = FrameInput::at(t + 1.0 / 60.0);
        assert!((next.time - FrameInput::at(t).time - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_pointer_empty_surface() {
        assert_eq!(Pointer::from_client(10.0, 10.0, 0.0, 600.0), Pointer::default());
    }
}
