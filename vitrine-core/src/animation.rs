/// Closed-form animation curves
///
/// Every curve is a pure function of time (and scroll where noted), so a
/// view's state at any frame can be recomputed without history. Time is
/// carried in `f64` seconds so frames stay distinct on long-lived pages.
use std::f64::consts::TAU;

/// Frame rate the per-frame speeds were tuned against
pub const REFERENCE_FPS: f64 = 60.0;

/// Angle reached after `time` seconds when advancing `per_frame` radians
/// every reference frame, folded into one turn
pub fn spin(initial: f32, per_frame: f32, time: f64) -> f32 {
    ((f64::from(initial) + f64::from(per_frame) * REFERENCE_FPS * time) % TAU) as f32
}

/// Bobbing height of a floating cube
pub fn float_offset(base: f32, time: f64, speed: f32, amount: f32, index: usize) -> f32 {
    base + wave(time * f64::from(speed) + index as f64) * amount * 0.3
}

/// Cube opacity, always within [0.45, 0.75]
pub fn opacity_pulse(time: f64, index: usize) -> f32 {
    0.6 + wave(time * 0.8 + index as f64) * 0.15
}

/// Uniform cube scale, always within [0.95, 1.05]
pub fn breathing_scale(time: f64, index: usize) -> f32 {
    1.0 + wave(time * 0.5 + index as f64 * 0.2) * 0.05
}

/// Depth of a cube pushed back as the page scrolls
pub fn parallax_depth(scroll_y: f32, index: usize) -> f32 {
    -scroll_y * 0.005 + index as f32 * 0.3
}

/// Slow sway of the whole cube group as `(rotation.x, rotation.y)`
pub fn group_sway(time: f64) -> (f32, f32) {
    ((time * 0.08).cos() as f32 * 0.01, wave(time * 0.1) * 0.02)
}

/// Vertical hover of the robot
pub fn robot_hover(time: f64) -> f32 {
    wave(time * 0.8) * 0.2
}

/// Side-to-side turn of the robot
pub fn robot_turn(time: f64) -> f32 {
    wave(time * 0.5) * 0.1
}

/// Roll of a swinging robot part; `phase` spreads the parts apart
pub fn limb_swing(time: f64, phase: f32) -> f32 {
    wave(time * 2.0 + f64::from(phase)) * 0.1
}

/// Emissive intensity of the robot eyes
pub fn eye_glow(time: f64) -> f32 {
    0.8 + wave(time * 3.0) * 0.2
}

/// Emissive intensity of the antenna tip
pub fn beacon_glow(time: f64) -> f32 {
    1.0 + wave(time * 4.0) * 0.3
}

/// Tilt of the circuit board as `(rotation.x, rotation.y)`
pub fn board_tilt(time: f64) -> (f32, f32) {
    ((time * 0.3).cos() as f32 * 0.1, wave(time * 0.5) * 0.2)
}

fn wave(phase: f64) -> f32 {
    phase.sin() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_offset_formula() {
        let (base, speed, amount) = (1.25, 0.7, 0.9);
        for index in 0..6 {
            for step in 0..100 {
                let t = step as f64 * 0.137;
                let expected = base + ((t * f64::from(speed) + index as f64).sin() as f32) * amount * 0.3;
                assert!((float_offset(base, t, speed, amount, index) - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_opacity_pulse_bounds() {
        for index in 0..6 {
            for step in 0..2000 {
                let t = step as f64 * 0.01;
                let opacity = opacity_pulse(t, index);
                let expected = 0.6 + (t * 0.8 + index as f64).sin() as f32 * 0.15;
                assert!((opacity - expected).abs() < 1e-6);
                assert!((0.45 - 1e-6..=0.75 + 1e-6).contains(&opacity));
            }
        }
    }

    #[test]
    fn test_group_sway_at_rest() {
        let (x, y) = group_sway(0.0);
        assert!((x - 0.01).abs() < 1e-6);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn test_parallax_depth() {
        assert!((parallax_depth(0.0, 3) - 0.9).abs() < 1e-6);
        assert!((parallax_depth(1000.0, 0) + 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_spin_matches_per_frame_accumulation() {
        let mut angle = 0.2;
        for _ in 0..120 {
            angle += 0.003;
        }
        assert!((spin(0.2, 0.003, 2.0) - angle).abs() < 1e-4);
    }

    #[test]
    fn test_spin_folds_into_one_turn() {
        assert!((spin(0.0, -0.002, 2.0) + 0.24).abs() < 1e-6);
        let folded = spin(0.1, 0.003, 172_800.0);
        assert!(folded.abs() < std::f32::consts::TAU);
        let exact = (0.1 + 0.003_f32 as f64 * 60.0 * 172_800.0) % TAU;
        assert!((f64::from(folded) - exact).abs() < 1e-5);
    }

    #[test]
    fn test_frames_stay_distinct_after_two_days() {
        let t = 172_800.0;
        let dt = 1.0 / 60.0;
        let step = f64::from(robot_hover(t + dt)) - f64::from(robot_hover(t));
        let expected = ((t + dt) * 0.8).sin() * 0.2 - (t * 0.8).sin() * 0.2;
        assert!((step - expected).abs() < 1e-6);
        assert!((limb_swing(t, 4.0) - ((t * 2.0 + 4.0).sin() * 0.1) as f32).abs() < 1e-6);
    }

    #[test]
    fn test_glow_ranges() {
        for step in 0..500 {
            let t = step as f64 * 0.05;
            assert!((0.6 - 1e-6..=1.0 + 1e-6).contains(&eye_glow(t)));
            assert!((0.7 - 1e-6..=1.3 + 1e-6).contains(&beacon_glow(t)));
            assert!((0.95 - 1e-6..=1.05 + 1e-6).contains(&breathing_scale(t, step % 6)));
        }
    }
}
