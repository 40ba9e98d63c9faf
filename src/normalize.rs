// Analog input normalization and thumbstick decomposition

use glam::Vec2;

/// Press strengths for the four decomposed directions of a thumbstick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThumbstickStrengths {
    pub left: f32,
    pub right: f32,
    pub up: f32,
    pub down: f32,
}

/// Extract a 0..1 magnitude from a one-sided axis range
///
/// Values outside `[min, max]` clamp to the boundary, so a window like
/// `(0.0, 1.0)` reads only the positive side of the axis.
pub fn normalize_axis(value: f32, min: f32, max: f32) -> f32 {
    value.clamp(min, max).abs()
}

/// Convert a raw axis value to a press strength with deadzone handling
///
/// Magnitudes below the deadzone collapse to 0; the remaining range is
/// rescaled linearly so the deadzone boundary maps to 0 and the extremum
/// maps to 1.
pub fn normalize_thumbstick_axis(value: f32, deadzone: f32) -> f32 {
    let magnitude = value.abs();
    if magnitude < deadzone {
        return 0.0;
    }
    ((magnitude - deadzone) / (1.0 - deadzone)).clamp(0.0, 1.0)
}

/// Extract the deadzone-adjusted strength of one direction of an axis
pub fn directional_strength(value: f32, min: f32, max: f32, deadzone: f32) -> f32 {
    normalize_thumbstick_axis(normalize_axis(value, min, max), deadzone)
}

/// Decompose a thumbstick position into four independent direction strengths
///
/// Lets a single 2-axis stick drive four independently-thresholded
/// digital-style actions.
pub fn decompose_thumbstick(position: Vec2, deadzone: f32) -> ThumbstickStrengths {
    ThumbstickStrengths {
        left: directional_strength(position.x, -1.0, 0.0, deadzone),
        right: directional_strength(position.x, 0.0, 1.0, deadzone),
        up: directional_strength(position.y, 0.0, 1.0, deadzone),
        down: directional_strength(position.y, -1.0, 0.0, deadzone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_axis_one_sided() {
        assert_eq!(normalize_axis(0.5, 0.0, 1.0), 0.5);
        assert_eq!(normalize_axis(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(normalize_axis(-0.5, -1.0, 0.0), 0.5);
        assert_eq!(normalize_axis(2.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_deadzone_boundary_maps_to_zero() {
        for deadzone in [0.0, 0.1, 0.2, 0.5, 0.9] {
            assert_eq!(normalize_thumbstick_axis(deadzone, deadzone), 0.0);
        }
    }

    #[test]
    fn test_extremum_maps_to_one() {
        for deadzone in [0.0, 0.1, 0.2, 0.5, 0.9] {
            assert_relative_eq!(normalize_thumbstick_axis(1.0, deadzone), 1.0);
            assert_relative_eq!(normalize_thumbstick_axis(-1.0, deadzone), 1.0);
        }
    }

    #[test]
    fn test_below_deadzone_collapses() {
        assert_eq!(normalize_thumbstick_axis(0.19, 0.2), 0.0);
        assert_eq!(normalize_thumbstick_axis(-0.19, 0.2), 0.0);
    }

    #[test]
    fn test_rescale_is_linear_past_deadzone() {
        assert_relative_eq!(normalize_thumbstick_axis(0.6, 0.2), 0.5);
        assert_relative_eq!(normalize_thumbstick_axis(0.4, 0.2), 0.25);
    }

    #[test]
    fn test_decompose_neutral_stick() {
        let strengths = decompose_thumbstick(Vec2::ZERO, 0.2);
        assert_eq!(strengths, ThumbstickStrengths::default());
    }

    #[test]
    fn test_decompose_directions_are_independent() {
        let strengths = decompose_thumbstick(Vec2::new(1.0, -1.0), 0.2);
        assert_relative_eq!(strengths.right, 1.0);
        assert_relative_eq!(strengths.down, 1.0);
        assert_eq!(strengths.left, 0.0);
        assert_eq!(strengths.up, 0.0);
    }

    #[test]
    fn test_decompose_respects_deadzone() {
        let strengths = decompose_thumbstick(Vec2::new(0.1, 0.1), 0.2);
        assert_eq!(strengths, ThumbstickStrengths::default());

        let strengths = decompose_thumbstick(Vec2::new(-0.6, 0.0), 0.2);
        assert_relative_eq!(strengths.left, 0.5);
        assert_eq!(strengths.right, 0.0);
    }
}
