use thiserror::Error;

use crate::color::Hsv;

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum GeometryError {
    #[error("wheel radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("wheel center must be finite, got ({0}, {1})")]
    InvalidCenter(f32, f32),
    #[error("slider track is degenerate: left {left} must be less than right {right}")]
    DegenerateTrack { left: f32, right: f32 },
}

/// Hue and saturation at an offset from the wheel center.
///
/// Orientation convention, kept exactly as the classic wheel derives it
/// (`atan2(y, -x) + 180°`): hue 0 sits at the point directly right of
/// center and increases counter-clockwise when y points down the screen,
/// so right = 0°, top = 90°, left = 180°, bottom = 270°. Saturation is the
/// distance from center as a fraction of the radius, clamped to [0,1].
///
/// The caller guarantees `radius > 0`; [`WheelGeometry`] enforces it.
pub fn hue_saturation_at(dx: f32, dy: f32, radius: f32) -> (f32, f32) {
    let hue = (dy.atan2(-dx).to_degrees() + 180.0).rem_euclid(360.0);
    let saturation = ((dx * dx + dy * dy).sqrt() / radius).clamp(0.0, 1.0);
    (hue, saturation)
}

/// Offset from the wheel center at which a hue/saturation pair renders.
///
/// The inverse of [`hue_saturation_at`] up to floating-point tolerance.
/// Saturation above 1 clamps to 1 first, so off-model colors still land on
/// the rim rather than off the surface.
pub fn polar_offset_for(hue: f32, saturation: f32, radius: f32) -> (f32, f32) {
    let r = saturation.clamp(0.0, 1.0) * radius;
    let angle = hue.rem_euclid(360.0).to_radians();
    (r * angle.cos(), -r * angle.sin())
}

/// Scale an offset back onto the disk when it falls outside.
///
/// The single chokepoint for both pointer input and programmatic color
/// placement: everything that ends up as an indicator position goes through
/// here, so the indicator can never be drawn outside the wheel. Idempotent.
/// A non-finite offset maps to the center, keeping the invariant even for
/// degenerate host input.
pub fn clamp_to_disk(dx: f32, dy: f32, radius: f32) -> (f32, f32) {
    if !dx.is_finite() || !dy.is_finite() {
        return (0.0, 0.0);
    }

    let len_sq = dx * dx + dy * dy;
    if len_sq <= radius * radius {
        return (dx, dy);
    }

    let len = len_sq.sqrt();
    let scale = radius / len;
    (dx * scale, dy * scale)
}

/// Validated placement of a color wheel: center point and radius in the
/// host's coordinate space, with any content padding already applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelGeometry {
    center: (f32, f32),
    radius: f32,
}

impl WheelGeometry {
    pub fn new(center: (f32, f32), radius: f32) -> Result<Self, GeometryError> {
        if !center.0.is_finite() || !center.1.is_finite() {
            return Err(GeometryError::InvalidCenter(center.0, center.1));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }

        Ok(Self { center, radius })
    }

    pub fn center(&self) -> (f32, f32) {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Clamp an absolute point onto the wheel's disk.
    pub fn clamp_point(&self, point: (f32, f32)) -> (f32, f32) {
        let (dx, dy) = clamp_to_disk(point.0 - self.center.0, point.1 - self.center.1, self.radius);
        (dx + self.center.0, dy + self.center.1)
    }

    /// Color under an absolute point.
    ///
    /// The wheel owns hue and saturation only; value is fixed at 1 and the
    /// result is opaque. Brightness and alpha belong to the sliders.
    pub fn color_at(&self, point: (f32, f32)) -> Hsv {
        let (h, s) = hue_saturation_at(point.0 - self.center.0, point.1 - self.center.1, self.radius);
        Hsv { h, s, v: 1.0, a: 1.0 }
    }

    /// Absolute point at which a color's hue/saturation renders.
    pub fn point_for(&self, color: Hsv) -> (f32, f32) {
        let (dx, dy) = polar_offset_for(color.h, color.s, self.radius);
        (dx + self.center.0, dy + self.center.1)
    }
}

/// Validated horizontal extent of a slider track, padding already applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderTrack {
    left: f32,
    right: f32,
}

impl SliderTrack {
    pub fn new(left: f32, right: f32) -> Result<Self, GeometryError> {
        if !left.is_finite() || !right.is_finite() || left >= right {
            return Err(GeometryError::DegenerateTrack { left, right });
        }

        Ok(Self { left, right })
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    /// Normalized value for an absolute x position, clamped to [0,1].
    pub fn value_at(&self, x: f32) -> f32 {
        let x = if x.is_finite() { x.clamp(self.left, self.right) } else { self.left };
        (x - self.left) / (self.right - self.left)
    }

    /// Absolute x position for a normalized value.
    pub fn position_for(&self, value: f32) -> f32 {
        self.left + value.clamp(0.0, 1.0) * (self.right - self.left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hue_distance(a: f32, b: f32) -> f32 {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d)
    }

    #[test]
    fn rightmost_rim_point_is_hue_zero_full_saturation() {
        let wheel = WheelGeometry::new((100.0, 100.0), 100.0).unwrap();
        let color = wheel.color_at((200.0, 100.0));
        assert!(hue_distance(color.h, 0.0) < 1e-3);
        assert!((color.s - 1.0).abs() < 1e-6);
        assert_eq!(color.v, 1.0);
    }

    #[test]
    fn wheel_winding_is_counter_clockwise_with_screen_down_y() {
        let wheel = WheelGeometry::new((100.0, 100.0), 100.0).unwrap();
        assert!(hue_distance(wheel.color_at((100.0, 0.0)).h, 90.0) < 1e-3);
        assert!(hue_distance(wheel.color_at((0.0, 100.0)).h, 180.0) < 1e-3);
        assert!(hue_distance(wheel.color_at((100.0, 200.0)).h, 270.0) < 1e-3);
    }

    #[test]
    fn center_point_has_zero_saturation() {
        let wheel = WheelGeometry::new((100.0, 100.0), 100.0).unwrap();
        assert_eq!(wheel.color_at((100.0, 100.0)).s, 0.0);
    }

    #[test]
    fn point_beyond_rim_clamps_to_the_rim_result() {
        let wheel = WheelGeometry::new((100.0, 100.0), 100.0).unwrap();
        let on_rim = wheel.color_at(wheel.clamp_point((200.0, 100.0)));
        let beyond = wheel.color_at(wheel.clamp_point((300.0, 100.0)));
        assert!(hue_distance(on_rim.h, beyond.h) < 1e-3);
        assert!((on_rim.s - beyond.s).abs() < 1e-6);
        assert_eq!(wheel.clamp_point((300.0, 100.0)), (200.0, 100.0));
    }

    #[test]
    fn oversaturated_color_renders_on_the_rim() {
        let wheel = WheelGeometry::new((0.0, 0.0), 50.0).unwrap();
        let point = wheel.point_for(Hsv {
            h: 0.0,
            s: 2.5,
            v: 1.0,
            a: 1.0,
        });
        assert!((point.0 - 50.0).abs() < 1e-3);
        assert!(point.1.abs() < 1e-3);
    }

    #[test]
    fn non_finite_offsets_clamp_to_the_center() {
        assert_eq!(clamp_to_disk(f32::NAN, 10.0, 100.0), (0.0, 0.0));
        assert_eq!(clamp_to_disk(10.0, f32::NAN, 100.0), (0.0, 0.0));
        assert_eq!(clamp_to_disk(f32::INFINITY, 0.0, 100.0), (0.0, 0.0));
        assert_eq!(clamp_to_disk(0.0, f32::NEG_INFINITY, 100.0), (0.0, 0.0));

        let wheel = WheelGeometry::new((100.0, 100.0), 100.0).unwrap();
        assert_eq!(wheel.clamp_point((f32::NAN, f32::NAN)), (100.0, 100.0));
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        assert!(WheelGeometry::new((0.0, 0.0), 0.0).is_err());
        assert!(WheelGeometry::new((0.0, 0.0), -4.0).is_err());
        assert!(WheelGeometry::new((0.0, 0.0), f32::NAN).is_err());
        assert!(WheelGeometry::new((f32::INFINITY, 0.0), 10.0).is_err());
        assert!(SliderTrack::new(10.0, 10.0).is_err());
        assert!(SliderTrack::new(20.0, 10.0).is_err());
        assert!(SliderTrack::new(f32::NAN, 10.0).is_err());
    }

    #[test]
    fn slider_track_maps_and_clamps_positions() {
        let track = SliderTrack::new(10.0, 110.0).unwrap();
        assert!((track.value_at(60.0) - 0.5).abs() < 1e-6);
        assert_eq!(track.value_at(5.0), 0.0);
        assert_eq!(track.value_at(200.0), 1.0);
        assert!((track.position_for(0.5) - 60.0).abs() < 1e-6);
        assert!((track.position_for(2.0) - 110.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn polar_round_trip_recovers_hue_and_saturation(
            hue in 0.0f32..360.0,
            saturation in 0.0f32..=1.0,
            radius in 1.0f32..500.0,
        ) {
            let (dx, dy) = polar_offset_for(hue, saturation, radius);
            let (h, s) = hue_saturation_at(dx, dy, radius);
            prop_assert!((saturation - s).abs() < 1e-3);
            // Hue is undefined at the center point.
            if saturation > 0.01 {
                prop_assert!(hue_distance(hue, h) < 0.1);
            }
        }

        #[test]
        fn clamp_to_disk_is_idempotent(
            dx in -1000.0f32..1000.0,
            dy in -1000.0f32..1000.0,
            radius in 1.0f32..500.0,
        ) {
            let once = clamp_to_disk(dx, dy, radius);
            let twice = clamp_to_disk(once.0, once.1, radius);
            prop_assert!((once.0 - twice.0).abs() < 1e-3);
            prop_assert!((once.1 - twice.1).abs() < 1e-3);
        }

        #[test]
        fn clamped_offsets_stay_on_the_disk(
            dx in -1000.0f32..1000.0,
            dy in -1000.0f32..1000.0,
            radius in 1.0f32..500.0,
        ) {
            let (cx, cy) = clamp_to_disk(dx, dy, radius);
            prop_assert!((cx * cx + cy * cy).sqrt() <= radius * 1.001);
        }
    }
}
