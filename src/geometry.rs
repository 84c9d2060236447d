//! Plan-space coordinate normalization.
//!
//! Pin positions are stored as percentages of the plan image's *rendered*
//! bounds, never its natural resolution, so a stored position survives
//! zoom, pan, and plan images re-rendered at a different size.

/// Rendered bounds of the plan image inside the viewport, after layout,
/// pan and zoom have been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ImageRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// A plan-relative position, each axis in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentPos {
    pub x: f32,
    pub y: f32,
}

impl PercentPos {
    pub const CENTER: PercentPos = PercentPos { x: 50.0, y: 50.0 };

    /// Build a position clamped into range. Non-finite input falls back to
    /// the center instead of poisoning stored state.
    pub fn clamped(x: f32, y: f32) -> Self {
        let clamp = |v: f32| if v.is_finite() { v.clamp(0.0, 100.0) } else { 50.0 };
        Self {
            x: clamp(x),
            y: clamp(y),
        }
    }

    pub fn in_range(&self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

/// Convert a pointer position (viewport pixels) to a plan-relative
/// percentage position. Points outside the rect clamp to the nearest edge;
/// a degenerate rect yields the center rather than NaN.
pub fn to_percent(px: f32, py: f32, rect: &ImageRect) -> PercentPos {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return PercentPos::CENTER;
    }
    PercentPos::clamped(
        (px - rect.x) / rect.width * 100.0,
        (py - rect.y) / rect.height * 100.0,
    )
}

/// Inverse of [`to_percent`]: a percentage position back to viewport pixels.
pub fn to_pixels(pos: &PercentPos, rect: &ImageRect) -> (f32, f32) {
    (
        rect.x + pos.x / 100.0 * rect.width,
        rect.y + pos.y / 100.0 * rect.height,
    )
}

/// Unit of a detection bounding box `[x, y, w, h]` as delivered upstream.
///
/// Detectors hand these over either in image pixels or already normalized
/// to `[0, 1]`, without saying which. Any component above 1.0 means pixels.
/// A true pixel box with every edge at most 1 px reads as fractional; that
/// ambiguity is inherent to the heuristic and deliberately left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxUnits {
    Pixels,
    Fractional,
}

pub fn classify_box_units(bounds: &[f32; 4]) -> BoxUnits {
    if bounds.iter().any(|v| *v > 1.0) {
        BoxUnits::Pixels
    } else {
        BoxUnits::Fractional
    }
}

/// Normalize a bounding box to fractional `[0, 1]` units.
///
/// Pixel boxes need the image's natural size; until that is known the box
/// is unrenderable and `None` is returned so the caller hides it instead
/// of mis-scaling it.
pub fn normalize_box(bounds: &[f32; 4], natural: Option<(f32, f32)>) -> Option<[f32; 4]> {
    match classify_box_units(bounds) {
        BoxUnits::Fractional => Some(*bounds),
        BoxUnits::Pixels => {
            let (w, h) = natural?;
            if w <= 0.0 || h <= 0.0 {
                return None;
            }
            Some([bounds[0] / w, bounds[1] / h, bounds[2] / w, bounds[3] / h])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: ImageRect = ImageRect {
        x: 10.0,
        y: 20.0,
        width: 400.0,
        height: 200.0,
    };

    #[test]
    fn inside_points_map_into_range() {
        let pos = to_percent(210.0, 120.0, &RECT);
        assert!((pos.x - 50.0).abs() < 1e-4);
        assert!((pos.y - 50.0).abs() < 1e-4);
        assert!(pos.in_range());
    }

    #[test]
    fn outside_points_clamp_to_edges() {
        let left = to_percent(-500.0, 120.0, &RECT);
        assert_eq!(left.x, 0.0);
        let below = to_percent(210.0, 9999.0, &RECT);
        assert_eq!(below.y, 100.0);
    }

    #[test]
    fn degenerate_rect_yields_center() {
        let rect = ImageRect::new(0.0, 0.0, 0.0, 100.0);
        assert_eq!(to_percent(5.0, 5.0, &rect), PercentPos::CENTER);
    }

    #[test]
    fn non_finite_input_yields_center_component() {
        let pos = PercentPos::clamped(f32::NAN, f32::INFINITY);
        assert_eq!(pos.x, 50.0);
        assert_eq!(pos.y, 50.0);
    }

    #[test]
    fn pixel_round_trip_is_stable() {
        let pos = PercentPos { x: 12.5, y: 87.5 };
        let (px, py) = to_pixels(&pos, &RECT);
        let back = to_percent(px, py, &RECT);
        assert!((back.x - pos.x).abs() < 1e-3);
        assert!((back.y - pos.y).abs() < 1e-3);
    }

    #[test]
    fn pixel_box_is_classified_and_scaled() {
        let bounds = [120.0, 40.0, 60.0, 60.0];
        assert_eq!(classify_box_units(&bounds), BoxUnits::Pixels);
        let frac = normalize_box(&bounds, Some((1200.0, 800.0))).unwrap();
        assert!(frac.iter().all(|v| *v <= 1.0));
        assert!((frac[0] - 0.1).abs() < 1e-6);
        assert!((frac[1] - 0.05).abs() < 1e-6);
    }

    #[test]
    fn fractional_box_passes_through_unchanged() {
        let bounds = [0.1, 0.05, 0.2, 0.2];
        assert_eq!(classify_box_units(&bounds), BoxUnits::Fractional);
        assert_eq!(normalize_box(&bounds, Some((1200.0, 800.0))), Some(bounds));
        // Natural size is irrelevant for already-fractional boxes.
        assert_eq!(normalize_box(&bounds, None), Some(bounds));
    }

    #[test]
    fn pixel_box_without_natural_size_is_hidden() {
        assert_eq!(normalize_box(&[120.0, 40.0, 60.0, 60.0], None), None);
        assert_eq!(
            normalize_box(&[120.0, 40.0, 60.0, 60.0], Some((0.0, 800.0))),
            None
        );
    }
}
