//! Best-effort pin placement for photos without a usable geolocation.

use rand::Rng;

use crate::geometry::PercentPos;

/// Default inset from the plan edges, in plan pixels.
pub const DEFAULT_MARGIN_PX: f32 = 50.0;

/// Pick a pseudo-random in-bounds position on a plan of the given pixel
/// dimensions, keeping `margin_px` clear of every edge.
///
/// Plans too small for the margin on either axis get the exact center
/// instead of inverted margin math. The RNG is injected so callers that
/// need reproducibility can seed one.
pub fn auto_position(
    plan_width: f32,
    plan_height: f32,
    margin_px: f32,
    rng: &mut impl Rng,
) -> PercentPos {
    if plan_width < 2.0 * margin_px || plan_height < 2.0 * margin_px {
        return PercentPos::CENTER;
    }
    let px = rng.gen_range(margin_px..=plan_width - margin_px);
    let py = rng.gen_range(margin_px..=plan_height - margin_px);
    PercentPos::clamped(px / plan_width * 100.0, py / plan_height * 100.0)
}
