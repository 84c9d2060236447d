//! Small UI helpers for the viewer binary.

use planpin::config::PlacementConfig;
use planpin::store::PlacementMethod;
use slint::SharedPixelBuffer;

/// Checkerboard placeholder shown when no project is loaded or a plan
/// image cannot be read.
pub fn placeholder_plan() -> slint::Image {
    let width = 96u32;
    let height = 96u32;
    let mut buffer = SharedPixelBuffer::new(width, height);
    let data = buffer.make_mut_bytes();
    for y in 0..height {
        for x in 0..width {
            let v = if (x / 12 + y / 12) % 2 == 0 { 52 } else { 96 };
            let i = ((y * width + x) * 3) as usize;
            data[i] = v;
            data[i + 1] = v;
            data[i + 2] = v;
        }
    }
    slint::Image::from_rgb8(buffer)
}

/// Parse a hex color string (e.g., "#ff0000") to a Slint Color
pub fn parse_color(hex: &str) -> Option<slint::Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(slint::Color::from_rgb_u8(r, g, b))
    } else {
        None
    }
}

pub fn method_label(method: PlacementMethod) -> &'static str {
    match method {
        PlacementMethod::Manual => "manually",
        PlacementMethod::GpsSuggested => "by GPS suggestion",
        PlacementMethod::GpsExact => "by exact GPS fix",
    }
}

/// Pin color by placement provenance: manual pins and GPS-derived pins use
/// the two palette entries from the config.
pub fn pin_tint(method: PlacementMethod, palette: &PlacementConfig) -> slint::Color {
    let hex = if method.is_gps_derived() {
        &palette.gps_color
    } else {
        &palette.manual_color
    };
    parse_color(hex).unwrap_or(slint::Color::from_rgb_u8(229, 57, 53))
}
