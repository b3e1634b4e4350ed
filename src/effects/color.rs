use crate::foundation::core::Rgba8;

/// Convert HSL (hue in degrees, saturation and lightness in `0..=1`) to opaque RGBA8.
///
/// Uses the piecewise-linear chroma formula over six 60° hue sectors. Hue wraps.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgba8 {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    fn to_u8(v: f64) -> u8 {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    Rgba8::rgb(to_u8(r + m), to_u8(g + m), to_u8(b + m))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color.rs"]
mod tests;
