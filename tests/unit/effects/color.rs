use super::*;

#[test]
fn primary_hues_at_half_lightness() {
    assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Rgba8::rgb(255, 0, 0));
    assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Rgba8::rgb(0, 255, 0));
    assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Rgba8::rgb(0, 0, 255));
    assert_eq!(hsl_to_rgb(180.0, 1.0, 0.5), Rgba8::rgb(0, 255, 255));
}

#[test]
fn hue_wraps_in_both_directions() {
    assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), hsl_to_rgb(0.0, 1.0, 0.5));
    assert_eq!(hsl_to_rgb(-120.0, 1.0, 0.5), hsl_to_rgb(240.0, 1.0, 0.5));
}

#[test]
fn zero_saturation_is_gray() {
    let c = hsl_to_rgb(75.0, 0.0, 0.5);
    assert_eq!(c.r, c.g);
    assert_eq!(c.g, c.b);
    assert_eq!(c.a, 255);
}
