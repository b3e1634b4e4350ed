use super::*;

#[test]
fn canvas_center() {
    let c = Canvas::new(640, 480);
    assert_eq!(c.center(), Point::new(320.0, 240.0));
}

#[test]
fn with_alpha_clamps_and_rounds() {
    let c = Rgba8::rgb(10, 20, 30);
    assert_eq!(c.with_alpha(0.5).a, 128);
    assert_eq!(c.with_alpha(-1.0).a, 0);
    assert_eq!(c.with_alpha(2.0).a, 255);
    assert_eq!(c.with_alpha(0.5).r, 10);
}
