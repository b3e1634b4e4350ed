use super::*;

fn solid(w: u32, h: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, image::Rgba([90, 60, 30, 255])))
}

#[test]
fn missing_foreground_is_named() {
    let generator = MemeCompositor::new().unwrap();
    let bg = solid(64, 48);
    let err = generator.generate(None, Some(&bg), "a", "b").unwrap_err();
    assert!(matches!(err, SpudcatError::Validation(_)));
    assert!(err.to_string().contains("potato"), "{err}");
}

#[test]
fn missing_background_is_named() {
    let generator = MemeCompositor::new().unwrap();
    let fg = solid(64, 48);
    let err = generator.generate(Some(&fg), None, "a", "b").unwrap_err();
    assert!(matches!(err, SpudcatError::Validation(_)));
    assert!(err.to_string().contains("cat"), "{err}");
}

#[test]
fn random_generation_validates_too() {
    let generator = MemeCompositor::new().unwrap();
    let err = generator.generate_random(None, None).unwrap_err();
    assert!(err.to_string().contains("potato"));
}

#[test]
fn empty_subject_is_rejected() {
    let generator = MemeCompositor::new().unwrap();
    let empty = DynamicImage::new_rgba8(0, 0);
    let ok = solid(8, 8);
    let err = generator
        .generate(Some(&empty), Some(&ok), "a", "b")
        .unwrap_err();
    assert!(matches!(err, SpudcatError::Validation(_)));
}

#[test]
fn captions_are_upper_cased_with_a_known_ticker() {
    let c = captions("i can haz", "potato?");
    assert_eq!(c.top, "I CAN HAZ");
    assert_eq!(c.bottom, "POTATO?");
    assert!(TICKER_MESSAGES.contains(&c.ticker.as_str()));
}

#[test]
fn random_caption_comes_from_the_list() {
    for _ in 0..10 {
        assert!(MEME_TEXTS.contains(&random_caption()));
    }
}

#[test]
fn render_frame_checks_index() {
    let generator = MemeCompositor::new().unwrap().with_layers(EffectLayers::none());
    let (fg, bg) = (solid(100, 100), solid(640, 480));
    let frame = generator
        .render_frame(Some(&fg), Some(&bg), "top", "bottom", 4)
        .unwrap();
    assert_eq!(frame.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
    let err = generator
        .render_frame(Some(&fg), Some(&bg), "top", "bottom", TOTAL_FRAMES)
        .unwrap_err();
    assert!(matches!(err, SpudcatError::Validation(_)));
}

#[test]
fn zero_frame_loop_is_an_encode_error() {
    let generator = MemeCompositor {
        total_frames: 0,
        ..MemeCompositor::new().unwrap()
    };
    let img = solid(32, 32);
    let err = generator
        .generate(Some(&img), Some(&img), "a", "b")
        .unwrap_err();
    assert!(matches!(err, SpudcatError::Encode(_)), "{err}");
}
