use super::*;
use crate::effects::params::compute_frame_params;

const CANVAS: Canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, image::Rgba(rgba)))
}

fn captions() -> Captions {
    Captions {
        top: "TOP".to_string(),
        bottom: "BOTTOM".to_string(),
        ticker: "BREAKING: TEST".to_string(),
    }
}

#[test]
fn frame_has_canvas_size_and_is_opaque() {
    let font = FontFace::embedded().unwrap();
    let fg = solid(200, 200, [0, 255, 0, 255]);
    let bg = solid(640, 480, [0, 0, 255, 255]);
    let mut comp =
        FrameCompositor::new(CANVAS, &font, EffectLayers::all(), &fg, &bg, captions()).unwrap();

    let frame = comp.compose(&compute_frame_params(3, 16, CANVAS)).unwrap();
    assert_eq!(frame.dimensions(), (640, 480));
    assert!(frame.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn subject_sits_lower_right_over_background() {
    let font = FontFace::embedded().unwrap();
    let fg = solid(200, 200, [0, 255, 0, 255]);
    let bg = solid(320, 240, [0, 0, 255, 255]);
    let mut comp =
        FrameCompositor::new(CANVAS, &font, EffectLayers::none(), &fg, &bg, captions()).unwrap();

    let mut params = compute_frame_params(0, 16, CANVAS);
    params.sparkles.clear();
    let frame = comp.compose(&params).unwrap();
    // Subject is 256x256 at (364, 164) on the rest frame.
    let inside = frame.get_pixel(490, 300).0;
    assert_eq!(&inside[..3], &[0, 255, 0]);
    let background = frame.get_pixel(200, 200).0;
    assert_eq!(&background[..3], &[0, 0, 255]);
}

#[test]
fn ticker_banner_darkens_bottom_strip() {
    let font = FontFace::embedded().unwrap();
    let fg = solid(10, 10, [0, 255, 0, 255]);
    let bg = solid(640, 480, [255, 255, 255, 255]);
    let layers = EffectLayers {
        ticker: true,
        ..EffectLayers::none()
    };
    let mut comp = FrameCompositor::new(CANVAS, &font, layers, &fg, &bg, captions()).unwrap();

    let mut params = compute_frame_params(0, 16, CANVAS);
    params.ticker_x = 2000.0;
    params.sparkles.clear();
    let frame = comp.compose(&params).unwrap();
    let banner = frame.get_pixel(5, 470).0;
    assert!(banner[0] < 120, "banner pixel {banner:?}");
    let above = frame.get_pixel(5, 300).0;
    assert_eq!(above[0], 255);
}

#[test]
fn flat_foreground_draws_no_subject() {
    let font = FontFace::embedded().unwrap();
    let fg = solid(1000, 1, [0, 255, 0, 255]);
    let bg = solid(64, 64, [0, 0, 255, 255]);
    let mut comp =
        FrameCompositor::new(CANVAS, &font, EffectLayers::none(), &fg, &bg, captions()).unwrap();
    assert!(comp.subject.is_none());

    let mut params = compute_frame_params(0, 16, CANVAS);
    params.sparkles.clear();
    let frame = comp.compose(&params).unwrap();
    assert_eq!(frame.dimensions(), (640, 480));
    assert_eq!(&frame.get_pixel(490, 400).0[..3], &[0, 0, 255]);
}

#[test]
fn tall_foreground_is_clipped_to_canvas() {
    let font = FontFace::embedded().unwrap();
    let fg = solid(10, 3000, [0, 255, 0, 255]);
    let bg = solid(64, 64, [0, 0, 255, 255]);
    let mut comp =
        FrameCompositor::new(CANVAS, &font, EffectLayers::all(), &fg, &bg, captions()).unwrap();
    let subject = comp.subject.as_ref().unwrap();
    assert_eq!((subject.width(), subject.height()), (256, 480));

    for i in 0..16 {
        comp.compose(&compute_frame_params(i, 16, CANVAS)).unwrap();
    }
    assert!(
        comp.clone_paints
            .values()
            .flatten()
            .all(|p| p.height() <= CANVAS_HEIGHT)
    );
}

#[test]
fn degenerate_clones_are_skipped() {
    let font = FontFace::embedded().unwrap();
    let fg = solid(1000, 4, [0, 255, 0, 255]);
    let bg = solid(64, 64, [0, 0, 255, 255]);
    let mut comp =
        FrameCompositor::new(CANVAS, &font, EffectLayers::all(), &fg, &bg, captions()).unwrap();

    comp.compose(&compute_frame_params(5, 16, CANVAS)).unwrap();
    assert_eq!(comp.clone_paints.len(), 3);
    assert!(comp.clone_paints.values().all(Option::is_none));
}

#[test]
fn clone_rasters_are_reused_across_frames() {
    let font = FontFace::embedded().unwrap();
    let fg = solid(100, 50, [0, 255, 0, 255]);
    let bg = solid(64, 64, [0, 0, 255, 255]);
    let mut comp =
        FrameCompositor::new(CANVAS, &font, EffectLayers::all(), &fg, &bg, captions()).unwrap();

    for i in 0..3 {
        comp.compose(&compute_frame_params(i, 16, CANVAS)).unwrap();
    }
    assert_eq!(comp.clone_paints.len(), 3);
    let widths: Vec<u32> = comp
        .clone_paints
        .values()
        .flatten()
        .map(ImagePaint::width)
        .collect();
    assert_eq!(widths.len(), 3);
}
