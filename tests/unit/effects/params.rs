use super::*;

const FRAMES: u32 = 16;
const CANVAS: Canvas = Canvas::new(640, 480);

#[test]
fn repeated_calls_are_identical() {
    for i in 0..FRAMES {
        let a = compute_frame_params(i, FRAMES, CANVAS);
        let b = compute_frame_params(i, FRAMES, CANVAS);
        assert_eq!(a, b, "frame {i} must reproduce exactly");
        assert_eq!(a.sparkles, b.sparkles);
        assert_eq!(a.bursts, b.bursts);
        assert_eq!((a.shake_dx, a.shake_dy), (b.shake_dx, b.shake_dy));
    }
}

#[test]
fn random_layouts_vary_between_frames() {
    let a = compute_frame_params(3, FRAMES, CANVAS);
    let b = compute_frame_params(4, FRAMES, CANVAS);
    assert_ne!(a.sparkles, b.sparkles);
    assert_ne!(
        a.bursts.iter().map(|b| (b.x, b.y)).collect::<Vec<_>>(),
        b.bursts.iter().map(|b| (b.x, b.y)).collect::<Vec<_>>()
    );
}

#[test]
fn fill_color_follows_hue_sweep() {
    let start = compute_frame_params(0, FRAMES, CANVAS);
    assert_eq!(
        start.text_color,
        hsl_to_rgb(0.0, TEXT_SATURATION, TEXT_LIGHTNESS)
    );
    assert_eq!(start.text_color.r, 255);
    assert_eq!(start.text_color.g, start.text_color.b);

    let half = compute_frame_params(FRAMES / 2, FRAMES, CANVAS);
    assert_eq!(
        half.text_color,
        hsl_to_rgb(180.0, TEXT_SATURATION, TEXT_LIGHTNESS)
    );
    assert_eq!(half.text_color.g, 255);
    assert_eq!(half.text_color.g, half.text_color.b);
    assert!(half.text_color.r < 64);
}

#[test]
fn bounce_rests_at_zero_and_half() {
    for i in 0..FRAMES {
        let p = compute_frame_params(i, FRAMES, CANVAS);
        if i == 0 || i == FRAMES / 2 {
            assert_eq!(p.bounce_y, 0.0, "frame {i}");
        } else {
            assert!(p.bounce_y < 0.0, "frame {i} should bounce upward");
            assert!(p.bounce_y >= -BOUNCE_HEIGHT);
        }
    }
}

#[test]
fn bounce_is_negative_for_fine_grained_loops() {
    let frames = 1000;
    for i in [1, 7, 499, 501, 999] {
        assert!(compute_frame_params(i, frames, CANVAS).bounce_y < 0.0);
    }
    assert_eq!(compute_frame_params(500, frames, CANVAS).bounce_y, 0.0);
}

#[test]
fn closed_form_fields_stay_in_range() {
    for i in 0..FRAMES {
        let p = compute_frame_params(i, FRAMES, CANVAS);
        assert!((0.85..=1.15).contains(&p.font_scale));
        assert!(p.rotation.abs() <= WOBBLE_AMPLITUDE + 1e-12);
        assert!((1.0 - 1e-12..=1.08 + 1e-12).contains(&p.zoom_scale));
        assert!((0.2 - 1e-12..=0.6 + 1e-12).contains(&p.glow_alpha));
        assert!((p.glow_radius - GLOW_BASE_RADIUS).abs() <= 20.0 + 1e-9);
        assert!((0.0..std::f64::consts::PI).contains(&p.spiral_angle));
        assert_eq!(p.ticker_x, 640.0 - f64::from(i) * TICKER_SPEED);
    }
}

#[test]
fn shake_and_sparkles_are_bounded() {
    for i in 0..64 {
        let p = compute_frame_params(i, 64, CANVAS);
        assert!((-3..=3).contains(&p.shake_dx));
        assert!((-3..=3).contains(&p.shake_dy));
        assert!((6..=8).contains(&p.sparkles.len()));
        for s in &p.sparkles {
            assert!((0..640).contains(&s.x));
            assert!((0..480).contains(&s.y));
            assert!((4..=11).contains(&s.size));
            assert!((0.5..1.0).contains(&s.alpha));
        }
    }
}

#[test]
fn clones_keep_fixed_anchors_and_scales() {
    let a = compute_frame_params(1, FRAMES, CANVAS);
    let b = compute_frame_params(9, FRAMES, CANVAS);
    assert_eq!(a.clones.len(), 3);
    let scales: Vec<f64> = a.clones.iter().map(|c| c.scale).collect();
    assert_eq!(scales, vec![0.15, 0.20, 0.25]);
    for (ca, cb) in a.clones.iter().zip(&b.clones) {
        assert_eq!((ca.x, ca.y), (cb.x, cb.y));
        assert!(ca.bounce_y <= 0.0);
    }
}

#[test]
fn bursts_flash_two_of_three_frames() {
    for i in 0..FRAMES {
        let p = compute_frame_params(i, FRAMES, CANVAS);
        assert_eq!(p.bursts.len(), BURST_SLOTS);
        for (slot, b) in p.bursts.iter().enumerate() {
            assert_eq!(b.visible, (i as usize + slot) % 3 != 0);
            assert!((0.7..1.3).contains(&b.scale));
            assert!(b.rotation.abs() <= 0.25);
            assert!(BURST_WORDS.contains(&b.text));
            assert!(b.x >= BURST_INSET as i32 && b.x < 640 - BURST_INSET as i32);
            assert!(b.y >= BURST_INSET as i32 && b.y < 480 - BURST_INSET as i32);
        }
    }
}

#[test]
fn zero_total_frames_is_total() {
    let p = compute_frame_params(0, 0, CANVAS);
    assert_eq!(p.bounce_y, 0.0);
    assert_eq!(p.font_scale, 1.0);
}
