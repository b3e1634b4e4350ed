use std::f64::consts::{PI, TAU};

use crate::effects::color::hsl_to_rgb;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::rng::Rng64;
use crate::phrases::BURST_WORDS;

/// Peak upward travel of the main subject, in pixels.
pub const BOUNCE_HEIGHT: f64 = 40.0;
/// Saturation of the cycling text fill.
pub const TEXT_SATURATION: f64 = 1.0;
/// Lightness of the cycling text fill.
pub const TEXT_LIGHTNESS: f64 = 0.55;
/// Maximum wobble of the main subject, in radians (about 10°).
pub const WOBBLE_AMPLITUDE: f64 = 0.17;
/// Font-size oscillation around 1.0.
pub const FONT_PULSE: f64 = 0.15;
/// Ticker scroll speed, pixels per frame.
pub const TICKER_SPEED: f64 = 20.0;
/// Center radius of the glow band, in pixels.
pub const GLOW_BASE_RADIUS: f64 = 120.0;
/// Number of burst callouts per frame.
pub const BURST_SLOTS: usize = 2;
/// Inset from the canvas edges for burst centers, in pixels.
pub const BURST_INSET: u32 = 60;

const SHAKE_SEED: (u64, u64) = (7919, 6271);
const BURST_SEED: (u64, u64) = (104_729, 1_299_709);

const CLONE_BOUNCE_HEIGHT: f64 = 25.0;
const CLONE_WOBBLE: f64 = 0.25;

/// Fixed clone layout: anchor as a fraction of the canvas, width as a fraction of canvas width,
/// bounce cycles per loop.
const CLONE_LAYOUT: [CloneSlot; 3] = [
    CloneSlot {
        anchor: (0.04, 0.50),
        scale: 0.15,
        cycles: 1.0,
    },
    CloneSlot {
        anchor: (0.30, 0.62),
        scale: 0.20,
        cycles: 2.0,
    },
    CloneSlot {
        anchor: (0.10, 0.16),
        scale: 0.25,
        cycles: 3.0,
    },
];

struct CloneSlot {
    anchor: (f64, f64),
    scale: f64,
    cycles: f64,
}

/// A 4-point sparkle overlay.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Sparkle {
    /// Center x in pixels.
    pub x: i32,
    /// Center y in pixels.
    pub y: i32,
    /// Arm length in pixels.
    pub size: i32,
    /// Opacity in `0.5..1.0`.
    pub alpha: f64,
}

/// A smaller secondary copy of the foreground subject.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SubjectClone {
    /// Anchor x (left edge) in pixels.
    pub x: i32,
    /// Anchor y (top edge) in pixels.
    pub y: i32,
    /// Width as a fraction of the canvas width.
    pub scale: f64,
    /// Rotation about the clone center, radians.
    pub rotation: f64,
    /// Vertical offset, never positive.
    pub bounce_y: f64,
}

/// A comic starburst callout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Burst {
    /// Center x in pixels.
    pub x: i32,
    /// Center y in pixels.
    pub y: i32,
    /// Label drawn in the middle.
    pub text: &'static str,
    /// Rotation about the center, radians.
    pub rotation: f64,
    /// Size multiplier in `0.7..1.3`.
    pub scale: f64,
    /// Whether the burst is drawn on this frame.
    pub visible: bool,
}

/// Everything that varies from one frame to the next.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameParams {
    /// Caption fill color (hue sweep).
    pub text_color: Rgba8,
    /// Caption font-size multiplier.
    pub font_scale: f64,
    /// Vertical offset of the main subject; `0` or negative.
    pub bounce_y: f64,
    /// Wobble of the main subject, radians.
    pub rotation: f64,
    /// Horizontal shake of the background, pixels.
    pub shake_dx: i32,
    /// Vertical shake of the background, pixels.
    pub shake_dy: i32,
    /// Sparkle overlays.
    pub sparkles: Vec<Sparkle>,
    /// Secondary subject copies.
    pub clones: Vec<SubjectClone>,
    /// Peak opacity of the glow behind the main subject.
    pub glow_alpha: f64,
    /// Outer radius of the glow.
    pub glow_radius: f64,
    /// Left edge of the ticker text.
    pub ticker_x: f64,
    /// Background zoom factor in `1.0..=1.08`.
    pub zoom_scale: f64,
    /// Rotation of the hypnotic wedge overlay, radians.
    pub spiral_angle: f64,
    /// Burst callouts.
    pub bursts: Vec<Burst>,
}

/// Compute the animation parameters for `frame` of a `total_frames` loop.
///
/// Pure and total: closed-form fields depend only on `frame / total_frames`, and the
/// pseudo-random fields come from generators seeded by `frame` alone.
pub fn compute_frame_params(frame: u32, total_frames: u32, canvas: Canvas) -> FrameParams {
    let t = if total_frames == 0 {
        0.0
    } else {
        f64::from(frame) / f64::from(total_frames)
    };
    let wave = (TAU * t).sin();

    let text_color = hsl_to_rgb(t * 360.0, TEXT_SATURATION, TEXT_LIGHTNESS);
    let font_scale = 1.0 + FONT_PULSE * wave;
    let bounce_y = main_bounce(frame, total_frames, wave);
    let rotation = WOBBLE_AMPLITUDE * wave;

    let mut rng = Rng64::affine(u64::from(frame), SHAKE_SEED.0, SHAKE_SEED.1);
    let shake_dx = rng.range_i32(-3, 3);
    let shake_dy = rng.range_i32(-3, 3);

    let sparkle_count = 6 + rng.below(3);
    let sparkles = (0..sparkle_count)
        .map(|_| Sparkle {
            x: rng.below(canvas.width) as i32,
            y: rng.below(canvas.height) as i32,
            size: 4 + rng.below(8) as i32,
            alpha: rng.range_f64(0.5, 1.0),
        })
        .collect();

    let clones = CLONE_LAYOUT
        .iter()
        .enumerate()
        .map(|(k, slot)| {
            let phase = k as f64 * TAU / 3.0;
            let s = (TAU * slot.cycles * t + phase).sin();
            SubjectClone {
                x: (slot.anchor.0 * canvas.width_f()) as i32,
                y: (slot.anchor.1 * canvas.height_f()) as i32,
                scale: slot.scale,
                rotation: CLONE_WOBBLE * s,
                bounce_y: -(s.abs() * CLONE_BOUNCE_HEIGHT),
            }
        })
        .collect();

    let fast = (TAU * 1.5 * t).sin();
    let glow_alpha = 0.4 + 0.2 * fast;
    let glow_radius = GLOW_BASE_RADIUS + 20.0 * fast;

    let ticker_x = canvas.width_f() - f64::from(frame) * TICKER_SPEED;
    let zoom_scale = 1.04 + 0.04 * (TAU * 0.8 * t).sin();
    let spiral_angle = PI * t;

    let bursts = compute_bursts(frame, canvas);

    FrameParams {
        text_color,
        font_scale,
        bounce_y,
        rotation,
        shake_dx,
        shake_dy,
        sparkles,
        clones,
        glow_alpha,
        glow_radius,
        ticker_x,
        zoom_scale,
        spiral_angle,
        bursts,
    }
}

/// `-|sin(2πt)| * BOUNCE_HEIGHT`, exactly zero on the two rest frames of each loop.
fn main_bounce(frame: u32, total_frames: u32, wave: f64) -> f64 {
    if total_frames == 0 || (2 * u64::from(frame)) % u64::from(total_frames) == 0 {
        return 0.0;
    }
    -(wave.abs() * BOUNCE_HEIGHT)
}

fn compute_bursts(frame: u32, canvas: Canvas) -> Vec<Burst> {
    let mut rng = Rng64::affine(u64::from(frame), BURST_SEED.0, BURST_SEED.1);
    let span_x = canvas.width.saturating_sub(2 * BURST_INSET).max(1);
    let span_y = canvas.height.saturating_sub(2 * BURST_INSET).max(1);

    (0..BURST_SLOTS)
        .map(|slot| Burst {
            x: (BURST_INSET + rng.below(span_x)) as i32,
            y: (BURST_INSET + rng.below(span_y)) as i32,
            text: rng.pick(BURST_WORDS).copied().unwrap_or("POW!"),
            rotation: rng.range_f64(-0.25, 0.25),
            scale: rng.range_f64(0.7, 1.3),
            visible: (frame as usize + slot) % 3 != 0,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/effects/params.rs"]
mod tests;
