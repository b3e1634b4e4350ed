//! Per-frame layer compositing.
//!
//! Layers are drawn back to front in a fixed order: background, hypnotic wedges, glow, main
//! subject, clones, bursts, sparkles, captions, ticker.

use std::collections::HashMap;

use image::{DynamicImage, RgbaImage};

use crate::effects::params::{Burst, FrameParams, Sparkle, SubjectClone};
use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Vec2};
use crate::foundation::error::SpudcatResult;
use crate::render::canvas::{FrameCanvas, ImagePaint};
use crate::render::primitives::{
    AnchorEdge, circle, line, outline_offsets, rotate_about, scale_image, scale_to_width_clipped,
    sparkle_segments, star_polygon, wedge, wedge_sweep,
};
use crate::render::text::{FontFace, TextLayoutEngine, TextLine};

/// Output canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 640;
/// Output canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 480;
/// Caption size before the per-frame pulse.
pub const FONT_SIZE: f64 = 48.0;
/// Caption outline offset in pixels. Fixed regardless of the font pulse.
pub const OUTLINE_SHIFT: f64 = 2.0;
/// Vertical centre of the top caption.
pub const TOP_MARGIN: f64 = 40.0;
/// Vertical centre of the bottom caption.
pub const BOTTOM_MARGIN: f64 = 440.0;
/// Main subject width as a fraction of the canvas width.
pub const SUBJECT_WIDTH_FRACTION: f64 = 0.4;

const ZOOM_THRESHOLD: f64 = 1.001;

const HYPNO_WEDGES: u32 = 8;
const HYPNO_ALPHA: f64 = 0.08;
const HYPNO_RADIUS_FRACTION: f64 = 0.8;

const GLOW_RINGS: u32 = 12;
const GLOW_COLOR: Rgba8 = Rgba8::rgb(255, 217, 51);

const SUBJECT_RIGHT_INSET: f64 = 20.0;
const SUBJECT_BOTTOM_INSET: f64 = 60.0;

const BURST_OUTER: f64 = 45.0;
const BURST_INNER: f64 = 22.0;
const BURST_POINTS: u32 = 10;
const BURST_FONT_SIZE: f64 = 16.0;
const BURST_FILL: Rgba8 = Rgba8::rgba(255, 242, 0, 230);
const BURST_INK: Rgba8 = Rgba8::rgb(204, 0, 0);

const SPARKLE_COLOR: Rgba8 = Rgba8::rgb(255, 255, 200);
const SPARKLE_WIDTH: f64 = 2.0;

const TICKER_HEIGHT: f64 = 30.0;
const TICKER_ACCENT: f64 = 2.0;
const TICKER_FONT_SIZE: f64 = 18.0;
const TICKER_GAP: f64 = 100.0;

/// Which optional overlays are drawn.
///
/// Background, main subject, sparkles and captions are always drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EffectLayers {
    /// Rotating translucent wedges over the background.
    pub hypnotic: bool,
    /// Gold rings behind the main subject.
    pub glow: bool,
    /// Smaller bouncing copies of the main subject.
    pub clones: bool,
    /// Comic starburst callouts.
    pub bursts: bool,
    /// Scrolling headline banner along the bottom edge.
    pub ticker: bool,
}

impl Default for EffectLayers {
    fn default() -> Self {
        Self::all()
    }
}

impl EffectLayers {
    /// Every optional overlay enabled.
    pub const fn all() -> Self {
        Self {
            hypnotic: true,
            glow: true,
            clones: true,
            bursts: true,
            ticker: true,
        }
    }

    /// Only the always-on layers.
    pub const fn none() -> Self {
        Self {
            hypnotic: false,
            glow: false,
            clones: false,
            bursts: false,
            ticker: false,
        }
    }
}

/// Text drawn on every frame of one animation.
#[derive(Clone, Debug)]
pub(crate) struct Captions {
    pub(crate) top: String,
    pub(crate) bottom: String,
    pub(crate) ticker: String,
}

/// Draws frames for one animation.
///
/// Subject rasters are scaled once at construction; per-frame work is limited to drawing.
pub(crate) struct FrameCompositor<'a> {
    canvas: Canvas,
    font: &'a FontFace,
    text: TextLayoutEngine,
    layers: EffectLayers,
    captions: Captions,
    ticker_line: Option<TextLine>,
    background: ImagePaint,
    subject_src: RgbaImage,
    subject_width: f64,
    subject: Option<ImagePaint>,
    clone_paints: HashMap<u32, Option<ImagePaint>>,
}

impl<'a> FrameCompositor<'a> {
    pub(crate) fn new(
        canvas: Canvas,
        font: &'a FontFace,
        layers: EffectLayers,
        foreground: &DynamicImage,
        background: &DynamicImage,
        captions: Captions,
    ) -> SpudcatResult<Self> {
        let background = ImagePaint::from_rgba(&scale_image(
            &background.to_rgba8(),
            canvas.width,
            canvas.height,
        ))?;

        let subject_src = foreground.to_rgba8();
        let subject_w = (canvas.width_f() * SUBJECT_WIDTH_FRACTION) as u32;
        let subject =
            scale_to_width_clipped(&subject_src, subject_w, canvas.height, AnchorEdge::Bottom)
                .map(|img| ImagePaint::from_rgba(&img))
                .transpose()?;
        if subject.is_none() {
            tracing::debug!(
                width = subject_src.width(),
                height = subject_src.height(),
                "foreground scales below one pixel, main subject skipped"
            );
        }

        let mut text = TextLayoutEngine::new(font)?;
        let ticker_line = if layers.ticker && !captions.ticker.is_empty() {
            Some(text.layout_line(&captions.ticker, TICKER_FONT_SIZE as f32)?)
        } else {
            None
        };

        Ok(Self {
            canvas,
            font,
            text,
            layers,
            captions,
            ticker_line,
            background,
            subject_src,
            subject_width: f64::from(subject_w),
            subject,
            clone_paints: HashMap::new(),
        })
    }

    /// Composite one frame.
    #[tracing::instrument(level = "trace", skip_all)]
    pub(crate) fn compose(&mut self, params: &FrameParams) -> SpudcatResult<RgbaImage> {
        let mut dc = FrameCanvas::new(self.canvas)?;

        draw_background(
            &mut dc,
            &self.background,
            params.zoom_scale,
            (params.shake_dx, params.shake_dy),
        );

        if self.layers.hypnotic {
            draw_hypnotic(&mut dc, params.spiral_angle);
        }

        let subject_w = self.subject_width;
        let subject_h = self
            .subject
            .as_ref()
            .map_or(0.0, |p| f64::from(p.height()));
        let origin = Point::new(
            self.canvas.width_f() - subject_w - SUBJECT_RIGHT_INSET,
            self.canvas.height_f() - subject_h - SUBJECT_BOTTOM_INSET + params.bounce_y,
        );
        let center = origin + Vec2::new(subject_w / 2.0, subject_h / 2.0);

        if self.layers.glow {
            draw_glow(&mut dc, center, params.glow_radius, params.glow_alpha);
        }

        if let Some(subject) = &self.subject {
            dc.draw_image(
                subject,
                rotate_about(params.rotation, center) * Affine::translate(origin.to_vec2()),
            );
        }

        if self.layers.clones {
            for clone in &params.clones {
                self.draw_clone(&mut dc, clone)?;
            }
        }

        if self.layers.bursts {
            for burst in params.bursts.iter().filter(|b| b.visible) {
                self.draw_burst(&mut dc, burst)?;
            }
        }

        for sparkle in &params.sparkles {
            draw_sparkle(&mut dc, sparkle);
        }

        let size = (FONT_SIZE * params.font_scale) as f32;
        let cx = self.canvas.width_f() / 2.0;
        let top = self.text.layout_line(&self.captions.top, size)?;
        let bottom = self.text.layout_line(&self.captions.bottom, size)?;
        draw_caption(&mut dc, self.font, &top, Point::new(cx, TOP_MARGIN), params.text_color);
        draw_caption(
            &mut dc,
            self.font,
            &bottom,
            Point::new(cx, BOTTOM_MARGIN),
            params.text_color,
        );

        if let Some(ticker) = &self.ticker_line {
            draw_ticker(&mut dc, self.font, ticker, params.ticker_x);
        }

        dc.finish()
    }

    fn draw_clone(&mut self, dc: &mut FrameCanvas, clone: &SubjectClone) -> SpudcatResult<()> {
        let w = (self.canvas.width_f() * clone.scale) as u32;
        let paint = match self.clone_paints.get(&w) {
            Some(p) => p.clone(),
            None => {
                let p = scale_to_width_clipped(
                    &self.subject_src,
                    w,
                    self.canvas.height,
                    AnchorEdge::Top,
                )
                .map(|img| ImagePaint::from_rgba(&img))
                .transpose()?;
                self.clone_paints.insert(w, p.clone());
                p
            }
        };
        let Some(paint) = paint else {
            return Ok(());
        };

        let origin = Point::new(f64::from(clone.x), f64::from(clone.y) + clone.bounce_y);
        let center = origin
            + Vec2::new(
                f64::from(paint.width()) / 2.0,
                f64::from(paint.height()) / 2.0,
            );
        dc.draw_image(
            &paint,
            rotate_about(clone.rotation, center) * Affine::translate(origin.to_vec2()),
        );
        Ok(())
    }

    fn draw_burst(&mut self, dc: &mut FrameCanvas, burst: &Burst) -> SpudcatResult<()> {
        let c = Point::new(f64::from(burst.x), f64::from(burst.y));
        let spin = rotate_about(burst.rotation, c);
        let star = star_polygon(
            c,
            BURST_OUTER * burst.scale,
            BURST_INNER * burst.scale,
            BURST_POINTS,
            0.0,
        );
        dc.fill_path(&star, spin, BURST_FILL);
        dc.stroke_path(&star, spin, 2.0, BURST_INK);

        let label = self
            .text
            .layout_line(burst.text, (BURST_FONT_SIZE * burst.scale) as f32)?;
        dc.draw_text_anchored(self.font, &label, c, (0.5, 0.5), spin, BURST_INK);
        Ok(())
    }
}

fn draw_background(dc: &mut FrameCanvas, bg: &ImagePaint, zoom: f64, shake: (i32, i32)) {
    let canvas = dc.canvas();
    let (dx, dy) = (f64::from(shake.0), f64::from(shake.1));
    if zoom <= ZOOM_THRESHOLD {
        dc.draw_image(bg, Affine::translate((dx, dy)));
        return;
    }

    let zw = (canvas.width_f() * zoom).floor();
    let zh = (canvas.height_f() * zoom).floor();
    let ox = -((zw - canvas.width_f()) / 2.0).trunc() + dx;
    let oy = -((zh - canvas.height_f()) / 2.0).trunc() + dy;
    let fit = Affine::scale_non_uniform(
        zw / f64::from(bg.width()),
        zh / f64::from(bg.height()),
    );
    dc.draw_image(bg, Affine::translate((ox, oy)) * fit);
}

fn draw_hypnotic(dc: &mut FrameCanvas, angle: f64) {
    let canvas = dc.canvas();
    let radius = canvas.width_f() * HYPNO_RADIUS_FRACTION;
    let sweep = wedge_sweep(HYPNO_WEDGES);
    let color = Rgba8::WHITE.with_alpha(HYPNO_ALPHA);
    for i in (1..HYPNO_WEDGES).step_by(2) {
        let start = angle + f64::from(i) * sweep;
        dc.fill_path(
            &wedge(canvas.center(), radius, start, sweep),
            Affine::IDENTITY,
            color,
        );
    }
}

fn draw_glow(dc: &mut FrameCanvas, center: Point, radius: f64, alpha: f64) {
    let rings = f64::from(GLOW_RINGS);
    for i in (0..=GLOW_RINGS).rev() {
        let f = f64::from(i) / rings;
        let r = radius * f;
        let ring_alpha = alpha * (1.0 - f) * 0.8;
        if ring_alpha < 0.01 || r <= 0.0 {
            continue;
        }
        dc.fill_path(
            &circle(center, r),
            Affine::IDENTITY,
            GLOW_COLOR.with_alpha(ring_alpha),
        );
    }
}

fn draw_sparkle(dc: &mut FrameCanvas, s: &Sparkle) {
    let color = SPARKLE_COLOR.with_alpha(s.alpha);
    let c = Point::new(f64::from(s.x), f64::from(s.y));
    for (a, b) in sparkle_segments(c, f64::from(s.size)) {
        dc.stroke_path(&line(a, b), Affine::IDENTITY, SPARKLE_WIDTH, color);
    }
}

fn draw_caption(dc: &mut FrameCanvas, font: &FontFace, text: &TextLine, at: Point, fill: Rgba8) {
    for offset in outline_offsets(OUTLINE_SHIFT) {
        dc.draw_text_anchored(
            font,
            text,
            at + offset,
            (0.5, 0.5),
            Affine::IDENTITY,
            Rgba8::BLACK,
        );
    }
    dc.draw_text_anchored(font, text, at, (0.5, 0.5), Affine::IDENTITY, fill);
}

fn draw_ticker(dc: &mut FrameCanvas, font: &FontFace, text: &TextLine, x: f64) {
    let canvas = dc.canvas();
    let (w, h) = (canvas.width_f(), canvas.height_f());
    let top = h - TICKER_HEIGHT;

    dc.fill_rect(Rect::new(0.0, top, w, h), Rgba8::BLACK.with_alpha(0.7));
    dc.fill_rect(
        Rect::new(0.0, top, w, top + TICKER_ACCENT),
        BURST_INK.with_alpha(0.9),
    );

    let y = top + TICKER_HEIGHT / 2.0;
    for x in [x, x + text.width + TICKER_GAP] {
        dc.draw_text_anchored(
            font,
            text,
            Point::new(x, y),
            (0.0, 0.5),
            Affine::IDENTITY,
            Rgba8::WHITE,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
