use std::sync::Arc;

use image::RgbaImage;

use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{SpudcatError, SpudcatResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::render::text::{FontFace, TextLine};

/// A raster prepared once and drawn on many frames.
#[derive(Clone)]
pub(crate) struct ImagePaint {
    paint: vello_cpu::Image,
    width: u32,
    height: u32,
}

impl ImagePaint {
    /// Upload straight-alpha `rgba` as a premultiplied pixmap.
    pub(crate) fn from_rgba(rgba: &RgbaImage) -> SpudcatResult<Self> {
        let (width, height) = rgba.dimensions();
        let mut bytes = rgba.as_raw().clone();
        premultiply_rgba8_in_place(&mut bytes);
        let pixmap = premul_bytes_to_pixmap(&bytes, width, height)?;
        Ok(Self {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            width,
            height,
        })
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }
}

/// Exclusively owned drawing surface for one frame.
///
/// Starts opaque black; [`FrameCanvas::finish`] consumes it and returns straight-alpha pixels.
pub(crate) struct FrameCanvas {
    canvas: Canvas,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl FrameCanvas {
    pub(crate) fn new(canvas: Canvas) -> SpudcatResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SpudcatError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SpudcatError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(SpudcatError::render("canvas must be non-empty"));
        }

        let mut out = Self {
            canvas,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        };
        out.fill_rect(
            Rect::new(0.0, 0.0, canvas.width_f(), canvas.height_f()),
            Rgba8::BLACK,
        );
        Ok(out)
    }

    pub(crate) fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Draw `image` with its top-left corner mapped through `transform`.
    pub(crate) fn draw_image(&mut self, image: &ImagePaint, transform: Affine) {
        self.reset(transform);
        self.ctx.set_paint(image.paint.clone());
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.reset(Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    pub(crate) fn fill_path(&mut self, path: &BezPath, transform: Affine, color: Rgba8) {
        self.reset(transform);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    pub(crate) fn stroke_path(&mut self, path: &BezPath, transform: Affine, width: f64, color: Rgba8) {
        self.reset(transform);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    /// Draw `line` so that the point at fraction (`ax`, `ay`) of its box lands on `at`,
    /// then apply `transform`.
    pub(crate) fn draw_text_anchored(
        &mut self,
        font: &FontFace,
        line: &TextLine,
        at: Point,
        anchor: (f64, f64),
        transform: Affine,
        color: Rgba8,
    ) {
        let origin = Affine::translate((
            at.x - anchor.0 * line.width,
            at.y - anchor.1 * line.height,
        ));
        self.reset(transform * origin);
        self.ctx.set_paint(color_to_cpu(color));

        for l in line.layout.lines() {
            for item in l.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font.glyph_font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize everything drawn so far into straight-alpha RGBA.
    pub(crate) fn finish(mut self) -> SpudcatResult<RgbaImage> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut bytes = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut bytes);
        RgbaImage::from_raw(self.canvas.width, self.canvas.height, bytes)
            .ok_or_else(|| SpudcatError::render("frame byte length mismatch"))
    }

    fn reset(&mut self, transform: Affine) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> SpudcatResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SpudcatError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SpudcatError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(SpudcatError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
