//! Geometry and raster helpers shared by the compositor layers.

use std::f64::consts::{PI, TAU};

use image::{RgbaImage, imageops::FilterType};

use crate::foundation::core::{Affine, BezPath, Point, Vec2};

/// Height that preserves the aspect ratio of a `src_w`×`src_h` image at `target_w` pixels wide.
///
/// Integer arithmetic (truncating); a zero-width source yields `target_w`.
pub fn scaled_height(src_w: u32, src_h: u32, target_w: u32) -> u32 {
    if src_w == 0 {
        return target_w;
    }
    (u64::from(target_w) * u64::from(src_h) / u64::from(src_w)) as u32
}

/// Resample `src` to exactly `width`×`height` with bilinear filtering.
pub(crate) fn scale_image(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if src.width() == width && src.height() == height {
        return src.clone();
    }
    image::imageops::resize(src, width, height, FilterType::Triangle)
}

/// Which edge of a placed raster stays fixed on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AnchorEdge {
    Top,
    Bottom,
}

/// Resample `src` to `width` pixels wide, preserving aspect ratio.
///
/// Output taller than `max_height` keeps only the `max_height` rows next to `anchor`; the rest
/// would fall outside the canvas. Returns `None` when either scaled dimension is below one pixel.
pub(crate) fn scale_to_width_clipped(
    src: &RgbaImage,
    width: u32,
    max_height: u32,
    anchor: AnchorEdge,
) -> Option<RgbaImage> {
    let full_h = scaled_height(src.width(), src.height(), width);
    if width == 0 || full_h == 0 || max_height == 0 || src.width() == 0 || src.height() == 0 {
        return None;
    }
    if full_h <= max_height {
        return Some(scale_image(src, width, full_h));
    }

    let keep = (u64::from(src.height()) * u64::from(max_height) / u64::from(full_h)).max(1) as u32;
    let y = match anchor {
        AnchorEdge::Top => 0,
        AnchorEdge::Bottom => src.height() - keep,
    };
    let visible = image::imageops::crop_imm(src, 0, y, src.width(), keep).to_image();
    Some(scale_image(&visible, width, max_height))
}

/// Rotation by `angle` radians about `center`.
pub(crate) fn rotate_about(angle: f64, center: Point) -> Affine {
    Affine::rotate_about(angle, center)
}

/// Vertices of a star polygon: `2 * points` entries alternating outer and inner radius,
/// starting on the outer radius at `rotation` and advancing `π / points` per vertex.
pub fn star_vertices(
    center: Point,
    outer: f64,
    inner: f64,
    points: u32,
    rotation: f64,
) -> Vec<Point> {
    let step = PI / f64::from(points.max(1));
    (0..points * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = rotation + f64::from(i) * step;
            center + Vec2::new(r * a.cos(), r * a.sin())
        })
        .collect()
}

/// Closed star polygon path through [`star_vertices`].
pub fn star_polygon(center: Point, outer: f64, inner: f64, points: u32, rotation: f64) -> BezPath {
    polygon(&star_vertices(center, outer, inner, points, rotation))
}

/// Closed polygon through `vertices`; empty input yields an empty path.
pub(crate) fn polygon(vertices: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = vertices.iter();
    let Some(first) = iter.next() else {
        return path;
    };
    path.move_to(*first);
    for p in iter {
        path.line_to(*p);
    }
    path.close_path();
    path
}

/// Pie wedge from `start` to `start + sweep` radians.
pub(crate) fn wedge(center: Point, radius: f64, start: f64, sweep: f64) -> BezPath {
    let arc = kurbo::Arc::new(center, Vec2::new(radius, radius), start, sweep, 0.0);
    let mut path = BezPath::new();
    path.move_to(center);
    path.line_to(center + Vec2::from_angle(start) * radius);
    arc.to_cubic_beziers(0.1, |p1, p2, p3| path.curve_to(p1, p2, p3));
    path.close_path();
    path
}

/// Filled circle outline.
pub(crate) fn circle(center: Point, radius: f64) -> BezPath {
    use kurbo::Shape;
    kurbo::Circle::new(center, radius).to_path(0.1)
}

/// The four strokes of a sparkle: vertical, horizontal, and two diagonals at 0.6× length.
pub(crate) fn sparkle_segments(center: Point, size: f64) -> [(Point, Point); 4] {
    let half = size * 0.6;
    let (x, y) = (center.x, center.y);
    [
        (Point::new(x, y - size), Point::new(x, y + size)),
        (Point::new(x - size, y), Point::new(x + size, y)),
        (Point::new(x - half, y - half), Point::new(x + half, y + half)),
        (Point::new(x + half, y - half), Point::new(x - half, y + half)),
    ]
}

/// Open two-point path.
pub(crate) fn line(a: Point, b: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    path
}

/// The 3×3 neighbourhood at `shift` pixels, minus the centre, in row-major order.
pub(crate) fn outline_offsets(shift: f64) -> [Vec2; 8] {
    let mut out = [Vec2::ZERO; 8];
    let mut n = 0;
    for dx in [-shift, 0.0, shift] {
        for dy in [-shift, 0.0, shift] {
            if dx == 0.0 && dy == 0.0 {
                continue;
            }
            out[n] = Vec2::new(dx, dy);
            n += 1;
        }
    }
    out
}

/// Full turn split into `n` equal wedges.
pub(crate) fn wedge_sweep(n: u32) -> f64 {
    TAU / f64::from(n.max(1))
}

#[cfg(test)]
#[path = "../../tests/unit/render/primitives.rs"]
mod tests;
