//! The fixed 256-colour Plan 9 palette and Floyd–Steinberg quantization against it.

use std::collections::HashMap;
use std::sync::OnceLock;

use image::{Rgba, RgbaImage, imageops::ColorMap};

/// Number of palette entries.
pub const PALETTE_LEN: usize = 256;

/// The Plan 9 reference palette: a 4×4×4 RGB cube crossed with four intensity levels.
pub struct Plan9Palette {
    colors: [[u8; 3]; PALETTE_LEN],
    exact: HashMap<[u8; 3], u8>,
    /// `(red, index)` sorted ascending, for a pruned nearest search.
    by_red: Vec<(u8, u8)>,
}

impl std::fmt::Debug for Plan9Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plan9Palette").finish_non_exhaustive()
    }
}

impl Plan9Palette {
    fn build() -> Self {
        let mut colors = [[0u8; 3]; PALETTE_LEN];
        let mut i = 0i32;
        for r in 0..4i32 {
            for v in 0..4i32 {
                let mut j = v - r;
                for g in 0..4i32 {
                    for b in 0..4i32 {
                        let den = r.max(g).max(b);
                        let rgb = if den == 0 {
                            let c = (0x11 * v) as u8;
                            [c, c, c]
                        } else {
                            let num = 17 * (4 * den + v);
                            [
                                (r * num / den) as u8,
                                (g * num / den) as u8,
                                (b * num / den) as u8,
                            ]
                        };
                        colors[(i + (j & 0x0f)) as usize] = rgb;
                        j += 1;
                    }
                }
                i += 16;
            }
        }

        let mut exact = HashMap::with_capacity(PALETTE_LEN);
        for (idx, c) in colors.iter().enumerate().rev() {
            exact.insert(*c, idx as u8);
        }
        let mut by_red: Vec<(u8, u8)> = colors
            .iter()
            .enumerate()
            .map(|(idx, c)| (c[0], idx as u8))
            .collect();
        by_red.sort_unstable();

        Self {
            colors,
            exact,
            by_red,
        }
    }

    /// Palette entry `index` as RGB.
    pub fn color(&self, index: u8) -> [u8; 3] {
        self.colors[usize::from(index)]
    }

    /// Palette as packed RGB triples, the layout GIF colour tables use.
    pub fn rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flatten().copied().collect()
    }

    /// Index of the nearest entry by squared RGB distance; ties go to the lowest index.
    pub fn nearest(&self, rgb: [u8; 3]) -> u8 {
        if let Some(&idx) = self.exact.get(&rgb) {
            return idx;
        }
        // Walk outward from the closest red value; once the red gap alone exceeds the best
        // distance no further entry can win.
        let start = self.by_red.partition_point(|&(r, _)| r < rgb[0]);
        let mut best = (u32::MAX, u8::MAX);
        for &(r, idx) in &self.by_red[start..] {
            if sq(r, rgb[0]) > best.0 {
                break;
            }
            best = best.min((distance(self.colors[usize::from(idx)], rgb), idx));
        }
        for &(r, idx) in self.by_red[..start].iter().rev() {
            if sq(r, rgb[0]) > best.0 {
                break;
            }
            best = best.min((distance(self.colors[usize::from(idx)], rgb), idx));
        }
        best.1
    }
}

fn sq(a: u8, b: u8) -> u32 {
    let d = i32::from(a) - i32::from(b);
    (d * d) as u32
}

fn distance(a: [u8; 3], b: [u8; 3]) -> u32 {
    sq(a[0], b[0]) + sq(a[1], b[1]) + sq(a[2], b[2])
}

impl ColorMap for Plan9Palette {
    type Color = Rgba<u8>;

    fn index_of(&self, color: &Rgba<u8>) -> usize {
        let [r, g, b, _] = color.0;
        usize::from(self.nearest([r, g, b]))
    }

    fn lookup(&self, index: usize) -> Option<Rgba<u8>> {
        self.colors.get(index).map(|&[r, g, b]| Rgba([r, g, b, 255]))
    }

    fn has_lookup(&self) -> bool {
        true
    }

    fn map_color(&self, color: &mut Rgba<u8>) {
        let [r, g, b] = self.color(self.nearest([color.0[0], color.0[1], color.0[2]]));
        *color = Rgba([r, g, b, 255]);
    }
}

/// Shared palette instance.
pub fn plan9() -> &'static Plan9Palette {
    static PALETTE: OnceLock<Plan9Palette> = OnceLock::new();
    PALETTE.get_or_init(Plan9Palette::build)
}

/// Dither `frame` onto the Plan 9 palette and return one index per pixel, row-major.
///
/// Total: every input maps to some entry.
pub fn quantize(mut frame: RgbaImage) -> Vec<u8> {
    let palette = plan9();
    image::imageops::dither(&mut frame, palette);
    image::imageops::index_colors(&frame, palette).into_raw()
}

#[cfg(test)]
#[path = "../../tests/unit/encode/palette.rs"]
mod tests;
