use image::{DynamicImage, RgbaImage};
use rand::seq::SliceRandom;

use crate::effects::params::compute_frame_params;
use crate::encode::gif::{AnimatedImage, AnimationAssembler};
use crate::foundation::core::Canvas;
use crate::foundation::error::{SpudcatError, SpudcatResult};
use crate::phrases::{CaptionPair, MEME_TEXTS, TICKER_MESSAGES};
use crate::render::compositor::{Captions, EffectLayers, FrameCompositor};
use crate::render::text::FontFace;

pub use crate::render::compositor::{
    BOTTOM_MARGIN, CANVAS_HEIGHT, CANVAS_WIDTH, FONT_SIZE, OUTLINE_SHIFT, SUBJECT_WIDTH_FRACTION,
    TOP_MARGIN,
};

/// Frames per animation.
pub const TOTAL_FRAMES: u32 = 16;
/// Per-frame delay in hundredths of a second.
pub const FRAME_DELAY_CS: u16 = 8;

/// Turns a foreground subject, a background subject and two captions into an animation.
pub trait MemeGenerator: Send + Sync {
    /// Render with explicit captions.
    ///
    /// Fails with [`SpudcatError::Validation`] naming the missing subject when either image is
    /// absent.
    fn generate(
        &self,
        foreground: Option<&DynamicImage>,
        background: Option<&DynamicImage>,
        top: &str,
        bottom: &str,
    ) -> SpudcatResult<AnimatedImage>;

    /// Render with a caption pair drawn uniformly from the built-in list.
    fn generate_random(
        &self,
        foreground: Option<&DynamicImage>,
        background: Option<&DynamicImage>,
    ) -> SpudcatResult<AnimatedImage>;
}

/// The CPU compositor behind [`MemeGenerator`].
#[derive(Clone, Debug)]
pub struct MemeCompositor {
    font: FontFace,
    canvas: Canvas,
    total_frames: u32,
    delay_cs: u16,
    layers: EffectLayers,
}

impl MemeCompositor {
    /// Build with the bundled font.
    ///
    /// A font that fails to load is a [`SpudcatError::Resource`] error.
    pub fn new() -> SpudcatResult<Self> {
        Ok(Self::with_font(FontFace::embedded()?))
    }

    pub fn with_font(font: FontFace) -> Self {
        Self {
            font,
            canvas: Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            total_frames: TOTAL_FRAMES,
            delay_cs: FRAME_DELAY_CS,
            layers: EffectLayers::default(),
        }
    }

    /// Select which optional overlays are drawn.
    pub fn with_layers(mut self, layers: EffectLayers) -> Self {
        self.layers = layers;
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Composite a single frame without quantizing it.
    pub fn render_frame(
        &self,
        foreground: Option<&DynamicImage>,
        background: Option<&DynamicImage>,
        top: &str,
        bottom: &str,
        index: u32,
    ) -> SpudcatResult<RgbaImage> {
        if index >= self.total_frames {
            return Err(SpudcatError::validation(format!(
                "frame index {index} out of range 0..{}",
                self.total_frames
            )));
        }
        let (fg, bg) = require_subjects(foreground, background)?;
        let mut compositor = FrameCompositor::new(
            self.canvas,
            &self.font,
            self.layers,
            fg,
            bg,
            captions(top, bottom),
        )?;
        compositor.compose(&compute_frame_params(index, self.total_frames, self.canvas))
    }
}

impl MemeGenerator for MemeCompositor {
    #[tracing::instrument(level = "debug", skip(self, foreground, background))]
    fn generate(
        &self,
        foreground: Option<&DynamicImage>,
        background: Option<&DynamicImage>,
        top: &str,
        bottom: &str,
    ) -> SpudcatResult<AnimatedImage> {
        let (fg, bg) = require_subjects(foreground, background)?;

        let mut compositor = FrameCompositor::new(
            self.canvas,
            &self.font,
            self.layers,
            fg,
            bg,
            captions(top, bottom),
        )?;
        let mut assembler =
            AnimationAssembler::new(self.canvas.width, self.canvas.height, self.delay_cs)?;

        for i in 0..self.total_frames {
            let params = compute_frame_params(i, self.total_frames, self.canvas);
            let frame = compositor.compose(&params)?;
            assembler.push(frame)?;
            tracing::trace!(frame = i, assembled = assembler.len(), "frame composited");
        }
        if assembler.is_empty() {
            return Err(SpudcatError::encode("no frames were composited"));
        }

        let anim = assembler.finish();
        tracing::debug!(frames = anim.frames.len(), "animation assembled");
        Ok(anim)
    }

    fn generate_random(
        &self,
        foreground: Option<&DynamicImage>,
        background: Option<&DynamicImage>,
    ) -> SpudcatResult<AnimatedImage> {
        let pair = random_caption();
        self.generate(foreground, background, pair.top, pair.bottom)
    }
}

/// A caption pair drawn uniformly from the built-in list.
pub fn random_caption() -> CaptionPair {
    MEME_TEXTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(CaptionPair {
            top: "",
            bottom: "",
        })
}

fn captions(top: &str, bottom: &str) -> Captions {
    let ticker = TICKER_MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default();
    Captions {
        top: top.to_uppercase(),
        bottom: bottom.to_uppercase(),
        ticker: ticker.to_string(),
    }
}

fn require_subjects<'a>(
    foreground: Option<&'a DynamicImage>,
    background: Option<&'a DynamicImage>,
) -> SpudcatResult<(&'a DynamicImage, &'a DynamicImage)> {
    let fg = foreground
        .ok_or_else(|| SpudcatError::validation("potato (foreground) image is required"))?;
    let bg = background
        .ok_or_else(|| SpudcatError::validation("cat (background) image is required"))?;
    if fg.width() == 0 || fg.height() == 0 {
        return Err(SpudcatError::validation(
            "potato (foreground) image is empty",
        ));
    }
    if bg.width() == 0 || bg.height() == 0 {
        return Err(SpudcatError::validation("cat (background) image is empty"));
    }
    Ok((fg, bg))
}

#[cfg(test)]
#[path = "../../tests/unit/meme/generator.rs"]
mod tests;
