use std::borrow::Cow;
use std::io::Write;

use image::RgbaImage;

use crate::encode::palette::{plan9, quantize};
use crate::foundation::error::{SpudcatError, SpudcatResult};

/// One palette-indexed frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PalettedFrame {
    pub width: u16,
    pub height: u16,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
    /// Display time in hundredths of a second.
    pub delay_cs: u16,
}

/// An ordered animation over a single shared palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimatedImage {
    pub width: u16,
    pub height: u16,
    /// Packed RGB triples.
    pub palette: Vec<u8>,
    pub frames: Vec<PalettedFrame>,
    /// Number of repeats; `0` loops forever.
    pub loop_count: u16,
}

impl AnimatedImage {
    /// Serialize as GIF89a.
    pub fn encode_gif<W: Write>(&self, writer: W) -> SpudcatResult<()> {
        if self.frames.is_empty() {
            return Err(SpudcatError::encode("animation has no frames"));
        }

        let mut encoder = gif::Encoder::new(writer, self.width, self.height, &self.palette)
            .map_err(|e| SpudcatError::encode(format!("gif encoder init: {e}")))?;
        let repeat = match self.loop_count {
            0 => gif::Repeat::Infinite,
            n => gif::Repeat::Finite(n),
        };
        encoder
            .set_repeat(repeat)
            .map_err(|e| SpudcatError::encode(format!("gif repeat: {e}")))?;

        for (i, f) in self.frames.iter().enumerate() {
            let frame = gif::Frame {
                width: f.width,
                height: f.height,
                delay: f.delay_cs,
                buffer: Cow::Borrowed(&f.indices),
                ..Default::default()
            };
            encoder
                .write_frame(&frame)
                .map_err(|e| SpudcatError::encode(format!("gif frame {i}: {e}")))?;
        }
        Ok(())
    }

    /// Serialize as GIF89a into memory.
    pub fn to_gif_bytes(&self) -> SpudcatResult<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_gif(&mut out)?;
        Ok(out)
    }
}

/// Collects composited frames in order, quantizing each as it arrives.
#[derive(Debug)]
pub struct AnimationAssembler {
    width: u16,
    height: u16,
    delay_cs: u16,
    frames: Vec<PalettedFrame>,
}

impl AnimationAssembler {
    pub fn new(width: u32, height: u32, delay_cs: u16) -> SpudcatResult<Self> {
        let width: u16 = width
            .try_into()
            .map_err(|_| SpudcatError::encode("animation width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| SpudcatError::encode("animation height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            delay_cs,
            frames: Vec::new(),
        })
    }

    /// Quantize and append the next frame.
    pub fn push(&mut self, frame: RgbaImage) -> SpudcatResult<()> {
        if frame.dimensions() != (u32::from(self.width), u32::from(self.height)) {
            return Err(SpudcatError::encode(format!(
                "frame {} is {}x{}, expected {}x{}",
                self.frames.len(),
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }
        self.frames.push(PalettedFrame {
            width: self.width,
            height: self.height,
            indices: quantize(frame),
            delay_cs: self.delay_cs,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Finish with infinite looping.
    pub fn finish(self) -> AnimatedImage {
        AnimatedImage {
            width: self.width,
            height: self.height,
            palette: plan9().rgb_bytes(),
            frames: self.frames,
            loop_count: 0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
