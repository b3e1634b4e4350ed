//! Spudcat composites a potato and a cat into an animated, captioned GIF.
//!
//! - [`compute_frame_params`] derives the per-frame animation state
//! - [`MemeCompositor`] (via [`MemeGenerator`]) draws and quantizes every frame
//! - [`AnimatedImage`] serializes the result as GIF89a
//! - [`server::router`] exposes the whole pipeline over HTTP
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod effects;
pub(crate) mod encode;
pub(crate) mod meme;
pub(crate) mod render;

pub mod config;
pub mod phrases;
/// HTTP routes and serving.
pub mod server;
/// Subject image sources.
pub mod sources;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{SpudcatError, SpudcatResult};
pub use crate::foundation::rng::Rng64;

pub use crate::config::Config;
pub use crate::effects::color::hsl_to_rgb;
pub use crate::effects::params::{
    BOUNCE_HEIGHT, Burst, FrameParams, Sparkle, SubjectClone, TEXT_LIGHTNESS, TEXT_SATURATION,
    compute_frame_params,
};
pub use crate::encode::gif::{AnimatedImage, AnimationAssembler, PalettedFrame};
pub use crate::encode::palette::{Plan9Palette, plan9, quantize};
pub use crate::meme::generator::{
    BOTTOM_MARGIN, CANVAS_HEIGHT, CANVAS_WIDTH, FONT_SIZE, FRAME_DELAY_CS, MemeCompositor,
    MemeGenerator, OUTLINE_SHIFT, SUBJECT_WIDTH_FRACTION, TOP_MARGIN, TOTAL_FRAMES,
    random_caption,
};
pub use crate::render::compositor::EffectLayers;
pub use crate::render::primitives::{scaled_height, star_polygon, star_vertices};
pub use crate::render::text::FontFace;
pub use crate::sources::cataas::CataasClient;
pub use crate::sources::reddit::RedditClient;
