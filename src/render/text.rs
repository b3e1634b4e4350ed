use std::sync::Arc;

use crate::foundation::error::{SpudcatError, SpudcatResult};

/// Bundled caption typeface.
pub const EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// A parsed font ready for layout and glyph drawing.
///
/// Cheap to clone; the bytes are shared.
#[derive(Clone)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family_name", &self.family_name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl FontFace {
    /// Parse `bytes` and resolve the family name.
    pub fn from_bytes(bytes: Vec<u8>) -> SpudcatResult<Self> {
        if bytes.is_empty() {
            return Err(SpudcatError::resource("font bytes are empty"));
        }
        let bytes = Arc::new(bytes);
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, &bytes)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        Ok(Self {
            bytes,
            family_name,
            font,
        })
    }

    /// The bundled typeface.
    pub fn embedded() -> SpudcatResult<Self> {
        Self::from_bytes(EMBEDDED_FONT.to_vec())
    }

    /// Family name reported by the font tables.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub(crate) fn glyph_font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> SpudcatResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| SpudcatError::resource("no font families registered from font bytes"))?;

    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_string)
        .ok_or_else(|| SpudcatError::resource("registered font family has no name"))
}

/// One shaped line of text, measured in pixels.
pub(crate) struct TextLine {
    pub(crate) layout: parley::Layout<()>,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

/// Parley contexts bound to one [`FontFace`].
///
/// The contexts are not `Sync`, so a generator builds one per animation and keeps it for
/// every frame.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
}

impl TextLayoutEngine {
    pub(crate) fn new(face: &FontFace) -> SpudcatResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, &face.bytes)?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Shape `text` on a single unbroken line at `size_px`.
    pub(crate) fn layout_line(&mut self, text: &str, size_px: f32) -> SpudcatResult<TextLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SpudcatError::render(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        Ok(TextLine {
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
            layout,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
