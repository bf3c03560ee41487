//! Glyph rasterization via swash.

use std::sync::Arc;

use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;
use swash::{CacheKey, FontRef};

use super::{FontError, FontFile, GlyphBitmap, GlyphError, GlyphRasterizer};

/// Parsed face location inside the shared font bytes.
struct FaceData {
    bytes: Arc<Vec<u8>>,
    offset: u32,
    cache_key: CacheKey,
}

fn font_ref(fd: &FaceData) -> FontRef<'_> {
    FontRef {
        data: &fd.bytes,
        offset: fd.offset,
        key: fd.cache_key,
    }
}

/// Rasterizes single characters from one face at one pixel size.
///
/// Each glyph bitmap is as wide as the glyph's advance (or its ink, if the
/// ink is wider) and as tall as its ink box, with the ink box's top-left
/// corner at pixel (0, 0). Bearings are discarded.
pub struct SwashRasterizer {
    face: FaceData,
    pixel_size: u32,
    scale_context: ScaleContext,
}

impl SwashRasterizer {
    /// Parse the first face of `font` for rasterizing at `pixel_size`.
    pub fn new(font: &FontFile, pixel_size: u32) -> Result<Self, FontError> {
        if pixel_size == 0 {
            return Err(FontError::InvalidSize(pixel_size));
        }
        let bytes = Arc::clone(font.data());
        let (offset, cache_key) = {
            let fr = FontRef::from_index(&bytes, 0).ok_or_else(|| FontError::Parse {
                path: font.path().to_owned(),
            })?;
            (fr.offset, fr.key)
        };
        Ok(Self {
            face: FaceData {
                bytes,
                offset,
                cache_key,
            },
            pixel_size,
            scale_context: ScaleContext::new(),
        })
    }
}

impl GlyphRasterizer for SwashRasterizer {
    fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    fn rasterize(&mut self, ch: char) -> Result<GlyphBitmap, GlyphError> {
        let fr = font_ref(&self.face);
        let glyph_id = fr.charmap().map(ch);
        if glyph_id == 0 {
            return Err(GlyphError::Absent(ch));
        }

        let size = self.pixel_size as f32;
        let advance = fr.glyph_metrics(&[]).scale(size).advance_width(glyph_id);

        let mut scaler = self.scale_context.builder(fr).size(size).hint(true).build();
        let Some(image) = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, glyph_id)
        else {
            return Err(GlyphError::Degenerate {
                ch,
                width: 0,
                height: 0,
            });
        };

        let ink_w = image.placement.width;
        let ink_h = image.placement.height;
        let width = (advance.round().max(0.0) as u32).max(ink_w);
        if width == 0 || ink_h == 0 || image.data.len() < (ink_w * ink_h) as usize {
            return Err(GlyphError::Degenerate {
                ch,
                width,
                height: ink_h,
            });
        }

        Ok(GlyphBitmap {
            width,
            height: ink_h,
            data: blit_ink(&image.data, ink_w, ink_h, width),
        })
    }
}

/// Copy an `ink_w x ink_h` coverage image into the left of a `width`-wide buffer.
fn blit_ink(ink: &[u8], ink_w: u32, ink_h: u32, width: u32) -> Vec<u8> {
    let (ink_w, ink_h, width) = (ink_w as usize, ink_h as usize, width as usize);
    let mut data = vec![0u8; width * ink_h];
    if ink_w == 0 {
        return data;
    }
    for (dst, src) in data.chunks_exact_mut(width).zip(ink.chunks_exact(ink_w)) {
        dst[..ink_w].copy_from_slice(src);
    }
    data
}

#[cfg(test)]
mod tests;
