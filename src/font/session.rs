//! Font session: one rasterizer at one pixel size plus its texture cache.

use crate::gpu::cache::{GlyphTexture, GlyphTextureCache, TextureId, TextureStore};

use super::GlyphRasterizer;

/// A rasterizer bound to one pixel size, and the glyph textures it produced.
///
/// Built whole and torn down whole. Changing size means building a new
/// session and destroying this one; nothing here can be resized in place.
pub struct FontSession<R, S: TextureStore> {
    rasterizer: R,
    cache: GlyphTextureCache<S>,
}

impl<R: GlyphRasterizer, S: TextureStore> FontSession<R, S> {
    /// Pair `rasterizer` with an empty cache backed by `store`.
    pub fn new(rasterizer: R, store: S) -> Self {
        Self {
            rasterizer,
            cache: GlyphTextureCache::new(store),
        }
    }

    /// Like `new`, then rasterize `warmup` (if any) before returning.
    pub fn warmed(rasterizer: R, store: S, warmup: Option<&str>) -> Self {
        let mut session = Self::new(rasterizer, store);
        if let Some(chars) = warmup {
            session.warm_up(chars);
        }
        session
    }

    pub fn pixel_size(&self) -> u32 {
        self.rasterizer.pixel_size()
    }

    /// Texture for `ch`, or `None` when the glyph cannot be drawn.
    pub fn texture(&mut self, ch: char) -> Option<TextureId> {
        self.cache.get_texture(ch, &mut self.rasterizer)
    }

    /// Cached glyph (texture and size) for `ch`.
    pub fn glyph(&mut self, ch: char) -> Option<GlyphTexture> {
        self.cache.glyph(ch, &mut self.rasterizer)
    }

    /// Rasterize `chars` ahead of the first frame. Returns how many produced a texture.
    pub fn warm_up(&mut self, chars: &str) -> usize {
        let ready = chars.chars().filter(|&ch| self.texture(ch).is_some()).count();
        log::debug!(
            "font session: warmed {ready} glyphs at {}px",
            self.pixel_size()
        );
        ready
    }

    pub fn cache(&self) -> &GlyphTextureCache<S> {
        &self.cache
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Release every GPU texture this session created.
    pub fn destroy(&mut self) {
        self.cache.destroy();
    }
}
