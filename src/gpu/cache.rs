//! Per-session glyph texture cache.
//!
//! Maps each character to the texture its glyph was uploaded to, rasterizing
//! on first use. Failures are remembered exactly like successes, so a glyph
//! the font cannot draw costs one rasterization per session, not one per
//! frame. Entries are write-once; the only invalidation is `destroy()`.
//!
//! The GPU side sits behind `TextureStore` so the cache logic runs (and is
//! tested) without a device.

use std::collections::HashMap;
use std::num::NonZeroU32;

use crate::font::{GlyphBitmap, GlyphError, GlyphRasterizer};

/// Opaque handle to one uploaded glyph texture. `None` stands for "no glyph".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(NonZeroU32);

impl TextureId {
    /// Build an id from a non-zero counter value.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Backend that owns glyph textures on behalf of a cache.
pub trait TextureStore {
    /// Upload a non-degenerate coverage bitmap into a new 2-D texture with
    /// linear min/mag filtering.
    fn upload(&mut self, bitmap: &GlyphBitmap) -> TextureId;

    /// Free a texture created by `upload`.
    fn release(&mut self, id: TextureId);
}

/// A cached glyph: its texture and the bitmap size used to size the quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphTexture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

/// Lookup counters. `misses` counts rasterizations; `failures` is the subset
/// that produced no texture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub failures: u64,
}

/// Character to texture map for one font session.
pub struct GlyphTextureCache<S: TextureStore> {
    store: S,
    entries: HashMap<char, Option<GlyphTexture>>,
    stats: CacheStats,
    destroyed: bool,
}

impl<S: TextureStore> GlyphTextureCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: HashMap::new(),
            stats: CacheStats::default(),
            destroyed: false,
        }
    }

    /// Texture for `ch`, or `None` when the glyph cannot be drawn.
    pub fn get_texture(
        &mut self,
        ch: char,
        rasterizer: &mut impl GlyphRasterizer,
    ) -> Option<TextureId> {
        self.glyph(ch, rasterizer).map(|g| g.id)
    }

    /// Cached glyph for `ch`, rasterizing and uploading it on first request.
    ///
    /// Returns `None` without touching the rasterizer once destroyed.
    pub fn glyph(
        &mut self,
        ch: char,
        rasterizer: &mut impl GlyphRasterizer,
    ) -> Option<GlyphTexture> {
        if self.destroyed {
            return None;
        }
        if let Some(entry) = self.entries.get(&ch) {
            self.stats.hits += 1;
            return *entry;
        }

        self.stats.misses += 1;
        let entry = match rasterizer.rasterize(ch) {
            Ok(bitmap) if !bitmap.is_degenerate() => Some(GlyphTexture {
                id: self.store.upload(&bitmap),
                width: bitmap.width,
                height: bitmap.height,
            }),
            Ok(bitmap) => {
                self.fail(&GlyphError::Degenerate {
                    ch,
                    width: bitmap.width,
                    height: bitmap.height,
                });
                None
            }
            Err(e) => {
                self.fail(&e);
                None
            }
        };
        self.entries.insert(ch, entry);
        entry
    }

    fn fail(&mut self, err: &GlyphError) {
        self.stats.failures += 1;
        log::warn!("glyph cache: {err}, drawing blank cell");
    }

    /// Whether `ch` has been looked up (successfully or not).
    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Release every texture this cache uploaded. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        let mut released = 0;
        for glyph in self.entries.drain().filter_map(|(_, entry)| entry) {
            self.store.release(glyph.id);
            released += 1;
        }
        log::debug!("glyph cache: released {released} textures");
    }
}

impl<S: TextureStore> Drop for GlyphTextureCache<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}
