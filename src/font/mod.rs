//! Font loading and glyph rasterization for grid cells.
//!
//! A font file is located once (`discovery`), then every pixel size gets its
//! own `FontSession` pairing a rasterizer with a fresh glyph texture cache.
//! Sessions are never resized in place; a size change builds a new one.

pub mod discovery;
pub mod rasterizer;
pub mod session;

use std::path::PathBuf;

use thiserror::Error;

pub use discovery::{FontFile, FontSource};
pub use rasterizer::SwashRasterizer;
pub use session::FontSession;

use crate::gpu::textures::WgpuTextureStore;

/// Session type used by the windowed application.
pub type GridFontSession = FontSession<SwashRasterizer, WgpuTextureStore>;

/// Single-channel coverage bitmap for one glyph.
///
/// Top-left origin, row-major, `data.len() == width * height`. Each byte is
/// ink coverage (0 = background, 255 = text color).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl GlyphBitmap {
    /// True when the bitmap has no pixels or its buffer does not match its size.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0
            || self.height == 0
            || self.data.len() != self.width as usize * self.height as usize
    }
}

/// A character that cannot be drawn. Never fatal; the cell renders blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlyphError {
    #[error("no glyph for {0:?} in font")]
    Absent(char),
    #[error("glyph for {ch:?} rasterized to {width}x{height}")]
    Degenerate { ch: char, width: u32, height: u32 },
}

/// Failure to produce a usable font. Fatal when building a session.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("font family {family:?} not found")]
    NotFound { family: String },
    #[error("failed to read font {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font {path}")]
    Parse { path: PathBuf },
    #[error("invalid font pixel size {0}")]
    InvalidSize(u32),
}

/// Turns one character into a coverage bitmap at a fixed pixel size.
pub trait GlyphRasterizer {
    /// Pixel size this rasterizer was built for.
    fn pixel_size(&self) -> u32;

    /// Rasterize `ch`. No side effects beyond internal scratch state.
    fn rasterize(&mut self, ch: char) -> Result<GlyphBitmap, GlyphError>;
}

/// Build the application's session for `font` at `pixel_size`.
///
/// `warmup` characters are rasterized before the session is returned, so
/// every session starts with them cached, not just the first one.
pub fn build_session(
    font: &FontFile,
    pixel_size: u32,
    store: WgpuTextureStore,
    warmup: Option<&str>,
) -> Result<GridFontSession, FontError> {
    let rasterizer = SwashRasterizer::new(font, pixel_size)?;
    log::info!(
        "font session: {} at {pixel_size}px",
        font.path().display()
    );
    Ok(FontSession::warmed(rasterizer, store, warmup))
}
