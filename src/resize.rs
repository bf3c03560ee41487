//! Viewport resize handling: geometry refresh and font session replacement.
//!
//! The grid shape is fixed, so a resize only changes cell pixel size. When
//! the derived font pixel size changes, a brand new session is built and the
//! old one destroyed. If the build fails, the old session stays in place and
//! the failure is reported back to the caller as a warning, not an error.

use crate::font::{FontError, FontSession, GlyphRasterizer};
use crate::geometry::CellGeometry;
use crate::gpu::cache::TextureStore;
use crate::grid::Grid;

/// What a resize did.
#[derive(Debug)]
pub enum ResizeOutcome {
    /// Zero-sized viewport (minimized window); nothing changed.
    Ignored,
    /// Geometry updated; font pixel size unchanged, session kept.
    GeometryOnly,
    /// A new session at `to` pixels replaced the one at `from`.
    FontRebuilt { from: u32, to: u32 },
    /// Building a session at `size` failed; the previous session is still in use.
    RebuildFailed { size: u32, error: FontError },
}

/// Tracks the fixed grid shape and the geometry derived from the viewport.
#[derive(Debug, Clone)]
pub struct ResizeCoordinator {
    rows: usize,
    cols: usize,
    geometry: CellGeometry,
}

impl ResizeCoordinator {
    pub fn new(rows: usize, cols: usize, viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            rows,
            cols,
            geometry: CellGeometry::new(viewport_width, viewport_height, rows, cols),
        }
    }

    pub fn geometry(&self) -> &CellGeometry {
        &self.geometry
    }

    /// React to a new viewport size.
    ///
    /// `build` is only called when the derived font pixel size differs from
    /// the live session's.
    pub fn handle_resize<R, S, F>(
        &mut self,
        width: u32,
        height: u32,
        session: &mut FontSession<R, S>,
        grid: &mut Grid,
        build: F,
    ) -> ResizeOutcome
    where
        R: GlyphRasterizer,
        S: TextureStore,
        F: FnOnce(u32) -> Result<FontSession<R, S>, FontError>,
    {
        if width == 0 || height == 0 {
            return ResizeOutcome::Ignored;
        }

        self.geometry = CellGeometry::new(width, height, self.rows, self.cols);
        grid.mark_dirty();

        let from = session.pixel_size();
        let to = self.geometry.font_pixel_size();
        if from == to {
            return ResizeOutcome::GeometryOnly;
        }

        match replace_session(session, build, to) {
            Ok(()) => {
                log::info!("resize: {width}x{height}, font {from}px -> {to}px");
                ResizeOutcome::FontRebuilt { from, to }
            }
            Err(error) => {
                log::warn!("resize: keeping {from}px font, rebuild at {to}px failed: {error}");
                ResizeOutcome::RebuildFailed { size: to, error }
            }
        }
    }

    /// Switch to an explicit font pixel size, independent of the viewport.
    ///
    /// On failure the old session is kept and the error returned.
    pub fn set_font_size<R, S, F>(
        &mut self,
        pixel_size: u32,
        session: &mut FontSession<R, S>,
        grid: &mut Grid,
        build: F,
    ) -> Result<(), FontError>
    where
        R: GlyphRasterizer,
        S: TextureStore,
        F: FnOnce(u32) -> Result<FontSession<R, S>, FontError>,
    {
        if pixel_size == session.pixel_size() {
            return Ok(());
        }
        replace_session(session, build, pixel_size)?;
        grid.mark_dirty();
        Ok(())
    }
}

/// Build a session at `pixel_size`, swap it in, and destroy the old one.
fn replace_session<R, S, F>(
    session: &mut FontSession<R, S>,
    build: F,
    pixel_size: u32,
) -> Result<(), FontError>
where
    R: GlyphRasterizer,
    S: TextureStore,
    F: FnOnce(u32) -> Result<FontSession<R, S>, FontError>,
{
    let mut old = std::mem::replace(session, build(pixel_size)?);
    old.destroy();
    Ok(())
}
