//! Per-frame draw planning.
//!
//! Turns the grid, the font session, and the current geometry into the
//! uniforms and ordered per-cell draws the renderer submits. Everything that
//! can be decided without a GPU (which cells draw, where, with which
//! texture) is decided here.

use crate::color::{GridColors, Rgba};
use crate::font::{FontSession, GlyphRasterizer};
use crate::geometry::CellGeometry;
use crate::grid::Grid;

use super::cache::{TextureId, TextureStore};
use super::pipeline::{CELL_UNIFORM_SIZE, GRID_UNIFORM_SIZE};

/// Values for the grid-wide uniform block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridUniforms {
    pub cell_size: [f32; 2],
    pub text_color: Rgba,
    pub bg_color: Rgba,
}

impl GridUniforms {
    /// Serialize in the shader's 48-byte layout.
    pub fn to_bytes(&self) -> [u8; GRID_UNIFORM_SIZE as usize] {
        let mut bytes = [0u8; GRID_UNIFORM_SIZE as usize];
        write_f32s(&mut bytes[0..8], &self.cell_size);
        write_f32s(&mut bytes[16..32], &self.text_color);
        write_f32s(&mut bytes[32..48], &self.bg_color);
        bytes
    }
}

/// One quad to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellDraw {
    pub row: usize,
    pub col: usize,
    pub ch: char,
    /// Bottom-left corner of the quad in device coordinates.
    pub position: [f32; 2],
    /// Glyph texture, or `None` to draw with the blank texture.
    pub texture: Option<TextureId>,
}

impl CellDraw {
    /// Serialize the per-cell uniform block.
    pub fn uniform_bytes(&self) -> [u8; CELL_UNIFORM_SIZE as usize] {
        let mut bytes = [0u8; CELL_UNIFORM_SIZE as usize];
        write_f32s(&mut bytes[0..8], &self.position);
        bytes
    }
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub uniforms: GridUniforms,
    /// Non-empty cells in row-major order.
    pub cells: Vec<CellDraw>,
}

/// Plan a frame: one draw per non-empty cell, textures resolved through
/// `session` (first sight of a character rasterizes it).
pub fn plan_frame<R: GlyphRasterizer, S: TextureStore>(
    grid: &Grid,
    session: &mut FontSession<R, S>,
    geometry: &CellGeometry,
    colors: GridColors,
) -> FramePlan {
    let cells = grid
        .occupied()
        .map(|(row, col, ch)| CellDraw {
            row,
            col,
            ch,
            position: geometry.cell_origin_ndc(row, col),
            texture: session.texture(ch),
        })
        .collect();

    FramePlan {
        uniforms: GridUniforms {
            cell_size: geometry.cell_size_ndc(),
            text_color: colors.text,
            bg_color: colors.background,
        },
        cells,
    }
}

fn write_f32s(dst: &mut [u8], values: &[f32]) {
    for (chunk, v) in dst.chunks_exact_mut(4).zip(values) {
        chunk.copy_from_slice(&v.to_ne_bytes());
    }
}
