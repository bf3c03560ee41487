//! Cell geometry derived from viewport size and grid shape.
//!
//! Nothing here is stored per cell. A `CellGeometry` is rebuilt whenever the
//! viewport changes and answers the two questions the renderer and the
//! resize path need: where does a cell go in device space, and what pixel
//! size should the font be rasterized at.

/// Pixel and device-space sizes for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    viewport_width: f32,
    viewport_height: f32,
    cell_width: f32,
    cell_height: f32,
}

impl CellGeometry {
    /// Split a `width x height` viewport into `rows x cols` cells.
    ///
    /// Zero rows/cols are treated as one, so cell sizes stay finite.
    pub fn new(viewport_width: u32, viewport_height: u32, rows: usize, cols: usize) -> Self {
        let viewport_width = viewport_width as f32;
        let viewport_height = viewport_height as f32;
        Self {
            viewport_width,
            viewport_height,
            cell_width: viewport_width / cols.max(1) as f32,
            cell_height: viewport_height / rows.max(1) as f32,
        }
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport_width as u32, self.viewport_height as u32)
    }

    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Font pixel size for this geometry: the cell height, floored, at least 1.
    pub fn font_pixel_size(&self) -> u32 {
        (self.cell_height.floor() as u32).max(1)
    }

    /// Cell size in normalized device units.
    pub fn cell_size_ndc(&self) -> [f32; 2] {
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return [0.0, 0.0];
        }
        [
            2.0 * self.cell_width / self.viewport_width,
            2.0 * self.cell_height / self.viewport_height,
        ]
    }

    /// Bottom-left corner of a cell's quad in normalized device coordinates.
    ///
    /// Device space is y-up, so row 0 sits one cell height below the top
    /// edge: `x = 2*col*cw/vw - 1`, `y = 1 - 2*(row+1)*ch/vh`.
    pub fn cell_origin_ndc(&self, row: usize, col: usize) -> [f32; 2] {
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return [-1.0, 1.0];
        }
        let x = 2.0 * col as f32 * self.cell_width / self.viewport_width - 1.0;
        let y = 1.0 - 2.0 * (row + 1) as f32 * self.cell_height / self.viewport_height;
        [x, y]
    }
}
