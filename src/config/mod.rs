//! Configuration structures and loading logic.

mod io;

pub use io::{ConfigError, config_dir, config_path};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::{self, GridColors};

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub grid: GridConfig,
    pub window: WindowConfig,
    pub colors: ColorConfig,
}

/// Where the grid font comes from and which glyphs to rasterize up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Family name matched against font file names, or an absolute file path.
    pub family: String,
    /// Directories searched (recursively) before the platform font directories.
    pub search_dirs: Vec<PathBuf>,
    /// Font files tried in order when the family cannot be found.
    pub fallback_paths: Vec<PathBuf>,
    /// Characters rasterized as soon as a font session is built.
    pub warmup: Option<String>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "DejaVuSansMono".to_owned(),
            search_dirs: Vec::new(),
            fallback_paths: vec![
                PathBuf::from("/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf"),
                PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf"),
            ],
            warmup: None,
        }
    }
}

/// Grid shape and startup contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Fixed row count. Derived from the window height when unset.
    pub rows: Option<usize>,
    /// Fixed column count. Derived from the window width when unset.
    pub cols: Option<usize>,
    /// Desired cell width in pixels, used only to derive `cols`.
    pub cell_width: u32,
    /// Desired cell height in pixels, used only to derive `rows`.
    pub cell_height: u32,
    pub initial_text: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: None,
            cols: None,
            cell_width: 20,
            cell_height: 30,
            initial_text: "Hello, TermGrid!".to_owned(),
        }
    }
}

impl GridConfig {
    /// Grid shape `(rows, cols)` for a window of the given pixel size.
    ///
    /// Explicit `rows`/`cols` win; otherwise the window is divided by the
    /// desired cell size. Both results are at least 1.
    pub fn shape(&self, window_width: u32, window_height: u32) -> (usize, usize) {
        let rows = self
            .rows
            .unwrap_or((window_height / self.cell_height.max(1)) as usize);
        let cols = self
            .cols
            .unwrap_or((window_width / self.cell_width.max(1)) as usize);
        (rows.max(1), cols.max(1))
    }
}

/// Initial window size and decoration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "TermGrid".to_owned(),
            resizable: true,
        }
    }
}

/// Text and background colors as hex strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Text color ("#RRGGBB", "#RRGGBBAA" or "#RGB").
    pub foreground: String,
    /// Background color ("#RRGGBB", "#RRGGBBAA" or "#RGB").
    pub background: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            foreground: "#FFFFFF".to_owned(),
            background: "#000000".to_owned(),
        }
    }
}

impl ColorConfig {
    /// Parse both colors, falling back to white on black per invalid value.
    pub fn resolve(&self) -> GridColors {
        let defaults = GridColors::default();
        GridColors {
            text: parse_or(&self.foreground, defaults.text, "foreground"),
            background: parse_or(&self.background, defaults.background, "background"),
        }
    }
}

fn parse_or(value: &str, fallback: color::Rgba, name: &str) -> color::Rgba {
    color::parse_hex_color(value).unwrap_or_else(|| {
        log::warn!("config: invalid {name} color {value:?}, using default");
        fallback
    })
}

#[cfg(test)]
mod tests;
