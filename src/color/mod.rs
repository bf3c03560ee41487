//! RGBA colors for the grid shader and hex parsing for config values.

/// Linear RGBA in `[0.0, 1.0]`, the layout the shader uniforms expect.
pub type Rgba = [f32; 4];

pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];

/// Text and background colors shared by every cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridColors {
    pub text: Rgba,
    pub background: Rgba,
}

impl Default for GridColors {
    fn default() -> Self {
        Self {
            text: WHITE,
            background: BLACK,
        }
    }
}

/// Parse `"#RRGGBB"`, `"#RRGGBBAA"` or `"#RGB"` (hash optional).
///
/// Returns `None` on anything else.
pub fn parse_hex_color(s: &str) -> Option<Rgba> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    let (r, g, b, a) = match hex.len() {
        3 => {
            let r = channel(0..1)?;
            let g = channel(1..2)?;
            let b = channel(2..3)?;
            (r * 17, g * 17, b * 17, 255)
        }
        6 => (channel(0..2)?, channel(2..4)?, channel(4..6)?, 255),
        8 => (
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        ),
        _ => return None,
    };
    Some([
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        f32::from(a) / 255.0,
    ])
}
