use std::path::PathBuf;

use super::{SwashRasterizer, blit_ink};
use crate::config::FontConfig;
use crate::font::{FontError, FontFile, FontSource, GlyphError, GlyphRasterizer};

/// A real font from the host, or `None` on machines without one.
fn system_font() -> Option<FontFile> {
    FontSource::new(&FontConfig::default()).locate().ok()
}

#[test]
fn zero_pixel_size_is_rejected() {
    let font = FontFile::from_bytes(PathBuf::from("stub.ttf"), Vec::new());
    let err = SwashRasterizer::new(&font, 0).err().expect("size 0 rejected");
    assert!(matches!(err, FontError::InvalidSize(0)));
}

#[test]
fn garbage_bytes_fail_to_parse() {
    let font = FontFile::from_bytes(PathBuf::from("stub.ttf"), b"definitely not a font".to_vec());
    let err = SwashRasterizer::new(&font, 16).err().expect("parse failure");
    assert!(matches!(err, FontError::Parse { .. }));
}

#[test]
fn blit_pads_right_edge() {
    let ink = [1, 2, 3, 4];
    let out = blit_ink(&ink, 2, 2, 3);
    assert_eq!(out, vec![1, 2, 0, 3, 4, 0]);
}

#[test]
fn blit_same_width_is_copy() {
    let ink = [9, 8, 7, 6];
    assert_eq!(blit_ink(&ink, 2, 2, 2), ink.to_vec());
}

#[test]
fn rasterizes_letter() {
    let Some(font) = system_font() else {
        return;
    };
    let mut r = SwashRasterizer::new(&font, 24).expect("rasterizer");
    assert_eq!(r.pixel_size(), 24);

    let bitmap = r.rasterize('A').expect("glyph for A");
    assert!(bitmap.width > 0);
    assert!(bitmap.height > 0);
    assert!(bitmap.height <= 24 * 2);
    assert_eq!(bitmap.data.len(), (bitmap.width * bitmap.height) as usize);
    assert!(bitmap.data.iter().any(|&c| c > 0), "A should have ink");
}

#[test]
fn control_character_is_absent() {
    let Some(font) = system_font() else {
        return;
    };
    let mut r = SwashRasterizer::new(&font, 24).expect("rasterizer");
    assert_eq!(r.rasterize('\u{1}'), Err(GlyphError::Absent('\u{1}')));
}

#[test]
fn space_has_no_ink() {
    let Some(font) = system_font() else {
        return;
    };
    let mut r = SwashRasterizer::new(&font, 24).expect("rasterizer");
    assert!(matches!(
        r.rasterize(' '),
        Err(GlyphError::Degenerate { ch: ' ', .. })
    ));
}

#[test]
fn larger_size_gives_larger_glyph() {
    let Some(font) = system_font() else {
        return;
    };
    let small = SwashRasterizer::new(&font, 12)
        .expect("rasterizer")
        .rasterize('M')
        .expect("glyph");
    let large = SwashRasterizer::new(&font, 48)
        .expect("rasterizer")
        .rasterize('M')
        .expect("glyph");
    assert!(large.height > small.height);
    assert!(large.width > small.width);
}
