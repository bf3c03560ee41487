//! Test doubles for the rasterizer and texture store seams.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::font::{FontSession, GlyphBitmap, GlyphError, GlyphRasterizer};
use crate::gpu::cache::{TextureId, TextureStore};

/// Rasterizer that draws solid boxes and counts calls per character.
///
/// Control characters are absent and `' '` rasterizes to an empty bitmap.
#[derive(Debug, Default)]
pub struct FakeRasterizer {
    pixel_size: u32,
    calls: HashMap<char, usize>,
}

impl FakeRasterizer {
    pub fn new(pixel_size: u32) -> Self {
        Self {
            pixel_size,
            calls: HashMap::new(),
        }
    }

    /// Rasterizations of `ch` so far.
    pub fn calls(&self, ch: char) -> usize {
        self.calls.get(&ch).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.values().sum()
    }
}

impl GlyphRasterizer for FakeRasterizer {
    fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    fn rasterize(&mut self, ch: char) -> Result<GlyphBitmap, GlyphError> {
        *self.calls.entry(ch).or_default() += 1;
        if ch.is_control() {
            return Err(GlyphError::Absent(ch));
        }
        let width = if ch == ' ' { 0 } else { self.pixel_size / 2 + 1 };
        let height = self.pixel_size;
        Ok(GlyphBitmap {
            width,
            height,
            data: vec![255; (width * height) as usize],
        })
    }
}

/// Everything a `RecordingStore` has been asked to do.
#[derive(Debug, Default)]
pub struct StoreLog {
    next_id: u32,
    pub uploaded: Vec<TextureId>,
    pub released: Vec<TextureId>,
}

impl StoreLog {
    /// Uploaded and not yet released.
    pub fn live(&self) -> usize {
        self.uploaded.len() - self.released.len()
    }
}

/// Texture store that hands out sequential ids and records every call.
///
/// The log is shared so it stays readable after the owning cache is dropped.
#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    log: Rc<RefCell<StoreLog>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Rc<RefCell<StoreLog>> {
        Rc::clone(&self.log)
    }
}

impl TextureStore for RecordingStore {
    fn upload(&mut self, bitmap: &GlyphBitmap) -> TextureId {
        assert!(!bitmap.is_degenerate(), "degenerate bitmap uploaded");
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        let id = TextureId::new(log.next_id).expect("ids start at 1");
        log.uploaded.push(id);
        id
    }

    fn release(&mut self, id: TextureId) {
        let mut log = self.log.borrow_mut();
        assert!(log.uploaded.contains(&id), "released unknown texture");
        assert!(!log.released.contains(&id), "texture released twice");
        log.released.push(id);
    }
}

pub type FakeSession = FontSession<FakeRasterizer, RecordingStore>;

/// Session over a fresh fake rasterizer and store, plus the store's log.
pub fn fake_session(pixel_size: u32) -> (FakeSession, Rc<RefCell<StoreLog>>) {
    let store = RecordingStore::new();
    let log = store.log();
    (
        FontSession::new(FakeRasterizer::new(pixel_size), store),
        log,
    )
}
