pub mod app;
pub mod color;
pub mod config;
pub mod font;
pub mod geometry;
pub mod gpu;
pub mod grid;
pub mod input;
pub mod resize;

#[cfg(test)]
mod testing;
