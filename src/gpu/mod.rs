//! GPU rendering: wgpu state, glyph textures, the grid pipeline and renderer.

pub mod cache;
pub mod frame;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod textures;

pub use cache::{GlyphTextureCache, TextureId, TextureStore};
pub use frame::{FramePlan, plan_frame};
pub use pipeline::PipelineError;
pub use renderer::GridRenderer;
pub use state::{GpuError, GpuState};
