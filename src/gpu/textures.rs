//! wgpu-backed glyph textures: one `R8Unorm` texture and bind group per glyph.

use std::collections::HashMap;

use crate::font::GlyphBitmap;

use super::cache::{TextureId, TextureStore};

/// A glyph texture together with the bind group that samples it.
pub struct GlyphBinding {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl GlyphBinding {
    /// Create a texture sized to `bitmap`, upload its coverage, and bind it
    /// with `sampler` through `layout` (group 2 of the grid pipeline).
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        bitmap: &GlyphBitmap,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: bitmap.width,
            height: bitmap.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glyph_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bitmap.width),
                rows_per_image: Some(bitmap.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glyph_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            texture,
            bind_group,
        }
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Free the GPU memory now instead of when the last reference drops.
    pub fn destroy(&self) {
        self.texture.destroy();
    }
}

/// `TextureStore` that creates real GPU textures.
///
/// Holds its own handles to the device and queue so a session can outlive
/// any particular borrow of the renderer.
pub struct WgpuTextureStore {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    textures: HashMap<TextureId, GlyphBinding>,
    next_id: u32,
}

impl WgpuTextureStore {
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        layout: wgpu::BindGroupLayout,
        sampler: wgpu::Sampler,
    ) -> Self {
        Self {
            device,
            queue,
            layout,
            sampler,
            textures: HashMap::new(),
            next_id: 0,
        }
    }

    /// Bind group for a live texture.
    pub fn bind_group(&self, id: TextureId) -> Option<&wgpu::BindGroup> {
        self.textures.get(&id).map(GlyphBinding::bind_group)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    fn allocate_id(&mut self) -> TextureId {
        loop {
            self.next_id = self.next_id.wrapping_add(1);
            if let Some(id) = TextureId::new(self.next_id) {
                if !self.textures.contains_key(&id) {
                    return id;
                }
            }
        }
    }
}

impl TextureStore for WgpuTextureStore {
    fn upload(&mut self, bitmap: &GlyphBitmap) -> TextureId {
        let binding = GlyphBinding::new(
            &self.device,
            &self.queue,
            &self.layout,
            &self.sampler,
            bitmap,
        );
        let id = self.allocate_id();
        self.textures.insert(id, binding);
        id
    }

    fn release(&mut self, id: TextureId) {
        if let Some(binding) = self.textures.remove(&id) {
            binding.destroy();
        }
    }
}
