//! The grid renderer: owns the pipeline, quad geometry, and uniform buffers.

use std::num::NonZeroU64;

use crate::font::GlyphBitmap;

use super::frame::FramePlan;
use super::pipeline::{self, CELL_UNIFORM_SIZE, GRID_UNIFORM_SIZE, PipelineError};
use super::state::GpuState;
use super::textures::{GlyphBinding, WgpuTextureStore};

/// Initial number of per-cell uniform slots; grows by doubling.
const INITIAL_CELL_SLOTS: u64 = 256;

/// Draws a `FramePlan`: one textured quad and one draw call per cell.
pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    grid_buffer: wgpu::Buffer,
    grid_bind_group: wgpu::BindGroup,
    cell_layout: wgpu::BindGroupLayout,
    cell_buffer: wgpu::Buffer,
    cell_bind_group: wgpu::BindGroup,
    /// Slots available in `cell_buffer`.
    cell_slots: u64,
    /// Byte distance between slots, padded to the device's offset alignment.
    cell_stride: u64,
    glyph_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    /// 1x1 zero-coverage texture bound for cells without a glyph.
    blank: GlyphBinding,
}

impl GridRenderer {
    pub fn new(gpu: &GpuState) -> Result<Self, PipelineError> {
        let device = &gpu.device;

        // Bind group layouts
        let grid_layout = pipeline::create_grid_bind_group_layout(device);
        let cell_layout = pipeline::create_cell_bind_group_layout(device);
        let glyph_layout = pipeline::create_glyph_bind_group_layout(device);

        let pipeline = pipeline::create_grid_pipeline(
            device,
            gpu.format(),
            &grid_layout,
            &cell_layout,
            &glyph_layout,
        )?;

        let vertex_bytes = pipeline::quad_vertex_bytes();
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quad_vertex_buffer"),
            size: vertex_bytes.len() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        gpu.queue.write_buffer(&vertex_buffer, 0, &vertex_bytes);

        let grid_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid_uniform_buffer"),
            size: GRID_UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let grid_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("grid_bind_group"),
            layout: &grid_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: grid_buffer.as_entire_binding(),
            }],
        });

        let alignment = u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let cell_stride = CELL_UNIFORM_SIZE.next_multiple_of(alignment.max(1));
        let (cell_buffer, cell_bind_group) =
            create_cell_buffer(device, &cell_layout, INITIAL_CELL_SLOTS, cell_stride);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glyph_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let blank = GlyphBinding::new(
            device,
            &gpu.queue,
            &glyph_layout,
            &sampler,
            &GlyphBitmap {
                width: 1,
                height: 1,
                data: vec![0],
            },
        );

        Ok(Self {
            pipeline,
            vertex_buffer,
            grid_buffer,
            grid_bind_group,
            cell_layout,
            cell_buffer,
            cell_bind_group,
            cell_slots: INITIAL_CELL_SLOTS,
            cell_stride,
            glyph_layout,
            sampler,
            blank,
        })
    }

    /// A fresh, empty texture store for a new font session.
    pub fn texture_store(&self, gpu: &GpuState) -> WgpuTextureStore {
        WgpuTextureStore::new(
            gpu.device.clone(),
            gpu.queue.clone(),
            self.glyph_layout.clone(),
            self.sampler.clone(),
        )
    }

    /// Draw `plan` to the surface and present it.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render(&mut self, gpu: &GpuState, plan: &FramePlan, textures: &WgpuTextureStore) {
        let frame = match gpu.surface().get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(e) => {
                log::warn!("surface error: {e}");
                return;
            }
        };

        gpu.queue
            .write_buffer(&self.grid_buffer, 0, &plan.uniforms.to_bytes());
        self.write_cells(gpu, plan);

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        let bg = plan.uniforms.bg_color;
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("grid_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(bg[0]),
                            g: f64::from(bg[1]),
                            b: f64::from(bg[2]),
                            a: f64::from(bg[3]),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.grid_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

            for (slot, cell) in plan.cells.iter().enumerate() {
                let offset = (slot as u64 * self.cell_stride) as u32;
                let glyph = cell
                    .texture
                    .and_then(|id| textures.bind_group(id))
                    .unwrap_or_else(|| self.blank.bind_group());
                rpass.set_bind_group(1, &self.cell_bind_group, &[offset]);
                rpass.set_bind_group(2, glyph, &[]);
                rpass.draw(0..4, 0..1);
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }

    /// Upload every cell position into its own aligned slot, growing the buffer if needed.
    fn write_cells(&mut self, gpu: &GpuState, plan: &FramePlan) {
        let needed = plan.cells.len() as u64;
        if needed == 0 {
            return;
        }
        if needed > self.cell_slots {
            let slots = needed.next_power_of_two();
            self.cell_buffer.destroy();
            let (buffer, bind_group) =
                create_cell_buffer(&gpu.device, &self.cell_layout, slots, self.cell_stride);
            self.cell_buffer = buffer;
            self.cell_bind_group = bind_group;
            self.cell_slots = slots;
            log::debug!("renderer: cell uniform buffer grown to {slots} slots");
        }

        let stride = self.cell_stride as usize;
        let mut data = vec![0u8; plan.cells.len() * stride];
        for (chunk, cell) in data.chunks_exact_mut(stride).zip(&plan.cells) {
            chunk[..CELL_UNIFORM_SIZE as usize].copy_from_slice(&cell.uniform_bytes());
        }
        gpu.queue.write_buffer(&self.cell_buffer, 0, &data);
    }

    /// Release the renderer's own GPU resources.
    pub fn destroy(&self) {
        self.vertex_buffer.destroy();
        self.grid_buffer.destroy();
        self.cell_buffer.destroy();
        self.blank.destroy();
    }
}

/// Uniform buffer with `slots` dynamic-offset slots, bound one slot wide.
fn create_cell_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    slots: u64,
    stride: u64,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("cell_uniform_buffer"),
        size: slots * stride,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("cell_bind_group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: NonZeroU64::new(CELL_UNIFORM_SIZE),
            }),
        }],
    });
    (buffer, bind_group)
}
