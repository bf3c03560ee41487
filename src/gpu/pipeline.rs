//! Grid shader, its validation, bind group layouts, and the render pipeline.
//!
//! Bindings:
//!   group(0) binding(0): grid uniforms (cell size, text color, bg color)
//!   group(1) binding(0): per-cell uniforms (cell position), dynamic offset
//!   group(2) binding(0): glyph texture, binding(1): sampler

use thiserror::Error;

/// Shader or pipeline construction failure, with the diagnostic text.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("shader compilation failed:\n{0}")]
    ShaderCompile(String),
    #[error("shader validation failed:\n{0}")]
    ShaderLink(String),
}

/// Size of the group(0) uniform block.
///
/// Layout (48 bytes):
///   [0..8]   `cell_size`:  vec2<f32>  (NDC units)
///   [8..16]  _pad
///   [16..32] `text_color`: vec4<f32>
///   [32..48] `bg_color`:   vec4<f32>
pub const GRID_UNIFORM_SIZE: u64 = 48;

/// Size of one group(1) per-cell uniform block.
///
/// Layout (16 bytes):
///   [0..8]   `cell_position`: vec2<f32>  (NDC, quad bottom-left)
///   [8..16]  _pad
pub const CELL_UNIFORM_SIZE: u64 = 16;

/// Bytes per quad vertex: position vec2<f32> + `tex_coord` vec2<f32>.
pub const VERTEX_STRIDE: u64 = 16;

/// Unit quad as a 4-vertex triangle strip: `[x, y, u, v]` per vertex.
///
/// Positions are y-up (device space); texture coordinates are y-down
/// (bitmap rows), so `v` is flipped to keep glyphs upright.
pub const QUAD_VERTICES: [[f32; 4]; 4] = [
    [0.0, 0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [0.0, 1.0, 0.0, 0.0],
    [1.0, 1.0, 1.0, 0.0],
];

/// Quad vertices serialized for the vertex buffer.
pub fn quad_vertex_bytes() -> Vec<u8> {
    QUAD_VERTICES
        .iter()
        .flatten()
        .flat_map(|v| v.to_ne_bytes())
        .collect()
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: 0,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 8,
        shader_location: 1,
    },
];

pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: VERTEX_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

// --- WGSL Shader ---

pub const GRID_SHADER_SRC: &str = "
struct GridUniforms {
    cell_size: vec2<f32>,
    _pad: vec2<f32>,
    text_color: vec4<f32>,
    bg_color: vec4<f32>,
}

struct CellUniforms {
    cell_position: vec2<f32>,
    _pad: vec2<f32>,
}

@group(0) @binding(0) var<uniform> grid: GridUniforms;
@group(1) @binding(0) var<uniform> cell: CellUniforms;
@group(2) @binding(0) var glyph_texture: texture_2d<f32>;
@group(2) @binding(1) var glyph_sampler: sampler;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) tex_coord: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) tex_coord: vec2<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let pos = cell.cell_position + input.position * grid.cell_size;
    out.position = vec4<f32>(pos, 0.0, 1.0);
    out.tex_coord = input.tex_coord;
    return out;
}

// The red channel is glyph coverage. A blank texture samples as zero,
// which leaves the background color.
@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let coverage = textureSample(glyph_texture, glyph_sampler, input.tex_coord).r;
    return mix(grid.bg_color, grid.text_color, coverage);
}
";

/// Compile and validate WGSL on the CPU, returning the diagnostic on failure.
///
/// wgpu reports shader errors asynchronously through the device error
/// handler; running naga first turns them into a startup error instead.
pub fn validate_shader(source: &str) -> Result<(), PipelineError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| PipelineError::ShaderCompile(e.emit_to_string(source)))?;
    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| PipelineError::ShaderLink(e.emit_to_string(source)))?;
    Ok(())
}

// --- Pipeline creation ---

/// Grid uniform bind group layout: group(0) binding(0).
pub fn create_grid_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("grid_bind_group_layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(GRID_UNIFORM_SIZE),
            },
            count: None,
        }],
    })
}

/// Per-cell uniform bind group layout: group(1) binding(0), dynamic offset.
pub fn create_cell_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("cell_bind_group_layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: wgpu::BufferSize::new(CELL_UNIFORM_SIZE),
            },
            count: None,
        }],
    })
}

/// Glyph texture bind group layout: group(2) binding(0) = texture, binding(1) = sampler.
pub fn create_glyph_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("glyph_bind_group_layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Grid pipeline: one opaque textured quad per cell.
pub fn create_grid_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    grid_layout: &wgpu::BindGroupLayout,
    cell_layout: &wgpu::BindGroupLayout,
    glyph_layout: &wgpu::BindGroupLayout,
) -> Result<wgpu::RenderPipeline, PipelineError> {
    validate_shader(GRID_SHADER_SRC)?;

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("grid_shader"),
        source: wgpu::ShaderSource::Wgsl(GRID_SHADER_SRC.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("grid_pipeline_layout"),
        bind_group_layouts: &[grid_layout, cell_layout, glyph_layout],
        immediate_size: 0,
    });

    Ok(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("grid_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            buffers: &[vertex_buffer_layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_shader_validates() {
        if let Err(e) = validate_shader(GRID_SHADER_SRC) {
            panic!("{e}");
        }
    }

    #[test]
    fn syntax_error_is_compile_failure() {
        let err = validate_shader("fn broken( {").expect_err("must not parse");
        match err {
            PipelineError::ShaderCompile(msg) => assert!(!msg.is_empty()),
            other => panic!("expected compile failure, got {other:?}"),
        }
    }

    #[test]
    fn quad_covers_unit_square_with_flipped_v() {
        for [x, y, u, v] in QUAD_VERTICES {
            assert!(x == 0.0 || x == 1.0);
            assert!(y == 0.0 || y == 1.0);
            assert!((u - x).abs() < f32::EPSILON);
            assert!((v - (1.0 - y)).abs() < f32::EPSILON);
        }
        assert_eq!(quad_vertex_bytes().len() as u64, 4 * VERTEX_STRIDE);
    }
}
