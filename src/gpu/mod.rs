//! wgpu backend for drawing trail strips.
//!
//! The trail itself stays CPU-side: [`TrailRenderer::upload`] copies the
//! strips recorded in an [`ImmediateMesh`] into a vertex buffer, and
//! [`TrailRenderer::draw`] issues one triangle-strip draw per strip.
//!
//! Vertices are in the emitter's local frame, so the emitter transform is
//! passed as the model matrix alongside the camera.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::mesh::{ImmediateMesh, TrailVertex};

/// WGSL source of the trail shader.
pub const TRAIL_SHADER: &str = include_str!("trail.wgsl");

/// Vertex capacity allocated up front.
const INITIAL_CAPACITY: usize = 256;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4, 2 => Float32x2];

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct TrailUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
}

/// How trail fragments combine with what is already drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending (default).
    #[default]
    Alpha,
    /// Colors add up, overlapping ribbon segments glow.
    Additive,
}

impl BlendMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            BlendMode::Alpha => BlendMode::Additive,
            BlendMode::Additive => BlendMode::Alpha,
        }
    }

    fn to_state(self) -> wgpu::BlendState {
        match self {
            BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
            BlendMode::Additive => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            },
        }
    }
}

/// Vertex buffer layout matching [`TrailVertex`].
pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<TrailVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// Flatten recorded strips into one vertex list plus per-strip ranges.
fn pack_strips(mesh: &ImmediateMesh) -> (Vec<TrailVertex>, Vec<Range<u32>>) {
    let mut vertices = Vec::with_capacity(mesh.vertex_count());
    let mut ranges = Vec::with_capacity(mesh.strips().len());

    for strip in mesh.strips() {
        if strip.len() < 3 {
            continue;
        }
        let start = vertices.len() as u32;
        vertices.extend_from_slice(strip);
        ranges.push(start..vertices.len() as u32);
    }

    (vertices, ranges)
}

/// GPU resources for drawing trails.
pub struct TrailRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Vertex capacity of `vertex_buffer`.
    capacity: usize,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    /// Vertex ranges of the uploaded strips.
    strips: Vec<Range<u32>>,
}

impl TrailRenderer {
    /// Create the trail pipeline for a color target of `surface_format`.
    ///
    /// Pass the depth format used by the render pass, if any; trails test
    /// against depth but never write it.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
        blend_mode: BlendMode,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Trail Shader"),
            source: wgpu::ShaderSource::Wgsl(TRAIL_SHADER.into()),
        });

        let uniforms = TrailUniforms {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            model: Mat4::IDENTITY.to_cols_array_2d(),
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Trail Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Trail Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Trail Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Trail Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Trail Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(blend_mode.to_state()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Ribbons are seen from both sides.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = create_vertex_buffer(device, INITIAL_CAPACITY);

        Self {
            pipeline,
            vertex_buffer,
            capacity: INITIAL_CAPACITY,
            uniform_buffer,
            bind_group,
            strips: Vec::new(),
        }
    }

    /// Update the camera and the emitter's model matrix.
    pub fn set_transforms(&self, queue: &wgpu::Queue, view_proj: Mat4, model: Mat4) {
        let uniforms = TrailUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Copy the strips recorded in `mesh` to the GPU, growing the vertex
    /// buffer if needed.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, mesh: &ImmediateMesh) {
        let (vertices, strips) = pack_strips(mesh);

        if vertices.len() > self.capacity {
            self.capacity = vertices.len().next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(device, self.capacity);
            tracing::debug!(capacity = self.capacity, "grew trail vertex buffer");
        }

        if !vertices.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }
        self.strips = strips;
    }

    /// Record the draw calls for the uploaded strips.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.strips.is_empty() {
            return;
        }

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        for range in &self.strips {
            pass.draw(range.clone(), 0..1);
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Trail Vertex Buffer"),
        size: (capacity * std::mem::size_of::<TrailVertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
