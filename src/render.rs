use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::{HeroError, Result};
use crate::layout::{Layer, Rect};
use crate::paint::{CanvasView, DrawList, Panel, Shape};
use crate::scene::{MeshVertex, box_geometry};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
// The page behind the translucent background gradient.
const CLEAR_COLOR: wgpu::Color = wgpu::Color::WHITE;
const INITIAL_OVERLAY_CAPACITY: usize = 64;

// ======================================
// === SHADER DATA STRUCTURES ===
// ======================================

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable, PartialEq)]
pub struct MeshUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    // xyz position, w intensity
    light_position: [f32; 4],
    light_color: [f32; 4],
    // rgb premultiplied by intensity
    ambient: [f32; 4],
    // rgb colour, a opacity
    base_color: [f32; 4],
}

impl MeshUniforms {
    fn from_view(view: &CanvasView, viewport: Vec2) -> Self {
        let view_proj =
            region_clip_transform(&view.region, viewport) * view.camera.view_proj_matrix();
        let ambient = Vec3::from(view.ambient.color) * view.ambient.intensity;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: view.model.to_cols_array_2d(),
            light_position: view.point.position.extend(view.point.intensity).to_array(),
            light_color: Vec3::from(view.point.color).extend(1.0).to_array(),
            ambient: ambient.extend(1.0).to_array(),
            base_color: Vec3::from(view.color).extend(view.opacity.clamp(0.0, 1.0)).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ScreenUniforms {
    size: [f32; 2],
    _padding: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, PartialEq)]
pub struct OverlayVertex {
    position: [f32; 2],
    local: [f32; 2],
    half_size: [f32; 2],
    radius: f32,
    color: [f32; 4],
    shape: u32,
}

impl OverlayVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OverlayVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 8,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 24,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32,
                },
                wgpu::VertexAttribute {
                    offset: 28,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: 44,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Uint32,
                },
            ],
        }
    }
}

// Two triangles covering the panel, each corner carrying its fill colour.
pub fn panel_vertices(panel: &Panel) -> [OverlayVertex; 6] {
    let r = panel.rect;
    let half = [r.w * 0.5, r.h * 0.5];
    let radius = panel.radius.clamp(0.0, half[0].min(half[1]));
    let shape = match panel.shape {
        Shape::RoundedRect => 0,
        Shape::Triangle => 1,
    };
    let corner = |x: f32, y: f32, color: [f32; 4]| OverlayVertex {
        position: [x, y],
        local: [x - r.x - half[0], y - r.y - half[1]],
        half_size: half,
        radius,
        color,
        shape,
    };
    let [c_tl, c_tr, c_bl, c_br] = panel.fill.corners();
    let tl = corner(r.x, r.y, c_tl);
    let tr = corner(r.right(), r.y, c_tr);
    let bl = corner(r.x, r.bottom(), c_bl);
    let br = corner(r.right(), r.bottom(), c_br);
    [tl, bl, br, br, tr, tl]
}

// Maps the whole clip space onto the canvas band, so the camera's
// projection lands inside `region` of a `viewport`-sized target.
pub fn region_clip_transform(region: &Rect, viewport: Vec2) -> Mat4 {
    let scale = Vec3::new(region.w / viewport.x, region.h / viewport.y, 1.0);
    let center = region.center();
    let offset = Vec3::new(
        center.x / viewport.x * 2.0 - 1.0,
        1.0 - center.y / viewport.y * 2.0,
        0.0,
    );
    Mat4::from_translation(offset) * Mat4::from_scale(scale)
}

// Physical scissor rectangle `[x, y, w, h]` for the visible part of
// `region`. None when the band is entirely off screen.
pub fn scissor_rect(region: &Rect, scale_factor: f32, target: (u32, u32)) -> Option<[u32; 4]> {
    let physical = Rect::new(
        region.x * scale_factor,
        region.y * scale_factor,
        region.w * scale_factor,
        region.h * scale_factor,
    );
    let bounds = Rect::new(0.0, 0.0, target.0 as f32, target.1 as f32);
    let visible = physical.intersect(&bounds)?;
    let x0 = visible.x.floor() as u32;
    let y0 = visible.y.floor() as u32;
    let x1 = (visible.right().ceil() as u32).min(target.0);
    let y1 = (visible.bottom().ceil() as u32).min(target.1);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some([x0, y0, x1 - x0, y1 - y0])
}

// ============================
// === SHADER SOURCES ===
// ============================

const MESH_SHADER: &str = r#"
struct MeshUniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    light_position: vec4<f32>,
    light_color: vec4<f32>,
    ambient: vec4<f32>,
    base_color: vec4<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: MeshUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = uniforms.model * vec4<f32>(vertex.position, 1.0);
    out.clip_position = uniforms.view_proj * world;
    out.world_position = world.xyz;
    out.normal = (uniforms.model * vec4<f32>(vertex.normal, 0.0)).xyz;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let l = normalize(uniforms.light_position.xyz - in.world_position);
    let diffuse = max(dot(n, l), 0.0) * uniforms.light_color.rgb * uniforms.light_position.w;
    let color = uniforms.base_color.rgb * (uniforms.ambient.rgb + diffuse);
    return vec4<f32>(min(color, vec3<f32>(1.0)), uniforms.base_color.a);
}
"#;

const OVERLAY_SHADER: &str = r#"
struct ScreenUniforms {
    size: vec2<f32>,
    _padding: vec2<f32>,
}

@group(0) @binding(0) var<uniform> screen: ScreenUniforms;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) local: vec2<f32>,
    @location(2) half_size: vec2<f32>,
    @location(3) radius: f32,
    @location(4) color: vec4<f32>,
    @location(5) shape: u32,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) half_size: vec2<f32>,
    @location(2) radius: f32,
    @location(3) color: vec4<f32>,
    @location(4) @interpolate(flat) shape: u32,
}

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let ndc = vec2<f32>(
        vertex.position.x / screen.size.x * 2.0 - 1.0,
        1.0 - vertex.position.y / screen.size.y * 2.0,
    );
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.local = vertex.local;
    out.half_size = vertex.half_size;
    out.radius = vertex.radius;
    out.color = vertex.color;
    out.shape = vertex.shape;
    return out;
}

fn sdf_rounded_rect(p: vec2<f32>, half_size: vec2<f32>, radius: f32) -> f32 {
    let q = abs(p) - half_size + vec2<f32>(radius);
    return length(max(q, vec2<f32>(0.0))) + min(max(q.x, q.y), 0.0) - radius;
}

// Apex at the top centre (y grows downwards).
fn sdf_triangle(p: vec2<f32>, half_size: vec2<f32>) -> f32 {
    let base = p.y - half_size.y;
    let n = normalize(vec2<f32>(2.0 * half_size.y, -half_size.x));
    let side = dot(vec2<f32>(abs(p.x), p.y + half_size.y), n);
    return max(base, side);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    var d: f32;
    if in.shape == 1u {
        d = sdf_triangle(in.local, in.half_size);
    } else {
        d = sdf_rounded_rect(in.local, in.half_size, in.radius);
    }
    let coverage = clamp(0.5 - d, 0.0, 1.0);
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
"#;

// ======================================
// === SURFACE ===
// ======================================

pub struct GpuState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub window: Arc<Window>,
    pub depth_texture: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
}

impl GpuState {
    pub async fn new(window: Arc<Window>) -> Result<GpuState> {
        cfg_if::cfg_if! {
            if #[cfg(target_arch = "wasm32")] {
                let size = winit::dpi::PhysicalSize::new(crate::config::DIMX, crate::config::DIMY);
                let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                    backends: wgpu::Backends::BROWSER_WEBGPU,
                    ..Default::default()
                });
                let limits = wgpu::Limits::downlevel_webgl2_defaults();
            } else {
                let size = window.inner_size();
                let instance = wgpu::Instance::default();
                let limits = wgpu::Limits::default();
            }
        }

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: limits,
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let surface_format = *caps.formats.first().ok_or(HeroError::NoSurfaceFormat)?;

        // Colours are authored as sRGB bytes, so the view is written unconverted.
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![surface_format.remove_srgb_suffix()],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let (depth_texture, depth_view) = Self::create_depth_texture(&device, &config);

        log::info!(
            "gpu: {} ({:?}), surface {}x{} {:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
            config.width,
            config.height,
            config.format
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            depth_texture,
            depth_view,
        })
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());
        (depth_texture, depth_view)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        let (depth_texture, depth_view) = Self::create_depth_texture(&self.device, &self.config);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;
    }

    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn scale_factor(&self) -> f32 {
        self.window.scale_factor() as f32
    }

    // Surface size in logical pixels.
    pub fn logical_size(&self) -> Vec2 {
        Vec2::new(self.config.width as f32, self.config.height as f32) / self.scale_factor()
    }

    fn target_format(&self) -> wgpu::TextureFormat {
        self.config.format.remove_srgb_suffix()
    }
}

// ======================================
// === PAGE RENDERER ===
// ======================================

struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    num_indices: u32,
}

pub struct PageRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    mesh_uniform_buffer: wgpu::Buffer,
    mesh_bind_group: wgpu::BindGroup,
    mesh: Option<MeshBuffers>,

    overlay_pipeline: wgpu::RenderPipeline,
    screen_buffer: wgpu::Buffer,
    overlay_bind_group: wgpu::BindGroup,
    overlay_buffer: wgpu::Buffer,
    overlay_capacity: usize,
    overlay_vertices: Vec<OverlayVertex>,
}

impl PageRenderer {
    pub fn new(gpu: &GpuState) -> Self {
        let device = &gpu.device;

        let mesh_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Mesh Uniform Buffer"),
            size: std::mem::size_of::<MeshUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let screen_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Screen Uniform Buffer"),
            size: std::mem::size_of::<ScreenUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mesh_layout = uniform_layout(device, "Mesh Bind Group Layout", wgpu::ShaderStages::VERTEX_FRAGMENT);
        let overlay_layout = uniform_layout(device, "Overlay Bind Group Layout", wgpu::ShaderStages::VERTEX);

        let mesh_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Mesh Bind Group"),
            layout: &mesh_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: mesh_uniform_buffer.as_entire_binding(),
            }],
        });
        let overlay_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Overlay Bind Group"),
            layout: &overlay_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_buffer.as_entire_binding(),
            }],
        });

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(MESH_SHADER.into()),
        });
        let overlay_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Overlay Shader"),
            source: wgpu::ShaderSource::Wgsl(OVERLAY_SHADER.into()),
        });

        let mesh_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&mesh_layout],
            push_constant_ranges: &[],
        });
        let overlay_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Overlay Pipeline Layout"),
            bind_group_layouts: &[&overlay_layout],
            push_constant_ranges: &[],
        });

        let format = gpu.target_format();

        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Render Pipeline"),
            layout: Some(&mesh_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &mesh_shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &mesh_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let overlay_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Overlay Render Pipeline"),
            layout: Some(&overlay_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &overlay_shader,
                entry_point: Some("vs_main"),
                buffers: &[OverlayVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &overlay_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            // Panels ignore depth so content always covers the cube.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let overlay_buffer = create_overlay_buffer(device, INITIAL_OVERLAY_CAPACITY);

        Self {
            mesh_pipeline,
            mesh_uniform_buffer,
            mesh_bind_group,
            mesh: None,
            overlay_pipeline,
            screen_buffer,
            overlay_bind_group,
            overlay_buffer,
            overlay_capacity: INITIAL_OVERLAY_CAPACITY,
            overlay_vertices: Vec::with_capacity(INITIAL_OVERLAY_CAPACITY),
        }
    }

    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    // The rotating object may be attached once the geometry is uploaded.
    pub fn upload_mesh(&mut self, gpu: &GpuState, size: f32) {
        let (vertices, indices) = box_geometry(size);

        let vertex_buffer = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!("render: cube uploaded ({} vertices, {} indices)", vertices.len(), indices.len());

        self.mesh = Some(MeshBuffers {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        });
    }

    pub fn release_mesh(&mut self) {
        self.mesh = None;
    }

    pub fn render(&mut self, gpu: &GpuState, list: &DrawList) -> std::result::Result<(), wgpu::SurfaceError> {
        let viewport = gpu.logical_size();

        // Background panels first, content panels after; one upload for both.
        self.overlay_vertices.clear();
        for panel in list.layer(Layer::Background) {
            self.overlay_vertices.extend_from_slice(&panel_vertices(panel));
        }
        let background_count = self.overlay_vertices.len() as u32;
        for panel in list.layer(Layer::Content) {
            self.overlay_vertices.extend_from_slice(&panel_vertices(panel));
        }
        let total_count = self.overlay_vertices.len() as u32;

        if self.overlay_vertices.len() > self.overlay_capacity {
            self.overlay_capacity = self.overlay_vertices.len().next_power_of_two();
            self.overlay_buffer = create_overlay_buffer(&gpu.device, self.overlay_capacity);
        }
        if !self.overlay_vertices.is_empty() {
            gpu.queue
                .write_buffer(&self.overlay_buffer, 0, bytemuck::cast_slice(&self.overlay_vertices));
        }
        gpu.queue.write_buffer(
            &self.screen_buffer,
            0,
            bytemuck::bytes_of(&ScreenUniforms {
                size: viewport.to_array(),
                _padding: [0.0; 2],
            }),
        );

        let cube = match (&list.canvas, &self.mesh) {
            (Some(view), Some(mesh)) if view.opacity > 0.0 => {
                let target = (gpu.config.width, gpu.config.height);
                scissor_rect(&view.region, gpu.scale_factor(), target).map(|scissor| {
                    gpu.queue.write_buffer(
                        &self.mesh_uniform_buffer,
                        0,
                        bytemuck::bytes_of(&MeshUniforms::from_view(view, viewport)),
                    );
                    (mesh, scissor)
                })
            }
            _ => None,
        };

        let output = gpu.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(gpu.target_format()),
            ..Default::default()
        });

        let mut encoder = gpu.device.create_command_encoder(&Default::default());

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Page Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &gpu.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if background_count > 0 {
                render_pass.set_pipeline(&self.overlay_pipeline);
                render_pass.set_bind_group(0, &self.overlay_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.overlay_buffer.slice(..));
                render_pass.draw(0..background_count, 0..1);
            }

            if let Some((mesh, [x, y, w, h])) = cube {
                render_pass.set_scissor_rect(x, y, w, h);
                render_pass.set_pipeline(&self.mesh_pipeline);
                render_pass.set_bind_group(0, &self.mesh_bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..mesh.num_indices, 0, 0..1);
                render_pass.set_scissor_rect(0, 0, gpu.config.width, gpu.config.height);
            }

            if total_count > background_count {
                render_pass.set_pipeline(&self.overlay_pipeline);
                render_pass.set_bind_group(0, &self.overlay_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.overlay_buffer.slice(..));
                render_pass.draw(background_count..total_count, 0..1);
            }
        }

        gpu.queue.submit([encoder.finish()]);
        gpu.window.pre_present_notify();
        output.present();

        Ok(())
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn create_overlay_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Overlay Vertex Buffer"),
        size: (std::mem::size_of::<OverlayVertex>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
