use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Vec3};

use crate::camera::{OrbitControls, PerspectiveCamera};
use crate::config::PageConfig;

// The decorative solid. Two rotation accumulators, one per axis, each
// advanced by `delta_time * rate` every frame and wrapped into `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedObject {
    pub angle_x: f32,
    pub angle_y: f32,
    rate_x: f32,
    rate_y: f32,
}

impl RenderedObject {
    pub fn new(rate_x: f32, rate_y: f32) -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            rate_x,
            rate_y,
        }
    }

    pub fn advance(&mut self, delta_time: f32) {
        self.angle_x = (self.angle_x + delta_time * self.rate_x).rem_euclid(std::f32::consts::TAU);
        self.angle_y = (self.angle_y + delta_time * self.rate_y).rem_euclid(std::f32::consts::TAU);
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.angle_x, self.angle_y, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}

// Camera, lights and geometry, configured once when the canvas mounts.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSetup {
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub ambient: AmbientLight,
    pub point: PointLight,
    pub cube_size: f32,
    pub cube_color: [f32; 3],
    pub rotation_rates: (f32, f32),
}

impl SceneSetup {
    pub fn from_config(config: &PageConfig, aspect: f32) -> Self {
        Self {
            camera: PerspectiveCamera::new(&config.camera, aspect),
            controls: OrbitControls::new(&config.camera),
            ambient: AmbientLight {
                color: [1.0, 1.0, 1.0],
                intensity: config.lights.ambient_intensity,
            },
            point: PointLight {
                position: config.lights.point_position,
                color: [1.0, 1.0, 1.0],
                intensity: config.lights.point_intensity,
            },
            cube_size: config.cube_size,
            cube_color: config.cube_color,
            rotation_rates: (config.rotation_rate_x, config.rotation_rate_y),
        }
    }
}

// ======================================
// === GEOMETRY ===
// ======================================

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

// Axis-aligned box centred on the origin: 24 vertices (flat normals per
// face), 36 counter-clockwise indices.
pub fn box_geometry(size: f32) -> (Vec<MeshVertex>, Vec<u16>) {
    let h = size * 0.5;
    // (normal, tangent u, tangent v); u × v == normal keeps faces CCW.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let n = Vec3::from(normal);
        let u = Vec3::from(u);
        let v = Vec3::from(v);
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (n + u * su + v * sv) * h;
            vertices.push(MeshVertex {
                position: p.to_array(),
                normal,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    (vertices, indices)
}
