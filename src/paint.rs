use glam::{Mat4, Vec2};

use crate::camera::PerspectiveCamera;
use crate::layout::{Layer, Rect};
use crate::scene::{AmbientLight, PointLight};

// ======================================
// === PANELS ===
// ======================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid([f32; 4]),
    // Top-left to bottom-right, `via` on the other diagonal.
    Diagonal { from: [f32; 4], via: [f32; 4], to: [f32; 4] },
}

impl Fill {
    // Corner colours: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [[f32; 4]; 4] {
        match *self {
            Fill::Solid(c) => [c; 4],
            Fill::Diagonal { from, via, to } => [from, via, via, to],
        }
    }

    fn scale_alpha(&mut self, factor: f32) {
        match self {
            Fill::Solid(c) => c[3] *= factor,
            Fill::Diagonal { from, via, to } => {
                from[3] *= factor;
                via[3] *= factor;
                to[3] *= factor;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    RoundedRect,
    // Apex at the top centre, base along the bottom edge.
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub layer: Layer,
    pub rect: Rect,
    pub fill: Fill,
    pub radius: f32,
    pub shape: Shape,
}

impl Panel {
    pub fn new(layer: Layer, rect: Rect, fill: Fill) -> Self {
        Self {
            layer,
            rect,
            fill,
            radius: 0.0,
            shape: Shape::RoundedRect,
        }
    }

    pub fn solid(layer: Layer, rect: Rect, color: [f32; 4], radius: f32) -> Self {
        Self {
            radius,
            ..Self::new(layer, rect, Fill::Solid(color))
        }
    }

    pub fn circle(layer: Layer, center: Vec2, r: f32, color: [f32; 4]) -> Self {
        let rect = Rect::new(center.x - r, center.y - r, r * 2.0, r * 2.0);
        Self::solid(layer, rect, color, r)
    }

    pub fn triangle(layer: Layer, rect: Rect, color: [f32; 4]) -> Self {
        Self {
            shape: Shape::Triangle,
            ..Self::new(layer, rect, Fill::Solid(color))
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.fill.scale_alpha(opacity);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.rect.w > 0.0 && self.rect.h > 0.0 && self.fill.corners().iter().any(|c| c[3] > 0.0)
    }
}

// ======================================
// === CANVAS VIEW ===
// ======================================

// Everything the renderer needs to draw the canvas band for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    pub region: Rect,
    pub camera: PerspectiveCamera,
    pub model: Mat4,
    pub ambient: AmbientLight,
    pub point: PointLight,
    pub color: [f32; 3],
    pub cube_size: f32,
    // Opacity of the section the band sits in.
    pub opacity: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub panels: Vec<Panel>,
    pub canvas: Option<CanvasView>,
}

impl DrawList {
    pub fn push(&mut self, panel: Panel) {
        if panel.is_visible() {
            self.panels.push(panel);
        }
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Panel> + '_ {
        self.panels.iter().filter(move |p| p.layer == layer)
    }

    // Panels of every layer, bottom to top.
    pub fn paint_order(&self) -> Vec<&Panel> {
        Layer::PAINT_ORDER
            .iter()
            .flat_map(|layer| self.layer(*layer))
            .collect()
    }
}
