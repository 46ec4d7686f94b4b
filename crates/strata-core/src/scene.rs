//! Per-frame display list handed to frontends.
//!
//! A [`Scene`] carries three ordered passes: an alpha-blended background
//! (the trail-fade wipe), the additive pass every layer draws into, and an
//! alpha-blended overlay for the HUD. Frontends translate primitives into
//! whatever their backend needs; [`LineVertex`] is the shared GPU layout.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Straight-alpha RGBA color, components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Achromatic color with the given brightness and alpha.
    pub const fn gray(v: f32, a: f32) -> Self {
        Self::new(v, v, v, a)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Scales alpha by `k`, clamped to [0, 1].
    pub fn faded(self, k: f32) -> Self {
        Self {
            a: (self.a * k).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Axis-aligned filled rectangle.
    Rect { center: Vec2, size: Vec2, color: Rgba },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        weight: f32,
    },
    Polyline {
        points: Vec<Vec2>,
        color: Rgba,
        weight: f32,
    },
    Point { at: Vec2, color: Rgba },
    Text {
        origin: Vec2,
        size: f32,
        color: Rgba,
        text: String,
    },
}

/// One frame's worth of draw commands, in pass order.
#[derive(Default)]
pub struct Scene {
    /// Alpha-blended wipe drawn before any layer.
    pub background: Vec<Primitive>,
    /// Layer output, composited additively.
    pub additive: Vec<Primitive>,
    /// HUD text, alpha-blended on top.
    pub overlay: Vec<Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops last frame's commands; called at the top of every frame.
    pub fn begin(&mut self) {
        self.background.clear();
        self.additive.clear();
        self.overlay.clear();
    }

    pub fn primitive_count(&self) -> usize {
        self.background.len() + self.additive.len() + self.overlay.len()
    }
}

/// Brush a layer draws through during its render step.
///
/// Every emitted alpha is scaled by the compositor-supplied intensity, so
/// a layer only decides its own base alphas and depth falloff comes for
/// free.
pub struct Painter<'a> {
    out: &'a mut Vec<Primitive>,
    intensity: f32,
}

impl<'a> Painter<'a> {
    pub fn new(out: &'a mut Vec<Primitive>, intensity: f32) -> Self {
        Self {
            out,
            intensity: intensity.clamp(0.0, 1.0),
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, weight: f32) {
        self.out.push(Primitive::Line {
            from,
            to,
            color: color.faded(self.intensity),
            weight,
        });
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, color: Rgba, weight: f32) {
        if points.len() < 2 {
            return;
        }
        self.out.push(Primitive::Polyline {
            points,
            color: color.faded(self.intensity),
            weight,
        });
    }

    pub fn point(&mut self, at: Vec2, color: Rgba) {
        self.out.push(Primitive::Point {
            at,
            color: color.faded(self.intensity),
        });
    }
}

/// Vertex layout shared with GPU frontends (matches `SCENE_WGSL`).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl LineVertex {
    pub fn new(pos: Vec2, color: Rgba) -> Self {
        Self {
            pos: pos.to_array(),
            color: color.to_array(),
        }
    }
}
