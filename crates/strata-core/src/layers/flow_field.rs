//! Particles advected along a slowly evolving noise vector field.
//!
//! Unlike the swarm there is no inertia: each particle's velocity is read
//! straight off the field every frame, so the streaks trace the field
//! lines. Edges wrap, severing the streak for one frame.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::constants::*;
use crate::layer::{random_point, Layer, LayerKind, Tick};
use crate::noise::NoiseField;
use crate::scene::{Painter, Rgba};
use crate::viewport::Viewport;

struct Streamer {
    pos: Vec2,
    prev: Vec2,
}

pub struct FlowFieldLayer {
    particles: Vec<Streamer>,
    rng: StdRng,
    noise: NoiseField,
    viewport: Viewport,
}

impl FlowFieldLayer {
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = NoiseField::new(rng.gen());
        let mut layer = Self {
            particles: Vec::with_capacity(FIELD_COUNT),
            rng,
            noise,
            viewport,
        };
        layer.scatter();
        layer
    }

    fn scatter(&mut self) {
        self.particles.clear();
        for _ in 0..FIELD_COUNT {
            let pos = random_point(&mut self.rng, self.viewport);
            self.particles.push(Streamer { pos, prev: pos });
        }
    }
}

impl Layer for FlowFieldLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::FlowField
    }

    fn update(&mut self, tick: &Tick) {
        self.viewport = tick.viewport;
        let (w, h) = (tick.viewport.width, tick.viewport.height);
        let t = tick.frame as f32 * FIELD_TIME_SCALE;

        for p in &mut self.particles {
            let angle = self
                .noise
                .sample3(p.pos.x * FIELD_NOISE_SCALE, p.pos.y * FIELD_NOISE_SCALE, t)
                * TAU
                * 2.0;
            p.prev = p.pos;
            p.pos += Vec2::from_angle(angle) * FIELD_SPEED;

            let mut wrapped = false;
            if p.pos.x < 0.0 {
                p.pos.x += w;
                wrapped = true;
            }
            if p.pos.x > w {
                p.pos.x -= w;
                wrapped = true;
            }
            if p.pos.y < 0.0 {
                p.pos.y += h;
                wrapped = true;
            }
            if p.pos.y > h {
                p.pos.y -= h;
                wrapped = true;
            }
            if wrapped {
                p.prev = p.pos;
            }
        }
    }

    fn render(&self, painter: &mut Painter<'_>) {
        for p in &self.particles {
            painter.line(p.prev, p.pos, Rgba::gray(1.0, FIELD_ALPHA), 1.0);
        }
    }

    fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scatter();
    }

    fn energy(&self) -> f32 {
        self.particles.len() as f32 * FIELD_SPEED
    }
}
