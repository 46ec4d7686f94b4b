//! Drifting nodes joined by distance-thresholded lines.
//!
//! Nodes wander on a noise field; every pair closer than the link
//! threshold is connected, with line alpha falling off linearly as the
//! pair separates.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::constants::*;
use crate::layer::{random_point, Layer, LayerKind, Tick};
use crate::noise::NoiseField;
use crate::scene::{Painter, Rgba};
use crate::viewport::Viewport;

struct Node {
    pos: Vec2,
    // decorrelates this node's path from its neighbours'
    offset: f32,
}

pub struct LatticeLayer {
    nodes: Vec<Node>,
    rng: StdRng,
    noise: NoiseField,
    link_count: usize,
    viewport: Viewport,
}

impl LatticeLayer {
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = NoiseField::new(rng.gen());
        let mut layer = Self {
            nodes: Vec::with_capacity(LATTICE_NODES),
            rng,
            noise,
            link_count: 0,
            viewport,
        };
        layer.scatter();
        layer
    }

    fn scatter(&mut self) {
        self.nodes.clear();
        self.link_count = 0;
        for _ in 0..LATTICE_NODES {
            let pos = random_point(&mut self.rng, self.viewport);
            self.nodes.push(Node {
                pos,
                offset: self.rng.gen_range(0.0..100.0),
            });
        }
    }
}

impl Layer for LatticeLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Lattice
    }

    fn update(&mut self, tick: &Tick) {
        self.viewport = tick.viewport;
        let (w, h) = (tick.viewport.width, tick.viewport.height);
        let t = tick.frame as f32 * FIELD_TIME_SCALE;

        for n in &mut self.nodes {
            let angle = self.noise.sample3(
                n.pos.x * LATTICE_NOISE_SCALE + n.offset,
                n.pos.y * LATTICE_NOISE_SCALE,
                t,
            ) * TAU
                * 2.0;
            n.pos += Vec2::from_angle(angle) * LATTICE_DRIFT_SPEED;
            if n.pos.x < 0.0 {
                n.pos.x += w;
            }
            if n.pos.x > w {
                n.pos.x -= w;
            }
            if n.pos.y < 0.0 {
                n.pos.y += h;
            }
            if n.pos.y > h {
                n.pos.y -= h;
            }
        }

        let mut links = 0;
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                if self.nodes[i].pos.distance(self.nodes[j].pos) < LATTICE_LINK_DIST {
                    links += 1;
                }
            }
        }
        self.link_count = links;
    }

    fn render(&self, painter: &mut Painter<'_>) {
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let a = self.nodes[i].pos;
                let b = self.nodes[j].pos;
                let d = a.distance(b);
                if d < LATTICE_LINK_DIST {
                    let alpha = (1.0 - d / LATTICE_LINK_DIST) * LATTICE_LINE_ALPHA;
                    painter.line(a, b, Rgba::gray(1.0, alpha), 1.0);
                }
            }
        }
        for n in &self.nodes {
            painter.point(n.pos, Rgba::gray(1.0, LATTICE_NODE_ALPHA));
        }
    }

    fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scatter();
    }

    fn energy(&self) -> f32 {
        self.link_count as f32
    }
}
