//! Agents on quantized headings that decay, fragment and respawn.
//!
//! Each orbiter moves along a 45-degree-multiple heading with a life value
//! ticking down. Above the decay threshold it draws its trail as a solid
//! polyline; below it the trail fragments into sparse dots and the motion
//! gains jitter. Expired agents respawn from a random edge. An occasional
//! full-height raster line accents the background.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use std::f32::consts::FRAC_PI_4;

use crate::constants::*;
use crate::layer::{random_point, Layer, LayerKind, Tick};
use crate::scene::{Painter, Rgba};
use crate::viewport::Viewport;

#[derive(Clone, Copy, PartialEq)]
enum Phase {
    Active,
    Decay,
}

struct Orbiter {
    pos: Vec2,
    vel: Vec2,
    life: f32,
    decay: f32,
    phase: Phase,
    trail: SmallVec<[Vec2; 32]>,
}

pub struct OrbitalsLayer {
    agents: Vec<Orbiter>,
    rng: StdRng,
    raster: Option<f32>,
    cycle_frames: u32,
    generation: u32,
    viewport: Viewport,
}

impl OrbitalsLayer {
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        let rng = StdRng::seed_from_u64(seed);
        let mut layer = Self {
            agents: Vec::with_capacity(ORBITAL_COUNT),
            rng,
            raster: None,
            cycle_frames: 0,
            generation: 0,
            viewport,
        };
        layer.scatter();
        layer
    }

    fn scatter(&mut self) {
        self.cycle_frames = 0;
        self.agents.clear();
        for _ in 0..ORBITAL_COUNT {
            let pos = random_point(&mut self.rng, self.viewport);
            let agent = spawn(&mut self.rng, pos);
            self.agents.push(agent);
        }
    }
}

/// Fresh orbiter at `pos` with a quantized heading.
fn spawn(rng: &mut StdRng, pos: Vec2) -> Orbiter {
    let heading = rng.gen_range(0..8) as f32 * FRAC_PI_4;
    let speed = rng.gen_range(ORBITAL_SPEED_MIN..ORBITAL_SPEED_MAX);
    Orbiter {
        pos,
        vel: Vec2::from_angle(heading) * speed,
        life: 1.0,
        decay: rng.gen_range(ORBITAL_DECAY_MIN..ORBITAL_DECAY_MAX),
        phase: Phase::Active,
        trail: SmallVec::new(),
    }
}

/// Random point just outside one of the four viewport edges.
fn edge_point(rng: &mut StdRng, viewport: Viewport) -> Vec2 {
    let m = ORBITAL_EDGE_MARGIN;
    match rng.gen_range(0..4) {
        0 => Vec2::new(rng.gen_range(0.0..viewport.width), -m),
        1 => Vec2::new(rng.gen_range(0.0..viewport.width), viewport.height + m),
        2 => Vec2::new(-m, rng.gen_range(0.0..viewport.height)),
        _ => Vec2::new(viewport.width + m, rng.gen_range(0.0..viewport.height)),
    }
}

impl Layer for OrbitalsLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Orbitals
    }

    fn update(&mut self, tick: &Tick) {
        self.viewport = tick.viewport;
        let (w, h) = (tick.viewport.width, tick.viewport.height);

        let Self { agents, rng, .. } = self;
        for a in agents.iter_mut() {
            a.life -= a.decay;
            if a.life < ORBITAL_DECAY_LIFE {
                a.phase = Phase::Decay;
            }
            if a.life <= 0.0 {
                let from_edge = edge_point(rng, tick.viewport);
                *a = spawn(rng, from_edge);
                continue;
            }

            match a.phase {
                Phase::Active => a.pos += a.vel,
                Phase::Decay => {
                    a.pos += a.vel * ORBITAL_DECAY_SPEED_FACTOR;
                    if rng.gen::<f32>() < ORBITAL_JITTER_PROB {
                        a.pos.x += rng.gen_range(-ORBITAL_JITTER..ORBITAL_JITTER);
                    }
                }
            }

            // wrapping an edge severs the trail
            if a.pos.x < 0.0 {
                a.pos.x = w;
                a.trail.clear();
            }
            if a.pos.x > w {
                a.pos.x = 0.0;
                a.trail.clear();
            }
            if a.pos.y < 0.0 {
                a.pos.y = h;
                a.trail.clear();
            }
            if a.pos.y > h {
                a.pos.y = 0.0;
                a.trail.clear();
            }

            a.trail.push(a.pos);
            let cap = (ORBITAL_TRAIL_MAX as f32 * a.life) as usize;
            while a.trail.len() > cap {
                a.trail.remove(0);
            }
        }

        self.raster = if tick.frame % ORBITAL_RASTER_PERIOD == 0 {
            Some(self.rng.gen_range(0.0..w))
        } else {
            None
        };

        self.cycle_frames += 1;
        if self.cycle_frames > ORBITAL_MAX_CYCLE_FRAMES {
            self.generation += 1;
            self.scatter();
        }
    }

    fn render(&self, painter: &mut Painter<'_>) {
        if let Some(x) = self.raster {
            painter.line(
                Vec2::new(x, 0.0),
                Vec2::new(x, self.viewport.height),
                Rgba::gray(1.0, ORBITAL_RASTER_ALPHA),
                1.0,
            );
        }

        for a in &self.agents {
            if a.trail.len() < 2 {
                continue;
            }
            match a.phase {
                Phase::Active => {
                    painter.polyline(a.trail.to_vec(), Rgba::gray(1.0, a.life), 1.5);
                }
                Phase::Decay => {
                    for p in a.trail.iter().step_by(2) {
                        painter.point(*p, Rgba::gray(0.6, 0.6 * a.life));
                    }
                }
            }
        }
    }

    fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scatter();
    }

    fn energy(&self) -> f32 {
        self.agents.iter().map(|a| a.life.max(0.0)).sum()
    }

    fn generation(&self) -> u32 {
        self.generation
    }
}
