//! High-energy particle streaks steered by a noise field.
//!
//! Particles launch outward from the viewport center, follow a curl of
//! gradient noise under randomized friction, and bounce off the walls.
//! When the swarm's kinetic energy settles (or a frame budget elapses) the
//! whole generation re-scatters.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::constants::*;
use crate::layer::{remap_clamped, Layer, LayerKind, Tick};
use crate::noise::NoiseField;
use crate::scene::{Painter, Rgba};
use crate::viewport::Viewport;

struct Particle {
    pos: Vec2,
    prev: Vec2,
    vel: Vec2,
    noise_scale: f32,
}

pub struct SwarmLayer {
    particles: Vec<Particle>,
    rng: StdRng,
    noise: NoiseField,
    friction: f32,
    energy: f32,
    cycle_frames: u32,
    generation: u32,
    viewport: Viewport,
}

impl SwarmLayer {
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = NoiseField::new(rng.gen());
        let mut layer = Self {
            particles: Vec::with_capacity(SWARM_COUNT),
            rng,
            noise,
            friction: SWARM_FRICTION_MAX,
            energy: 0.0,
            cycle_frames: 0,
            generation: 0,
            viewport,
        };
        layer.scatter();
        layer
    }

    fn scatter(&mut self) {
        self.cycle_frames = 0;
        self.friction = self.rng.gen_range(SWARM_FRICTION_MIN..SWARM_FRICTION_MAX);
        let center = self.viewport.center();
        self.particles.clear();
        for _ in 0..SWARM_COUNT {
            let pos = center
                + Vec2::new(
                    self.rng.gen_range(-SWARM_SPAWN_SPREAD..SWARM_SPAWN_SPREAD),
                    self.rng.gen_range(-SWARM_SPAWN_SPREAD..SWARM_SPAWN_SPREAD),
                );
            let heading = self.rng.gen_range(0.0..TAU);
            let speed = self
                .rng
                .gen_range(SWARM_LAUNCH_SPEED_MIN..SWARM_LAUNCH_SPEED_MAX);
            self.particles.push(Particle {
                pos,
                prev: pos,
                vel: Vec2::from_angle(heading) * speed,
                noise_scale: self.rng.gen_range(SWARM_NOISE_SCALE_MIN..SWARM_NOISE_SCALE_MAX),
            });
        }
    }
}

impl Layer for SwarmLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Swarm
    }

    fn update(&mut self, tick: &Tick) {
        self.viewport = tick.viewport;
        let (w, h) = (tick.viewport.width, tick.viewport.height);
        let t = tick.frame as f32 * SWARM_TIME_SCALE;

        let mut energy = 0.0;
        for p in &mut self.particles {
            let angle = self
                .noise
                .sample3(p.pos.x * p.noise_scale, p.pos.y * p.noise_scale, t)
                * TAU
                * 2.0;
            p.vel = (p.vel + Vec2::from_angle(angle) * SWARM_FORCE) * self.friction;
            p.prev = p.pos;
            p.pos += p.vel;
            if p.pos.x < 0.0 || p.pos.x > w {
                p.vel.x = -p.vel.x;
                p.pos.x = p.pos.x.clamp(0.0, w);
            }
            if p.pos.y < 0.0 || p.pos.y > h {
                p.vel.y = -p.vel.y;
                p.pos.y = p.pos.y.clamp(0.0, h);
            }
            energy += p.vel.length();
        }
        self.energy = energy;

        self.cycle_frames += 1;
        let settled = self.cycle_frames > SWARM_SETTLE_FRAMES
            && energy < SWARM_SETTLE_MEAN_SPEED * self.particles.len() as f32;
        if settled || self.cycle_frames > SWARM_MAX_CYCLE_FRAMES {
            self.generation += 1;
            self.scatter();
        }
    }

    fn render(&self, painter: &mut Painter<'_>) {
        for p in &self.particles {
            let alpha = remap_clamped(
                p.vel.length(),
                0.0,
                SWARM_ALPHA_SPEED_MAX,
                SWARM_ALPHA_MIN,
                SWARM_ALPHA_MAX,
            );
            painter.line(p.prev, p.pos, Rgba::gray(1.0, alpha), 1.0);
        }
    }

    fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scatter();
    }

    fn energy(&self) -> f32 {
        self.energy
    }

    fn generation(&self) -> u32 {
        self.generation
    }
}
