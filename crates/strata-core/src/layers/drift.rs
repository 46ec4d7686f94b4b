//! A band of damped oscillators drawn as sine-plus-noise polylines.
//!
//! Amplitude peaks mid-band and decays every frame; when the band goes
//! quiet the whole set re-seeds with fresh phases and amplitudes.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

use crate::constants::*;
use crate::layer::{remap_clamped, Layer, LayerKind, Tick};
use crate::noise::NoiseField;
use crate::scene::{Painter, Rgba};
use crate::viewport::Viewport;

struct Oscillator {
    base_y: f32,
    amp: f32,
    phase: f32,
    freq: f32,
    speed: f32,
}

pub struct DriftLayer {
    oscillators: Vec<Oscillator>,
    rng: StdRng,
    noise: NoiseField,
    damping: f32,
    energy: f32,
    time: f32,
    cycle_frames: u32,
    generation: u32,
    viewport: Viewport,
}

impl DriftLayer {
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = NoiseField::new(rng.gen());
        let mut layer = Self {
            oscillators: Vec::with_capacity(DRIFT_OSCILLATORS),
            rng,
            noise,
            damping: DRIFT_DAMPING_MAX,
            energy: 0.0,
            time: 0.0,
            cycle_frames: 0,
            generation: 0,
            viewport,
        };
        layer.scatter();
        layer
    }

    fn scatter(&mut self) {
        self.cycle_frames = 0;
        self.damping = self.rng.gen_range(DRIFT_DAMPING_MIN..DRIFT_DAMPING_MAX);
        self.oscillators.clear();
        let n = DRIFT_OSCILLATORS;
        for i in 0..n {
            let t = i as f32 / n as f32;
            let base_y = self.viewport.height * (DRIFT_BAND_TOP + (DRIFT_BAND_BOTTOM - DRIFT_BAND_TOP) * t);
            // amplitude arches across the band
            let arch = (t * PI).sin() * DRIFT_BASE_AMP;
            self.oscillators.push(Oscillator {
                base_y,
                amp: arch + self.rng.gen_range(0.0..DRIFT_AMP_JITTER),
                phase: self.rng.gen_range(0.0..TAU),
                freq: self.rng.gen_range(DRIFT_FREQ_MIN..DRIFT_FREQ_MAX),
                speed: self.rng.gen_range(DRIFT_PHASE_SPEED_MIN..DRIFT_PHASE_SPEED_MAX),
            });
        }
    }
}

impl Layer for DriftLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Drift
    }

    fn update(&mut self, tick: &Tick) {
        self.viewport = tick.viewport;
        self.time = tick.frame as f32 * DRIFT_TIME_SCALE;

        let mut energy = 0.0;
        for osc in &mut self.oscillators {
            osc.amp *= self.damping;
            osc.phase += osc.speed;
            energy += osc.amp;
        }
        self.energy = energy;

        self.cycle_frames += 1;
        let settled = self.cycle_frames > DRIFT_SETTLE_FRAMES && energy < DRIFT_SETTLE_AMP;
        if settled || self.cycle_frames > DRIFT_MAX_CYCLE_FRAMES {
            self.generation += 1;
            self.scatter();
        }
    }

    fn render(&self, painter: &mut Painter<'_>) {
        let width = self.viewport.width;
        for osc in &self.oscillators {
            if osc.amp < DRIFT_MIN_AMP {
                continue;
            }
            let steps = (width / DRIFT_SAMPLE_STEP).ceil() as usize + 1;
            let mut points = Vec::with_capacity(steps);
            let mut x = 0.0;
            while x <= width {
                let wobble = self
                    .noise
                    .unit(x * DRIFT_NOISE_X_SCALE, osc.base_y * DRIFT_NOISE_X_SCALE, self.time)
                    * osc.amp
                    * 0.5;
                let wave = (x * osc.freq + osc.phase).sin() * osc.amp;
                points.push(Vec2::new(x, osc.base_y + wave + wobble));
                x += DRIFT_SAMPLE_STEP;
            }
            let alpha = remap_clamped(
                osc.amp,
                0.0,
                DRIFT_ALPHA_AMP_MAX,
                DRIFT_ALPHA_MIN,
                DRIFT_ALPHA_MAX,
            );
            painter.polyline(points, Rgba::gray(1.0, alpha), 1.0);
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
