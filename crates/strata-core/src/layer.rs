//! The layer capability contract and the closed kind enumeration.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::layers::{DriftLayer, FlowFieldLayer, LatticeLayer, OrbitalsLayer, SwarmLayer};
use crate::scene::Painter;
use crate::viewport::Viewport;

/// Per-frame inputs shared by every layer: the global frame counter, the
/// delta time since the previous frame, and the current viewport.
#[derive(Clone, Copy, Debug)]
pub struct Tick {
    pub frame: u64,
    pub dt: f32,
    pub viewport: Viewport,
}

/// One visual generator in the stack.
///
/// State is owned exclusively by the layer and advanced only by
/// [`update`](Layer::update). [`render`](Layer::render) takes `&self`, so
/// drawing can never mutate simulation state; the painter scales all
/// emitted alpha by the compositor-computed intensity.
pub trait Layer {
    fn kind(&self) -> LayerKind;

    fn display_name(&self) -> &'static str {
        self.kind().display_name()
    }

    /// Advance internal simulation state by one frame.
    fn update(&mut self, tick: &Tick);

    /// Draw the current state through the intensity-scaling painter.
    fn render(&self, painter: &mut Painter<'_>);

    /// Re-scatter for a new viewport (resize under `ResetLayers`).
    fn reset(&mut self, viewport: Viewport);

    /// Activity metric for the HUD (speeds, amplitudes, live trails).
    fn energy(&self) -> f32;

    /// How many times this layer has recycled itself.
    fn generation(&self) -> u32 {
        0
    }
}

/// The closed enumeration of layer kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Swarm,
    Drift,
    Orbitals,
    FlowField,
    Lattice,
}

impl LayerKind {
    pub const ALL: [LayerKind; 5] = [
        LayerKind::Swarm,
        LayerKind::Drift,
        LayerKind::Orbitals,
        LayerKind::FlowField,
        LayerKind::Lattice,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            LayerKind::Swarm => "ENTROPIC SWARM",
            LayerKind::Drift => "HARMONIC DRIFT",
            LayerKind::Orbitals => "ORBITAL DECAY",
            LayerKind::FlowField => "FLOW FIELD",
            LayerKind::Lattice => "LATTICE WEB",
        }
    }

    /// Constructs a fresh layer of this kind. Adding a kind means adding a
    /// variant, an arm here, and nothing else.
    pub fn build(self, viewport: Viewport, seed: u64) -> Box<dyn Layer> {
        match self {
            LayerKind::Swarm => Box::new(SwarmLayer::new(viewport, seed)),
            LayerKind::Drift => Box::new(DriftLayer::new(viewport, seed)),
            LayerKind::Orbitals => Box::new(OrbitalsLayer::new(viewport, seed)),
            LayerKind::FlowField => Box::new(FlowFieldLayer::new(viewport, seed)),
            LayerKind::Lattice => Box::new(LatticeLayer::new(viewport, seed)),
        }
    }

    /// Uniformly random kind.
    pub fn choose(rng: &mut impl Rng) -> LayerKind {
        *Self::ALL.choose(rng).unwrap_or(&LayerKind::Swarm)
    }
}

/// Linear remap of `v` from `[in_lo, in_hi]` to `[out_lo, out_hi]`,
/// clamped to the output interval.
pub(crate) fn remap_clamped(v: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    let t = ((v - in_lo) / (in_hi - in_lo)).clamp(0.0, 1.0);
    out_lo + (out_hi - out_lo) * t
}

/// Random point inside the viewport.
pub(crate) fn random_point(rng: &mut impl Rng, viewport: Viewport) -> Vec2 {
    Vec2::new(
        rng.gen_range(0.0..viewport.width),
        rng.gen_range(0.0..viewport.height),
    )
}
