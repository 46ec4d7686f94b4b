//! The ordered, capacity-bounded layer stack.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::*;
use crate::error::StackError;
use crate::layer::{Layer, LayerKind};
use crate::viewport::Viewport;

/// Stack behavior knobs. A denser 6-layer build is just a different
/// `capacity`; nothing else changes.
#[derive(Clone, Copy, Debug)]
pub struct StackConfig {
    pub capacity: usize,
    /// Lower intensity bound for the deepest layers.
    pub intensity_floor: f32,
    /// Intensity at depth 1; the top layer is always 1.0.
    pub intensity_ceil: f32,
    /// Depth over which intensity interpolates from ceiling to floor.
    pub intensity_depth_range: f32,
    pub randomize_min: usize,
    pub randomize_max: usize,
    /// Per-frame background erase alpha (1.0 = hard clear).
    pub background_fade: f32,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            intensity_floor: INTENSITY_FLOOR,
            intensity_ceil: INTENSITY_CEIL,
            intensity_depth_range: INTENSITY_DEPTH_RANGE,
            randomize_min: RANDOMIZE_MIN,
            randomize_max: RANDOMIZE_MAX,
            background_fade: BACKGROUND_FADE,
        }
    }
}

/// One row of the outward "layer list changed" payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerEntry {
    pub index: usize,
    pub kind: LayerKind,
    pub name: &'static str,
}

/// Callback invoked with the full ordered list after every non-silent
/// mutation, for an external list-rendering collaborator to consume.
pub type StackListener = Box<dyn FnMut(&[LayerEntry])>;

/// Ordered collection of active layers, bottom (index 0, most faded) to
/// top (last, most opaque). Length never exceeds the configured capacity.
pub struct LayerStack {
    config: StackConfig,
    pub(crate) layers: Vec<Box<dyn Layer>>,
    viewport: Viewport,
    rng: StdRng,
    base_seed: u64,
    spawned: u64,
    listener: Option<StackListener>,
}

impl LayerStack {
    pub fn new(config: StackConfig, viewport: Viewport, seed: u64) -> Self {
        Self {
            config,
            layers: Vec::new(),
            viewport,
            rng: StdRng::seed_from_u64(seed),
            base_seed: seed,
            spawned: 0,
            listener: None,
        }
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn set_listener(&mut self, listener: StackListener) {
        self.listener = Some(listener);
    }

    /// The full ordered `{index, kind, name}` list.
    pub fn entries(&self) -> Vec<LayerEntry> {
        self.layers
            .iter()
            .enumerate()
            .map(|(index, layer)| LayerEntry {
                index,
                kind: layer.kind(),
                name: layer.display_name(),
            })
            .collect()
    }

    /// Appends a new layer of `kind` as the new top and notifies the
    /// listener. Rejected with `AtCapacity` when the stack is full.
    pub fn add_layer(&mut self, kind: LayerKind) -> Result<(), StackError> {
        self.push(kind)?;
        self.notify();
        Ok(())
    }

    /// Like [`add_layer`](Self::add_layer) but without a notification.
    pub fn add_layer_silent(&mut self, kind: LayerKind) -> Result<(), StackError> {
        self.push(kind)
    }

    /// Removes the layer at `index`; later layers shift down by one.
    /// The removed layer's state is discarded permanently.
    pub fn remove_layer(&mut self, index: usize) -> Result<(), StackError> {
        if index >= self.layers.len() {
            return Err(StackError::OutOfRange {
                index,
                len: self.layers.len(),
            });
        }
        let removed = self.layers.remove(index);
        log::debug!("removed layer {} at {}", removed.display_name(), index);
        self.notify();
        Ok(())
    }

    /// Splice-moves the layer at `from` to position `to`; every other
    /// layer keeps its relative order. Moving onto itself is a no-op.
    pub fn move_layer(&mut self, from: usize, to: usize) -> Result<(), StackError> {
        let len = self.layers.len();
        let bad = if from >= len {
            Some(from)
        } else if to >= len {
            Some(to)
        } else {
            None
        };
        if let Some(index) = bad {
            return Err(StackError::OutOfRange { index, len });
        }
        if from == to {
            return Ok(());
        }
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        self.notify();
        Ok(())
    }

    /// Replaces the stack with a random count of random-kind layers
    /// (silent inserts), then notifies once.
    pub fn randomize(&mut self) {
        self.layers.clear();
        let lo = self.config.randomize_min.min(self.config.capacity);
        let hi = self.config.randomize_max.min(self.config.capacity);
        let count = self.rng.gen_range(lo..=hi);
        for _ in 0..count {
            let kind = LayerKind::choose(&mut self.rng);
            let layer = self.spawn(kind);
            self.layers.push(layer);
        }
        log::debug!("randomized stack to {count} layers");
        self.notify();
    }

    /// Removes every layer.
    pub fn clear(&mut self) {
        self.layers.clear();
        self.notify();
    }

    /// Rendering intensity for the layer at `index`. The top layer is
    /// always 1.0; deeper layers interpolate from the ceiling down to the
    /// floor across the configured depth range, clamped to the bounds.
    pub fn intensity(&self, index: usize) -> f32 {
        let n = self.layers.len();
        if index >= n {
            return 0.0;
        }
        let depth = (n - 1 - index) as f32;
        if depth == 0.0 {
            return 1.0;
        }
        let t = (depth / self.config.intensity_depth_range).clamp(0.0, 1.0);
        let v = self.config.intensity_ceil
            + (self.config.intensity_floor - self.config.intensity_ceil) * t;
        v.clamp(self.config.intensity_floor, self.config.intensity_ceil)
    }

    /// Re-scatters every layer into the current viewport.
    pub fn reset_all(&mut self) {
        let viewport = self.viewport;
        for layer in &mut self.layers {
            layer.reset(viewport);
        }
    }

    fn push(&mut self, kind: LayerKind) -> Result<(), StackError> {
        if self.layers.len() >= self.config.capacity {
            return Err(StackError::AtCapacity {
                capacity: self.config.capacity,
            });
        }
        let layer = self.spawn(kind);
        log::debug!(
            "added layer {} ({}/{})",
            layer.display_name(),
            self.layers.len() + 1,
            self.config.capacity
        );
        self.layers.push(layer);
        Ok(())
    }

    fn spawn(&mut self, kind: LayerKind) -> Box<dyn Layer> {
        // derive per-layer seeds so layers stay independent streams
        let mix = self
            .base_seed
            ^ self.spawned.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        self.spawned += 1;
        kind.build(self.viewport, mix)
    }

    fn notify(&mut self) {
        if self.listener.is_some() {
            let entries = self.entries();
            if let Some(listener) = self.listener.as_mut() {
                listener(&entries);
            }
        }
    }
}
