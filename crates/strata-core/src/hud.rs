//! Status overlay drawn after all layers.

use fnv::FnvHashMap;

use crate::constants::HUD_SIGNATURE;
use crate::layer::LayerKind;
use crate::stack::LayerStack;

/// Snapshot of stack state for the overlay text.
#[derive(Clone, Debug)]
pub struct Hud {
    pub layer_count: usize,
    pub capacity: usize,
    pub frame: u64,
    pub energy: f32,
    /// Total generation resets across all layers.
    pub iteration: u32,
    /// Per-kind layer tally in enumeration order, zero-count kinds omitted.
    pub tallies: Vec<(LayerKind, usize)>,
}

impl Hud {
    pub fn collect(stack: &LayerStack, frame: u64) -> Self {
        let mut counts: FnvHashMap<LayerKind, usize> = FnvHashMap::default();
        let mut energy = 0.0;
        let mut iteration = 0;
        for layer in &stack.layers {
            *counts.entry(layer.kind()).or_insert(0) += 1;
            energy += layer.energy();
            iteration += layer.generation();
        }
        // stable order regardless of hash iteration
        let tallies = LayerKind::ALL
            .iter()
            .filter_map(|kind| counts.get(kind).map(|&n| (*kind, n)))
            .collect();
        Self {
            layer_count: stack.len(),
            capacity: stack.capacity(),
            frame,
            energy,
            iteration,
            tallies,
        }
    }

    /// Multi-line status block for the top-left corner.
    pub fn status_text(&self) -> String {
        let mut text = format!(
            "STACK: {}/{}\nITERATION: {:04}\nENERGY_LVL: {}\nRUNTIME: {}",
            self.layer_count,
            self.capacity,
            self.iteration,
            self.energy.floor() as i64,
            self.frame,
        );
        if !self.tallies.is_empty() {
            let tally = self
                .tallies
                .iter()
                .map(|(kind, n)| format!("{} x{}", kind.display_name(), n))
                .collect::<Vec<_>>()
                .join("  ");
            text.push('\n');
            text.push_str(&tally);
        }
        text
    }

    /// Signature line for the bottom-right corner.
    pub fn signature(&self) -> &'static str {
        HUD_SIGNATURE
    }
}
