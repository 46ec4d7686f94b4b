//! Per-frame execution: wipe, update+render every layer bottom to top at
//! its depth-derived intensity, then the HUD overlay.

use glam::Vec2;
use instant::Instant;

use crate::constants::{HUD_MARGIN, HUD_TEXT_SIZE};
use crate::error::StackError;
use crate::hud::Hud;
use crate::layer::{LayerKind, Tick};
use crate::scene::{Painter, Primitive, Rgba, Scene};
use crate::stack::LayerStack;
use crate::viewport::Viewport;

/// What happens to layer state when the viewport changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Re-scatter every layer into the new viewport.
    #[default]
    ResetLayers,
    /// Keep simulating with the old coordinates.
    KeepLayers,
}

/// Owns the stack and the frame loop state. Stack mutations must happen
/// between frames; the `&mut self` receivers make interleaving impossible
/// on one thread, which is the whole concurrency model.
pub struct Compositor {
    stack: LayerStack,
    policy: ResizePolicy,
    frame: u64,
    last_instant: Instant,
}

impl Compositor {
    pub fn new(stack: LayerStack, policy: ResizePolicy) -> Self {
        Self {
            stack,
            policy,
            frame: 0,
            last_instant: Instant::now(),
        }
    }

    pub fn stack(&self) -> &LayerStack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut LayerStack {
        &mut self.stack
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn viewport(&self) -> Viewport {
        self.stack.viewport()
    }

    // Inward commands, forwarded between frames.

    pub fn add_layer(&mut self, kind: LayerKind) -> Result<(), StackError> {
        self.stack.add_layer(kind)
    }

    pub fn remove_layer(&mut self, index: usize) -> Result<(), StackError> {
        self.stack.remove_layer(index)
    }

    pub fn move_layer(&mut self, from: usize, to: usize) -> Result<(), StackError> {
        self.stack.move_layer(from, to)
    }

    pub fn randomize(&mut self) {
        self.stack.randomize();
    }

    /// Applies the new viewport under the configured policy.
    pub fn resize(&mut self, viewport: Viewport) {
        self.stack.set_viewport(viewport);
        if self.policy == ResizePolicy::ResetLayers {
            self.stack.reset_all();
        }
        log::info!(
            "resized to {}x{} ({:?})",
            viewport.width,
            viewport.height,
            self.policy
        );
    }

    /// Runs one frame into `scene`: background wipe, every layer's update
    /// then render (bottom to top, additive), then the HUD overlay.
    pub fn frame(&mut self, scene: &mut Scene) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        scene.begin();
        let viewport = self.stack.viewport();
        scene.background.push(Primitive::Rect {
            center: viewport.center(),
            size: viewport.size(),
            color: Rgba::BLACK.with_alpha(self.stack.config().background_fade),
        });

        let tick = Tick {
            frame: self.frame,
            dt,
            viewport,
        };
        for i in 0..self.stack.len() {
            let intensity = self.stack.intensity(i);
            let layer = &mut self.stack.layers[i];
            layer.update(&tick);
            let mut painter = Painter::new(&mut scene.additive, intensity);
            layer.render(&mut painter);
        }

        let hud = Hud::collect(&self.stack, self.frame);
        scene.overlay.push(Primitive::Text {
            origin: Vec2::new(HUD_MARGIN, HUD_MARGIN),
            size: HUD_TEXT_SIZE,
            color: Rgba::WHITE,
            text: hud.status_text(),
        });
        scene.overlay.push(Primitive::Text {
            origin: Vec2::new(viewport.width - HUD_MARGIN, viewport.height - HUD_MARGIN),
            size: HUD_TEXT_SIZE,
            color: Rgba::WHITE,
            text: hud.signature().to_string(),
        });

        self.frame += 1;
    }
}
