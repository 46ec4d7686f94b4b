//! Layer-stack compositor and generative layer kinds.
//!
//! These types intentionally avoid referencing platform APIs and are
//! suitable for native and web frontends alike: a frontend owns a
//! [`Compositor`], calls [`Compositor::frame`] once per display refresh,
//! and translates the resulting [`Scene`] to its backend.

pub mod compositor;
pub mod constants;
pub mod error;
pub mod hud;
pub mod layer;
pub mod layers;
pub mod noise;
pub mod scene;
pub mod stack;
pub mod viewport;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use compositor::*;
pub use error::*;
pub use hud::*;
pub use layer::*;
pub use noise::NoiseField;
pub use scene::*;
pub use stack::*;
pub use viewport::*;
