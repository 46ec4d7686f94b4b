//! Built-in layer kinds. Each is an independent generator implementing
//! [`Layer`](crate::layer::Layer); none shares state with any other.

pub mod drift;
pub mod flow_field;
pub mod lattice;
pub mod orbitals;
pub mod swarm;

pub use drift::DriftLayer;
pub use flow_field::FlowFieldLayer;
pub use lattice::LatticeLayer;
pub use orbitals::OrbitalsLayer;
pub use swarm::SwarmLayer;
