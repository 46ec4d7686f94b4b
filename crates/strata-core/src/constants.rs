/// Stack, layer and HUD tuning constants.
///
/// These constants express intended behavior (population sizes, physics
/// ranges, alpha mappings) and keep magic numbers out of the code.
// ---------------- Stack / compositing ----------------

// Maximum number of layers a stack will hold
pub const DEFAULT_CAPACITY: usize = 20;

// Intensity falloff: top layer is always 1.0, deeper layers interpolate
// from the ceiling down to the floor across DEPTH_RANGE positions
pub const INTENSITY_FLOOR: f32 = 0.2;
pub const INTENSITY_CEIL: f32 = 1.0;
pub const INTENSITY_DEPTH_RANGE: f32 = 10.0;

// randomize() replaces the stack with this many random layers
pub const RANDOMIZE_MIN: usize = 5;
pub const RANDOMIZE_MAX: usize = 12;

// Per-frame background erase alpha; 1.0 is a hard clear, lower values
// leave trails
pub const BACKGROUND_FADE: f32 = 0.08;

// ---------------- Swarm ----------------

pub const SWARM_COUNT: usize = 350;
pub const SWARM_SPAWN_SPREAD: f32 = 10.0;
pub const SWARM_LAUNCH_SPEED_MIN: f32 = 5.0;
pub const SWARM_LAUNCH_SPEED_MAX: f32 = 20.0;
pub const SWARM_FRICTION_MIN: f32 = 0.92;
pub const SWARM_FRICTION_MAX: f32 = 0.98;
pub const SWARM_NOISE_SCALE_MIN: f32 = 0.005;
pub const SWARM_NOISE_SCALE_MAX: f32 = 0.02;
pub const SWARM_TIME_SCALE: f32 = 0.005;
pub const SWARM_FORCE: f32 = 0.5;
// speed -> streak alpha mapping
pub const SWARM_ALPHA_SPEED_MAX: f32 = 5.0;
pub const SWARM_ALPHA_MIN: f32 = 0.08;
pub const SWARM_ALPHA_MAX: f32 = 0.78;
// generation reset: energy settles or the frame budget elapses
pub const SWARM_SETTLE_FRAMES: u32 = 60;
pub const SWARM_SETTLE_MEAN_SPEED: f32 = 0.04;
pub const SWARM_MAX_CYCLE_FRAMES: u32 = 1800;

// ---------------- Drift ----------------

pub const DRIFT_OSCILLATORS: usize = 50;
// oscillator band as fractions of viewport height
pub const DRIFT_BAND_TOP: f32 = 0.2;
pub const DRIFT_BAND_BOTTOM: f32 = 0.8;
pub const DRIFT_BASE_AMP: f32 = 100.0;
pub const DRIFT_AMP_JITTER: f32 = 50.0;
pub const DRIFT_DAMPING_MIN: f32 = 0.990;
pub const DRIFT_DAMPING_MAX: f32 = 0.998;
pub const DRIFT_FREQ_MIN: f32 = 0.01;
pub const DRIFT_FREQ_MAX: f32 = 0.05;
pub const DRIFT_PHASE_SPEED_MIN: f32 = 0.02;
pub const DRIFT_PHASE_SPEED_MAX: f32 = 0.1;
// horizontal sampling step for the polyline
pub const DRIFT_SAMPLE_STEP: f32 = 15.0;
pub const DRIFT_NOISE_X_SCALE: f32 = 0.01;
pub const DRIFT_TIME_SCALE: f32 = 0.01;
// oscillators quieter than this are not drawn
pub const DRIFT_MIN_AMP: f32 = 1.0;
// amplitude -> alpha mapping
pub const DRIFT_ALPHA_AMP_MAX: f32 = 100.0;
pub const DRIFT_ALPHA_MIN: f32 = 0.2;
pub const DRIFT_ALPHA_MAX: f32 = 0.78;
pub const DRIFT_SETTLE_FRAMES: u32 = 120;
pub const DRIFT_SETTLE_AMP: f32 = 100.0;
pub const DRIFT_MAX_CYCLE_FRAMES: u32 = 2000;

// ---------------- Orbitals ----------------

pub const ORBITAL_COUNT: usize = 220;
pub const ORBITAL_SPEED_MIN: f32 = 3.0;
pub const ORBITAL_SPEED_MAX: f32 = 8.0;
pub const ORBITAL_DECAY_MIN: f32 = 0.005;
pub const ORBITAL_DECAY_MAX: f32 = 0.02;
// below this remaining life an agent switches to the decay phase
pub const ORBITAL_DECAY_LIFE: f32 = 0.4;
pub const ORBITAL_DECAY_SPEED_FACTOR: f32 = 0.5;
pub const ORBITAL_JITTER_PROB: f32 = 0.2;
pub const ORBITAL_JITTER: f32 = 2.0;
pub const ORBITAL_TRAIL_MAX: usize = 30;
pub const ORBITAL_EDGE_MARGIN: f32 = 10.0;
// background raster accent line cadence and alpha
pub const ORBITAL_RASTER_PERIOD: u64 = 5;
pub const ORBITAL_RASTER_ALPHA: f32 = 0.12;
pub const ORBITAL_MAX_CYCLE_FRAMES: u32 = 2000;

// ---------------- Flow field ----------------

pub const FIELD_COUNT: usize = 500;
pub const FIELD_SPEED: f32 = 2.0;
pub const FIELD_NOISE_SCALE: f32 = 0.003;
pub const FIELD_TIME_SCALE: f32 = 0.004;
pub const FIELD_ALPHA: f32 = 0.14;

// ---------------- Lattice ----------------

pub const LATTICE_NODES: usize = 90;
pub const LATTICE_LINK_DIST: f32 = 110.0;
pub const LATTICE_DRIFT_SPEED: f32 = 0.6;
pub const LATTICE_NOISE_SCALE: f32 = 0.002;
pub const LATTICE_LINE_ALPHA: f32 = 0.5;
pub const LATTICE_NODE_ALPHA: f32 = 0.6;

// ---------------- HUD overlay ----------------

pub const HUD_MARGIN: f32 = 20.0;
pub const HUD_TEXT_SIZE: f32 = 12.0;
pub const HUD_SIGNATURE: &str = "strata";
