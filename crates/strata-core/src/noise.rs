//! Seeded 2D gradient noise for layer motion.
//!
//! Every layer owns its own `NoiseField`, so no noise state is shared
//! between layers. The time axis is folded into a domain translation,
//! which is enough for slow per-frame drift.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

// simplex grid skew factors
const SKEW: f32 = 0.366_025_4; // (sqrt(3) - 1) / 2
const UNSKEW: f32 = 0.211_324_87; // (3 - sqrt(3)) / 6

const GRADIENTS: [[f32; 2]; 8] = [
    [1.0, 0.0],
    [0.0, 1.0],
    [-1.0, 0.0],
    [0.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
];

// drift directions for the folded time axis; incommensurate so the path
// never retraces itself
const TIME_DRIFT_X: f32 = 0.79;
const TIME_DRIFT_Y: f32 = -1.31;

/// Simplex-style gradient noise over a seeded permutation table.
pub struct NoiseField {
    perm: [u8; 512],
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        let mut base = [0u8; 256];
        for (i, b) in base.iter_mut().enumerate() {
            *b = i as u8;
        }
        let mut rng = StdRng::seed_from_u64(seed);
        base.shuffle(&mut rng);

        // doubled so hash lookups never wrap an index
        let mut perm = [0u8; 512];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = base[i & 255];
        }
        Self { perm }
    }

    #[inline]
    fn hash(&self, i: i32, j: i32) -> u8 {
        let jj = self.perm[(j & 255) as usize] as usize;
        self.perm[((i & 255) as usize) + jj]
    }

    /// Samples noise at a 2D coordinate. Returns a value in [-1, 1].
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let s = (x + y) * SKEW;
        let i = (x + s).floor() as i32;
        let j = (y + s).floor() as i32;

        let t = (i + j) as f32 * UNSKEW;
        let x0 = x - (i as f32 - t);
        let y0 = y - (j as f32 - t);

        // which triangle of the skewed cell
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f32 + UNSKEW;
        let y1 = y0 - j1 as f32 + UNSKEW;
        let x2 = x0 - 1.0 + 2.0 * UNSKEW;
        let y2 = y0 - 1.0 + 2.0 * UNSKEW;

        let n0 = corner(x0, y0, self.hash(i, j));
        let n1 = corner(x1, y1, self.hash(i + i1, j + j1));
        let n2 = corner(x2, y2, self.hash(i + 1, j + 1));

        (70.0 * (n0 + n1 + n2)).clamp(-1.0, 1.0)
    }

    /// Samples noise at a 2D coordinate plus a time axis. Returns [-1, 1].
    pub fn sample3(&self, x: f32, y: f32, t: f32) -> f32 {
        self.sample(x + t * TIME_DRIFT_X, y + t * TIME_DRIFT_Y)
    }

    /// Like [`sample3`](Self::sample3) but mapped to [0, 1].
    pub fn unit(&self, x: f32, y: f32, t: f32) -> f32 {
        0.5 * (self.sample3(x, y, t) + 1.0)
    }
}

#[inline]
fn corner(x: f32, y: f32, hash: u8) -> f32 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let g = GRADIENTS[(hash & 7) as usize];
        let t2 = t * t;
        t2 * t2 * (x * g[0] + y * g[1])
    }
}
