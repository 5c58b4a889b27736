//! seeded 2‑D gradient noise
//!
//! A classic lattice noise: a 512‑entry permutation table picks one of twelve
//! gradients at each lattice corner, the four corner dot products are blended
//! with the quintic fade curve, and the result is remapped to roughly [0, 1].
//! The table is built once by [`GradientNoise::seeded`] and never mutated, so
//! a single instance can be shared (`Arc`) by every terrain query.

use noise::NoiseFn;

/// gradient set (3‑D edge midpoints; only x/y are used in 2‑D)
const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0], [-1.0, 1.0, 0.0], [1.0, -1.0, 0.0], [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [1.0, 0.0, -1.0], [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0], [0.0, -1.0, 1.0], [0.0, 1.0, -1.0], [0.0, -1.0, -1.0],
];

#[derive(Clone)]
pub struct GradientNoise {
    perm: [u8; 512],
}

impl std::fmt::Debug for GradientNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientNoise")
            .field("perm", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}

impl GradientNoise {
    /// Build the permutation table from `value`.
    ///
    /// Seeds in the open interval (0, 1) are scaled to 16‑bit range first,
    /// then floored; seeds below 256 have their low byte copied into the
    /// second byte so both halves of the table get mixed.
    pub fn seeded(value: f64) -> Self {
        let mut s = value;
        if s > 0.0 && s < 1.0 {
            s *= 65536.0;
        }
        let s = s.floor();
        // widen on the float, then int32 wrap for the bit fiddling
        let widen = s < 256.0;
        let mut s = s as i64 as i32;
        if widen {
            s |= s << 8;
        }

        let mut perm = [0u8; 512];
        for i in 0..256i32 {
            let v = if i & 1 == 1 {
                i ^ (s & 255)
            } else {
                i ^ ((s >> 8) & 255)
            };
            perm[i as usize] = v as u8;
            perm[i as usize + 256] = v as u8;
        }
        Self { perm }
    }

    #[inline]
    fn corner(&self, xi: usize, yi: usize, dx: f64, dy: f64) -> f64 {
        let idx = xi + self.perm[yi] as usize;
        let g = &GRAD3[self.perm[idx] as usize % 12];
        g[0] * dx + g[1] * dy
    }

    /// Noise value in roughly [0, 1] at `(x, y)`. Total over all reals.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let fx = x.floor();
        let fy = y.floor();
        let xi = (fx as i64 & 255) as usize;
        let yi = (fy as i64 & 255) as usize;
        let x = x - fx;
        let y = y - fy;

        let u = fade(x);
        let v = fade(y);

        let n00 = self.corner(xi, yi, x, y);
        let n01 = self.corner(xi, yi + 1, x, y - 1.0);
        let n10 = self.corner(xi + 1, yi, x - 1.0, y);
        let n11 = self.corner(xi + 1, yi + 1, x - 1.0, y - 1.0);

        0.5 + 0.5
            * ((1.0 - u) * (1.0 - v) * n00
                + (1.0 - u) * v * n01
                + u * (1.0 - v) * n10
                + u * v * n11)
    }
}

/// 6t⁵ − 15t⁴ + 10t³
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

impl NoiseFn<f64, 2> for GradientNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}
