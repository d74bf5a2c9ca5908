//! Procedural fields: closures and seeded value noise.
use std::fmt;

use rand::Rng;

use crate::field::{DomainRange, Field};

/// Wraps a closure `(x, y, sample_size) -> value`.
pub struct FnField<F> {
    f: F,
    range: Option<DomainRange>,
}

impl<F> FnField<F>
where
    F: Fn(f64, f64, f64) -> f32 + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f, range: None }
    }

    pub fn with_domain_range(mut self, range: DomainRange) -> Self {
        self.range = Some(range);
        self
    }
}

impl<F> Field for FnField<F>
where
    F: Fn(f64, f64, f64) -> f32 + Send + Sync,
{
    fn sample(&self, x: f64, y: f64, sample_size: f64) -> f32 {
        (self.f)(x, y, sample_size)
    }

    fn domain_range(&self) -> Option<DomainRange> {
        self.range
    }
}

impl<F> fmt::Debug for FnField<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnField")
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

/// Seeded 2D value noise in `[0, 1]`.
///
/// Lattice values are hashed from `(seed, cell)`, so the field needs no tables and is
/// identical across runs for the same seed. Footprints approaching one lattice cell
/// fade the result toward the mean `0.5`; a zero sample size gives the raw noise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseField {
    seed: u64,
    frequency: f64,
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            frequency: 1.0,
        }
    }

    /// Draws the seed from `rng`.
    pub fn from_rng(rng: &mut dyn Rng) -> Self {
        Self::new(rng.next_u64())
    }

    /// Lattice cells per unit of field space. Non-positive or non-finite values are ignored.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        if frequency.is_finite() && frequency > 0.0 {
            self.frequency = frequency;
        }
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    fn lattice(&self, ix: i64, iy: i64) -> f32 {
        let h = mix_u64(
            self.seed
                ^ (ix as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
                ^ (iy as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F),
        );
        (h >> 40) as f32 / (1u64 << 24) as f32
    }

    fn point(&self, x: f64, y: f64) -> f32 {
        let (fx, fy) = (x.floor(), y.floor());
        let (ix, iy) = (fx as i64, fy as i64);
        let tx = smoothstep((x - fx) as f32);
        let ty = smoothstep((y - fy) as f32);

        let v00 = self.lattice(ix, iy);
        let v10 = self.lattice(ix + 1, iy);
        let v01 = self.lattice(ix, iy + 1);
        let v11 = self.lattice(ix + 1, iy + 1);

        let top = v00 + (v10 - v00) * tx;
        let bottom = v01 + (v11 - v01) * tx;
        top + (bottom - top) * ty
    }
}

impl Field for NoiseField {
    fn sample(&self, x: f64, y: f64, sample_size: f64) -> f32 {
        if !x.is_finite() || !y.is_finite() {
            return 0.5;
        }
        let value = self.point(x * self.frequency, y * self.frequency);
        let footprint = (sample_size.abs() * self.frequency).min(1.0) as f32;
        if footprint <= 0.0 {
            return value;
        }
        let fade = smoothstep(footprint);
        value * (1.0 - fade) + 0.5 * fade
    }
}

#[inline]
fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn fn_field_forwards_arguments() {
        let f = FnField::new(|x, y, s| (x + 10.0 * y + 100.0 * s) as f32)
            .with_domain_range(DomainRange::new(0.0, 2.0));
        assert_eq!(f.sample(1.0, 2.0, 3.0), 321.0);
        assert_eq!(f.domain_range(), Some(DomainRange::new(0.0, 2.0)));
    }

    #[test]
    fn noise_is_deterministic_per_seed() {
        let a = NoiseField::new(42).with_frequency(4.0);
        let b = NoiseField::new(42).with_frequency(4.0);
        let c = NoiseField::new(43).with_frequency(4.0);
        let pts = [(0.1, 0.2), (0.77, 0.31), (-3.4, 9.9)];
        for (x, y) in pts {
            assert_eq!(a.sample(x, y, 0.0), b.sample(x, y, 0.0));
        }
        assert!(pts
            .iter()
            .any(|&(x, y)| a.sample(x, y, 0.0) != c.sample(x, y, 0.0)));
    }

    #[test]
    fn noise_stays_in_unit_range_and_hits_lattice_values() {
        let n = NoiseField::new(7);
        for i in 0..200 {
            let x = i as f64 * 0.173 - 17.0;
            let y = i as f64 * 0.091 + 3.0;
            let v = n.sample(x, y, 0.0);
            assert!((0.0..=1.0).contains(&v), "value {v} out of range");
        }
        assert_eq!(n.sample(3.0, -2.0, 0.0), n.lattice(3, -2));
    }

    #[test]
    fn large_footprint_fades_to_mean() {
        let n = NoiseField::new(9).with_frequency(2.0);
        assert_eq!(n.sample(0.3, 0.4, 10.0), 0.5);
        let raw = n.sample(0.3, 0.4, 0.0);
        let soft = n.sample(0.3, 0.4, 0.1);
        assert!((soft - 0.5).abs() <= (raw - 0.5).abs() + 1e-6);
    }

    #[test]
    fn seed_from_rng_is_reproducible() {
        let mut r1 = StdRng::seed_from_u64(5);
        let mut r2 = StdRng::seed_from_u64(5);
        assert_eq!(
            NoiseField::from_rng(&mut r1).seed(),
            NoiseField::from_rng(&mut r2).seed()
        );
    }

    #[test]
    fn invalid_frequency_is_ignored() {
        assert_eq!(NoiseField::new(1).with_frequency(-2.0).frequency(), 1.0);
        assert_eq!(NoiseField::new(1).with_frequency(f64::NAN).frequency(), 1.0);
    }
}
