use rand::{rngs::ThreadRng, Rng};
use rand_distr::{Distribution, Uniform};

pub const NOISE_FLOOR_MIN: f64 = 2.;
pub const NOISE_FLOOR_MAX: f64 = 4.;

/// Supplies the background level of each spectral bin.
pub trait NoiseSource {
    fn sample(&mut self) -> f64;
}

// Uniform noise floor in [NOISE_FLOOR_MIN, NOISE_FLOOR_MAX]. Seed the rng to get reproducible spectra.
pub struct UniformNoise<T: Rng> {
    rng: T,
    distr: Uniform<f64>,
}

impl<T: Rng> UniformNoise<T> {
    pub fn new(rng: T) -> UniformNoise<T> {
        Self::with_bounds(NOISE_FLOOR_MIN, NOISE_FLOOR_MAX, rng)
    }

    pub fn with_bounds(low: f64, high: f64, rng: T) -> UniformNoise<T> {
        assert!(low <= high);
        UniformNoise {
            rng,
            distr: Uniform::new_inclusive(low, high),
        }
    }
}

impl UniformNoise<ThreadRng> {
    pub fn thread_local() -> UniformNoise<ThreadRng> {
        Self::new(rand::thread_rng())
    }
}

impl<T: Rng> NoiseSource for UniformNoise<T> {
    fn sample(&mut self) -> f64 {
        self.distr.sample(&mut self.rng)
    }
}

/// A flat noise floor. Useful when a spectrum needs to be compared exactly.
#[derive(Clone, Copy, Debug)]
pub struct ConstantNoise(pub f64);

impl NoiseSource for ConstantNoise {
    fn sample(&mut self) -> f64 {
        self.0
    }
}

impl<F: FnMut() -> f64> NoiseSource for F {
    fn sample(&mut self) -> f64 {
        self()
    }
}
