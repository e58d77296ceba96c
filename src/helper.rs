use num::{Float, NumCast};

use crate::physics::SPEED_OF_LIGHT;

const KMH_PER_MPS: f64 = 3.6;
const HZ_PER_GHZ: f64 = 1e9;

pub fn kmh_to_mps(speed_kmh: f64) -> f64 {
    speed_kmh / KMH_PER_MPS
}

pub fn mps_to_kmh(speed_mps: f64) -> f64 {
    speed_mps * KMH_PER_MPS
}

pub fn ghz_to_hz(freq_ghz: f64) -> f64 {
    freq_ghz * HZ_PER_GHZ
}

// Wavelength in metres for a frequency in Hz.
pub fn wavelength(f: f64) -> f64 {
    SPEED_OF_LIGHT / f
}

pub fn decibels<F: Float>(x: F) -> F {
    <F as NumCast>::from(10.).unwrap_or_else(F::nan) * x.log10()
}

pub fn decibels_or_else<F: Float>(x: F, or: F) -> F {
    if x <= F::zero() {
        or
    } else {
        decibels(x)
    }
}

// cos() of an angle in degrees, snapped to exactly zero at odd multiples of 90°
// so that a target moving perpendicular to boresight has no Doppler return.
pub fn cos_degrees(theta: f64) -> f64 {
    if (theta.abs() % 180.) == 90. {
        0.
    } else {
        theta.to_radians().cos()
    }
}
