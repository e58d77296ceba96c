//! Doppler and DFT primitives for a continuous-wave radar.
//!
//! Every function here is pure. Arguments that would make the result undefined
//! (a non-positive carrier frequency or sample rate, or an FFT of length zero)
//! are rejected with a [ConfigurationError] instead of producing NaN or infinity.

use crate::{
    error::{ConfigurationError, Result},
    helper::{cos_degrees, ghz_to_hz, kmh_to_mps, mps_to_kmh, wavelength},
};

const c: f64 = 299_792_458.0;

pub const SPEED_OF_LIGHT: f64 = c;

pub(crate) fn check_frequency(frequency_ghz: f64) -> Result<f64> {
    if frequency_ghz.is_finite() && frequency_ghz > 0. {
        Ok(frequency_ghz)
    } else {
        Err(ConfigurationError::NonPositiveFrequency(frequency_ghz))
    }
}

pub(crate) fn check_sample_rate(sample_rate_hz: f64) -> Result<f64> {
    if sample_rate_hz.is_finite() && sample_rate_hz > 0. {
        Ok(sample_rate_hz)
    } else {
        Err(ConfigurationError::NonPositiveSampleRate(sample_rate_hz))
    }
}

pub(crate) fn check_fft_size(fft_size: usize) -> Result<usize> {
    if fft_size == 0 {
        Err(ConfigurationError::ZeroFftSize)
    } else {
        Ok(fft_size)
    }
}

// Unchecked forms, for callers that already hold validated parameters.

pub(crate) fn doppler_shift(speed_kmh: f64, f_0: f64, theta_degrees: f64) -> f64 {
    2. * kmh_to_mps(speed_kmh) * f_0 * cos_degrees(theta_degrees) / c
}

pub(crate) fn radial_speed(f_delta: f64, f_0: f64) -> f64 {
    mps_to_kmh(c * f_delta / (2. * f_0))
}

/// Doppler shift in Hz seen by a radar at `frequency_ghz` for a target closing at
/// `speed_kmh`, moving at `theta_degrees` off boresight.
pub fn doppler_shift_hz(speed_kmh: f64, frequency_ghz: f64, theta_degrees: f64) -> Result<f64> {
    let f_0 = ghz_to_hz(check_frequency(frequency_ghz)?);
    Ok(doppler_shift(speed_kmh, f_0, theta_degrees))
}

/// Radial speed in km/h that produces `shift_hz` on boresight. Inverse of [doppler_shift_hz] at θ = 0.
pub fn speed_from_shift_kmh(shift_hz: f64, frequency_ghz: f64) -> Result<f64> {
    let f_0 = ghz_to_hz(check_frequency(frequency_ghz)?);
    Ok(radial_speed(shift_hz, f_0))
}

pub fn wavelength_mm(frequency_ghz: f64) -> Result<f64> {
    let f_0 = ghz_to_hz(check_frequency(frequency_ghz)?);
    Ok(wavelength(f_0) * 1000.)
}

/// Width of one FFT bin.
pub fn frequency_resolution_hz(sample_rate_hz: f64, fft_size: usize) -> Result<f64> {
    let fs = check_sample_rate(sample_rate_hz)?;
    let n = check_fft_size(fft_size)?;
    Ok(fs / n as f64)
}

/// Smallest speed difference one spectral bin can separate. Lower is better:
/// decreasing the sample rate or growing the FFT both shrink it.
pub fn speed_resolution_kmh(sample_rate_hz: f64, fft_size: usize, frequency_ghz: f64) -> Result<f64> {
    speed_from_shift_kmh(frequency_resolution_hz(sample_rate_hz, fft_size)?, frequency_ghz)
}

/// Speed whose Doppler shift sits exactly on the Nyquist limit. Faster targets alias.
pub fn max_unambiguous_speed_kmh(sample_rate_hz: f64, frequency_ghz: f64) -> Result<f64> {
    let fs = check_sample_rate(sample_rate_hz)?;
    speed_from_shift_kmh(fs / 2., frequency_ghz)
}

/// Duration of the sample window that feeds one FFT.
pub fn observation_time_ms(sample_rate_hz: f64, fft_size: usize) -> Result<f64> {
    let fs = check_sample_rate(sample_rate_hz)?;
    let n = check_fft_size(fft_size)?;
    Ok(n as f64 / fs * 1000.)
}

/// Folds a frequency above the Nyquist limit back into `[0, Fs/2]`.
///
/// For non-negative input this is the closed form of repeatedly replacing `f` with
/// `|f - Fs|` while `|f| > Fs/2`, without iterating once per multiple of Fs. The result
/// is always a magnitude: a negative shift folds the same as its absolute value, so an
/// in-band `-100 Hz` comes back as `100 Hz` where the loop would leave it negative.
pub fn fold_frequency_hz(shift_hz: f64, sample_rate_hz: f64) -> Result<f64> {
    let fs = check_sample_rate(sample_rate_hz)?;
    Ok(fold(shift_hz, fs))
}

pub(crate) fn fold(shift_hz: f64, fs: f64) -> f64 {
    let nyquist = fs / 2.;
    let f = shift_hz.abs();
    if f <= nyquist {
        return f;
    }
    let r = f % fs;
    if r > nyquist {
        fs - r
    } else {
        r
    }
}
