use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigurationError, Result},
    helper::ghz_to_hz,
    physics::{self, check_fft_size, check_frequency, check_sample_rate},
};

pub const DEFAULT_FREQUENCY_GHZ: f64 = 24.15;
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 44_100.;
pub const DEFAULT_FFT_SIZE: usize = 512;

/// Parameters of a CW Doppler radar and the DFT run over its baseband.
///
/// A `RadarConfig` is validated on construction, including deserialization, so
/// the derived quantities below never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RadarConfigRecord", into = "RadarConfigRecord")]
pub struct RadarConfig {
    frequency_ghz: f64,
    sample_rate_hz: f64,
    fft_size: usize,
}

/// Unvalidated wire form of [RadarConfig], as handed over by the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarConfigRecord {
    #[serde(rename = "frequencyGHz")]
    pub frequency_ghz: f64,
    pub baseband_sample_rate_hz: f64,
    pub fft_size: usize,
}

impl TryFrom<RadarConfigRecord> for RadarConfig {
    type Error = ConfigurationError;

    fn try_from(record: RadarConfigRecord) -> Result<Self> {
        RadarConfig::new(record.frequency_ghz, record.baseband_sample_rate_hz, record.fft_size)
    }
}

impl From<RadarConfig> for RadarConfigRecord {
    fn from(config: RadarConfig) -> Self {
        RadarConfigRecord {
            frequency_ghz: config.frequency_ghz,
            baseband_sample_rate_hz: config.sample_rate_hz,
            fft_size: config.fft_size,
        }
    }
}

impl Default for RadarConfig {
    fn default() -> Self {
        RadarConfig {
            frequency_ghz: DEFAULT_FREQUENCY_GHZ,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            fft_size: DEFAULT_FFT_SIZE,
        }
    }
}

impl RadarConfig {
    pub fn new(frequency_ghz: f64, sample_rate_hz: f64, fft_size: usize) -> Result<RadarConfig> {
        Ok(RadarConfig {
            frequency_ghz: check_frequency(frequency_ghz)?,
            sample_rate_hz: check_sample_rate(sample_rate_hz)?,
            fft_size: check_fft_size(fft_size)?,
        })
    }

    pub fn from_json(json: &str) -> Result<RadarConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn frequency_ghz(&self) -> f64 {
        self.frequency_ghz
    }

    pub fn carrier_frequency_hz(&self) -> f64 {
        ghz_to_hz(self.frequency_ghz)
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of bins in the positive-frequency half of the spectrum.
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    pub fn nyquist_frequency_hz(&self) -> f64 {
        self.sample_rate_hz / 2.
    }

    pub fn frequency_resolution_hz(&self) -> f64 {
        self.sample_rate_hz / self.fft_size as f64
    }

    pub fn doppler_shift_hz(&self, speed_kmh: f64) -> f64 {
        physics::doppler_shift(speed_kmh, self.carrier_frequency_hz(), 0.)
    }

    pub fn speed_from_shift_kmh(&self, shift_hz: f64) -> f64 {
        physics::radial_speed(shift_hz, self.carrier_frequency_hz())
    }

    pub fn wavelength_mm(&self) -> f64 {
        crate::helper::wavelength(self.carrier_frequency_hz()) * 1000.
    }

    pub fn speed_resolution_kmh(&self) -> f64 {
        self.speed_from_shift_kmh(self.frequency_resolution_hz())
    }

    pub fn max_unambiguous_speed_kmh(&self) -> f64 {
        self.speed_from_shift_kmh(self.nyquist_frequency_hz())
    }

    pub fn observation_time_ms(&self) -> f64 {
        self.fft_size as f64 / self.sample_rate_hz * 1000.
    }
}

/// Figures of merit of a radar configuration, independent of any target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub wavelength_mm: f64,
    pub speed_resolution_kmh: f64,
    pub max_unambiguous_speed_kmh: f64,
    pub observation_time_ms: f64,
    pub frequency_resolution_hz: f64,
    pub nyquist_frequency_hz: f64,
}

pub fn compute_derived_metrics(config: &RadarConfig) -> DerivedMetrics {
    DerivedMetrics {
        wavelength_mm: config.wavelength_mm(),
        speed_resolution_kmh: config.speed_resolution_kmh(),
        max_unambiguous_speed_kmh: config.max_unambiguous_speed_kmh(),
        observation_time_ms: config.observation_time_ms(),
        frequency_resolution_hz: config.frequency_resolution_hz(),
        nyquist_frequency_hz: config.nyquist_frequency_hz(),
    }
}
