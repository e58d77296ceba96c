use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    config::RadarConfig,
    scene::{dominant_target, Target},
};

/// What the radar would report for the fastest target, next to the truth.
///
/// The measured values are the true Doppler shift snapped to the nearest FFT bin, so
/// `error_kmh` is the quantization error of the configured resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementResult {
    pub true_speed_kmh: f64,
    pub true_doppler_shift_hz: f64,
    pub measured_shift_hz: f64,
    pub measured_speed_kmh: f64,
    pub error_kmh: f64,
    pub bin_index: usize,
    // The true shift is beyond Nyquist; a real radar would see it folded.
    pub aliased: bool,
}

// Nearest-bin quantization. Halves round away from zero, as f64::round does.
pub fn quantize_shift(shift_hz: f64, freq_res: f64) -> (usize, f64) {
    let bin = (shift_hz / freq_res).round();
    (bin.max(0.) as usize, bin * freq_res)
}

pub fn compute_measurement(config: &RadarConfig, targets: &[Target]) -> MeasurementResult {
    let tgt = match dominant_target(targets) {
        Some(tgt) => tgt,
        None => return MeasurementResult::default(),
    };

    let true_doppler_shift_hz = config.doppler_shift_hz(tgt.radial_speed_kmh);
    let (bin_index, measured_shift_hz) = quantize_shift(true_doppler_shift_hz, config.frequency_resolution_hz());
    let measured_speed_kmh = config.speed_from_shift_kmh(measured_shift_hz);

    let result = MeasurementResult {
        true_speed_kmh: tgt.radial_speed_kmh,
        true_doppler_shift_hz,
        measured_shift_hz,
        measured_speed_kmh,
        error_kmh: measured_speed_kmh - tgt.radial_speed_kmh,
        bin_index,
        aliased: true_doppler_shift_hz > config.nyquist_frequency_hz(),
    };
    debug!(
        "target {}: {:.2} km/h measured as {:.2} km/h (bin {})",
        tgt.id, result.true_speed_kmh, result.measured_speed_kmh, result.bin_index
    );

    result
}
