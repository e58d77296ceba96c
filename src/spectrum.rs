//! Analytic synthesis of the baseband power spectrum a CW Doppler radar would show.
//!
//! No waveform is sampled and no FFT is run. Each target's Doppler shift is folded into
//! the visible band, quantized to its nearest bin and stamped on top of a noise floor,
//! together with a little leakage into the neighbouring bins and the static clutter that
//! always sits at DC.

use log::{debug, error, warn};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{
    config::RadarConfig,
    helper::decibels_or_else,
    physics::fold,
    scene::Target,
    signal::{NoiseSource, UniformNoise},
};

pub const SIGNAL_AMPLITUDE: f64 = 100.;
pub const LEAKAGE_AMPLITUDE: f64 = 30.;
pub const DC_CLUTTER_AMPLITUDE: f64 = 50.;
pub const NEAR_DC_CLUTTER_AMPLITUDE: f64 = 20.;

// Bins that always carry clutter.
pub const CLUTTER_BINS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumBin {
    pub index: usize,
    pub frequency_hz: f64,
    pub equivalent_speed_kmh: f64,
    pub amplitude: f64,
}

/// Positive-frequency half of a synthesized spectrum, `fft_size / 2` bins in frequency order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Spectrum {
    bins: Vec<SpectrumBin>,
}

impl Spectrum {
    pub fn bins(&self) -> &[SpectrumBin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpectrumBin> {
        self.bins.iter()
    }

    pub fn amplitudes(&self) -> Array1<f64> {
        self.bins.iter().map(|b| b.amplitude).collect()
    }

    pub fn speeds(&self) -> Array1<f64> {
        self.bins.iter().map(|b| b.equivalent_speed_kmh).collect()
    }

    pub fn decibels(&self) -> Array1<f64> {
        self.amplitudes().mapv(|x| decibels_or_else(x, f64::NEG_INFINITY))
    }

    /// Strongest bin at or above `from_index`. Pass [CLUTTER_BINS] to look past the DC clutter.
    pub fn peak_from(&self, from_index: usize) -> Option<&SpectrumBin> {
        self.bins
            .iter()
            .skip(from_index)
            .max_by(|a, b| a.amplitude.total_cmp(&b.amplitude))
    }

    pub fn peak(&self) -> Option<&SpectrumBin> {
        self.peak_from(0)
    }
}

impl IntoIterator for Spectrum {
    type Item = SpectrumBin;
    type IntoIter = std::vec::IntoIter<SpectrumBin>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.into_iter()
    }
}

/// Synthesizes a spectrum with a noise floor drawn from the thread-local rng.
pub fn synthesize_spectrum(config: &RadarConfig, targets: &[Target]) -> Spectrum {
    synthesize_spectrum_with(config, targets, &mut UniformNoise::thread_local())
}

pub fn synthesize_spectrum_with<N: NoiseSource + ?Sized>(
    config: &RadarConfig,
    targets: &[Target],
    noise: &mut N,
) -> Spectrum {
    let freq_res = config.frequency_resolution_hz();
    let fs = config.sample_rate_hz();
    let len = config.bin_count();

    let mut amplitude: Array1<f64> = (0..len).map(|_| noise.sample()).collect();

    for tgt in targets {
        if !tgt.radial_speed_kmh.is_finite() {
            warn!("target {} has non-finite speed {}, skipping", tgt.id, tgt.radial_speed_kmh);
            continue;
        }
        if !tgt.is_moving() {
            continue;
        }

        let shift = config.doppler_shift_hz(tgt.radial_speed_kmh);
        if !shift.is_finite() {
            warn!("target {} at {} km/h overflows the Doppler shift, skipping", tgt.id, tgt.radial_speed_kmh);
            continue;
        }
        let folded = fold(shift, fs);
        if folded != shift {
            debug!(
                "target {} at {:.1} km/h aliased from {:.1} Hz to {:.1} Hz",
                tgt.id, tgt.radial_speed_kmh, shift, folded
            );
        }

        if !(0. ..=fs / 2.).contains(&folded) {
            debug_assert!(false, "fold left {} Hz outside 0..={} Hz", folded, fs / 2.);
            error!("target {} folded to {} Hz, outside the visible band", tgt.id, folded);
            continue;
        }

        // Shifts within half a bin of Nyquist round onto the bin just past the half spectrum.
        let bin = (folded / freq_res).round() as usize;
        if bin >= len {
            debug!("target {} lands on bin {}, past the last bin {}", tgt.id, bin, len.saturating_sub(1));
            continue;
        }

        amplitude[bin] += SIGNAL_AMPLITUDE;
        if bin > 0 {
            amplitude[bin - 1] += LEAKAGE_AMPLITUDE;
        }
        if bin + 1 < len {
            amplitude[bin + 1] += LEAKAGE_AMPLITUDE;
        }
    }

    for (i, clutter) in [DC_CLUTTER_AMPLITUDE, NEAR_DC_CLUTTER_AMPLITUDE].iter().enumerate() {
        if let Some(x) = amplitude.get_mut(i) {
            *x += clutter;
        }
    }

    let bins = amplitude
        .iter()
        .enumerate()
        .map(|(index, &amplitude)| {
            let frequency_hz = index as f64 * freq_res;
            SpectrumBin {
                index,
                frequency_hz,
                equivalent_speed_kmh: config.speed_from_shift_kmh(frequency_hz),
                amplitude,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "synthesized {} bins at {:.3} Hz/bin for {} targets",
        bins.len(),
        freq_res,
        targets.len()
    );

    Spectrum { bins }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::signal::{ConstantNoise, NOISE_FLOOR_MAX, NOISE_FLOOR_MIN};

    const FLOOR: f64 = 3.;

    fn config(fft_size: usize) -> RadarConfig {
        RadarConfig::new(24.15, 44_100., fft_size).unwrap()
    }

    fn flat(config: &RadarConfig, targets: &[Target]) -> Spectrum {
        synthesize_spectrum_with(config, targets, &mut ConstantNoise(FLOOR))
    }

    #[test]
    fn has_half_fft_bins() {
        for n in [128, 512, 2048] {
            let spectrum = synthesize_spectrum(&config(n), &[]);
            assert_eq!(spectrum.len(), n / 2);
            assert!(spectrum.iter().enumerate().all(|(i, b)| b.index == i));
        }
    }

    #[test]
    fn empty_scene_is_noise_and_clutter() {
        let cfg = config(512);
        let spectrum = synthesize_spectrum_with(&cfg, &[], &mut UniformNoise::new(StdRng::seed_from_u64(1)));

        for bin in spectrum.iter().skip(CLUTTER_BINS) {
            assert!(bin.amplitude >= NOISE_FLOOR_MIN && bin.amplitude <= NOISE_FLOOR_MAX);
        }
        let bins = spectrum.bins();
        assert!(bins[0].amplitude >= NOISE_FLOOR_MIN + DC_CLUTTER_AMPLITUDE);
        assert!(bins[0].amplitude <= NOISE_FLOOR_MAX + DC_CLUTTER_AMPLITUDE);
        assert!(bins[1].amplitude >= NOISE_FLOOR_MIN + NEAR_DC_CLUTTER_AMPLITUDE);
        assert!(bins[1].amplitude <= NOISE_FLOOR_MAX + NEAR_DC_CLUTTER_AMPLITUDE);
    }

    #[test]
    fn seeded_spectra_repeat() {
        let cfg = config(256);
        let targets = [Target::new(1, 80.)];
        let a = synthesize_spectrum_with(&cfg, &targets, &mut UniformNoise::new(StdRng::seed_from_u64(99)));
        let b = synthesize_spectrum_with(&cfg, &targets, &mut UniformNoise::new(StdRng::seed_from_u64(99)));
        assert_eq!(a, b);
    }

    #[test]
    fn single_target_peak_and_leakage() {
        let cfg = config(512);
        let spectrum = flat(&cfg, &[Target::new(1, 80.)]);
        let bins = spectrum.bins();

        // 3580.25 Hz / 86.13 Hz per bin = 41.57
        assert_eq!(spectrum.peak_from(CLUTTER_BINS).unwrap().index, 42);
        assert_relative_eq!(bins[42].amplitude, FLOOR + SIGNAL_AMPLITUDE);
        assert_relative_eq!(bins[41].amplitude, FLOOR + LEAKAGE_AMPLITUDE);
        assert_relative_eq!(bins[43].amplitude, FLOOR + LEAKAGE_AMPLITUDE);
        assert_relative_eq!(bins[40].amplitude, FLOOR);
        assert_relative_eq!(bins[44].amplitude, FLOOR);
    }

    #[test]
    fn bins_carry_frequency_and_speed() {
        let cfg = config(512);
        let spectrum = flat(&cfg, &[]);
        let bin = spectrum.bins()[42];

        assert_relative_eq!(bin.frequency_hz, 42. * 86.1328125);
        assert_relative_eq!(bin.equivalent_speed_kmh, 80.834, epsilon = 1e-3);
        assert_eq!(spectrum.bins()[0].equivalent_speed_kmh, 0.);
    }

    #[test]
    fn target_above_nyquist_folds() {
        let cfg = config(512);
        // 800 km/h is 35.8 kHz, beyond the 22.05 kHz Nyquist limit. It folds to 44.1 - 35.8 = 8.3 kHz.
        let spectrum = flat(&cfg, &[Target::new(1, 800.)]);
        let peak = spectrum.peak_from(CLUTTER_BINS).unwrap();

        assert_eq!(peak.index, 96);
        assert_relative_eq!(peak.amplitude, FLOOR + SIGNAL_AMPLITUDE);
        assert!(peak.equivalent_speed_kmh < cfg.max_unambiguous_speed_kmh());
    }

    #[test]
    fn targets_in_same_bin_accumulate() {
        let cfg = config(512);
        let spectrum = flat(&cfg, &[Target::new(1, 80.), Target::new(2, 80.2)]);
        let bins = spectrum.bins();

        assert_relative_eq!(bins[42].amplitude, FLOOR + 2. * SIGNAL_AMPLITUDE);
        assert_relative_eq!(bins[41].amplitude, FLOOR + 2. * LEAKAGE_AMPLITUDE);
    }

    #[test]
    fn adjacent_targets_overlap_leakage() {
        let cfg = config(512);
        let one_bin = cfg.speed_resolution_kmh();
        let spectrum = flat(&cfg, &[Target::new(1, 42. * one_bin), Target::new(2, 43. * one_bin)]);
        let bins = spectrum.bins();

        assert_relative_eq!(bins[42].amplitude, FLOOR + SIGNAL_AMPLITUDE + LEAKAGE_AMPLITUDE);
        assert_relative_eq!(bins[43].amplitude, FLOOR + SIGNAL_AMPLITUDE + LEAKAGE_AMPLITUDE);
    }

    #[test]
    fn leakage_clamps_at_top_edge() {
        let cfg = config(128);
        let top = cfg.bin_count() - 1;
        let speed = top as f64 * cfg.speed_resolution_kmh();
        let spectrum = flat(&cfg, &[Target::new(1, speed)]);
        let bins = spectrum.bins();

        assert_relative_eq!(bins[top].amplitude, FLOOR + SIGNAL_AMPLITUDE);
        assert_relative_eq!(bins[top - 1].amplitude, FLOOR + LEAKAGE_AMPLITUDE);
    }

    #[test]
    fn slow_target_leaks_into_dc() {
        let cfg = config(512);
        // Half a bin's worth of speed rounds to bin 1.
        let spectrum = flat(&cfg, &[Target::new(1, 0.6 * cfg.speed_resolution_kmh())]);
        let bins = spectrum.bins();

        assert_relative_eq!(bins[0].amplitude, FLOOR + DC_CLUTTER_AMPLITUDE + LEAKAGE_AMPLITUDE);
        assert_relative_eq!(bins[1].amplitude, FLOOR + NEAR_DC_CLUTTER_AMPLITUDE + SIGNAL_AMPLITUDE);
        assert_relative_eq!(bins[2].amplitude, FLOOR + LEAKAGE_AMPLITUDE);
    }

    #[test]
    fn stationary_and_invalid_targets_are_ignored() {
        let cfg = config(256);
        let spectrum = flat(
            &cfg,
            &[Target::new(1, 0.), Target::new(2, -30.), Target::new(3, f64::NAN)],
        );
        assert_eq!(spectrum, flat(&cfg, &[]));
    }

    #[test]
    fn overflowing_shift_is_skipped() {
        let cfg = config(512);
        let spectrum = flat(&cfg, &[Target::new(1, 1e300), Target::new(2, 80.)]);
        assert_eq!(spectrum, flat(&cfg, &[Target::new(2, 80.)]));
    }

    #[test]
    fn target_on_nyquist_is_not_drawn() {
        let cfg = config(512);
        let spectrum = flat(&cfg, &[Target::new(1, cfg.max_unambiguous_speed_kmh())]);
        assert_eq!(spectrum, flat(&cfg, &[]));
    }

    #[test]
    fn decibels_of_flat_floor() {
        let spectrum = synthesize_spectrum_with(&config(128), &[], &mut ConstantNoise(10.));
        assert_relative_eq!(spectrum.decibels()[5], 10.);
        assert_eq!(spectrum.amplitudes().len(), 64);
        assert_eq!(spectrum.speeds()[0], 0.);
    }

    #[test]
    fn tiny_fft_has_no_bins() {
        let spectrum = flat(&RadarConfig::new(24.15, 44_100., 1).unwrap(), &[Target::new(1, 80.)]);
        assert!(spectrum.is_empty());
        assert!(spectrum.peak().is_none());
    }
}
