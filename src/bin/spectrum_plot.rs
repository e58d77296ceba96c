use doppler_radar_lib::{
    compute_derived_metrics, compute_measurement, series_chart::SeriesChart, synthesize_spectrum, RadarConfig,
    Target,
};
use log::info;
use plotters::prelude::{IntoDrawingArea, SVGBackend};

const OUTPUT: &str = "spectrum.svg";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RadarConfig::default();
    // The last car is beyond the Nyquist speed and shows up folded.
    let targets = [Target::new(1, 80.), Target::new(2, 50.), Target::new(3, 650.)];

    let metrics = compute_derived_metrics(&config);
    info!(
        "{} GHz, {} Hz, {}-point FFT: λ = {:.2} mm, Δv = {:.2} km/h, v_max = {:.1} km/h, T = {:.2} ms",
        config.frequency_ghz(),
        config.sample_rate_hz(),
        config.fft_size(),
        metrics.wavelength_mm,
        metrics.speed_resolution_kmh,
        metrics.max_unambiguous_speed_kmh,
        metrics.observation_time_ms
    );

    let measurement = compute_measurement(&config, &targets);
    info!(
        "fastest target: true {:.2} km/h, measured {:.2} km/h, error {:+.2} km/h{}",
        measurement.true_speed_kmh,
        measurement.measured_speed_kmh,
        measurement.error_kmh,
        if measurement.aliased { " (aliased)" } else { "" }
    );

    let spectrum = synthesize_spectrum(&config, &targets);
    let chart = SeriesChart::new(spectrum.speeds(), spectrum.amplitudes());

    let root = SVGBackend::new(OUTPUT, (1024, 480)).into_drawing_area();
    chart.draw(&root, "Baseband spectrum", "Equivalent speed (km/h)", "Amplitude")?;
    info!("wrote {}", OUTPUT);

    Ok(())
}
