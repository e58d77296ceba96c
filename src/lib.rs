// Do this because numerics calls for a lot of non-standard names
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]
pub mod config;
pub mod error;
pub mod helper;
pub mod measurement;
pub mod physics;
pub mod scene;
pub mod series_chart;
pub mod signal;
pub mod spectrum;

pub use config::{compute_derived_metrics, DerivedMetrics, RadarConfig};
pub use error::ConfigurationError;
pub use measurement::{compute_measurement, MeasurementResult};
pub use scene::{Scene, Target};
pub use signal::{ConstantNoise, NoiseSource, UniformNoise};
pub use spectrum::{synthesize_spectrum, synthesize_spectrum_with, Spectrum, SpectrumBin};
