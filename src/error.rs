use thiserror::Error;

/// Raised when a radar configuration would make the physics undefined
/// (division by zero, NaN or infinite results).
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("carrier frequency must be positive and finite, got {0} GHz")]
    NonPositiveFrequency(f64),

    #[error("baseband sample rate must be positive and finite, got {0} Hz")]
    NonPositiveSampleRate(f64),

    #[error("FFT size must be greater than zero")]
    ZeroFftSize,

    #[error("invalid radar configuration record: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
