use thiserror::Error;
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("channel count must be greater than zero")]
    InvalidChannelCount,
    #[error("window size must be greater than zero")]
    InvalidWindowSize,
    #[error("batch size must be greater than zero")]
    InvalidBatchSize,
    #[error("tick interval must be greater than zero")]
    InvalidTickInterval,
    #[error("noise amplitude must lie in [0, {max}], got {0}", max = crate::config::MAX_NOISE_AMPLITUDE)]
    InvalidNoiseAmplitude(f64),
    #[error("color range must be finite and greater than zero, got {0}")]
    InvalidColorRange(f64),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl MonitorError {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        MonitorError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for MonitorError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        MonitorError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for MonitorError {
    fn from(value: image::ImageError) -> Self {
        MonitorError::Plot(value.to_string())
    }
}
