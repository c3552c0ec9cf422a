// src/config.rs
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::drivers::MonitorError;

/// Largest accepted noise half-width. Far above any EEG amplitude, and small
/// enough that sampling `[-a, a]` stays well inside `f64` range.
pub const MAX_NOISE_AMPLITUDE: f64 = 1e6;

/// Fixed configuration of the live monitor, read once at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub channel_count: usize,
    /// Sliding-window capacity per channel (samples).
    pub window_size: usize,
    /// Ticks accumulated before a flush + re-render.
    pub batch_size: usize,
    pub tick_interval_ms: u64,
    /// Half-width of the uniform noise added to synthetic samples.
    pub noise_amplitude: f64,
    /// Head plot colour scale is clamped to +/- this value.
    pub color_range: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            channel_count: 8,
            window_size: 500,
            batch_size: 10,
            tick_interval_ms: 10,
            noise_amplitude: 2.5,
            color_range: 10.0,
        }
    }
}

impl MonitorConfig {
    pub fn from_json(text: &str) -> Result<Self, MonitorError> {
        let config: MonitorConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MonitorError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MonitorError::io(path, e))?;
        let config = Self::from_json(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.channel_count == 0 {
            return Err(MonitorError::InvalidChannelCount);
        }
        if self.window_size == 0 {
            return Err(MonitorError::InvalidWindowSize);
        }
        if self.batch_size == 0 {
            return Err(MonitorError::InvalidBatchSize);
        }
        if self.tick_interval_ms == 0 {
            return Err(MonitorError::InvalidTickInterval);
        }
        if !(0.0..=MAX_NOISE_AMPLITUDE).contains(&self.noise_amplitude) {
            return Err(MonitorError::InvalidNoiseAmplitude(self.noise_amplitude));
        }
        if !self.color_range.is_finite() || self.color_range <= 0.0 {
            return Err(MonitorError::InvalidColorRange(self.color_range));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
