use std::path::Path;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info, warn};
use crate::config::MonitorConfig;
use crate::drivers::csv::parse_recording;
use crate::drivers::error::MonitorError;
use crate::drivers::source::{NoiseSource, SyntheticSource, UniformNoise};
use crate::drivers::spatial::spatial_view;
use crate::drivers::spectrum::frequency_view;
use crate::drivers::view::RenderSink;
use crate::drivers::{TimeSeriesFrame, WaveformBuffer};
/// Owns the live buffer and drives it from ticks, file loads and start/stop.
pub struct LiveWaveformController {
    config: MonitorConfig,
    buffer: WaveformBuffer,
    source: SyntheticSource,
    pending: Vec<String>,
    updating: bool,
}
impl LiveWaveformController {
    pub fn new(config: MonitorConfig, noise: impl NoiseSource + 'static) -> Self {
        let buffer = WaveformBuffer::new(config.channel_count, config.window_size);
        Self {
            pending: Vec::with_capacity(config.batch_size),
            config,
            buffer,
            source: SyntheticSource::new(noise),
            updating: false,
        }
    }
    pub fn from_config(config: MonitorConfig) -> Self {
        let noise = UniformNoise::new(config.noise_amplitude);
        Self::new(config, noise)
    }
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
    pub fn buffer(&self) -> &WaveformBuffer {
        &self.buffer
    }
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
    pub fn is_updating(&self) -> bool {
        self.updating
    }
    pub fn start(&mut self) {
        if !self.updating {
            info!("live updates started");
        }
        self.updating = true;
    }
    pub fn stop(&mut self) {
        if self.updating {
            info!("live updates stopped");
        }
        self.updating = false;
    }
    /// One timer step at `now`, the time the step was scheduled for. Returns true when the step flushed the
    /// pending batch and re-rendered.
    pub fn tick_at(&mut self, now: DateTime<Utc>, sink: &mut dyn RenderSink) -> bool {
        if !self.updating {
            return false;
        }
        let timestamp_ms = now.timestamp_millis() as f64;
        let values: Vec<f64> = (0..self.buffer.channel_count())
            .map(|idx| self.source.generate_sample(idx, timestamp_ms))
            .collect();
        self.buffer.push_samples(&values);
        self.pending
            .push(now.to_rfc3339_opts(SecondsFormat::Millis, true));
        if self.pending.len() < self.config.batch_size {
            return false;
        }
        self.buffer.extend_timestamps(self.pending.drain(..));
        debug!(
            "flushed batch of {}, window now {}",
            self.config.batch_size,
            self.buffer.timestamp_len()
        );
        self.render_all(sink);
        true
    }
    /// Replace the whole buffer with CSV text and re-render. Returns the
    /// number of rows accepted.
    pub fn load_external(&mut self, text: &str, sink: &mut dyn RenderSink) -> usize {
        let recording = parse_recording(text, self.config.channel_count);
        let accepted = recording.len();
        if recording.is_empty() {
            warn!("no data rows in loaded text, buffer is now empty");
        }
        if recording.skipped_rows > 0 {
            warn!("skipped {} malformed rows", recording.skipped_rows);
        }
        if accepted > self.config.window_size {
            debug!(
                "loaded {accepted} rows, above window {}; trimmed on next flush",
                self.config.window_size
            );
        }
        self.buffer.replace_with(recording);
        self.pending.clear();
        info!("loaded {accepted} rows");
        self.render_all(sink);
        accepted
    }
    pub fn load_csv_file(
        &mut self,
        path: impl AsRef<Path>,
        sink: &mut dyn RenderSink,
    ) -> Result<usize, MonitorError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MonitorError::io(path, e))?;
        info!("reading {}", path.display());
        Ok(self.load_external(&text, sink))
    }
    pub fn snapshot(&self) -> TimeSeriesFrame {
        self.buffer.snapshot()
    }
    pub fn render_all(&self, sink: &mut dyn RenderSink) {
        let frame = self.buffer.snapshot();
        sink.replace_time_series(&frame);
        sink.replace_frequency(&frequency_view(&frame, self.config.window_size));
        sink.replace_spatial(&spatial_view(&frame, self.config.color_range));
    }
}
