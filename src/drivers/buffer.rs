use std::collections::VecDeque;
use chrono::DateTime;
use crate::drivers::csv::CsvRecording;
/// Immutable copy of the buffer taken for rendering.
#[derive(Clone, Debug)]
pub struct TimeSeriesFrame {
    pub timestamps: Vec<String>,
    pub channel_names: Vec<String>,
    pub samples: Vec<Vec<f64>>, // channels x samples
}
impl TimeSeriesFrame {
    pub fn channel_count(&self) -> usize {
        self.samples.len()
    }
    pub fn latest(&self, channel: usize) -> Option<f64> {
        self.samples.get(channel).and_then(|c| c.last().copied())
    }
    /// Timestamp label of sample `index`. Labels line up with the newest
    /// samples of channel 0.
    pub fn timestamp_at(&self, index: usize) -> Option<&str> {
        let len = self.samples.first().map_or(0, Vec::len) as i64;
        let at = index as i64 + self.timestamps.len() as i64 - len;
        usize::try_from(at)
            .ok()
            .and_then(|i| self.timestamps.get(i))
            .map(String::as_str)
    }
    /// Axis tick text for sample `index`: the time of day for ISO labels,
    /// the label itself otherwise.
    pub fn axis_label(&self, index: usize) -> Option<String> {
        let label = self.timestamp_at(index)?;
        Some(match DateTime::parse_from_rfc3339(label) {
            Ok(time) => time.format("%H:%M:%S%.3f").to_string(),
            Err(_) => label.to_owned(),
        })
    }
}
struct ChannelBuffer {
    name: String,
    samples: VecDeque<f64>,
}
/// Rolling per-channel sample windows plus the shared timestamp series.
///
/// Channels are trimmed on every push; the timestamp series is trimmed when a
/// batch of timestamps is appended. A bulk replace bypasses both trims.
pub struct WaveformBuffer {
    channels: Vec<ChannelBuffer>,
    timestamps: VecDeque<String>,
    capacity: usize,
}
impl WaveformBuffer {
    pub fn new(channel_count: usize, capacity: usize) -> Self {
        let channels = (0..channel_count)
            .map(|idx| ChannelBuffer {
                name: channel_name(idx),
                samples: VecDeque::with_capacity(capacity + 1),
            })
            .collect();
        Self {
            channels,
            timestamps: VecDeque::with_capacity(capacity),
            capacity,
        }
    }
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
    pub fn timestamp_len(&self) -> usize {
        self.timestamps.len()
    }
    pub fn channel_len(&self, channel: usize) -> usize {
        self.channels.get(channel).map(|c| c.samples.len()).unwrap_or(0)
    }
    #[cfg(test)]
    pub fn channel_samples(&self, channel: usize) -> Vec<f64> {
        self.channels
            .get(channel)
            .map(|c| c.samples.iter().copied().collect())
            .unwrap_or_default()
    }
    /// Append one value per channel, evicting the oldest sample past capacity.
    pub fn push_samples(&mut self, values: &[f64]) {
        for (channel, &value) in self.channels.iter_mut().zip(values) {
            channel.samples.push_back(value);
            while channel.samples.len() > self.capacity {
                channel.samples.pop_front();
            }
        }
    }
    /// Append a batch of timestamps, keeping only the newest `capacity`.
    pub fn extend_timestamps(&mut self, batch: impl IntoIterator<Item = String>) {
        self.timestamps.extend(batch);
        while self.timestamps.len() > self.capacity {
            self.timestamps.pop_front();
        }
    }
    /// Replace everything with a loaded recording. No window trim is applied.
    pub fn replace_with(&mut self, recording: CsvRecording) {
        self.timestamps = recording.timestamps.into();
        let mut loaded = recording.channels.into_iter();
        for channel in &mut self.channels {
            channel.samples = loaded.next().unwrap_or_default().into();
        }
    }
    pub fn snapshot(&self) -> TimeSeriesFrame {
        TimeSeriesFrame {
            timestamps: self.timestamps.iter().cloned().collect(),
            channel_names: self.channels.iter().map(|c| c.name.clone()).collect(),
            samples: self
                .channels
                .iter()
                .map(|c| c.samples.iter().copied().collect())
                .collect(),
        }
    }
}
pub fn channel_name(index: usize) -> String {
    format!("Channel {}", index + 1)
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn push_evicts_oldest_first() {
        let mut buffer = WaveformBuffer::new(2, 3);
        for v in 0..5 {
            buffer.push_samples(&[v as f64, -(v as f64)]);
        }
        assert_eq!(buffer.channel_samples(0), vec![2.0, 3.0, 4.0]);
        assert_eq!(buffer.channel_samples(1), vec![-2.0, -3.0, -4.0]);
    }
    #[test]
    fn timestamps_keep_newest_window() {
        let mut buffer = WaveformBuffer::new(1, 4);
        buffer.extend_timestamps((0..3).map(|i| format!("t{i}")));
        buffer.extend_timestamps((3..6).map(|i| format!("t{i}")));
        let frame = buffer.snapshot();
        assert_eq!(frame.timestamps, vec!["t2", "t3", "t4", "t5"]);
    }
    #[test]
    fn axis_labels_follow_newest_samples() {
        let mut buffer = WaveformBuffer::new(1, 4);
        for v in 0..3 {
            buffer.push_samples(&[v as f64]);
        }
        buffer.extend_timestamps(vec![
            "2023-11-14T22:13:20.000Z".to_owned(),
            "2023-11-14T22:13:20.010Z".to_owned(),
            "2023-11-14T22:13:20.020Z".to_owned(),
        ]);
        let frame = buffer.snapshot();
        assert_eq!(frame.timestamp_at(1), Some("2023-11-14T22:13:20.010Z"));
        assert_eq!(frame.axis_label(2).as_deref(), Some("22:13:20.020"));
        assert_eq!(frame.axis_label(3), None);

        // one sample ahead of the last flushed label
        buffer.push_samples(&[3.0]);
        let frame = buffer.snapshot();
        assert_eq!(frame.timestamp_at(3), Some("2023-11-14T22:13:20.020Z"));
        assert_eq!(frame.timestamp_at(0), None);
    }
    #[test]
    fn plain_labels_are_kept_verbatim() {
        let frame = TimeSeriesFrame {
            timestamps: vec!["t0".to_owned(), "t1".to_owned()],
            channel_names: vec![channel_name(0)],
            samples: vec![vec![1.0, 2.0]],
        };
        assert_eq!(frame.axis_label(1).as_deref(), Some("t1"));
    }
    #[test]
    fn channels_are_named_from_one() {
        let buffer = WaveformBuffer::new(3, 1);
        assert_eq!(
            buffer.snapshot().channel_names,
            vec!["Channel 1", "Channel 2", "Channel 3"]
        );
    }
}
