use crate::drivers::TimeSeriesFrame;
/// Frequency-view data for channel 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrequencySpectrum {
    pub frequencies: Vec<f64>,
    pub amplitudes: Vec<f64>,
}
impl FrequencySpectrum {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.frequencies
            .iter()
            .zip(&self.amplitudes)
            .map(|(f, a)| [*f, *a])
            .collect()
    }
}
/// Placeholder spectrum: bin `i` is labelled `i` and carries `|signal[i]|`
/// for the first `len / 2` raw samples. No transform is performed.
pub fn placeholder_spectrum(signal: &[f64]) -> FrequencySpectrum {
    let bins = signal.len() / 2;
    FrequencySpectrum {
        frequencies: (0..bins).map(|i| i as f64).collect(),
        amplitudes: signal[..bins].iter().map(|v| v.abs()).collect(),
    }
}
/// Frequency view over the newest `window` samples of channel 0.
pub fn frequency_view(frame: &TimeSeriesFrame, window: usize) -> FrequencySpectrum {
    let Some(channel) = frame.samples.first() else {
        return FrequencySpectrum::default();
    };
    let start = channel.len().saturating_sub(window);
    placeholder_spectrum(&channel[start..])
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn bins_are_raw_magnitudes_of_first_half() {
        let signal: Vec<f64> = (0..500).map(|i| if i % 2 == 0 { -(i as f64) } else { i as f64 }).collect();
        let spectrum = placeholder_spectrum(&signal);
        assert_eq!(spectrum.len(), 250);
        for i in 0..250 {
            assert_eq!(spectrum.frequencies[i], i as f64);
            assert_eq!(spectrum.amplitudes[i], signal[i].abs());
        }
    }
    #[test]
    fn odd_length_rounds_down() {
        let spectrum = placeholder_spectrum(&[1.0, -2.0, 3.0]);
        assert_eq!(spectrum.amplitudes, vec![1.0]);
    }
    #[test]
    fn view_uses_newest_window_of_first_channel() {
        let frame = TimeSeriesFrame {
            timestamps: Vec::new(),
            channel_names: vec!["Channel 1".into(), "Channel 2".into()],
            samples: vec![vec![9.0, 9.0, -1.0, 2.0, -3.0, 4.0], vec![100.0; 6]],
        };
        let spectrum = frequency_view(&frame, 4);
        assert_eq!(spectrum.amplitudes, vec![1.0, 2.0]);
    }
}
