use std::f64::consts::PI;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
/// Component frequencies of the synthetic EEG waveform (Hz).
pub const SYNTH_FREQUENCIES_HZ: [f64; 4] = [1.0, 5.0, 10.0, 20.0];
/// Something that yields the additive noise term of a synthetic sample.
pub trait NoiseSource {
    fn next_noise(&mut self) -> f64;
}
/// Uniform noise in `[-amplitude, amplitude]`.
pub struct UniformNoise {
    rng: StdRng,
    amplitude: f64,
}
impl UniformNoise {
    pub fn new(amplitude: f64) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            amplitude,
        }
    }
    #[cfg(test)]
    pub fn seeded(amplitude: f64, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            amplitude,
        }
    }
}
impl NoiseSource for UniformNoise {
    fn next_noise(&mut self) -> f64 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-self.amplitude..=self.amplitude)
    }
}
/// Noise-free source, leaves only the deterministic sinusoid sum.
pub struct ZeroNoise;
impl NoiseSource for ZeroNoise {
    fn next_noise(&mut self) -> f64 {
        0.0
    }
}
/// Deterministic part of a synthetic sample at `timestamp_ms` (epoch millis).
pub fn sinusoid_sum(timestamp_ms: f64) -> f64 {
    SYNTH_FREQUENCIES_HZ
        .iter()
        .map(|freq| (2.0 * PI * freq * timestamp_ms / 1000.0).sin())
        .sum()
}
/// Synthetic EEG generator. Every channel shares the same sinusoid sum and
/// differs only by its noise draw.
pub struct SyntheticSource {
    noise: Box<dyn NoiseSource>,
}
impl SyntheticSource {
    pub fn new(noise: impl NoiseSource + 'static) -> Self {
        Self {
            noise: Box::new(noise),
        }
    }
    pub fn generate_sample(&mut self, _channel_index: usize, timestamp_ms: f64) -> f64 {
        sinusoid_sum(timestamp_ms) + self.noise.next_noise()
    }
}
