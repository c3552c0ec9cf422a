use crate::drivers::spatial::SpatialMarker;
use crate::drivers::spectrum::FrequencySpectrum;
use crate::drivers::TimeSeriesFrame;
/// Receiver of the three rendered views. Each call replaces the previous
/// traces of that view wholesale.
pub trait RenderSink {
    fn replace_time_series(&mut self, frame: &TimeSeriesFrame);
    fn replace_frequency(&mut self, spectrum: &FrequencySpectrum);
    fn replace_spatial(&mut self, markers: &[SpatialMarker]);
}
/// Keeps the latest copy of every view, for painting or export.
#[derive(Clone, Debug, Default)]
pub struct RenderedViews {
    pub time_series: Option<TimeSeriesFrame>,
    pub spectrum: FrequencySpectrum,
    pub markers: Vec<SpatialMarker>,
    /// Bumped once per complete render.
    pub generation: u64,
}
impl RenderSink for RenderedViews {
    fn replace_time_series(&mut self, frame: &TimeSeriesFrame) {
        self.time_series = Some(frame.clone());
        self.generation += 1;
    }
    fn replace_frequency(&mut self, spectrum: &FrequencySpectrum) {
        self.spectrum = spectrum.clone();
    }
    fn replace_spatial(&mut self, markers: &[SpatialMarker]) {
        self.markers = markers.to_vec();
    }
}
/// Discards everything.
pub struct NullSink;
impl RenderSink for NullSink {
    fn replace_time_series(&mut self, _frame: &TimeSeriesFrame) {}
    fn replace_frequency(&mut self, _spectrum: &FrequencySpectrum) {}
    fn replace_spatial(&mut self, _markers: &[SpatialMarker]) {}
}
