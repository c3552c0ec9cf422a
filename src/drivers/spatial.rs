//! Head-plot markers: one per channel on the unit circle, scaled and coloured
//! by the channel's newest sample.
use std::f64::consts::PI;
use crate::drivers::TimeSeriesFrame;
/// Marker diameter for a channel reading of zero.
pub const BASE_MARKER_SIZE: f64 = 20.0;
#[derive(Clone, Debug, PartialEq)]
pub struct SpatialMarker {
    pub channel: usize,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// Newest sample, or 0 for an empty channel. Not clamped.
    pub value: f64,
    /// `value` mapped onto `[0, 1]` across the clamped colour range.
    pub color_position: f64,
}
/// Outline of the head drawn under the markers, in plot units.
pub struct HeadOutline;
impl HeadOutline {
    pub const RADIUS: f64 = 1.0;
    pub const NOSE: [(f64, f64); 3] = [(-0.1, 1.0), (0.1, 1.0), (0.0, 1.2)];
    /// Cubic curve control points (start, c1, c2, end) for the left ear; the
    /// right ear is its mirror image.
    pub const LEFT_EAR: [(f64, f64); 4] = [(-1.0, -0.3), (-1.2, 0.0), (-1.2, -0.6), (-1.0, -0.3)];
    pub fn right_ear() -> [(f64, f64); 4] {
        Self::LEFT_EAR.map(|(x, y)| (-x, y))
    }
}
pub fn marker_position(index: usize, channel_count: usize) -> (f64, f64) {
    let angle = index as f64 * 2.0 * PI / channel_count as f64;
    (angle.cos(), angle.sin())
}
pub fn color_position(value: f64, color_range: f64) -> f64 {
    if !value.is_finite() || color_range <= 0.0 {
        return 0.5;
    }
    (value.clamp(-color_range, color_range) + color_range) / (2.0 * color_range)
}
pub fn spatial_view(frame: &TimeSeriesFrame, color_range: f64) -> Vec<SpatialMarker> {
    let count = frame.channel_count();
    (0..count)
        .map(|idx| {
            let (x, y) = marker_position(idx, count);
            let value = frame.latest(idx).unwrap_or(0.0);
            SpatialMarker {
                channel: idx,
                label: (idx + 1).to_string(),
                x,
                y,
                size: BASE_MARKER_SIZE + value.abs() * 2.0,
                value,
                color_position: color_position(value, color_range),
            }
        })
        .collect()
}
/// Jet colour map, `t` in `[0, 1]` from dark blue through cyan and yellow to dark red.
pub fn jet_rgb(t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let channel = |offset: f64| {
        let v = 1.5 - (4.0 * t - offset).abs();
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    };
    (channel(3.0), channel(2.0), channel(1.0))
}
#[cfg(test)]
mod tests {
    use super::*;
    fn frame(samples: Vec<Vec<f64>>) -> TimeSeriesFrame {
        TimeSeriesFrame {
            timestamps: Vec::new(),
            channel_names: (0..samples.len()).map(crate::drivers::buffer::channel_name).collect(),
            samples,
        }
    }
    #[test]
    fn markers_sit_on_unit_circle() {
        let markers = spatial_view(&frame(vec![vec![]; 8]), 10.0);
        assert_eq!(markers.len(), 8);
        for m in &markers {
            assert!(((m.x * m.x + m.y * m.y) - 1.0).abs() < 1e-12);
        }
        assert!((markers[2].x).abs() < 1e-12 && (markers[2].y - 1.0).abs() < 1e-12);
        assert_eq!(markers[0].label, "1");
    }
    #[test]
    fn latest_sample_drives_size_and_color() {
        let markers = spatial_view(&frame(vec![vec![0.0, -3.0], vec![1.0, 25.0], vec![]]), 10.0);
        assert_eq!(markers[0].size, 26.0);
        assert_eq!(markers[0].color_position, 0.35);
        // colour clamps at +10, size does not
        assert_eq!(markers[1].size, 70.0);
        assert_eq!(markers[1].color_position, 1.0);
        assert_eq!(markers[2].size, BASE_MARKER_SIZE);
        assert_eq!(markers[2].color_position, 0.5);
    }
    #[test]
    fn jet_endpoints() {
        assert_eq!(jet_rgb(0.0), (0, 0, 128));
        assert_eq!(jet_rgb(0.5), (128, 255, 128));
        assert_eq!(jet_rgb(1.0), (128, 0, 0));
    }
}
