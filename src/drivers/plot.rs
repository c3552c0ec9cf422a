use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::error::MonitorError;
use crate::drivers::spatial::{jet_rgb, HeadOutline, SpatialMarker};
use crate::drivers::spectrum::FrequencySpectrum;
use crate::drivers::TimeSeriesFrame;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(10, 10, 10),
            palette: vec![BLUE, RED, GREEN, CYAN, MAGENTA, YELLOW, WHITE],
        }
    }
}
fn finite_bounds<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let (min, max) = values
        .copied()
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if (max - min).abs() < f64::EPSILON {
        (-10.0, 10.0)
    } else {
        (min, max)
    }
}
pub fn render_time_series_png(
    frame: &TimeSeriesFrame,
    style: &PlotStyle,
) -> Result<Vec<u8>, MonitorError> {
    // an empty frame still renders, as bare axes
    let longest = frame.samples.iter().map(|c| c.len()).max().unwrap_or(0).max(1);
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let (y_min, y_max) = finite_bounds(frame.samples.iter().flatten());
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption("EEG Time Series", ("sans-serif", 20).into_font().color(&WHITE))
            .set_label_area_size(LabelAreaPosition::Left, 45)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(0f64..longest as f64, y_min..y_max)?;
        let x_labels = |x: &f64| {
            if *x < 0.0 || x.fract() != 0.0 {
                return String::new();
            }
            frame.axis_label(*x as usize).unwrap_or_default()
        };
        chart
            .configure_mesh()
            .x_labels(6)
            .x_label_formatter(&x_labels)
            .y_desc("Amplitude (µV)")
            .light_line_style(&WHITE.mix(0.1))
            .draw()?;
        for (idx, channel) in frame.samples.iter().enumerate() {
            let color = style.palette[idx % style.palette.len()];
            let series = channel
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, v)| (i as f64, *v));
            chart
                .draw_series(LineSeries::new(series, &color))?
                .label(
                    frame
                        .channel_names
                        .get(idx)
                        .cloned()
                        .unwrap_or_else(|| format!("Channel {}", idx + 1)),
                )
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }
        chart
            .configure_series_labels()
            .border_style(&WHITE.mix(0.2))
            .background_style(&style.background)
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
pub fn render_spectrum_png(
    spectrum: &FrequencySpectrum,
    style: &PlotStyle,
) -> Result<Vec<u8>, MonitorError> {
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        if spectrum.is_empty() {
            log::debug!("spectrum has no bins, drawing empty axes");
        }
        let top = spectrum
            .amplitudes
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0f64, f64::max)
            .max(1e-3);
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption("EEG FFT Plot", ("sans-serif", 20).into_font().color(&WHITE))
            .set_label_area_size(LabelAreaPosition::Left, 45)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(
                0f64..spectrum.frequencies.last().copied().unwrap_or(0.0).max(1.0),
                0f64..top,
            )?;
        chart
            .configure_mesh()
            .x_desc("Frequency (Hz)")
            .light_line_style(&WHITE.mix(0.1))
            .draw()?;
        let color = style.palette[0];
        let series = spectrum
            .points()
            .into_iter()
            .filter(|[_, a]| a.is_finite())
            .map(|[f, a]| (f, a));
        chart.draw_series(LineSeries::new(series, &color))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
pub fn render_head_png(markers: &[SpatialMarker], style: &PlotStyle) -> Result<Vec<u8>, MonitorError> {
    let side = style.width.min(style.height);
    let mut buffer = vec![0u8; (side * side * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (side, side)).into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption("Head Plot", ("sans-serif", 20).into_font().color(&WHITE))
            .build_cartesian_2d(-1.5f64..1.5f64, -1.5f64..1.5f64)?;
        let outline = WHITE.mix(0.8);
        let circle = (0..=128).map(|i| {
            let a = i as f64 / 128.0 * std::f64::consts::TAU;
            (HeadOutline::RADIUS * a.cos(), HeadOutline::RADIUS * a.sin())
        });
        chart.draw_series(LineSeries::new(circle, &outline))?;
        let nose = HeadOutline::NOSE;
        chart.draw_series(LineSeries::new(
            nose.iter().chain(nose.first()).copied(),
            &outline,
        ))?;
        for ear in [HeadOutline::LEFT_EAR, HeadOutline::right_ear()] {
            chart.draw_series(LineSeries::new(cubic_points(ear, 24), &outline))?;
        }
        chart.draw_series(markers.iter().map(|m| {
            let (r, g, b) = jet_rgb(m.color_position);
            Circle::new((m.x, m.y), (m.size / 2.0).round() as i32, RGBColor(r, g, b).filled())
        }))?;
        chart.draw_series(markers.iter().map(|m| {
            Text::new(
                m.label.clone(),
                (m.x, m.y + 0.12),
                ("sans-serif", 14).into_font().color(&WHITE),
            )
        }))?;
        root.present()?;
    }
    encode_png(&buffer, side, side)
}
/// Sample a cubic Bezier given as (start, c1, c2, end).
pub fn cubic_points(ctrl: [(f64, f64); 4], steps: usize) -> Vec<(f64, f64)> {
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let u = 1.0 - t;
            let w = [u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t];
            ctrl.iter()
                .zip(w)
                .fold((0.0, 0.0), |(x, y), (p, w)| (x + p.0 * w, y + p.1 * w))
        })
        .collect()
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, MonitorError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| MonitorError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::spatial::spatial_view;
    use crate::drivers::spectrum::frequency_view;
    const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];
    fn frame() -> TimeSeriesFrame {
        TimeSeriesFrame {
            timestamps: (0..64).map(|i| format!("t{i}")).collect(),
            channel_names: vec!["Channel 1".into(), "Channel 2".into()],
            samples: vec![
                (0..64).map(|i| (i as f64 * 0.3).sin() * 5.0).collect(),
                (0..64).map(|i| if i == 3 { f64::NAN } else { i as f64 * 0.1 }).collect(),
            ],
        }
    }
    #[test]
    fn renders_all_three_views() {
        let style = PlotStyle::default();
        let frame = frame();
        let wave = render_time_series_png(&frame, &style).unwrap();
        let fft = render_spectrum_png(&frequency_view(&frame, 500), &style).unwrap();
        let head = render_head_png(&spatial_view(&frame, 10.0), &style).unwrap();
        for png in [wave, fft, head] {
            assert_eq!(png[..4], PNG_MAGIC);
        }
    }
    #[test]
    fn empty_views_render_as_bare_axes() {
        let style = PlotStyle::default();
        let empty = TimeSeriesFrame {
            timestamps: Vec::new(),
            channel_names: vec!["Channel 1".into()],
            samples: vec![Vec::new()],
        };
        let wave = render_time_series_png(&empty, &style).unwrap();
        let fft = render_spectrum_png(&frequency_view(&empty, 500), &style).unwrap();
        let head = render_head_png(&[], &style).unwrap();
        for png in [wave, fft, head] {
            assert_eq!(png[..4], PNG_MAGIC);
        }
    }
    #[test]
    fn single_sample_frame_renders() {
        let one = TimeSeriesFrame {
            timestamps: vec!["2023-11-14T22:13:20.000Z".into()],
            channel_names: vec!["Channel 1".into()],
            samples: vec![vec![4.0]],
        };
        let spectrum = frequency_view(&one, 500);
        assert!(spectrum.is_empty());
        let style = PlotStyle::default();
        assert!(render_time_series_png(&one, &style).is_ok());
        assert!(render_spectrum_png(&spectrum, &style).is_ok());
    }
    #[test]
    fn bezier_hits_endpoints() {
        let pts = cubic_points(HeadOutline::LEFT_EAR, 10);
        assert_eq!(pts.len(), 11);
        assert!((pts[0].0 + 1.0).abs() < 1e-12);
        assert!((pts[10].1 + 0.3).abs() < 1e-12);
    }
}
