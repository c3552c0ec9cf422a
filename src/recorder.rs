use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::drivers::{
    render_head_png, render_spectrum_png, render_time_series_png, LiveWaveformController,
    MonitorError, PlotStyle, RenderedViews, TimeSeriesFrame,
};

/// Write a frame in the same layout the loader accepts: a header row, then
/// `timestamp,ch1,..,chN` per step.
///
/// Only complete rows are written; samples still waiting in an unflushed
/// batch are left out.
pub fn write_frame<W: Write>(frame: &TimeSeriesFrame, mut w: W) -> std::io::Result<usize> {
    write!(w, "Timestamp")?;
    for name in &frame.channel_names {
        write!(w, ",{}", name)?;
    }
    writeln!(w)?;
    // Channels may run ahead of the timestamp series between flushes (or
    // behind it after an oversized load); align on the newest entries.
    let rows = frame
        .samples
        .iter()
        .map(|c| c.len())
        .fold(frame.timestamps.len(), usize::min);
    let ts_offset = frame.timestamps.len() - rows;
    for row in 0..rows {
        write!(w, "{}", frame.timestamps[ts_offset + row])?;
        for channel in &frame.samples {
            write!(w, ",{}", channel[channel.len() - rows + row])?;
        }
        writeln!(w)?;
    }
    w.flush()?;
    Ok(rows)
}

pub fn save_csv(frame: &TimeSeriesFrame, path: impl AsRef<Path>) -> Result<usize, MonitorError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| MonitorError::io(path, e))?;
    let rows = write_frame(frame, BufWriter::new(file)).map_err(|e| MonitorError::io(path, e))?;
    log::info!("💾 saved {} rows to {}", rows, path.display());
    Ok(rows)
}

/// Files written by [`export_snapshot`].
pub const SNAPSHOT_FILES: [&str; 4] = ["time_series.png", "frequency.png", "head.png", "recording.csv"];

/// Render the current views to PNG and dump the buffer as CSV into `dir`.
pub fn export_snapshot(
    controller: &LiveWaveformController,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, MonitorError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| MonitorError::io(dir, e))?;
    let mut views = RenderedViews::default();
    controller.render_all(&mut views);
    let frame = views.time_series.unwrap_or_else(|| controller.snapshot());
    let style = PlotStyle::default();
    let images = [
        render_time_series_png(&frame, &style)?,
        render_spectrum_png(&views.spectrum, &style)?,
        render_head_png(&views.markers, &style)?,
    ];
    let mut written = Vec::with_capacity(SNAPSHOT_FILES.len());
    for (name, png) in SNAPSHOT_FILES.iter().zip(images) {
        let path = dir.join(name);
        std::fs::write(&path, png).map_err(|e| MonitorError::io(&path, e))?;
        written.push(path);
    }
    let csv_path = dir.join(SNAPSHOT_FILES[3]);
    save_csv(&frame, &csv_path)?;
    written.push(csv_path);
    log::info!("exported snapshot to {}", dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;
    use crate::drivers::source::ZeroNoise;
    use crate::drivers::view::NullSink;

    #[test]
    fn saved_csv_loads_back_identically() {
        let config = MonitorConfig {
            channel_count: 3,
            ..Default::default()
        };
        let mut source = LiveWaveformController::new(config.clone(), ZeroNoise);
        source.load_external(
            "t,a,b,c\n0.1,1.5,-2,3\n0.2,4,5.25,-6\n0.3,7,8,9\n",
            &mut NullSink,
        );
        let mut out = Vec::new();
        assert_eq!(write_frame(&source.snapshot(), &mut out).unwrap(), 3);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Timestamp,Channel 1,Channel 2,Channel 3\n"));

        let mut reloaded = LiveWaveformController::new(config, ZeroNoise);
        reloaded.load_external(&text, &mut NullSink);
        assert_eq!(reloaded.snapshot().timestamps, source.snapshot().timestamps);
        assert_eq!(reloaded.snapshot().samples, source.snapshot().samples);
    }

    #[test]
    fn unflushed_samples_align_to_newest() {
        let frame = TimeSeriesFrame {
            timestamps: vec!["a".into(), "b".into()],
            channel_names: vec!["Channel 1".into()],
            samples: vec![vec![1.0, 2.0, 3.0]],
        };
        let mut out = Vec::new();
        write_frame(&frame, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Timestamp,Channel 1\na,2\nb,3\n");
    }

    #[test]
    fn save_csv_writes_file() {
        let path = std::env::temp_dir().join(format!("eeg_monitor_{}.csv", std::process::id()));
        let frame = TimeSeriesFrame {
            timestamps: vec!["x".into()],
            channel_names: vec!["Channel 1".into()],
            samples: vec![vec![0.5]],
        };
        assert_eq!(save_csv(&frame, &path).unwrap(), 1);
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(text, "Timestamp,Channel 1\nx,0.5\n");
    }

    #[test]
    fn export_succeeds_for_tiny_buffers() {
        let mut one_row = LiveWaveformController::new(MonitorConfig::default(), ZeroNoise);
        one_row.load_external("h\nt0,1,2,3,4,5,6,7,8\n", &mut NullSink);
        let empty = LiveWaveformController::new(MonitorConfig::default(), ZeroNoise);
        for (tag, controller) in [("one", &one_row), ("empty", &empty)] {
            let dir = std::env::temp_dir()
                .join(format!("eeg_monitor_{tag}_{}", std::process::id()));
            let written = export_snapshot(controller, &dir).unwrap();
            let all_exist = written.iter().all(|p| p.exists());
            let csv = std::fs::read_to_string(dir.join("recording.csv")).unwrap();
            std::fs::remove_dir_all(&dir).ok();
            assert_eq!(written.len(), 4);
            assert!(all_exist);
            assert_eq!(csv.lines().count(), 1 + controller.buffer().timestamp_len());
        }
    }

    #[test]
    fn export_writes_every_file() {
        let mut controller = LiveWaveformController::new(MonitorConfig::default(), ZeroNoise);
        let mut text = String::from("header\n");
        for i in 0..40 {
            text.push_str(&format!("t{i},{i},1,2,3,4,5,6,-7\n"));
        }
        controller.load_external(&text, &mut NullSink);
        let dir = std::env::temp_dir().join(format!("eeg_monitor_export_{}", std::process::id()));
        let written = export_snapshot(&controller, &dir).unwrap();
        let all_exist = written.iter().all(|p| p.exists());
        std::fs::remove_dir_all(&dir).ok();
        assert_eq!(written.len(), 4);
        assert!(all_exist);
    }
}
