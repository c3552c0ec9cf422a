/// Rows accepted from an external recording, column-major per channel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsvRecording {
    pub timestamps: Vec<String>,
    pub channels: Vec<Vec<f64>>,
    /// Data rows dropped for having the wrong column count.
    pub skipped_rows: usize,
}
impl CsvRecording {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}
/// Parse `timestamp,ch1,..,chN` text. The first line is a header and is ignored.
///
/// A row is accepted only when it splits into exactly `channel_count + 1`
/// fields; anything else (including blank lines) is skipped. The timestamp
/// column is kept verbatim. Values that do not parse as numbers become NaN
/// without rejecting the row.
pub fn parse_recording(text: &str, channel_count: usize) -> CsvRecording {
    let mut recording = CsvRecording {
        channels: vec![Vec::new(); channel_count],
        ..Default::default()
    };
    for row in text.split('\n').skip(1) {
        let columns: Vec<&str> = row.split(',').collect();
        if columns.len() != channel_count + 1 {
            recording.skipped_rows += 1;
            continue;
        }
        recording.timestamps.push(columns[0].to_owned());
        for (channel, raw) in recording.channels.iter_mut().zip(&columns[1..]) {
            channel.push(parse_value(raw));
        }
    }
    recording
}
fn parse_value(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn keeps_only_rows_with_matching_column_count() {
        let text = "h1,h2,h3,h4,h5,h6,h7,h8,h9\nt0,1.0,2.0,3.0,4.0,5.0,6.0,7.0,8.0\nt1,bad";
        let recording = parse_recording(text, 8);
        assert_eq!(recording.timestamps, vec!["t0"]);
        assert_eq!(recording.skipped_rows, 1);
        for (idx, channel) in recording.channels.iter().enumerate() {
            assert_eq!(channel, &vec![(idx + 1) as f64]);
        }
    }
    #[test]
    fn header_row_is_never_data() {
        let text = "0,1,2\n";
        let recording = parse_recording(text, 2);
        assert!(recording.is_empty());
    }
    #[test]
    fn carriage_returns_and_garbage_values() {
        let text = "time,a,b\r\n2024-01-01T00:00:00Z,1.5,2.5\r\nt1,x,-3\r\n";
        let recording = parse_recording(text, 2);
        assert_eq!(recording.len(), 2);
        assert_eq!(recording.timestamps[0], "2024-01-01T00:00:00Z");
        assert_eq!(recording.channels[1], vec![2.5, -3.0]);
        assert!(recording.channels[0][1].is_nan());
        // trailing empty line after the last "\r\n"
        assert_eq!(recording.skipped_rows, 1);
    }
}
