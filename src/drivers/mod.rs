// src/drivers/mod.rs
// 声明同级目录下的子模块文件
pub mod buffer;
pub mod csv;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod source;
pub mod spatial;
pub mod spectrum;
pub mod view;
// 公开导出这些模块里的结构体，方便外部调用
pub use buffer::{TimeSeriesFrame, WaveformBuffer};
pub use error::MonitorError;
pub use pipeline::LiveWaveformController;
pub use plot::{render_head_png, render_spectrum_png, render_time_series_png, PlotStyle};
pub use spatial::{jet_rgb, HeadOutline, SpatialMarker};
pub use view::{NullSink, RenderedViews};
