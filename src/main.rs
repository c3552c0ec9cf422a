// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod config;
mod drivers;
mod gui;
mod recorder;
mod scheduler;
mod types;
mod visualizer;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::Parser;
use eframe::egui;
use log::info;

use config::MonitorConfig;
use drivers::{LiveWaveformController, NullSink};

#[derive(Parser)]
#[command(name = "eeg-live-monitor")]
#[command(about = "Live multi-channel EEG waveform monitor")]
struct Cli {
    /// JSON config file (channel_count, window_size, batch_size, ...)
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV recording to load at startup
    #[arg(long)]
    load: Option<PathBuf>,

    /// Run without a window and write a snapshot instead
    #[arg(long)]
    headless: bool,

    /// Synthetic ticks to run in headless mode
    #[arg(long, default_value_t = 500)]
    ticks: u32,

    /// Snapshot output directory for headless mode
    #[arg(long, default_value = "./snapshot")]
    export_dir: PathBuf,
}

fn build_controller(cli: &Cli) -> Result<LiveWaveformController> {
    let config = match &cli.config {
        Some(path) => MonitorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MonitorConfig::default(),
    };
    let mut controller = LiveWaveformController::from_config(config);
    if let Some(path) = &cli.load {
        controller
            .load_csv_file(path, &mut NullSink)
            .with_context(|| format!("loading recording {}", path.display()))?;
    }
    Ok(controller)
}

fn run_headless(mut controller: LiveWaveformController, cli: &Cli) -> Result<()> {
    let interval = chrono::Duration::milliseconds(controller.config().tick_interval_ms as i64);
    let started = Utc::now();
    controller.start();
    let mut sink = NullSink;
    for i in 0..cli.ticks {
        controller.tick_at(started + interval * i as i32, &mut sink);
    }
    controller.stop();
    let files = recorder::export_snapshot(&controller, &cli.export_dir)?;
    for file in files {
        info!("wrote {}", file.display());
    }
    Ok(())
}

// 入口函数
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let controller = build_controller(&cli)?;
    if cli.headless {
        return run_headless(controller, &cli);
    }
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 860.0])
        .with_min_inner_size([900.0, 600.0])
        .with_title("EEG Live Monitor");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "EEG Live Monitor",
        options,
        Box::new(|_cc| Box::new(gui::EegMonitorApp::new(controller))),
    )
    .map_err(|e| anyhow!("window error: {e}"))
}
