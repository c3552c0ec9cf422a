// src/gui.rs
use eframe::egui;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use std::path::PathBuf;
use std::time::Instant;
use chrono::Utc;
use crate::drivers::{LiveWaveformController, RenderedViews};
use crate::recorder;
use crate::scheduler::{self, CancelHandle, TickSchedule};
use crate::types::ControlCommand;
use crate::visualizer;

const MAX_LOG_LINES: usize = 8;

pub struct EegMonitorApp {
    controller: LiveWaveformController,
    schedule: TickSchedule,
    // 退出时停止定时器
    ticker: CancelHandle,
    views: RenderedViews,

    // 控件状态
    csv_path: String,
    export_dir: String,
    commands: Vec<ControlCommand>,

    log_messages: Vec<String>,
}

impl EegMonitorApp {
    pub fn new(controller: LiveWaveformController) -> Self {
        let schedule = TickSchedule::every(controller.config().tick_interval());
        let ticker = schedule.cancel_handle();
        let mut views = RenderedViews::default();
        controller.render_all(&mut views);
        Self {
            controller,
            schedule,
            ticker,
            views,
            csv_path: "recording.csv".to_owned(),
            export_dir: "snapshot".to_owned(),
            commands: Vec::new(),
            log_messages: vec!["EEG Live Monitor ready.".to_owned()],
        }
    }

    fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > MAX_LOG_LINES {
            self.log_messages.remove(0);
        }
    }

    fn apply(&mut self, cmd: ControlCommand) {
        match cmd {
            ControlCommand::Start => {
                if !self.controller.is_updating() {
                    self.schedule.rearm();
                }
                self.controller.start();
                self.log("🌊 Updates started");
            }
            ControlCommand::Stop => {
                self.controller.stop();
                self.log("🛑 Updates stopped");
            }
            ControlCommand::LoadCsv(path) => {
                match self.controller.load_csv_file(&path, &mut self.views) {
                    Ok(rows) => self.log(&format!("Loaded {} rows from {}", rows, path.display())),
                    Err(e) => {
                        log::warn!("{e}");
                        self.log(&format!("❌ {e}"));
                    }
                }
            }
            ControlCommand::LoadText(text) => {
                let rows = self.controller.load_external(&text, &mut self.views);
                self.log(&format!("Loaded {} rows", rows));
            }
            ControlCommand::SaveCsv(path) => {
                match recorder::save_csv(&self.controller.snapshot(), &path) {
                    Ok(rows) => self.log(&format!("💾 Saved {} rows", rows)),
                    Err(e) => {
                        log::warn!("{e}");
                        self.log(&format!("❌ {e}"));
                    }
                }
            }
            ControlCommand::ExportPng(dir) => match recorder::export_snapshot(&self.controller, &dir) {
                Ok(files) => self.log(&format!("Exported {} files to {}", files.len(), dir.display())),
                Err(e) => {
                    log::warn!("{e}");
                    self.log(&format!("❌ {e}"));
                }
            },
        }
    }

    fn collect_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(path) = file.path {
                self.commands.push(ControlCommand::LoadCsv(path));
            } else if let Some(bytes) = file.bytes {
                let text = String::from_utf8_lossy(&bytes).into_owned();
                self.commands.push(ControlCommand::LoadText(text));
            }
        }
    }

    fn draw_time_series(&self, ui: &mut egui::Ui) {
        ui.label("EEG TIME SERIES");
        let Some(frame) = &self.views.time_series else {
            Plot::new("time_series").height(260.0).show(ui, |_| {});
            return;
        };
        let labels = frame.clone();
        Plot::new("time_series")
            .height(260.0)
            .legend(Legend::default())
            .auto_bounds_x()
            .auto_bounds_y()
            .x_axis_formatter(move |x, _max_chars, _range| {
                if x < 0.0 || x.fract() != 0.0 {
                    return String::new();
                }
                labels.axis_label(x as usize).unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for (name, channel) in frame.channel_names.iter().zip(&frame.samples) {
                    let points: Vec<[f64; 2]> = channel
                        .iter()
                        .enumerate()
                        .filter(|(_, v)| v.is_finite())
                        .map(|(i, v)| [i as f64, *v])
                        .collect();
                    plot_ui.line(Line::new(PlotPoints::new(points)).name(name));
                }
            });
    }

    fn draw_frequency(&self, ui: &mut egui::Ui) {
        ui.label("EEG FFT PLOT");
        Plot::new("frequency")
            .height(200.0)
            .include_y(0.0)
            .show(ui, |plot_ui| {
                let points: Vec<[f64; 2]> = self
                    .views
                    .spectrum
                    .points()
                    .into_iter()
                    .filter(|[_, a]| a.is_finite())
                    .collect();
                plot_ui.line(
                    Line::new(PlotPoints::new(points))
                        .name("FFT")
                        .color(Color32::from_rgb(0, 255, 255)),
                );
            });
    }
}

impl eframe::App for EegMonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. 处理控件命令
        self.collect_dropped_files(ctx);
        for cmd in std::mem::take(&mut self.commands) {
            self.apply(cmd);
        }

        // 2. 定时器
        let now = Instant::now();
        let wall_now = Utc::now();
        for due in self.schedule.due_ticks(now) {
            let at = scheduler::to_wall_clock(due, now, wall_now);
            self.controller.tick_at(at, &mut self.views);
        }
        if self.controller.is_updating() {
            ctx.request_repaint_after(self.schedule.until_next(now));
        }

        // 3. UI 绘制
        egui::SidePanel::left("controls").min_width(260.0).show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("EEG Live Monitor");
            ui.label(format!(
                "{} channels, window {}",
                self.controller.config().channel_count,
                self.controller.config().window_size
            ));
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("START").clicked() {
                    self.commands.push(ControlCommand::Start);
                }
                if ui.button("STOP").clicked() {
                    self.commands.push(ControlCommand::Stop);
                }
            });
            let (status, color) = if self.controller.is_updating() {
                ("Streaming", Color32::GREEN)
            } else {
                ("Paused", Color32::YELLOW)
            };
            ui.label(egui::RichText::new(status).color(color).small());
            let buffer = self.controller.buffer();
            ui.label(
                egui::RichText::new(format!(
                    "{} samples, {} labelled, {} pending · {} bins · render #{}",
                    buffer.channel_len(0),
                    buffer.timestamp_len(),
                    self.controller.pending_len(),
                    self.views.spectrum.len(),
                    self.views.generation
                ))
                .small(),
            );

            ui.add_space(10.0);
            ui.label("CSV FILE");
            ui.text_edit_singleline(&mut self.csv_path);
            ui.horizontal(|ui| {
                if ui.button("LOAD").clicked() {
                    self.commands
                        .push(ControlCommand::LoadCsv(PathBuf::from(&self.csv_path)));
                }
                if ui.button("SAVE").clicked() {
                    self.commands
                        .push(ControlCommand::SaveCsv(PathBuf::from(&self.csv_path)));
                }
            });
            ui.label(egui::RichText::new("or drop a .csv file on the window").small());

            ui.add_space(10.0);
            ui.label("SNAPSHOT DIRECTORY");
            ui.text_edit_singleline(&mut self.export_dir);
            if ui.button("EXPORT PNG").clicked() {
                self.commands
                    .push(ControlCommand::ExportPng(PathBuf::from(&self.export_dir)));
            }

            ui.add_space(10.0);
            ui.separator();
            egui::ScrollArea::vertical().max_height(140.0).show(ui, |ui| {
                for m in &self.log_messages {
                    ui.monospace(m);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.draw_time_series(ui);
                ui.separator();
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(ui.available_width() * 0.6);
                        self.draw_frequency(ui);
                    });
                    ui.vertical(|ui| {
                        ui.label("HEAD PLOT");
                        visualizer::draw_head_plot(ui, &self.views.markers);
                    });
                });
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.ticker.cancel();
        self.controller.stop();
    }
}
