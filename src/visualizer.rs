// src/visualizer.rs
use crate::drivers::plot::cubic_points;
use crate::drivers::{jet_rgb, HeadOutline, SpatialMarker};
use eframe::egui;
use egui::{Color32, Pos2, Shape, Stroke, Vec2};
/// Plot units visible on each side of the head centre.
const VIEW_EXTENT: f32 = 1.5;
/// Marker radius cap so a spike does not cover the whole head.
const MAX_MARKER_RADIUS: f32 = 40.0;
pub fn draw_head_plot(ui: &mut egui::Ui, markers: &[SpatialMarker]) {
    let outline_color = Color32::from_rgb(180, 180, 185);
    let text_color = Color32::from_rgb(220, 220, 220);
    let side = ui.available_width().min(360.0).max(160.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(side), egui::Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let scale = side / (2.0 * VIEW_EXTENT);
    // plot y points up, screen y points down
    let to_screen = |(x, y): (f64, f64)| -> Pos2 { center + Vec2::new(x as f32, -(y as f32)) * scale };
    let stroke = Stroke::new(1.5, outline_color);
    // 1. Head outline
    painter.circle_stroke(center, HeadOutline::RADIUS as f32 * scale, stroke);
    painter.add(Shape::closed_line(
        HeadOutline::NOSE.iter().copied().map(to_screen).collect(),
        stroke,
    ));
    for ear in [HeadOutline::LEFT_EAR, HeadOutline::right_ear()] {
        painter.add(Shape::line(
            cubic_points(ear, 24).into_iter().map(to_screen).collect(),
            stroke,
        ));
    }
    // 2. Electrodes
    for marker in markers {
        let pos = to_screen((marker.x, marker.y));
        let (r, g, b) = jet_rgb(marker.color_position);
        let radius = (marker.size as f32 / 2.0).min(MAX_MARKER_RADIUS);
        painter.circle_filled(pos, radius, Color32::from_rgb(r, g, b));
        painter.circle_stroke(pos, radius, Stroke::new(1.0, Color32::BLACK));
        painter.text(
            pos - Vec2::new(0.0, radius + 2.0),
            egui::Align2::CENTER_BOTTOM,
            &marker.label,
            egui::FontId::proportional(12.0),
            text_color,
        );
    }
    if markers.is_empty() {
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "NO CHANNELS",
            egui::FontId::proportional(12.0),
            text_color,
        );
    }
}
