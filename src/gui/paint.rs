//! Painting of overlay scenes with egui.

use crate::display::Rect;
use crate::items::{BOX_PADDING, ControlAction, ControlBox, InfoBox, LINE_HEIGHT, LineItem, Point};
use crate::scene::{Item, LayerKind};
use crate::view_model::AlignViewModel;
use crate::widget::AlignWidget;
use eframe::egui::{self, Color32, FontId, Stroke};

const BACKGROUND: Color32 = Color32::BLACK;
const BOX_FILL: Color32 = Color32::from_rgb(24, 24, 24);
const TEXT: Color32 = Color32::WHITE;
const TOOLTIP_OFFSET: f32 = 16.0;

fn layer_stroke(kind: LayerKind) -> Stroke {
    match kind {
        LayerKind::DiagonalLines => Stroke::new(1.0, Color32::from_rgb(0, 160, 255)),
        LayerKind::HorizontalLines => Stroke::new(1.0, Color32::from_rgb(255, 64, 64)),
        LayerKind::VerticalLines => Stroke::new(1.0, Color32::from_rgb(64, 255, 64)),
        LayerKind::InfoBox | LayerKind::ControlBox => Stroke::new(1.0, Color32::GRAY),
    }
}

/// Converts overlay pixels to egui points inside the panel.
#[derive(Debug, Clone, Copy)]
struct Mapper {
    origin: egui::Pos2,
    pixels_per_point: f32,
}

impl Mapper {
    fn point(&self, p: Point) -> egui::Pos2 {
        self.origin + egui::vec2(p.x, p.y) / self.pixels_per_point
    }

    fn rect(&self, r: Rect) -> egui::Rect {
        egui::Rect::from_min_max(
            self.point(Point::new(r.x as f32, r.y as f32)),
            self.point(Point::new(r.right() as f32, r.bottom() as f32)),
        )
    }
}

/// Paint `widget`'s scene into the central panel and return the control
/// actions the user triggered this frame.
pub fn overlay(
    ctx: &egui::Context,
    widget: &AlignWidget,
    view_model: &AlignViewModel,
) -> Vec<ControlAction> {
    ctx.tessellation_options_mut(|options| options.feathering = widget.antialiasing());

    let mut actions = Vec::new();
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(BACKGROUND))
        .show(ctx, |ui| {
            let mapper = Mapper {
                origin: ui.max_rect().min,
                pixels_per_point: ctx.pixels_per_point(),
            };
            for layer in widget.scene().layers() {
                if !layer.is_visible() {
                    continue;
                }
                let stroke = layer_stroke(layer.kind());
                for item in layer.items() {
                    match item {
                        Item::Line(line) => paint_line(ui.painter(), mapper, line, stroke),
                        Item::InfoBox(info) => paint_info_box(ui.painter(), mapper, info, stroke),
                        Item::ControlBox(controls) => {
                            actions.extend(control_box(ui, mapper, controls, view_model, stroke));
                        }
                    }
                }
            }
            if let Some(tooltip) = widget.tooltip() {
                ui.painter().text(
                    mapper.point(tooltip.at) + egui::vec2(TOOLTIP_OFFSET, TOOLTIP_OFFSET),
                    egui::Align2::LEFT_TOP,
                    &tooltip.text,
                    FontId::monospace(14.0),
                    TEXT,
                );
            }
        });
    actions
}

fn paint_line(painter: &egui::Painter, mapper: Mapper, line: &LineItem, stroke: Stroke) {
    painter.line_segment([mapper.point(line.from), mapper.point(line.to)], stroke);
}

fn paint_info_box(painter: &egui::Painter, mapper: Mapper, info: &InfoBox, stroke: Stroke) {
    let rect = mapper.rect(info.rect);
    painter.rect(rect, 4.0, BOX_FILL, stroke);

    let mut y = info.rect.y + BOX_PADDING;
    for line in &info.lines {
        painter.text(
            mapper.point(Point::new((info.rect.x + BOX_PADDING) as f32, y as f32)),
            egui::Align2::LEFT_TOP,
            line,
            FontId::monospace(14.0),
            TEXT,
        );
        y += LINE_HEIGHT;
    }
}

fn control_box(
    ui: &mut egui::Ui,
    mapper: Mapper,
    controls: &ControlBox,
    view_model: &AlignViewModel,
    stroke: Stroke,
) -> Vec<ControlAction> {
    ui.painter().rect(mapper.rect(controls.rect), 4.0, BOX_FILL, stroke);

    let mut triggered = Vec::new();
    for control in controls.controls() {
        let rect = mapper.rect(control.rect);
        match control.action {
            ControlAction::Toggle(option) => {
                let mut checked = view_model.get(option);
                if ui
                    .put(rect, egui::Checkbox::new(&mut checked, option.label()))
                    .changed()
                {
                    triggered.push(control.action);
                }
            }
            action => {
                if ui.put(rect, egui::Button::new(action.label())).clicked() {
                    triggered.push(action);
                }
            }
        }
    }
    triggered
}
