//! Per-monitor overlay.
//!
//! An [`AlignWidget`] covers one monitor and holds the retained scene a front
//! end draws: diagonal lines, horizontal alignment lines, the vertical center
//! line, the info box and, on the primary monitor, the control box. Layer
//! visibility and antialiasing follow the session's [`AlignViewModel`] through
//! subscriptions made at construction time.

use crate::display::Rect;
use crate::items::{
    ControlBox, InfoBox, Point, alignment_lines, diagonal_lines, vertical_center_line,
};
use crate::layout::{aligned_center, row_layout};
use crate::model::AlignModel;
use crate::observer::SubscriptionId;
use crate::scene::{GraphicsLayer, Item, LayerKind, Scene};
use crate::view_model::{AlignViewModel, ViewOption};
use std::cell::Cell;
use std::rc::Rc;

/// Horizontal gap between the info box and the control box.
const BOX_SPACING: i32 = 16;

/// View options bound to the visibility of a layer.
const LAYER_BINDINGS: [(ViewOption, LayerKind); 4] = [
    (ViewOption::DiagonalLines, LayerKind::DiagonalLines),
    (ViewOption::HorizontalLines, LayerKind::HorizontalLines),
    (ViewOption::VerticalLines, LayerKind::VerticalLines),
    (ViewOption::InfoBox, LayerKind::InfoBox),
];

/// Transient text shown next to the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Anchor in overlay coordinates.
    pub at: Point,
    pub text: String,
}

/// Full-screen overlay for one monitor.
#[derive(Debug)]
pub struct AlignWidget {
    device_name: String,
    geometry: Rect,
    primary: bool,
    scene: Scene,
    info_box: InfoBox,
    control_box: Option<ControlBox>,
    antialiasing: Rc<Cell<bool>>,
    shown: bool,
    tooltip: Option<Tooltip>,
    subscriptions: Vec<SubscriptionId>,
    normalize_y: i32,
    line_spacing: i32,
}

impl AlignWidget {
    /// Build the overlay for `model`'s monitor and subscribe it to `view_model`.
    ///
    /// `normalize_y` moves virtual y coordinates to a non-negative origin and
    /// must be the same for every overlay of a session so alignment lines
    /// share one grid.
    pub fn new(
        model: &AlignModel,
        view_model: &mut AlignViewModel,
        normalize_y: i32,
        line_spacing: i32,
    ) -> Self {
        let monitor = model.monitor();
        let options = view_model.options();
        let (width, height) = (monitor.screen_width, monitor.screen_height);

        let mut scene = Scene::new();

        let mut diagonal = GraphicsLayer::new(LayerKind::DiagonalLines, options.show_diagonal_lines);
        for line in diagonal_lines(width, height) {
            diagonal.add_to_layer(Item::Line(line));
        }
        scene.add_layer(diagonal);

        scene.add_layer(GraphicsLayer::new(
            LayerKind::HorizontalLines,
            options.show_horizontal_lines,
        ));

        let mut vertical = GraphicsLayer::new(LayerKind::VerticalLines, options.show_vertical_lines);
        vertical.add_to_layer(Item::Line(vertical_center_line(width, height)));
        scene.add_layer(vertical);

        scene.add_layer(GraphicsLayer::new(LayerKind::InfoBox, options.show_info_box));

        let control_box = if monitor.primary {
            scene.add_layer(GraphicsLayer::new(LayerKind::ControlBox, true));
            Some(ControlBox::new())
        } else {
            None
        };

        let mut subscriptions = Vec::with_capacity(LAYER_BINDINGS.len() + 1);
        for (option, kind) in LAYER_BINDINGS {
            if let Some(layer) = scene.layer(kind) {
                let flag = layer.visibility();
                subscriptions.push(view_model.subscribe(option, move |visible| flag.set(*visible)));
            }
        }
        let antialiasing = Rc::new(Cell::new(options.antialiasing));
        let flag = Rc::clone(&antialiasing);
        subscriptions.push(view_model.subscribe(ViewOption::Antialiasing, move |on| flag.set(*on)));

        let mut widget = Self {
            device_name: monitor.device_name.clone(),
            geometry: monitor.rect(),
            primary: monitor.primary,
            scene,
            info_box: InfoBox::new(model),
            control_box,
            antialiasing,
            shown: false,
            tooltip: None,
            subscriptions,
            normalize_y,
            line_spacing,
        };
        widget.refresh(model);
        widget
    }

    /// Rebuild the parts of the scene that depend on the model's position.
    pub fn refresh(&mut self, model: &AlignModel) {
        let lines = alignment_lines(model, self.normalize_y, self.line_spacing);
        if let Some(layer) = self.scene.layer_mut(LayerKind::HorizontalLines) {
            layer.clear();
            for line in lines {
                layer.add_to_layer(Item::Line(line));
            }
        }

        self.info_box = InfoBox::new(model);
        self.arrange_items();

        if let Some(layer) = self.scene.layer_mut(LayerKind::InfoBox) {
            layer.clear();
            layer.add_to_layer(Item::InfoBox(self.info_box.clone()));
        }
        if let Some(control_box) = &self.control_box {
            if let Some(layer) = self.scene.layer_mut(LayerKind::ControlBox) {
                layer.clear();
                layer.add_to_layer(Item::ControlBox(control_box.clone()));
            }
        }
    }

    /// Center the info box, or the info box and control box side by side.
    fn arrange_items(&mut self) {
        let screen = Rect::new(0, 0, self.geometry.width, self.geometry.height);
        match &mut self.control_box {
            Some(control_box) => {
                let rects = row_layout(
                    &[
                        (self.info_box.size(), self.info_box.margins),
                        (control_box.size(), control_box.margins),
                    ],
                    BOX_SPACING,
                    screen,
                );
                self.info_box.rect = rects[0];
                control_box.rect = rects[1];
            }
            None => {
                self.info_box.rect = aligned_center(self.info_box.size(), screen);
            }
        }
    }

    /// Mark the overlay as shown borderless over its whole monitor.
    pub fn show_full_screen(&mut self) {
        log::debug!("showing overlay for {} at {:?}", self.device_name, self.geometry);
        self.shown = true;
    }

    /// Hide the overlay and drop its view model subscriptions.
    pub fn close(&mut self, view_model: &mut AlignViewModel) {
        for id in self.subscriptions.drain(..) {
            view_model.unsubscribe(id);
        }
        self.tooltip = None;
        self.shown = false;
    }

    pub fn is_visible(&self) -> bool {
        self.shown
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Window rectangle in virtual screen coordinates.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn info_box(&self) -> &InfoBox {
        &self.info_box
    }

    pub fn control_box(&self) -> Option<&ControlBox> {
        self.control_box.as_ref()
    }

    /// Whether the rendering surface should antialias.
    pub fn antialiasing(&self) -> bool {
        self.antialiasing.get()
    }

    /// Whether a layer is currently visible.
    pub fn is_layer_visible(&self, kind: LayerKind) -> bool {
        self.scene.layer(kind).is_some_and(GraphicsLayer::is_visible)
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Show the global cursor coordinates next to the pointer.
    pub fn show_tooltip(&mut self, global_x: i32, global_y: i32) {
        self.tooltip = Some(Tooltip {
            at: Point::new(
                (global_x - self.geometry.x) as f32,
                (global_y - self.geometry.y) as f32,
            ),
            text: format!("{global_x}, {global_y}"),
        });
    }

    pub fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::two_monitor_backend;
    use crate::view_model::ViewOptions;
    use crate::vscreen::VScreen;

    fn models() -> (AlignModel, AlignModel) {
        let vscreen = VScreen::load(two_monitor_backend()).unwrap();
        (
            AlignModel::new(vscreen.monitor("DP-1").unwrap()),
            AlignModel::new(vscreen.monitor("HDMI-1").unwrap()),
        )
    }

    #[test]
    fn test_primary_has_control_box_beside_info_box() {
        let (primary, _) = models();
        let mut view_model = AlignViewModel::new(ViewOptions::default());
        let widget = AlignWidget::new(&primary, &mut view_model, 0, 100);

        let control_box = widget.control_box().unwrap();
        let info = widget.info_box();
        assert!(widget.scene().layer(LayerKind::ControlBox).is_some());
        assert_eq!(control_box.rect.x - info.rect.right(), 8 + BOX_SPACING + 8);

        // The row is centered on the 1920 px wide screen.
        let left = info.rect.x - info.margins.left;
        let right = control_box.rect.right() + control_box.margins.right;
        assert!((left - (1920 - right)).abs() <= 1);
    }

    #[test]
    fn test_secondary_info_box_is_centered() {
        let (_, secondary) = models();
        let mut view_model = AlignViewModel::default();
        let widget = AlignWidget::new(&secondary, &mut view_model, 0, 100);

        assert!(widget.control_box().is_none());
        assert!(widget.scene().layer(LayerKind::ControlBox).is_none());
        let rect = widget.info_box().rect;
        assert_eq!(rect, aligned_center(widget.info_box().size(), Rect::new(0, 0, 1280, 1024)));
        assert_eq!(widget.geometry(), Rect::new(1920, 0, 1280, 1024));
    }

    #[test]
    fn test_layers_follow_view_model() {
        let (primary, secondary) = models();
        let mut view_model = AlignViewModel::default();
        let a = AlignWidget::new(&primary, &mut view_model, 0, 100);
        let b = AlignWidget::new(&secondary, &mut view_model, 0, 100);

        view_model.set(ViewOption::DiagonalLines, false);
        view_model.set(ViewOption::Antialiasing, false);

        for widget in [&a, &b] {
            assert!(!widget.is_layer_visible(LayerKind::DiagonalLines));
            assert!(widget.is_layer_visible(LayerKind::VerticalLines));
            assert!(!widget.antialiasing());
        }
    }

    #[test]
    fn test_close_unsubscribes() {
        let (_, secondary) = models();
        let mut view_model = AlignViewModel::default();
        let mut widget = AlignWidget::new(&secondary, &mut view_model, 0, 100);
        widget.show_full_screen();
        assert_eq!(view_model.subscriber_count(ViewOption::InfoBox), 1);

        widget.close(&mut view_model);
        assert!(!widget.is_visible());
        assert_eq!(view_model.subscriber_count(ViewOption::InfoBox), 0);
        view_model.set(ViewOption::InfoBox, false);
        assert!(widget.is_layer_visible(LayerKind::InfoBox));
    }

    #[test]
    fn test_refresh_moves_alignment_lines() {
        let (_, mut secondary) = models();
        let mut view_model = AlignViewModel::default();
        let mut widget = AlignWidget::new(&secondary, &mut view_model, 0, 100);

        let first_line = |widget: &AlignWidget| match widget
            .scene()
            .layer(LayerKind::HorizontalLines)
            .unwrap()
            .items()
            .first()
        {
            Some(Item::Line(line)) => line.from.y,
            other => panic!("unexpected item {other:?}"),
        };
        assert_eq!(first_line(&widget), 0.0);

        secondary.nudge(0, 10);
        widget.refresh(&secondary);
        assert_eq!(first_line(&widget), 90.0);
        assert_eq!(widget.info_box().lines[2], "Position: 1920, 10");
    }

    #[test]
    fn test_tooltip_uses_local_anchor_and_global_text() {
        let (_, secondary) = models();
        let mut view_model = AlignViewModel::default();
        let mut widget = AlignWidget::new(&secondary, &mut view_model, 0, 100);

        widget.show_tooltip(2000, 50);
        let tooltip = widget.tooltip().unwrap();
        assert_eq!(tooltip.at, Point::new(80.0, 50.0));
        assert_eq!(tooltip.text, "2000, 50");
        widget.hide_tooltip();
        assert!(widget.tooltip().is_none());
    }
}
