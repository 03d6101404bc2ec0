//! Layered retained scene for one overlay.

use crate::items::{ControlBox, InfoBox, LineItem};
use std::cell::Cell;
use std::rc::Rc;

/// Scene layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    DiagonalLines = 1,
    HorizontalLines = 2,
    VerticalLines = 3,
    InfoBox = 4,
    ControlBox = 5,
}

impl LayerKind {
    /// Stacking level; higher levels are drawn on top.
    pub fn level(&self) -> u8 {
        *self as u8
    }
}

/// Drawable content of a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Line(LineItem),
    InfoBox(InfoBox),
    ControlBox(ControlBox),
}

/// A group of items sharing one visibility flag.
///
/// The flag is shared so view model subscriptions can flip it without
/// borrowing the scene.
#[derive(Debug, Clone)]
pub struct GraphicsLayer {
    kind: LayerKind,
    visible: Rc<Cell<bool>>,
    items: Vec<Item>,
}

impl GraphicsLayer {
    pub fn new(kind: LayerKind, visible: bool) -> Self {
        Self {
            kind,
            visible: Rc::new(Cell::new(visible)),
            items: Vec::new(),
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Shared handle on the visibility flag.
    pub fn visibility(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.visible)
    }

    pub fn add_to_layer(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// All layers of one overlay, kept sorted by level.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    layers: Vec<GraphicsLayer>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer, replacing any existing layer of the same kind.
    pub fn add_layer(&mut self, layer: GraphicsLayer) {
        self.layers.retain(|l| l.kind != layer.kind);
        let index = self
            .layers
            .partition_point(|l| l.kind.level() < layer.kind.level());
        self.layers.insert(index, layer);
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&GraphicsLayer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> Option<&mut GraphicsLayer> {
        self.layers.iter_mut().find(|l| l.kind == kind)
    }

    /// Layers back to front.
    pub fn layers(&self) -> &[GraphicsLayer] {
        &self.layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_sorted_by_level() {
        let mut scene = Scene::new();
        scene.add_layer(GraphicsLayer::new(LayerKind::InfoBox, true));
        scene.add_layer(GraphicsLayer::new(LayerKind::DiagonalLines, true));
        scene.add_layer(GraphicsLayer::new(LayerKind::VerticalLines, true));

        let kinds: Vec<_> = scene.layers().iter().map(GraphicsLayer::kind).collect();
        assert_eq!(
            kinds,
            [
                LayerKind::DiagonalLines,
                LayerKind::VerticalLines,
                LayerKind::InfoBox
            ]
        );
    }

    #[test]
    fn test_shared_visibility_flag() {
        let mut scene = Scene::new();
        let mut lines = GraphicsLayer::new(LayerKind::DiagonalLines, true);
        lines.add_to_layer(Item::Line(LineItem::new(0.0, 0.0, 1.0, 1.0)));
        let visibility = lines.visibility();
        scene.add_layer(lines);

        let layer = scene.layer(LayerKind::DiagonalLines).unwrap();
        assert!(layer.is_visible());
        assert_eq!(layer.items().len(), 1);
        visibility.set(false);
        assert!(!scene.layer(LayerKind::DiagonalLines).unwrap().is_visible());
    }

    #[test]
    fn test_add_layer_replaces_same_kind() {
        let mut scene = Scene::new();
        scene.add_layer(GraphicsLayer::new(LayerKind::InfoBox, true));
        scene.add_layer(GraphicsLayer::new(LayerKind::InfoBox, false));
        assert_eq!(scene.layers().len(), 1);
        assert!(!scene.layer(LayerKind::InfoBox).unwrap().is_visible());
    }
}
