//! The figure document: an ordered collection where index is z-order.

use crate::figure::{Figure, FigureId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Ordered figure store. Index 0 paints first (bottom); the last figure
/// paints last (top). Membership is unique by figure id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    figures: Vec<Figure>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Figures in z-order, bottom to top.
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    /// Append a figure on top.
    pub fn add(&mut self, figure: Figure) -> FigureId {
        let id = figure.id;
        self.figures.push(figure);
        id
    }

    /// Remove a figure by id.
    pub fn remove(&mut self, id: FigureId) -> Option<Figure> {
        let pos = self.figures.iter().position(|f| f.id == id)?;
        Some(self.figures.remove(pos))
    }

    /// Remove every figure.
    pub fn clear(&mut self) {
        self.figures.clear();
    }

    pub fn contains(&self, id: FigureId) -> bool {
        self.figures.iter().any(|f| f.id == id)
    }

    pub fn get(&self, id: FigureId) -> Option<&Figure> {
        self.figures.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: FigureId) -> Option<&mut Figure> {
        self.figures.iter_mut().find(|f| f.id == id)
    }

    /// Move a figure to the end of the paint order (topmost). Relative order
    /// of the other figures is preserved.
    pub fn bring_to_front(&mut self, id: FigureId) {
        if let Some(fig) = self.remove(id) {
            self.figures.push(fig);
        }
    }

    /// Move a figure to index 0 (bottommost).
    pub fn send_to_back(&mut self, id: FigureId) {
        if let Some(fig) = self.remove(id) {
            self.figures.insert(0, fig);
        }
    }

    /// Topmost figure under `point`, scanning from the end of the list so
    /// later-drawn figures win, matching their visual occlusion.
    pub fn figure_at_point(&self, point: Point) -> Option<FigureId> {
        self.figures
            .iter()
            .rev()
            .find(|f| f.point_inside(point))
            .map(|f| f.id)
    }

    /// Union of all figure bounds, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        self.figures
            .iter()
            .map(|f| f.bounds())
            .reduce(|acc, b| acc.union(b))
    }

    /// Extent rectangle anchored at the origin whose far corner covers every
    /// figure, for sizing a scrollable viewport.
    pub fn client_rect(&self) -> Rect {
        match self.bounds() {
            Some(b) => Rect::new(0.0, 0.0, b.x1, b.y1),
            None => Rect::ZERO,
        }
    }

    /// Alias-free deep copy of the figure list.
    pub fn snapshot(&self) -> Vec<Figure> {
        self.figures.clone()
    }

    /// Replace the whole figure list, used by undo/redo and load.
    pub fn restore(&mut self, figures: Vec<Figure>) {
        self.figures = figures;
    }
}
