//! Selection state: an ordered id set, always a subset of the document.

use crate::document::Document;
use crate::figure::FigureId;
use kurbo::Rect;

/// Focus outcome of a selection mutation, turned into a selection-changed
/// notification by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Nothing to announce.
    Unchanged,
    /// This figure now has focus.
    Focused(FigureId),
    /// No figure has focus.
    Cleared,
}

/// Ordered set of selected figure ids; insertion order is significant, the
/// last entry is the most recently selected figure.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: Vec<FigureId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids, oldest first.
    pub fn ids(&self) -> &[FigureId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: FigureId) -> bool {
        self.ids.contains(&id)
    }

    /// Most recently selected id.
    pub fn last(&self) -> Option<FigureId> {
        self.ids.last().copied()
    }

    /// The single selected id, if exactly one figure is selected.
    pub fn sole(&self) -> Option<FigureId> {
        match self.ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Modifier-key selection: absent figures are added and focused; a
    /// present figure is removed with focus handed to its neighbor (the one
    /// before it, or the one after when it was first). The sole remaining
    /// entry is never removed, but still emits a focus event.
    pub fn toggle(&mut self, id: FigureId) -> SelectionChange {
        match self.ids.iter().position(|&x| x == id) {
            Some(pos) => {
                if self.ids.len() > 1 {
                    let neighbor = if pos == 0 {
                        self.ids[pos + 1]
                    } else {
                        self.ids[pos - 1]
                    };
                    self.ids.remove(pos);
                    SelectionChange::Focused(neighbor)
                } else {
                    SelectionChange::Focused(id)
                }
            }
            None => {
                self.ids.push(id);
                SelectionChange::Focused(id)
            }
        }
    }

    /// Plain selection: select only this figure, unless it is already the
    /// sole selected one.
    pub fn replace_with(&mut self, id: FigureId) -> SelectionChange {
        if self.sole() == Some(id) {
            return SelectionChange::Unchanged;
        }
        self.ids.clear();
        self.ids.push(id);
        SelectionChange::Focused(id)
    }

    /// Empty the selection.
    pub fn clear(&mut self) -> SelectionChange {
        self.ids.clear();
        SelectionChange::Cleared
    }

    /// Remove one id, used when its figure leaves the document.
    pub fn remove(&mut self, id: FigureId) {
        self.ids.retain(|&x| x != id);
    }

    /// Select every document figure, in document order.
    pub fn select_all(&mut self, document: &Document) {
        self.ids = document.figures().iter().map(|f| f.id).collect();
    }

    /// Replace the selection with every figure whose bounds are fully
    /// contained by `rect`. Marquee selection is containment, not
    /// intersection.
    pub fn select_all_within(&mut self, rect: Rect, document: &Document) {
        self.ids = document
            .figures()
            .iter()
            .filter(|f| rect_contains_rect(rect, f.bounds()))
            .map(|f| f.id)
            .collect();
    }
}

fn rect_contains_rect(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && inner.x1 <= outer.x1 && outer.y0 <= inner.y0 && inner.y1 <= outer.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Figure, FigureKind};
    use kurbo::Point;

    fn id() -> FigureId {
        uuid::Uuid::new_v4()
    }

    fn square_at(x: f64, y: f64, size: f64) -> Figure {
        Figure::new(
            FigureKind::Polygon,
            vec![
                Point::new(x, y),
                Point::new(x + size, y),
                Point::new(x + size, y + size),
                Point::new(x, y + size),
            ],
        )
    }

    #[test]
    fn test_toggle_adds_and_focuses() {
        let mut sel = Selection::new();
        let a = id();
        assert_eq!(sel.toggle(a), SelectionChange::Focused(a));
        assert!(sel.contains(a));
    }

    #[test]
    fn test_toggle_off_focuses_neighbor() {
        let mut sel = Selection::new();
        let (a, b, c) = (id(), id(), id());
        sel.toggle(a);
        sel.toggle(b);
        sel.toggle(c);

        // Removing a middle entry focuses the one before it.
        assert_eq!(sel.toggle(b), SelectionChange::Focused(a));
        assert_eq!(sel.ids(), &[a, c]);

        // Removing the first entry focuses the one after it.
        assert_eq!(sel.toggle(a), SelectionChange::Focused(c));
        assert_eq!(sel.ids(), &[c]);
    }

    #[test]
    fn test_toggle_never_empties() {
        let mut sel = Selection::new();
        let a = id();
        sel.toggle(a);
        // Toggling off the sole member keeps it and still focuses it.
        assert_eq!(sel.toggle(a), SelectionChange::Focused(a));
        assert_eq!(sel.ids(), &[a]);
    }

    #[test]
    fn test_replace_with() {
        let mut sel = Selection::new();
        let (a, b) = (id(), id());
        sel.toggle(a);
        assert_eq!(sel.replace_with(b), SelectionChange::Focused(b));
        assert_eq!(sel.ids(), &[b]);
        // Already selected: no change, no focus event.
        assert_eq!(sel.replace_with(b), SelectionChange::Unchanged);
    }

    #[test]
    fn test_replace_with_collapses_multi_selection() {
        let mut sel = Selection::new();
        let (a, b) = (id(), id());
        sel.toggle(a);
        sel.toggle(b);
        // Plain-clicking a member of a multi-selection narrows to it.
        assert_eq!(sel.replace_with(a), SelectionChange::Focused(a));
        assert_eq!(sel.ids(), &[a]);
    }

    #[test]
    fn test_marquee_is_containment() {
        let mut doc = Document::new();
        let a = doc.add(square_at(0.0, 0.0, 5.0));
        let b = doc.add(square_at(20.0, 20.0, 5.0));

        let mut sel = Selection::new();
        sel.select_all_within(Rect::new(0.0, 0.0, 10.0, 10.0), &doc);
        assert_eq!(sel.ids(), &[a]);

        sel.select_all_within(Rect::new(0.0, 0.0, 30.0, 30.0), &doc);
        assert_eq!(sel.ids(), &[a, b]);

        // Intersection without containment selects nothing.
        sel.select_all_within(Rect::new(3.0, 3.0, 10.0, 10.0), &doc);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_select_all() {
        let mut doc = Document::new();
        let a = doc.add(square_at(0.0, 0.0, 5.0));
        let b = doc.add(square_at(20.0, 20.0, 5.0));
        let mut sel = Selection::new();
        sel.select_all(&doc);
        assert_eq!(sel.ids(), &[a, b]);
    }
}
