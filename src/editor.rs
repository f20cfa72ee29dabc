//! The interaction state machine.
//!
//! [`Editor`] owns the document, selection, history and rubber-band state
//! and interprets pointer and keyboard input into figure mutations. Hosts
//! feed it pointer events, drain [`EditorEvent`]s after each call, and
//! query preview geometry while a drag is live. Every mutation that marks
//! the document changed snapshots the pre-change state first, so undo
//! always restores the state immediately before the change.

use std::mem;
use std::path::{Path, PathBuf};

use kurbo::{BezPath, Point, Rect, Vec2};
use log::debug;

use crate::clipboard::{self, Clipboard, ClipboardError};
use crate::document::Document;
use crate::figure::{
    Figure, FigureId, FigureKind, POLYLINE_PICK_FACTOR, point_to_segment_dist,
};
use crate::history::History;
use crate::marker::{
    CursorGlyph, MARKER_BODY, cursor_for_marker, node_index_of, resolve_marker,
};
use crate::ribbon::{RibbonMode, RibbonSelector};
use crate::selection::{Selection, SelectionChange};
use crate::storage::{self, StorageError};
use crate::style::{Color, Fill, Stroke};
use crate::transform::{moved_points, node_moved_points, resized_points};

/// Offset added per paste while the clipboard contents are unchanged.
const PASTE_STEP: Vec2 = Vec2::new(5.0, 5.0);

/// Current interpretation of a press-drag-release gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Clicks select; background drags marquee-select.
    #[default]
    Selection,
    /// A figure or marker drag is in progress.
    Dragging,
    /// The next drag creates a two-point polyline.
    AddLine,
    /// The next drag creates an axis-aligned rectangle polygon.
    AddPolygon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// What sits under a context-menu request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextTarget {
    Figure(FigureId),
    Background,
}

/// Notifications for the host, drained with [`Editor::take_events`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// Something visible changed.
    Repaint,
    /// The document's overall extent may have grown; viewports should
    /// recompute their scrollable area.
    ExtentChanged,
    /// Focus moved to this figure, or to none.
    SelectionChanged(Option<FigureId>),
    /// A secondary-button press asked for a context menu.
    ContextMenu { at: Point, target: ContextTarget },
}

/// The figure editor core.
pub struct Editor {
    document: Document,
    selection: Selection,
    history: History,
    ribbon: RibbonSelector,
    mode: EditorMode,
    /// Node-editing sub-mode; only meaningful while exactly one figure is
    /// selected, and dropped by any selection change.
    node_changing: bool,
    /// Marker being dragged while in [`EditorMode::Dragging`].
    marker_index: i32,
    press_origin: Point,
    pointer_offset: Vec2,
    primary_down: bool,
    ctrl_pressed: bool,
    alt_pressed: bool,
    cursor: CursorGlyph,
    default_stroke: Stroke,
    default_fill: Fill,
    paste_offset: Vec2,
    file_name: Option<PathBuf>,
    events: Vec<EditorEvent>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            selection: Selection::new(),
            history: History::new(),
            ribbon: RibbonSelector::new(),
            mode: EditorMode::Selection,
            node_changing: false,
            marker_index: MARKER_BODY,
            press_origin: Point::ZERO,
            pointer_offset: Vec2::ZERO,
            primary_down: false,
            ctrl_pressed: false,
            alt_pressed: false,
            cursor: CursorGlyph::Default,
            default_stroke: Stroke::default(),
            default_fill: Fill::default(),
            paste_offset: Vec2::ZERO,
            file_name: None,
            events: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn ribbon(&self) -> &RibbonSelector {
        &self.ribbon
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Arm the next drag gesture. Leaving `Selection` drops node editing.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        if mode != EditorMode::Selection {
            self.node_changing = false;
        }
    }

    pub fn node_changing(&self) -> bool {
        self.node_changing
    }

    pub fn cursor(&self) -> CursorGlyph {
        self.cursor
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn default_stroke(&self) -> Stroke {
        self.default_stroke
    }

    pub fn default_fill(&self) -> Fill {
        self.default_fill
    }

    /// Stroke applied to newly created figures.
    pub fn set_default_stroke(&mut self, stroke: Stroke) {
        self.default_stroke = stroke;
    }

    /// Fill applied to newly created figures.
    pub fn set_default_fill(&mut self, fill: Fill) {
        self.default_fill = fill;
    }

    /// Latch the modifier keys read during press and arrow-key handling.
    pub fn set_modifiers(&mut self, ctrl: bool, alt: bool) {
        self.ctrl_pressed = ctrl;
        self.alt_pressed = alt;
    }

    /// Drain pending notifications.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        mem::take(&mut self.events)
    }

    // ---- pointer input ----

    pub fn pointer_press(&mut self, point: Point, button: PointerButton) {
        self.press_origin = point;
        self.pointer_offset = Vec2::ZERO;
        if button == PointerButton::Secondary {
            self.secondary_press(point);
            return;
        }
        self.primary_down = true;
        match self.mode {
            EditorMode::Selection => {
                if let Some((_, marker)) = self.marker_under(point) {
                    self.marker_index = marker;
                    self.begin_drag();
                } else if let Some(id) = self.document.figure_at_point(point) {
                    let change = if self.ctrl_pressed {
                        self.selection.toggle(id)
                    } else {
                        self.selection.replace_with(id)
                    };
                    self.note_selection_change(change);
                    self.marker_index = MARKER_BODY;
                    self.begin_drag();
                } else {
                    if !self.selection.is_empty() {
                        let change = self.selection.clear();
                        self.note_selection_change(change);
                    }
                    self.ribbon.press(point);
                }
                self.events.push(EditorEvent::Repaint);
            }
            EditorMode::AddLine => {
                self.ribbon.set_mode(RibbonMode::SolidLine);
                self.ribbon.press(point);
            }
            EditorMode::AddPolygon => {
                self.ribbon.set_mode(RibbonMode::SolidRectangle);
                self.ribbon.press(point);
            }
            EditorMode::Dragging => {}
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        if self.mode == EditorMode::Dragging {
            self.pointer_offset = point - self.press_origin;
            self.events.push(EditorEvent::Repaint);
        } else if self.primary_down {
            self.ribbon.drag(point);
            self.events.push(EditorEvent::Repaint);
        } else {
            self.cursor = self.cursor_at(point);
        }
    }

    pub fn pointer_release(&mut self, point: Point, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        self.primary_down = false;
        match self.mode {
            EditorMode::Dragging => {
                self.commit_drag(point - self.press_origin);
                self.marker_index = MARKER_BODY;
                self.pointer_offset = Vec2::ZERO;
                self.mode = EditorMode::Selection;
                self.ribbon.set_disabled(false);
            }
            EditorMode::Selection => {
                if let Some(rect) = self.ribbon.release() {
                    self.selection.select_all_within(rect, &self.document);
                    self.node_changing = false;
                    self.events
                        .push(EditorEvent::SelectionChanged(self.selection.last()));
                    self.events.push(EditorEvent::Repaint);
                }
            }
            EditorMode::AddLine => {
                self.ribbon.release();
                self.finish_add(point, FigureKind::Polyline);
            }
            EditorMode::AddPolygon => {
                self.ribbon.release();
                self.finish_add(point, FigureKind::Polygon);
            }
        }
    }

    fn secondary_press(&mut self, point: Point) {
        // A context request aborts any gesture and forces plain selection.
        self.mode = EditorMode::Selection;
        self.ribbon.set_disabled(false);
        let target = match self.document.figure_at_point(point) {
            Some(id) => {
                let change = self.selection.replace_with(id);
                self.note_selection_change(change);
                ContextTarget::Figure(id)
            }
            None => {
                if !self.selection.is_empty() {
                    let change = self.selection.clear();
                    self.note_selection_change(change);
                }
                ContextTarget::Background
            }
        };
        self.events.push(EditorEvent::ContextMenu { at: point, target });
        self.events.push(EditorEvent::Repaint);
    }

    fn begin_drag(&mut self) {
        self.mode = EditorMode::Dragging;
        self.ribbon.set_disabled(true);
    }

    /// Resolve the marker of a selected figure under `point`, scanning the
    /// selection newest-first so the most recently selected figure wins.
    fn marker_under(&self, point: Point) -> Option<(FigureId, i32)> {
        for &id in self.selection.ids().iter().rev() {
            if let Some(figure) = self.document.get(id) {
                if let Some(marker) = resolve_marker(point, figure, self.node_changing) {
                    return Some((id, marker));
                }
            }
        }
        None
    }

    /// Pointer glyph for hovering `point` with no button held.
    pub fn cursor_at(&self, point: Point) -> CursorGlyph {
        if let Some((_, marker)) = self.marker_under(point) {
            return cursor_for_marker(marker);
        }
        if self.document.figure_at_point(point).is_some() {
            return CursorGlyph::Move;
        }
        CursorGlyph::Default
    }

    fn commit_drag(&mut self, offset: Vec2) {
        if offset == Vec2::ZERO {
            // Press-release without movement is a no-op move; nothing to
            // snapshot or apply.
            return;
        }
        let marker = self.marker_index;
        let applies = if marker < 0 {
            self.node_changing && self.selection.sole().is_some()
        } else {
            !self.selection.is_empty()
        };
        if !applies {
            return;
        }
        self.mark_changed();
        if marker < 0 {
            if let Some(id) = self.selection.sole() {
                if let Some(figure) = self.document.get_mut(id) {
                    figure.points = node_moved_points(figure, offset, marker);
                }
            }
        } else {
            let ids: Vec<FigureId> = self.selection.ids().to_vec();
            for id in ids {
                if let Some(figure) = self.document.get_mut(id) {
                    figure.points = if marker == MARKER_BODY {
                        moved_points(figure, offset)
                    } else {
                        resized_points(figure, offset, marker)
                    };
                }
            }
        }
        self.events.push(EditorEvent::Repaint);
        self.events.push(EditorEvent::ExtentChanged);
    }

    fn finish_add(&mut self, point: Point, kind: FigureKind) {
        self.mode = EditorMode::Selection;
        self.ribbon.set_mode(RibbonMode::DotRectangle);
        if point == self.press_origin {
            return;
        }
        let points = match kind {
            FigureKind::Polyline => vec![self.press_origin, point],
            FigureKind::Polygon => {
                let rect = Rect::from_points(self.press_origin, point);
                vec![
                    Point::new(rect.x0, rect.y0),
                    Point::new(rect.x1, rect.y0),
                    Point::new(rect.x1, rect.y1),
                    Point::new(rect.x0, rect.y1),
                ]
            }
        };
        self.mark_changed();
        let mut figure = Figure::new(kind, points);
        figure.stroke = self.default_stroke;
        figure.fill = self.default_fill;
        let id = self.document.add(figure);
        let change = self.selection.replace_with(id);
        self.note_selection_change(change);
        self.events.push(EditorEvent::Repaint);
        self.events.push(EditorEvent::ExtentChanged);
    }

    // ---- commands over the selection ----

    /// Arrow-key nudge: direction is a unit step per axis, scaled by the
    /// latched modifiers (Ctrl moves 1 unit, Alt moves 10, neither moves 0).
    pub fn nudge_selection(&mut self, dx: f64, dy: f64) {
        let step = if self.ctrl_pressed {
            1.0
        } else if self.alt_pressed {
            10.0
        } else {
            0.0
        };
        if step == 0.0 {
            return;
        }
        let delta = Vec2::new(dx * step, dy * step);
        self.apply_to_selection(true, |figure| figure.offset(delta));
    }

    pub fn flip_horizontal(&mut self) {
        self.apply_to_selection(false, Figure::flip_horizontal);
    }

    pub fn flip_vertical(&mut self) {
        self.apply_to_selection(false, Figure::flip_vertical);
    }

    pub fn turn_right_90(&mut self) {
        self.apply_to_selection(true, |figure| figure.rotate(90.0));
    }

    pub fn turn_left_90(&mut self) {
        self.apply_to_selection(true, |figure| figure.rotate(-90.0));
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.apply_to_selection(false, |figure| figure.stroke.color = color);
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.apply_to_selection(false, |figure| figure.fill.color = color);
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.apply_to_selection(false, |figure| figure.stroke.width = width.max(0.0));
    }

    pub fn bring_to_front(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.mark_changed();
        for id in self.selection.ids().to_vec() {
            self.document.bring_to_front(id);
        }
        self.events.push(EditorEvent::Repaint);
    }

    pub fn send_to_back(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.mark_changed();
        for id in self.selection.ids().to_vec() {
            self.document.send_to_back(id);
        }
        self.events.push(EditorEvent::Repaint);
    }

    /// Remove the selected figures from document and selection in one step.
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.mark_changed();
        for id in self.selection.ids().to_vec() {
            self.document.remove(id);
        }
        let change = self.selection.clear();
        self.note_selection_change(change);
        self.events.push(EditorEvent::Repaint);
        self.events.push(EditorEvent::ExtentChanged);
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.document);
        self.node_changing = false;
        self.events
            .push(EditorEvent::SelectionChanged(self.selection.last()));
        self.events.push(EditorEvent::Repaint);
    }

    fn apply_to_selection(&mut self, extent_changes: bool, f: impl Fn(&mut Figure)) {
        if self.selection.is_empty() {
            return;
        }
        self.mark_changed();
        for id in self.selection.ids().to_vec() {
            if let Some(figure) = self.document.get_mut(id) {
                f(figure);
            }
        }
        self.events.push(EditorEvent::Repaint);
        if extent_changes {
            self.events.push(EditorEvent::ExtentChanged);
        }
    }

    // ---- node editing ----

    pub fn start_node_changing(&mut self) {
        if self.can_start_node_changing() {
            self.node_changing = true;
            self.events.push(EditorEvent::Repaint);
        }
    }

    pub fn stop_node_changing(&mut self) {
        if self.node_changing {
            self.node_changing = false;
            self.events.push(EditorEvent::Repaint);
        }
    }

    /// Insert a node at `at` on the first segment of the sole selected
    /// figure whose stroke-widened region contains it. Polygons include the
    /// closing segment in the walk.
    pub fn add_node(&mut self, at: Point) {
        let Some((id, index)) = self.node_insertion_point(at) else {
            return;
        };
        self.mark_changed();
        if let Some(figure) = self.document.get_mut(id) {
            figure.points.insert(index, at);
        }
        self.events.push(EditorEvent::Repaint);
    }

    /// Remove the node whose marker is under `at`, rejected when the figure
    /// is already at its minimum point count.
    pub fn delete_node(&mut self, at: Point) {
        if !self.node_changing {
            return;
        }
        let Some(id) = self.selection.sole() else {
            return;
        };
        let Some(figure) = self.document.get(id) else {
            return;
        };
        if figure.points.len() <= figure.kind.min_points() {
            return;
        }
        let Some(index) = resolve_marker(at, figure, true).and_then(node_index_of) else {
            return;
        };
        if index >= figure.points.len() {
            return;
        }
        self.mark_changed();
        if let Some(figure) = self.document.get_mut(id) {
            figure.points.remove(index);
        }
        self.events.push(EditorEvent::Repaint);
    }

    fn node_insertion_point(&self, at: Point) -> Option<(FigureId, usize)> {
        if !self.node_changing {
            return None;
        }
        let id = self.selection.sole()?;
        let figure = self.document.get(id)?;
        let tolerance = figure.stroke.width * POLYLINE_PICK_FACTOR;
        let n = figure.points.len();
        let segments = match figure.kind {
            FigureKind::Polygon => n,
            FigureKind::Polyline => n.saturating_sub(1),
        };
        for i in 0..segments {
            let a = figure.points[i];
            let b = figure.points[(i + 1) % n];
            if point_to_segment_dist(at, a, b) <= tolerance {
                return Some((id, i + 1));
            }
        }
        None
    }

    // ---- capability queries ----

    pub fn can_select_figures(&self) -> bool {
        !self.document.is_empty()
    }

    pub fn can_one_figure_op(&self) -> bool {
        self.selection.sole().is_some()
    }

    pub fn can_group_figure_op(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn can_start_node_changing(&self) -> bool {
        !self.node_changing && self.selection.sole().is_some()
    }

    pub fn can_stop_node_changing(&self) -> bool {
        self.node_changing
    }

    pub fn can_delete_node(&self) -> bool {
        if !self.node_changing {
            return false;
        }
        self.selection
            .sole()
            .and_then(|id| self.document.get(id))
            .is_some_and(|f| f.points.len() > f.kind.min_points())
    }

    pub fn can_add_node(&self, at: Point) -> bool {
        self.node_insertion_point(at).is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- preview geometry ----

    /// Dashed-outline geometry for the drag in progress, computed with the
    /// same transform the release will commit. Empty outside a drag.
    pub fn preview_paths(&self) -> Vec<BezPath> {
        if self.mode != EditorMode::Dragging {
            return Vec::new();
        }
        let offset = self.pointer_offset;
        let marker = self.marker_index;
        if marker < 0 {
            return self
                .selection
                .sole()
                .and_then(|id| self.document.get(id))
                .map(|f| vec![path_from_points(f.kind, &node_moved_points(f, offset, marker))])
                .unwrap_or_default();
        }
        self.selection
            .ids()
            .iter()
            .filter_map(|&id| self.document.get(id))
            .map(|f| {
                let points = if marker == MARKER_BODY {
                    moved_points(f, offset)
                } else {
                    resized_points(f, offset, marker)
                };
                path_from_points(f.kind, &points)
            })
            .collect()
    }

    // ---- history ----

    /// Snapshot the pre-change state; called by every marked change before
    /// the mutation it guards.
    fn mark_changed(&mut self) {
        self.history.record(self.document.snapshot());
    }

    pub fn undo(&mut self) {
        let Some(snapshot) = self.history.pop_undo() else {
            return;
        };
        debug!("undo: restoring snapshot of {} figures", snapshot.len());
        self.history.push_redo(self.document.snapshot());
        self.restore_snapshot(snapshot);
    }

    pub fn redo(&mut self) {
        let Some(snapshot) = self.history.pop_redo() else {
            return;
        };
        debug!("redo: restoring snapshot of {} figures", snapshot.len());
        self.history.push_undo(self.document.snapshot());
        self.restore_snapshot(snapshot);
    }

    fn restore_snapshot(&mut self, snapshot: Vec<Figure>) {
        self.document.restore(snapshot);
        let change = self.selection.clear();
        self.note_selection_change(change);
        self.events.push(EditorEvent::Repaint);
        self.events.push(EditorEvent::ExtentChanged);
    }

    // ---- clipboard ----

    /// Copy the selected figures, document order preserved.
    pub fn copy(&mut self, clip: &mut dyn Clipboard) -> Result<(), ClipboardError> {
        if self.selection.is_empty() {
            return Ok(());
        }
        let figures: Vec<Figure> = self
            .document
            .figures()
            .iter()
            .filter(|f| self.selection.contains(f.id))
            .cloned()
            .collect();
        clip.put(clipboard::encode(&figures)?);
        self.paste_offset = Vec2::ZERO;
        debug!("copied {} figures", figures.len());
        Ok(())
    }

    pub fn cut(&mut self, clip: &mut dyn Clipboard) -> Result<(), ClipboardError> {
        if self.selection.is_empty() {
            return Ok(());
        }
        self.copy(clip)?;
        self.delete_selected();
        Ok(())
    }

    /// Paste the clipboard figures with the cumulative stagger offset,
    /// giving each a fresh identity, and select them. A decode failure
    /// leaves the document untouched.
    pub fn paste(&mut self, clip: &dyn Clipboard) -> Result<(), ClipboardError> {
        let bytes = clip.get().ok_or(ClipboardError::Empty)?;
        let figures = clipboard::decode(&bytes)?;
        if figures.is_empty() {
            return Ok(());
        }
        self.mark_changed();
        self.paste_offset += PASTE_STEP;
        let mut pasted = Selection::new();
        for mut figure in figures {
            figure.regenerate_id();
            figure.offset(self.paste_offset);
            pasted.toggle(self.document.add(figure));
        }
        self.selection = pasted;
        self.node_changing = false;
        self.events
            .push(EditorEvent::SelectionChanged(self.selection.last()));
        self.events.push(EditorEvent::Repaint);
        self.events.push(EditorEvent::ExtentChanged);
        Ok(())
    }

    // ---- persistence ----

    pub fn save(&mut self, path: &Path) -> Result<(), StorageError> {
        storage::save(path, self.document.figures())?;
        self.history.clear();
        self.file_name = Some(path.to_path_buf());
        Ok(())
    }

    /// Replace the document with the file's figures. A failed load leaves
    /// the prior state untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), StorageError> {
        let figures = storage::load(path)?;
        self.document.restore(figures);
        let change = self.selection.clear();
        self.note_selection_change(change);
        self.history.clear();
        self.file_name = Some(path.to_path_buf());
        self.events.push(EditorEvent::Repaint);
        self.events.push(EditorEvent::ExtentChanged);
        Ok(())
    }

    /// Back to an empty document with default style and no history.
    pub fn reset(&mut self) {
        self.document.clear();
        let change = self.selection.clear();
        self.note_selection_change(change);
        self.history.clear();
        self.mode = EditorMode::Selection;
        self.ribbon = RibbonSelector::new();
        self.default_stroke = Stroke::default();
        self.default_fill = Fill::default();
        self.paste_offset = Vec2::ZERO;
        self.file_name = None;
        self.events.push(EditorEvent::Repaint);
        self.events.push(EditorEvent::ExtentChanged);
    }

    fn note_selection_change(&mut self, change: SelectionChange) {
        match change {
            SelectionChange::Unchanged => {}
            SelectionChange::Focused(id) => {
                self.node_changing = false;
                self.events.push(EditorEvent::SelectionChanged(Some(id)));
            }
            SelectionChange::Cleared => {
                self.node_changing = false;
                self.events.push(EditorEvent::SelectionChanged(None));
            }
        }
    }
}

fn path_from_points(kind: FigureKind, points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if points.len() < 2 {
        return path;
    }
    path.move_to(points[0]);
    for p in &points[1..] {
        path.line_to(*p);
    }
    if kind == FigureKind::Polygon {
        path.close_path();
    }
    path
}
