//! Polyfig
//!
//! Figure model and interaction engine for a 2D vector-figure editor.
//! The crate owns the geometric data model (polygons and polylines), marker
//! hit-testing, the drag-driven transform algebra, selection state, the
//! pointer interaction state machine, and snapshot-based undo/redo. How the
//! resulting geometry is painted, and where clipboard or file bytes live,
//! is left to the embedding application.

pub mod clipboard;
pub mod document;
pub mod editor;
pub mod figure;
pub mod history;
pub mod marker;
pub mod ribbon;
pub mod selection;
pub mod storage;
pub mod style;
pub mod transform;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use document::Document;
pub use editor::{ContextTarget, Editor, EditorEvent, EditorMode, PointerButton};
pub use figure::{Figure, FigureId, FigureKind};
pub use history::History;
pub use marker::{CursorGlyph, MARKER_BODY};
pub use ribbon::{RibbonMode, RibbonSelector};
pub use selection::Selection;
pub use storage::StorageError;
pub use style::{Color, Fill, Stroke};
