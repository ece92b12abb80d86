//! Per-cell view of the grid's selection state.
//!
//! The controller owns selection as a single source of truth and enforces
//! that at most one cell in the whole grid is editing. Each cell receives a
//! `CellSelection` describing its own role in that state and renders it
//! without question; the value is replaced wholesale on every transition.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::editor::EditorSession;

/// Address of a cell: column index and row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellPosition {
    /// Column index
    pub idx: usize,
    /// Row index
    pub row_idx: usize,
}

impl CellPosition {
    /// Create a new position.
    pub const fn new(idx: usize, row_idx: usize) -> Self {
        Self { idx, row_idx }
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row_idx, self.idx)
    }
}

/// Callback invoked with no arguments on a drag-handle gesture.
pub type PointerHandler = Arc<dyn Fn() + Send + Sync>;

/// Configuration for the fill drag handle shown on a selected cell.
#[derive(Clone, Default)]
pub struct DragHandle {
    /// Fired when the handle is pressed (starts a fill drag)
    pub on_pointer_down: Option<PointerHandler>,
    /// Fired when the handle is double-clicked (fill to end)
    pub on_double_click: Option<PointerHandler>,
}

impl fmt::Debug for DragHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragHandle")
            .field("on_pointer_down", &self.on_pointer_down.is_some())
            .field("on_double_click", &self.on_double_click.is_some())
            .finish()
    }
}

/// State payload for a cell that is selected but not editing.
#[derive(Debug, Clone, Default)]
pub struct SelectedCell {
    /// Drag-handle affordance, when the controller enables fill dragging
    pub drag_handle: Option<DragHandle>,
}

impl SelectedCell {
    /// Selected state without a drag handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a drag-handle configuration.
    pub fn with_drag_handle(mut self, handle: DragHandle) -> Self {
        self.drag_handle = Some(handle);
        self
    }
}

/// This cell's role in the grid-wide selection state.
#[derive(Debug, Clone, Default)]
pub enum CellSelection {
    /// Not selected
    #[default]
    None,
    /// Selected, rendering read-mode content
    Selected(SelectedCell),
    /// The single editing cell of the grid
    Editing(EditorSession),
}

impl CellSelection {
    /// Whether the cell is selected or editing.
    pub fn is_selected(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether the cell is editing.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Drag-handle configuration, when the state carries one.
    pub fn drag_handle(&self) -> Option<&DragHandle> {
        match self {
            Self::Selected(selected) => selected.drag_handle.as_ref(),
            _ => None,
        }
    }

    /// The editor session, when editing.
    pub fn editor_session(&self) -> Option<&EditorSession> {
        match self {
            Self::Editing(session) => Some(session),
            _ => None,
        }
    }
}
