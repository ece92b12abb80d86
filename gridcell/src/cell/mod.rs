//! The grid cell widget.
//!
//! One `Cell` instance backs one visible cell slot. The widget is stateless
//! across renders apart from two things: the rect of its own rendered root
//! (captured by the host after layout, used only for coordinate
//! measurement) and an equality-gated render cache. Everything else arrives
//! fresh each render in [`CellProps`].
//!
//! State flows controller to cell through props; intents flow cell to
//! controller through the event bus. The cell never mutates shared
//! selection state.

mod events;
mod render;

pub use events::{CellHandlers, ClickHandler, RowClickHandler};

use ratatui::layout::Rect;

use crate::bus::EventBus;
use crate::column::{Column, EditorOptions};
use crate::editor::EditorSessionId;
use crate::node::Node;
use crate::selection::CellSelection;
use crate::style::CellFlags;
use crate::viewport::GridViewport;

/// Per-render inputs for one cell.
///
/// `viewport`, `bus` and `handlers` are identity handles; they do not
/// participate in the render cache key.
pub struct CellProps<'a, R> {
    /// Column descriptor
    pub column: &'a Column<R>,
    /// Row data, passed through to formatter and editor
    pub row: &'a R,
    /// Row index
    pub row_idx: usize,
    /// This cell's role in the grid-wide selection state
    pub selection: &'a CellSelection,
    /// Copy, drag-over and row-selection flags
    pub flags: CellFlags,
    /// Boundary index for the frozen-last token
    pub last_frozen_column_index: Option<usize>,
    /// Caller-supplied class, appended after every other token
    pub class: Option<&'a str>,
    /// Scroll handle of the scrollable ancestor
    pub viewport: &'a GridViewport,
    /// Command channel to the controller
    pub bus: &'a EventBus,
    /// Caller-supplied raw interaction handlers
    pub handlers: &'a CellHandlers<R>,
}

/// Selection facets that change what a render produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionKey {
    None,
    Selected { drag_handle: bool },
    Editing { session: EditorSessionId },
}

impl SelectionKey {
    fn of(selection: &CellSelection) -> Self {
        match selection {
            CellSelection::None => Self::None,
            CellSelection::Selected(selected) => Self::Selected {
                drag_handle: selected.drag_handle.is_some(),
            },
            CellSelection::Editing(session) => Self::Editing {
                session: session.id(),
            },
        }
    }
}

/// Full input tuple the render cache is keyed on.
#[derive(PartialEq)]
struct RenderKey<R> {
    column: (usize, u16, u16, bool, EditorOptions),
    row: R,
    row_idx: usize,
    selection: SelectionKey,
    flags: CellFlags,
    last_frozen_column_index: Option<usize>,
    class: Option<String>,
    mounted: bool,
}

impl<R: Clone> RenderKey<R> {
    fn of(props: &CellProps<'_, R>, mounted: bool) -> Self {
        Self {
            column: props.column.render_key(),
            row: props.row.clone(),
            row_idx: props.row_idx,
            selection: SelectionKey::of(props.selection),
            flags: props.flags,
            last_frozen_column_index: props.last_frozen_column_index,
            class: props.class.map(str::to_string),
            mounted,
        }
    }
}

struct CachedRender<R> {
    key: RenderKey<R>,
    node: Node,
}

/// One cell of the grid.
pub struct Cell<R> {
    /// Rect of the rendered root, captured by the host after layout
    root: Option<Rect>,
    /// Last render, replayed while the input tuple is unchanged
    cache: Option<CachedRender<R>>,
}

impl<R> Cell<R> {
    /// Create an unmounted cell.
    pub fn new() -> Self {
        Self {
            root: None,
            cache: None,
        }
    }

    /// Capture the rect of this cell's rendered root, or clear it when the
    /// cell leaves the viewport. The host calls this after layout, before
    /// the next render.
    pub fn set_root(&mut self, area: Option<Rect>) {
        self.root = area;
    }

    /// The captured root rect. Ancestors can use this to measure or focus
    /// the cell without reaching into its render output.
    pub fn root(&self) -> Option<Rect> {
        self.root
    }

    /// Drop the render cache so the next render recomputes.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }
}

impl<R> Default for Cell<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> std::fmt::Debug for Cell<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("root", &self.root)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}
