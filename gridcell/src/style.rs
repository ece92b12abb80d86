//! Class tokens and their resolution into terminal styles.
//!
//! The composer is a pure function from cell state to an ordered token
//! sequence. Tokens are stable strings: downstream themes key on them, so
//! renaming one is a breaking change. Composition is additive; a theme
//! resolves the sequence left to right and later tokens override earlier
//! ones field by field, which is what gives source order its precedence.

use std::borrow::Cow;
use std::collections::HashMap;

use ratatui::style::{Color, Modifier, Style};

use crate::column::Column;
use crate::node::ClassList;
use crate::selection::CellSelection;

/// Base token, present on every cell.
pub const CELL: &str = "grid-cell";
/// Frozen column.
pub const CELL_FROZEN: &str = "grid-cell-frozen";
/// Frozen column at the frozen/scrolling boundary.
pub const CELL_FROZEN_LAST: &str = "grid-cell-frozen-last";
/// Cell is selected (or editing).
pub const CELL_SELECTED: &str = "grid-cell-selected";
/// Cell is in the copied range.
pub const CELL_COPIED: &str = "grid-cell-copied";
/// Cell is under an active fill drag.
pub const CELL_DRAGGED_OVER: &str = "grid-cell-dragged-over";
/// Cell is editing.
pub const CELL_EDITING: &str = "grid-cell-editing";
/// Fill drag handle affordance.
pub const CELL_DRAG_HANDLE: &str = "grid-cell-drag-handle";

/// Cross-cutting render flags the row forwards to each cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFlags {
    /// Cell is in the copied range
    pub is_copied: bool,
    /// Cell is under an active fill drag
    pub is_dragged_over: bool,
    /// The cell's row is selected
    pub is_row_selected: bool,
}

/// Compose the ordered token sequence for one cell render.
///
/// Order is fixed: base, frozen, frozen-last, selected, copied,
/// dragged-over, editing, then the column's custom class, then the
/// caller-supplied class. Nothing is ever removed.
pub fn cell_classes<R>(
    column: &Column<R>,
    row: &R,
    selection: &CellSelection,
    flags: CellFlags,
    last_frozen_column_index: Option<usize>,
    extra: Option<&str>,
) -> ClassList {
    let mut classes: ClassList = vec![Cow::Borrowed(CELL)];
    if column.frozen {
        classes.push(Cow::Borrowed(CELL_FROZEN));
        if last_frozen_column_index == Some(column.idx) {
            classes.push(Cow::Borrowed(CELL_FROZEN_LAST));
        }
    }
    if selection.is_selected() {
        classes.push(Cow::Borrowed(CELL_SELECTED));
    }
    if flags.is_copied {
        classes.push(Cow::Borrowed(CELL_COPIED));
    }
    if flags.is_dragged_over {
        classes.push(Cow::Borrowed(CELL_DRAGGED_OVER));
    }
    if selection.is_editing() {
        classes.push(Cow::Borrowed(CELL_EDITING));
    }
    if let Some(class) = column.class_for(row) {
        classes.push(class);
    }
    if let Some(extra) = extra {
        classes.push(Cow::Owned(extra.to_string()));
    }
    classes
}

/// Token to style table.
///
/// Unknown tokens resolve to nothing, so hosts can carry their own tokens
/// through the cell without registering them here.
#[derive(Debug, Clone, Default)]
pub struct GridTheme {
    styles: HashMap<Cow<'static, str>, Style>,
}

impl GridTheme {
    /// Create an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a style for a token.
    pub fn set(&mut self, token: impl Into<Cow<'static, str>>, style: Style) {
        self.styles.insert(token.into(), style);
    }

    /// Register a style for a token, builder style.
    pub fn with(mut self, token: impl Into<Cow<'static, str>>, style: Style) -> Self {
        self.set(token, style);
        self
    }

    /// Style for a single token.
    pub fn resolve(&self, token: &str) -> Option<Style> {
        self.styles.get(token).copied()
    }

    /// Fold a token sequence into one style, left to right.
    pub fn compose(&self, classes: &[Cow<'static, str>]) -> Style {
        classes
            .iter()
            .filter_map(|token| self.resolve(token))
            .fold(Style::default(), |acc, style| acc.patch(style))
    }

    /// Dark theme covering every token this crate emits.
    pub fn default_dark() -> Self {
        let bg = Color::Rgb(30, 30, 46);
        let fg = Color::Rgb(205, 214, 244);
        let accent = Color::Rgb(162, 119, 255);
        let accent_dim = Color::Rgb(110, 84, 148);
        Self::new()
            .with(CELL, Style::default().fg(fg).bg(bg))
            .with(CELL_FROZEN, Style::default().bg(Color::Rgb(24, 24, 37)))
            .with(
                CELL_FROZEN_LAST,
                Style::default().bg(Color::Rgb(17, 17, 27)),
            )
            .with(CELL_SELECTED, Style::default().fg(bg).bg(accent_dim))
            .with(CELL_COPIED, Style::default().bg(Color::Rgb(40, 84, 60)))
            .with(
                CELL_DRAGGED_OVER,
                Style::default().bg(Color::Rgb(96, 88, 38)),
            )
            .with(
                CELL_EDITING,
                Style::default()
                    .fg(bg)
                    .bg(accent)
                    .add_modifier(Modifier::BOLD),
            )
            .with(
                CELL_DRAG_HANDLE,
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )
    }
}
