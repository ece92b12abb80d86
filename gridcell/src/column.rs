//! Column descriptors.
//!
//! Columns are owned and mutated by the grid controller; a cell only gets
//! read access for the duration of one render pass. Everything a cell needs
//! to know about its column is here: geometry, the frozen flag, the
//! read-mode formatter, the editor variants and their options, and an
//! optional custom class rule.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::bus::EventBus;
use crate::editor::{OverlayEditor, OverlayEditorMount, StandardEditor, StandardMount};
use crate::node::Node;

/// Render strategy for a cell in display mode.
pub type Formatter<R> = Arc<dyn Fn(&FormatterInput<'_, R>) -> Node + Send + Sync>;

/// Everything a formatter sees for one render.
pub struct FormatterInput<'a, R> {
    /// The column being rendered
    pub column: &'a Column<R>,
    /// Row data, opaque to the cell
    pub row: &'a R,
    /// Row index
    pub row_idx: usize,
    /// Whether this cell is selected (or editing)
    pub is_cell_selected: bool,
    /// Whether this cell's row is selected
    pub is_row_selected: bool,
    /// Handle for toggling row selection from formatter content
    pub row_selection: RowSelector<'a>,
}

/// Dispatches row-selection toggles for one row.
///
/// Formatters that render a selection control call [`RowSelector::toggle`]
/// instead of talking to the controller; the request travels over the
/// event channel like every other intent.
#[derive(Clone, Copy)]
pub struct RowSelector<'a> {
    bus: &'a EventBus,
    row_idx: usize,
}

impl<'a> RowSelector<'a> {
    pub(crate) fn new(bus: &'a EventBus, row_idx: usize) -> Self {
        Self { bus, row_idx }
    }

    /// Request a row-selection toggle. `is_shift_click` marks the gesture
    /// as a range extension.
    pub fn toggle(&self, checked: bool, is_shift_click: bool) {
        self.bus.select_row(self.row_idx, checked, is_shift_click);
    }
}

impl fmt::Debug for RowSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowSelector")
            .field("row_idx", &self.row_idx)
            .finish()
    }
}

/// Custom class rule for a column.
pub enum CellClass<R> {
    /// Fixed token applied to every cell of the column
    Static(Cow<'static, str>),
    /// Token computed from the row each render; `None` adds nothing
    Computed(Arc<dyn Fn(&R) -> Option<String> + Send + Sync>),
}

impl<R> Clone for CellClass<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(token) => Self::Static(token.clone()),
            Self::Computed(rule) => Self::Computed(Arc::clone(rule)),
        }
    }
}

impl<R> fmt::Debug for CellClass<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(token) => f.debug_tuple("Static").field(token).finish(),
            Self::Computed(_) => f.debug_tuple("Computed").finish(),
        }
    }
}

/// Editor behavior options recognized by the cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    /// Open the editor on single click (double click always opens)
    pub edit_on_click: bool,
    /// Mount the editor out of tree. Unset keeps the variant default:
    /// standard editors portal, overlay editors render in place.
    pub create_portal: Option<bool>,
}

/// Column configuration.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     Column::text(0, "Name", 24, |row: &Fruit| row.name.clone()),
///     Column::text(1, "Qty", 8, |row: &Fruit| row.qty.to_string())
///         .frozen()
///         .class("qty"),
/// ];
/// ```
pub struct Column<R> {
    /// Column identity within the grid
    pub idx: usize,
    /// Header text
    pub name: String,
    /// Width in terminal columns
    pub width: u16,
    /// Offset from the row's content origin in terminal columns
    pub left: u16,
    /// Frozen columns stay put under horizontal scroll
    pub frozen: bool,
    /// Display-mode render strategy
    pub formatter: Formatter<R>,
    /// Standard editor variant
    pub editor: Option<StandardEditor<R>>,
    /// Overlay-positioned editor variant; wins over `editor` when both set
    pub overlay_editor: Option<OverlayEditor<R>>,
    /// Editor behavior options
    pub editor_options: EditorOptions,
    /// Custom class rule appended after the state tokens
    pub cell_class: Option<CellClass<R>>,
}

impl<R> Column<R> {
    /// Create a column with explicit width and a blank formatter.
    pub fn new(idx: usize, name: impl Into<String>, width: u16) -> Self {
        Self {
            idx,
            name: name.into(),
            width,
            left: 0,
            frozen: false,
            formatter: Arc::new(|_: &FormatterInput<'_, R>| Node::empty()),
            editor: None,
            overlay_editor: None,
            editor_options: EditorOptions::default(),
            cell_class: None,
        }
    }

    /// Create a column whose formatter renders `value(row)` fitted to the
    /// column width.
    pub fn text(
        idx: usize,
        name: impl Into<String>,
        width: u16,
        value: impl Fn(&R) -> String + Send + Sync + 'static,
    ) -> Self {
        Self::new(idx, name, width).formatter(move |input: &FormatterInput<'_, R>| {
            Node::text(fit_width(&value(input.row), input.column.width))
        })
    }

    /// Set the left offset.
    pub fn left(mut self, left: u16) -> Self {
        self.left = left;
        self
    }

    /// Freeze the column.
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// Set the display-mode formatter.
    pub fn formatter(
        mut self,
        formatter: impl Fn(&FormatterInput<'_, R>) -> Node + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Set the standard editor variant.
    pub fn editor(
        mut self,
        editor: impl Fn(&StandardMount<'_, R>) -> Node + Send + Sync + 'static,
    ) -> Self {
        self.editor = Some(Arc::new(editor));
        self
    }

    /// Set the overlay-positioned editor variant.
    pub fn overlay_editor(
        mut self,
        editor: impl Fn(&OverlayEditorMount<'_, R>) -> Node + Send + Sync + 'static,
    ) -> Self {
        self.overlay_editor = Some(Arc::new(editor));
        self
    }

    /// Replace the editor options.
    pub fn editor_options(mut self, options: EditorOptions) -> Self {
        self.editor_options = options;
        self
    }

    /// Open the editor on single click.
    pub fn edit_on_click(mut self) -> Self {
        self.editor_options.edit_on_click = true;
        self
    }

    /// Force the portal decision instead of the variant default.
    pub fn create_portal(mut self, create_portal: bool) -> Self {
        self.editor_options.create_portal = Some(create_portal);
        self
    }

    /// Apply a fixed custom class token.
    pub fn class(mut self, token: impl Into<Cow<'static, str>>) -> Self {
        self.cell_class = Some(CellClass::Static(token.into()));
        self
    }

    /// Compute the custom class token from the row each render.
    pub fn class_fn(
        mut self,
        rule: impl Fn(&R) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.cell_class = Some(CellClass::Computed(Arc::new(rule)));
        self
    }

    /// Evaluate the custom class rule for a row.
    pub fn class_for(&self, row: &R) -> Option<Cow<'static, str>> {
        match &self.cell_class {
            Some(CellClass::Static(token)) => Some(token.clone()),
            Some(CellClass::Computed(rule)) => rule(row).map(Cow::Owned),
            None => None,
        }
    }

    /// Key fields that feed the cell's render cache.
    pub(crate) fn render_key(&self) -> (usize, u16, u16, bool, EditorOptions) {
        (
            self.idx,
            self.width,
            self.left,
            self.frozen,
            self.editor_options,
        )
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            idx: self.idx,
            name: self.name.clone(),
            width: self.width,
            left: self.left,
            frozen: self.frozen,
            formatter: Arc::clone(&self.formatter),
            editor: self.editor.as_ref().map(Arc::clone),
            overlay_editor: self.overlay_editor.as_ref().map(Arc::clone),
            editor_options: self.editor_options,
            cell_class: self.cell_class.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("idx", &self.idx)
            .field("name", &self.name)
            .field("width", &self.width)
            .field("left", &self.left)
            .field("frozen", &self.frozen)
            .field("editor", &self.editor.is_some())
            .field("overlay_editor", &self.overlay_editor.is_some())
            .field("editor_options", &self.editor_options)
            .field("cell_class", &self.cell_class)
            .finish()
    }
}

/// Truncate to the display width and pad with spaces.
fn fit_width(text: &str, width: u16) -> String {
    let width = usize::from(width);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}
