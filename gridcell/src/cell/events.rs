//! Event handling for the cell widget.
//!
//! Every entry point follows the dual-dispatch contract: the cell's own
//! handling runs first, then the caller-supplied handler, and neither
//! suppresses the other. In editing mode the editor owns interaction, so
//! click-shaped events skip the internal handling entirely and only the
//! caller's handler fires.

use std::fmt;
use std::sync::Arc;

use crate::column::Column;
use crate::editor::KeyHandler;
use crate::events::{ClickEvent, KeyCombo};
use crate::selection::{CellPosition, CellSelection};

use super::{Cell, CellProps};

/// Caller-supplied click-shaped handler.
pub type ClickHandler = Arc<dyn Fn(&ClickEvent) + Send + Sync>;

/// Caller-supplied row-click hook, invoked with the row's identity.
pub type RowClickHandler<R> = Arc<dyn Fn(usize, &R, &Column<R>) + Send + Sync>;

/// Optional raw interaction handlers supplied by the caller.
pub struct CellHandlers<R> {
    /// Raw click pass-through
    pub on_click: Option<ClickHandler>,
    /// Raw double-click pass-through
    pub on_double_click: Option<ClickHandler>,
    /// Raw context-menu pass-through
    pub on_context_menu: Option<ClickHandler>,
    /// Raw key pass-through
    pub on_key_down: Option<KeyHandler>,
    /// Row-click hook, fired as part of the internal click handling
    pub on_row_click: Option<RowClickHandler<R>>,
}

impl<R> CellHandlers<R> {
    /// Handlers with every hook unset.
    pub fn none() -> Self {
        Self {
            on_click: None,
            on_double_click: None,
            on_context_menu: None,
            on_key_down: None,
            on_row_click: None,
        }
    }

    /// Set the click pass-through.
    pub fn with_click(mut self, handler: impl Fn(&ClickEvent) + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }

    /// Set the double-click pass-through.
    pub fn with_double_click(
        mut self,
        handler: impl Fn(&ClickEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_double_click = Some(Arc::new(handler));
        self
    }

    /// Set the context-menu pass-through.
    pub fn with_context_menu(
        mut self,
        handler: impl Fn(&ClickEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_context_menu = Some(Arc::new(handler));
        self
    }

    /// Set the key pass-through.
    pub fn with_key_down(mut self, handler: impl Fn(&KeyCombo) + Send + Sync + 'static) -> Self {
        self.on_key_down = Some(Arc::new(handler));
        self
    }

    /// Set the row-click hook.
    pub fn with_row_click(
        mut self,
        handler: impl Fn(usize, &R, &Column<R>) + Send + Sync + 'static,
    ) -> Self {
        self.on_row_click = Some(Arc::new(handler));
        self
    }
}

impl<R> Default for CellHandlers<R> {
    fn default() -> Self {
        Self::none()
    }
}

impl<R> Clone for CellHandlers<R> {
    fn clone(&self) -> Self {
        Self {
            on_click: self.on_click.clone(),
            on_double_click: self.on_double_click.clone(),
            on_context_menu: self.on_context_menu.clone(),
            on_key_down: self.on_key_down.clone(),
            on_row_click: self.on_row_click.clone(),
        }
    }
}

impl<R> fmt::Debug for CellHandlers<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellHandlers")
            .field("on_click", &self.on_click.is_some())
            .field("on_double_click", &self.on_double_click.is_some())
            .field("on_context_menu", &self.on_context_menu.is_some())
            .field("on_key_down", &self.on_key_down.is_some())
            .field("on_row_click", &self.on_row_click.is_some())
            .finish()
    }
}

impl<R> Cell<R> {
    /// Handle a click on this cell.
    pub fn on_click(&self, props: &CellProps<'_, R>, event: &ClickEvent) {
        if !props.selection.is_editing() {
            self.select_cell(props, props.column.editor_options.edit_on_click);
            if let Some(handler) = &props.handlers.on_row_click {
                handler(props.row_idx, props.row, props.column);
            }
        }
        if let Some(handler) = &props.handlers.on_click {
            handler(event);
        }
    }

    /// Handle a double click. A double click always requests the editor,
    /// regardless of `edit_on_click`.
    pub fn on_double_click(&self, props: &CellProps<'_, R>, event: &ClickEvent) {
        if !props.selection.is_editing() {
            self.select_cell(props, true);
        }
        if let Some(handler) = &props.handlers.on_double_click {
            handler(event);
        }
    }

    /// Handle a context-menu gesture. Selects without requesting an editor.
    pub fn on_context_menu(&self, props: &CellProps<'_, R>, event: &ClickEvent) {
        if !props.selection.is_editing() {
            self.select_cell(props, false);
        }
        if let Some(handler) = &props.handlers.on_context_menu {
            handler(event);
        }
    }

    /// Handle a key press while this cell has focus.
    ///
    /// In editing mode the active editor's key hook runs first; the
    /// caller's pass-through always runs.
    pub fn on_key(&self, props: &CellProps<'_, R>, key: &KeyCombo) {
        if let CellSelection::Editing(session) = props.selection
            && let Some(hook) = &session.on_key_down
        {
            hook(key);
        }
        if let Some(handler) = &props.handlers.on_key_down {
            handler(key);
        }
    }

    fn select_cell(&self, props: &CellProps<'_, R>, open_editor: bool) {
        props
            .bus
            .select_cell(CellPosition::new(props.column.idx, props.row_idx), open_editor);
    }
}
