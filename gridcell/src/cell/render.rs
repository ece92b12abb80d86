//! Cell rendering.

use crate::column::{FormatterInput, RowSelector};
use crate::editor;
use crate::node::{ATTR_COL_INDEX, ATTR_SELECTED, CellLayout, Node};
use crate::selection::{CellPosition, CellSelection};
use crate::style;

use super::{CachedRender, Cell, CellProps, RenderKey};

impl<R: Clone + PartialEq> Cell<R> {
    /// Produce this cell's node for the current frame.
    ///
    /// Re-renders only when the input tuple changed since the last call;
    /// otherwise the cached node is replayed. Handles (`bus`, `viewport`,
    /// `handlers`) are identity inputs and never force a re-render.
    pub fn render(&mut self, props: &CellProps<'_, R>) -> Node {
        let key = RenderKey::of(props, self.root.is_some());
        if let Some(cached) = &self.cache
            && cached.key == key
        {
            return cached.node.clone();
        }
        let node = self.render_fresh(props);
        self.cache = Some(CachedRender {
            key,
            node: node.clone(),
        });
        node
    }

    fn render_fresh(&self, props: &CellProps<'_, R>) -> Node {
        let classes = style::cell_classes(
            props.column,
            props.row,
            props.selection,
            props.flags,
            props.last_frozen_column_index,
            props.class,
        );
        let mut node = Node::element(cell_id(props.row_idx, props.column.idx))
            .with_classes(classes)
            .with_layout(CellLayout::new(props.column.width, props.column.left))
            .with_data(ATTR_COL_INDEX, (props.column.idx + 1).to_string())
            .with_data(ATTR_SELECTED, props.selection.is_selected().to_string());
        for child in self.content(props) {
            node = node.with_child(child);
        }
        node
    }

    fn content(&self, props: &CellProps<'_, R>) -> Vec<Node> {
        if let CellSelection::Editing(session) = props.selection {
            // Without a measured root there is nothing to position against.
            // Render empty content for this frame; the next render after
            // the host captures the rect resolves it.
            let Some(root) = self.root else {
                return Vec::new();
            };
            let at = editor::overlay_position(root, props.viewport);
            let position = CellPosition::new(props.column.idx, props.row_idx);
            if let Some(mounted) = editor::mount(props.column, session, position, props.row, at) {
                return vec![mounted];
            }
            log::warn!("cell {position} is editing but its column declares no editor");
        }
        self.read_content(props)
    }

    fn read_content(&self, props: &CellProps<'_, R>) -> Vec<Node> {
        let input = FormatterInput {
            column: props.column,
            row: props.row,
            row_idx: props.row_idx,
            is_cell_selected: props.selection.is_selected(),
            is_row_selected: props.flags.is_row_selected,
            row_selection: RowSelector::new(props.bus, props.row_idx),
        };
        let mut children = vec![(props.column.formatter)(&input)];
        if props.selection.drag_handle().is_some() {
            children.push(
                Node::element(format!(
                    "{}-drag-handle",
                    cell_id(props.row_idx, props.column.idx)
                ))
                .with_class(style::CELL_DRAG_HANDLE)
                .with_layout(CellLayout::new(1, props.column.width.saturating_sub(1))),
            );
        }
        children
    }
}

fn cell_id(row_idx: usize, idx: usize) -> String {
    format!("cell-{row_idx}-{idx}")
}
