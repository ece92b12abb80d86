pub mod bus;
pub mod cell;
pub mod column;
pub mod editor;
pub mod events;
pub mod node;
pub mod overlay;
pub mod render;
pub mod selection;
pub mod style;
pub mod viewport;

pub use bus::{EventBus, GridCommand};
pub use cell::{Cell, CellHandlers, CellProps};
pub use column::Column;
pub use node::Node;
pub use selection::{CellPosition, CellSelection};

pub mod prelude {
    pub use crate::bus::{BusError, EventBus, GridCommand, Subscription};
    pub use crate::cell::{Cell, CellHandlers, CellProps, ClickHandler, RowClickHandler};
    pub use crate::column::{
        CellClass, Column, EditorOptions, Formatter, FormatterInput, RowSelector,
    };
    pub use crate::editor::{
        EditorParams, EditorSession, EditorSessionId, KeyHandler, OverlayEditor,
        OverlayEditorMount, StandardEditor, StandardMount, overlay_position,
    };
    pub use crate::events::{ClickEvent, ClickKind, Key, KeyCombo, Modifiers, Position};
    pub use crate::node::{ATTR_COL_INDEX, ATTR_SELECTED, CellLayout, ClassList, Node};
    pub use crate::overlay::{OverlayLayer, OverlayMount, PortalTarget};
    pub use crate::render::{paint, paint_overlay};
    pub use crate::selection::{CellPosition, CellSelection, DragHandle, SelectedCell};
    pub use crate::style::{CellFlags, GridTheme, cell_classes};
    pub use crate::viewport::{GridPoint, GridViewport};
}
