//! Editor mounting contract and the host that selects an editor variant.
//!
//! Concrete editor widgets live outside this crate; a column only carries
//! factories that build their mounted node from the parameters here. Two
//! variants exist: the standard editor, hosted in a positioned container
//! that portals out of the row by default, and the overlay-positioned
//! editor, which receives absolute coordinates and manages its own
//! placement. A column may declare both; the overlay variant wins.

mod position;

pub use position::overlay_position;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::column::Column;
use crate::events::KeyCombo;
use crate::node::Node;
use crate::overlay::PortalTarget;
use crate::selection::CellPosition;
use crate::viewport::GridPoint;

/// Key hook owned by the active editor.
pub type KeyHandler = Arc<dyn Fn(&KeyCombo) + Send + Sync>;

/// Opaque configuration passed through to the mounted editor.
pub type EditorParams = BTreeMap<String, String>;

/// Mount parameters for the standard editor container.
pub struct StandardMount<'a, R> {
    /// Address of the editing cell
    pub position: CellPosition,
    /// Row data being edited
    pub row: &'a R,
    /// Column being edited
    pub column: &'a Column<R>,
    /// Content-absolute coordinates of the cell
    pub at: GridPoint,
    /// Session pass-through configuration
    pub params: &'a EditorParams,
}

/// Mount parameters for an overlay-positioned editor.
pub struct OverlayEditorMount<'a, R> {
    /// Address of the editing cell
    pub position: CellPosition,
    /// Column being edited
    pub column: &'a Column<R>,
    /// Content-absolute coordinates the editor positions itself at
    pub at: GridPoint,
    /// Session pass-through configuration
    pub params: &'a EditorParams,
}

/// Factory for the standard editor variant.
pub type StandardEditor<R> = Arc<dyn Fn(&StandardMount<'_, R>) -> Node + Send + Sync>;

/// Factory for the overlay-positioned editor variant.
pub type OverlayEditor<R> = Arc<dyn Fn(&OverlayEditorMount<'_, R>) -> Node + Send + Sync>;

/// Unique identifier for an editor session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorSessionId(usize);

impl EditorSessionId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for EditorSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__editor_{}", self.0)
    }
}

/// One editing stint, created by the controller when a cell enters edit
/// mode and replaced on the next selection transition.
///
/// Coordinates are not stored here; the cell computes them from its own
/// rect when the editing content is built.
#[derive(Clone)]
pub struct EditorSession {
    id: EditorSessionId,
    /// Destination for out-of-tree mounting. `None` disables portaling;
    /// portal requests then fall back to in-place rendering.
    pub portal_target: Option<PortalTarget>,
    /// The active editor's own key hook, consulted before the caller's
    pub on_key_down: Option<KeyHandler>,
    /// Pass-through configuration for the mounted editor
    pub params: EditorParams,
}

impl EditorSession {
    /// Create a session with a fresh id and no configuration.
    pub fn new() -> Self {
        Self {
            id: EditorSessionId::new(),
            portal_target: None,
            on_key_down: None,
            params: EditorParams::new(),
        }
    }

    /// This session's unique id.
    pub fn id(&self) -> EditorSessionId {
        self.id
    }

    /// Set the portal target.
    pub fn with_portal_target(mut self, target: PortalTarget) -> Self {
        self.portal_target = Some(target);
        self
    }

    /// Set the editor's key hook.
    pub fn with_key_hook(mut self, hook: impl Fn(&KeyCombo) + Send + Sync + 'static) -> Self {
        self.on_key_down = Some(Arc::new(hook));
        self
    }

    /// Set a pass-through parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("id", &self.id)
            .field("portal_target", &self.portal_target.is_some())
            .field("on_key_down", &self.on_key_down.is_some())
            .field("params", &self.params)
            .finish()
    }
}

/// Build the mounted editor node for an editing cell.
///
/// Returns `None` when the column declares no editor at all, which is a
/// controller contract violation the cell recovers from by rendering its
/// read-mode content.
pub(crate) fn mount<R>(
    column: &Column<R>,
    session: &EditorSession,
    position: CellPosition,
    row: &R,
    at: GridPoint,
) -> Option<Node> {
    // Overlay variant takes precedence when both are declared.
    if let Some(factory) = &column.overlay_editor {
        let node = factory(&OverlayEditorMount {
            position,
            column,
            at,
            params: &session.params,
        });
        // Overlay editors render in place unless a portal is asked for.
        return Some(match column.editor_options.create_portal {
            Some(true) => portal_or_in_place(session, at, node),
            _ => node,
        });
    }

    if let Some(factory) = &column.editor {
        let node = factory(&StandardMount {
            position,
            row,
            column,
            at,
            params: &session.params,
        });
        // The standard container portals by default so the row's overflow
        // clipping cannot cut it off.
        return Some(match column.editor_options.create_portal {
            Some(false) => node,
            _ => portal_or_in_place(session, at, node),
        });
    }

    None
}

fn portal_or_in_place(session: &EditorSession, at: GridPoint, node: Node) -> Node {
    match &session.portal_target {
        Some(target) => Node::Portal {
            target: target.clone(),
            at,
            child: Box::new(node),
        },
        None => {
            log::warn!(
                "session {} requested a portal without a target, mounting in place",
                session.id()
            );
            node
        }
    }
}
