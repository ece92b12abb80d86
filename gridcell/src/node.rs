//! Renderable view tree produced by the cell.
//!
//! The cell does not paint directly; it returns a small `Node` tree that the
//! host walks during its paint pass. Presentation is carried as class tokens
//! (stable strings, see [`crate::style`]) so external styling can resolve
//! them through a theme, and structural data rides in each element's `data`
//! map the way accessibility attributes would.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::overlay::PortalTarget;
use crate::viewport::GridPoint;

/// 1-based column index attribute, for accessibility tooling.
pub const ATTR_COL_INDEX: &str = "aria-colindex";
/// Selected-state attribute, `"true"` or `"false"`.
pub const ATTR_SELECTED: &str = "aria-selected";

/// Ordered class tokens attached to a node.
pub type ClassList = Vec<Cow<'static, str>>;

/// Horizontal placement of an element within its parent's area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellLayout {
    /// Width in terminal columns
    pub width: u16,
    /// Offset from the parent's left edge in terminal columns
    pub left: u16,
}

impl CellLayout {
    /// Create a layout with explicit width and left offset.
    pub const fn new(width: u16, left: u16) -> Self {
        Self { width, left }
    }
}

/// A node in the view tree.
#[derive(Debug, Clone, Default)]
pub enum Node {
    /// Renders nothing
    #[default]
    Empty,

    /// Text content
    Text {
        content: String,
        classes: ClassList,
    },

    /// Positioned container with class tokens and data attributes
    Element {
        /// Element ID, used by the host for hit testing
        id: String,
        /// Ordered presentation tokens
        classes: ClassList,
        /// Placement within the parent area
        layout: CellLayout,
        /// Structural attributes (column index, selected state, ...)
        data: BTreeMap<String, String>,
        /// Child nodes, painted in order
        children: Vec<Node>,
    },

    /// Content mounted out of tree, onto the target's overlay layer
    Portal {
        /// Destination layer handle
        target: PortalTarget,
        /// Content-absolute anchor for the mounted subtree
        at: GridPoint,
        /// The subtree to mount
        child: Box<Node>,
    },
}

impl Node {
    /// Create an empty node.
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            classes: Vec::new(),
        }
    }

    /// Create a text node with a class token.
    pub fn text_classed(content: impl Into<String>, class: impl Into<Cow<'static, str>>) -> Self {
        Self::Text {
            content: content.into(),
            classes: vec![class.into()],
        }
    }

    /// Create an element node with the given id.
    pub fn element(id: impl Into<String>) -> Self {
        Self::Element {
            id: id.into(),
            classes: Vec::new(),
            layout: CellLayout::default(),
            data: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Replace the class list (no-op on `Empty` and `Portal`).
    pub fn with_classes(mut self, new_classes: ClassList) -> Self {
        match &mut self {
            Self::Text { classes, .. } | Self::Element { classes, .. } => {
                *classes = new_classes;
            }
            Self::Empty | Self::Portal { .. } => {}
        }
        self
    }

    /// Append a class token (no-op on `Empty` and `Portal`).
    pub fn with_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        match &mut self {
            Self::Text { classes, .. } | Self::Element { classes, .. } => {
                classes.push(class.into());
            }
            Self::Empty | Self::Portal { .. } => {}
        }
        self
    }

    /// Set the layout of an element node.
    pub fn with_layout(mut self, layout: CellLayout) -> Self {
        if let Self::Element {
            layout: slot,
            ..
        } = &mut self
        {
            *slot = layout;
        }
        self
    }

    /// Set a data attribute on an element node.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element { data, .. } = &mut self {
            data.insert(key.into(), value.into());
        }
        self
    }

    /// Append a child to an element node.
    pub fn with_child(mut self, child: Node) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Whether this node renders nothing at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text { content, .. } => content.is_empty(),
            Self::Element { children, .. } => children.iter().all(Node::is_empty),
            Self::Portal { .. } => false,
        }
    }

    /// Class tokens of this node (empty for `Empty` and `Portal`).
    pub fn classes(&self) -> &[Cow<'static, str>] {
        match self {
            Self::Text { classes, .. } | Self::Element { classes, .. } => classes,
            Self::Empty | Self::Portal { .. } => &[],
        }
    }

    /// Whether any node in this subtree carries the given class token.
    pub fn has_class(&self, class: &str) -> bool {
        if self.classes().iter().any(|c| c == class) {
            return true;
        }
        match self {
            Self::Element { children, .. } => children.iter().any(|c| c.has_class(class)),
            Self::Portal { child, .. } => child.has_class(class),
            _ => false,
        }
    }

    /// Look up a data attribute on an element node.
    pub fn data(&self, key: &str) -> Option<&str> {
        match self {
            Self::Element { data, .. } => data.get(key).map(String::as_str),
            _ => None,
        }
    }

    /// Direct children of this node.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text content of the subtree (portals excluded).
    pub fn text_content(&self) -> String {
        match self {
            Self::Text { content, .. } => content.clone(),
            Self::Element { children, .. } => children.iter().map(Node::text_content).collect(),
            Self::Empty | Self::Portal { .. } => String::new(),
        }
    }
}
