//! Out-of-tree mounting for editors that must escape the grid's clipping.
//!
//! Virtualized rows clip their content to the row height, so an editor that
//! is taller than its cell would be cut off if it rendered in place. The
//! overlay layer is owned by the host grid and painted above the normal
//! content after every row has rendered. Cells never paint onto the layer
//! directly; they emit a [`crate::node::Node::Portal`] that carries a
//! [`PortalTarget`] handle, and the paint pass mounts the content there.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::node::Node;
use crate::viewport::GridPoint;

/// A piece of content mounted onto the overlay layer, with the content
/// position it was measured at.
#[derive(Debug, Clone)]
pub struct OverlayMount {
    /// Content-absolute anchor of the mount
    pub at: GridPoint,
    /// The mounted subtree
    pub node: Node,
}

#[derive(Default)]
struct LayerInner {
    mounts: Mutex<Vec<OverlayMount>>,
}

/// Host-owned layer that collects portal mounts for the current frame.
///
/// The host drains the layer after painting the grid content and paints
/// each mount above it (see [`crate::render::paint_overlay`]). Mounts do
/// not persist across frames; whatever is still editing will mount again
/// on the next render.
#[derive(Clone, Default)]
pub struct OverlayLayer {
    inner: Arc<LayerInner>,
}

impl OverlayLayer {
    /// Create an empty overlay layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mounting handle for this layer, to hand to editor sessions.
    pub fn target(&self) -> PortalTarget {
        PortalTarget {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Take all mounts collected since the last drain.
    pub fn drain(&self) -> Vec<OverlayMount> {
        self.inner
            .mounts
            .lock()
            .map(|mut mounts| std::mem::take(&mut *mounts))
            .unwrap_or_default()
    }

    /// Number of pending mounts.
    pub fn len(&self) -> usize {
        self.inner.mounts.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether no mounts are pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for OverlayLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayLayer")
            .field("mounts", &self.len())
            .finish()
    }
}

/// Destination handle for out-of-tree mounting.
///
/// Cloneable and cheap; a clone mounts onto the same layer.
#[derive(Clone)]
pub struct PortalTarget {
    inner: Arc<LayerInner>,
}

impl PortalTarget {
    /// Mount content onto the layer this handle points at.
    pub fn mount(&self, mount: OverlayMount) {
        if let Ok(mut mounts) = self.inner.mounts.lock() {
            mounts.push(mount);
        }
    }

    /// Whether this handle and the given layer share storage.
    pub fn is_target_of(&self, layer: &OverlayLayer) -> bool {
        Arc::ptr_eq(&self.inner, &layer.inner)
    }
}

impl fmt::Debug for PortalTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalTarget").finish_non_exhaustive()
    }
}
