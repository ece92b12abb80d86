//! Coordinate computation for active editors.

use ratatui::layout::Rect;

use crate::viewport::{GridPoint, GridViewport};

/// Content-absolute position of a cell's on-screen rect.
///
/// Adds the scrollable ancestor's current offsets to the viewport-relative
/// rect origin, yielding coordinates an overlay can be mounted at without
/// being affected by the grid's clipping. Called once when editing content
/// is computed; the result is a snapshot, not a live binding.
pub fn overlay_position(root: Rect, viewport: &GridViewport) -> GridPoint {
    let (scroll_left, scroll_top) = viewport.scroll();
    GridPoint {
        left: u32::from(root.x) + u32::from(scroll_left),
        top: u32::from(root.y) + u32::from(scroll_top),
    }
}
