//! Scroll state of the scrollable ancestor that hosts the cells.
//!
//! The grid's virtualization engine owns scrolling; cells only need to read
//! the current offsets to translate their on-screen rect into content
//! coordinates. `GridViewport` is a cheap cloneable handle so the controller,
//! the rows and every cell can share one source of truth.

use std::sync::{Arc, RwLock};

/// A point in content coordinates (viewport position plus scroll offsets).
///
/// Axes are `u32` so the sum of a `u16` screen coordinate and a `u16`
/// scroll offset cannot wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridPoint {
    /// Columns from the content origin
    pub left: u32,
    /// Rows from the content origin
    pub top: u32,
}

impl GridPoint {
    /// Create a new content point.
    pub const fn new(left: u32, top: u32) -> Self {
        Self { left, top }
    }
}

#[derive(Debug, Default)]
struct ViewportState {
    scroll_left: u16,
    scroll_top: u16,
}

/// Shared handle onto the scroll offsets of the nearest scrollable ancestor.
#[derive(Debug, Clone, Default)]
pub struct GridViewport {
    inner: Arc<RwLock<ViewportState>>,
}

impl GridViewport {
    /// Create a viewport handle with zero scroll offsets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current `(scroll_left, scroll_top)` offsets.
    pub fn scroll(&self) -> (u16, u16) {
        self.inner
            .read()
            .map(|state| (state.scroll_left, state.scroll_top))
            .unwrap_or_default()
    }

    /// Replace both scroll offsets.
    pub fn set_scroll(&self, left: u16, top: u16) {
        if let Ok(mut state) = self.inner.write() {
            state.scroll_left = left;
            state.scroll_top = top;
        }
    }

    /// Adjust the offsets by a signed delta, saturating at zero.
    pub fn scroll_by(&self, dx: i16, dy: i16) {
        if let Ok(mut state) = self.inner.write() {
            state.scroll_left = state.scroll_left.saturating_add_signed(dx);
            state.scroll_top = state.scroll_top.saturating_add_signed(dy);
        }
    }

    /// Translate a content point back into viewport coordinates.
    ///
    /// Returns `None` when the point is scrolled off the near edge or lies
    /// beyond the addressable terminal range.
    pub fn to_viewport(&self, at: GridPoint) -> Option<(u16, u16)> {
        let (scroll_left, scroll_top) = self.scroll();
        let x = at.left.checked_sub(u32::from(scroll_left))?;
        let y = at.top.checked_sub(u32::from(scroll_top))?;
        Some((u16::try_from(x).ok()?, u16::try_from(y).ok()?))
    }
}
