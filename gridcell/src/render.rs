//! Paint pass from a node tree onto a ratatui frame.
//!
//! The host paints each row's cells with [`paint`], then drains its overlay
//! layer and paints the collected mounts with [`paint_overlay`] so editors
//! end up above every row. Style resolution happens here: each node's class
//! tokens are folded through the theme in source order.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use crate::node::{CellLayout, Node};
use crate::overlay::OverlayMount;
use crate::style::GridTheme;
use crate::viewport::GridViewport;

/// Paint a node tree into `area`.
///
/// Element layout offsets are relative to `area`; content that does not fit
/// is clipped. Portal nodes paint nothing here and mount their child onto
/// the target layer instead.
pub fn paint(frame: &mut Frame, area: Rect, node: &Node, theme: &GridTheme) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    match node {
        Node::Empty => {}
        Node::Text { content, classes } => {
            let span = Span::styled(content.as_str(), theme.compose(classes));
            frame.buffer_mut().set_span(area.x, area.y, &span, area.width);
        }
        Node::Element {
            classes,
            layout,
            children,
            ..
        } => {
            let Some(inner) = place(area, *layout) else {
                return;
            };
            fill(frame, inner, theme.compose(classes));
            for child in children {
                paint(frame, inner, child, theme);
            }
        }
        Node::Portal { target, at, child } => {
            target.mount(OverlayMount {
                at: *at,
                node: (**child).clone(),
            });
        }
    }
}

/// Paint one drained overlay mount above the grid content.
///
/// The mount's content coordinates are translated back through the
/// viewport; mounts scrolled out of view are skipped.
pub fn paint_overlay(
    frame: &mut Frame,
    screen: Rect,
    mount: &OverlayMount,
    viewport: &GridViewport,
    theme: &GridTheme,
) {
    let Some((x, y)) = viewport.to_viewport(mount.at) else {
        return;
    };
    if x >= screen.right() || y >= screen.bottom() || x < screen.left() || y < screen.top() {
        return;
    }
    let available = screen.right() - x;
    let width = natural_width(&mount.node, available).min(available);
    if width == 0 {
        return;
    }
    paint(frame, Rect::new(x, y, width, 1), &mount.node, theme);
}

fn place(area: Rect, layout: CellLayout) -> Option<Rect> {
    if layout.left >= area.width {
        return None;
    }
    let remaining = area.width - layout.left;
    let width = if layout.width == 0 {
        remaining
    } else {
        layout.width.min(remaining)
    };
    Some(Rect::new(
        area.x + layout.left,
        area.y,
        width,
        area.height,
    ))
}

fn fill(frame: &mut Frame, area: Rect, style: Style) {
    if style == Style::default() {
        return;
    }
    let blank = " ".repeat(usize::from(area.width));
    for y in area.top()..area.bottom() {
        let span = Span::styled(blank.as_str(), style);
        frame.buffer_mut().set_span(area.x, y, &span, area.width);
    }
}

fn natural_width(node: &Node, fallback: u16) -> u16 {
    match node {
        Node::Element { layout, .. } if layout.width > 0 => layout.width,
        Node::Text { content, .. } => {
            u16::try_from(content.width()).unwrap_or(u16::MAX)
        }
        _ => fallback,
    }
}
