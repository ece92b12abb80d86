use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use gridcell::prelude::*;
use gridcell::style;

fn draw(width: u16, height: u16, render: impl FnOnce(&mut ratatui::Frame)) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(render).unwrap();
    terminal.backend().buffer().clone()
}

fn symbol(buffer: &Buffer, x: u16, y: u16) -> String {
    buffer.cell((x, y)).unwrap().symbol().to_string()
}

#[test]
fn test_paint_fills_cell_and_draws_text() {
    let theme = GridTheme::default_dark();
    let node = Node::element("cell-0-0")
        .with_class(style::CELL)
        .with_layout(CellLayout::new(8, 2))
        .with_child(Node::text("apple"));

    let buffer = draw(16, 1, |frame| {
        paint(frame, Rect::new(0, 0, 16, 1), &node, &theme);
    });

    // Content starts at the cell's left offset.
    assert_eq!(symbol(&buffer, 2, 0), "a");
    assert_eq!(symbol(&buffer, 6, 0), "e");
    // The fill covers the whole cell width, even past the text.
    let base = theme.resolve(style::CELL).unwrap();
    assert_eq!(buffer.cell((9, 0)).unwrap().style().bg, base.bg);
    // Nothing is painted outside the cell.
    assert_ne!(buffer.cell((10, 0)).unwrap().style().bg, base.bg);
}

#[test]
fn test_wide_cell_is_clipped_to_area() {
    let theme = GridTheme::default_dark();
    let node = Node::element("cell-0-0")
        .with_layout(CellLayout::new(40, 0))
        .with_child(Node::text("abcdefghij"));

    let buffer = draw(6, 1, |frame| {
        paint(frame, Rect::new(0, 0, 6, 1), &node, &theme);
    });

    assert_eq!(symbol(&buffer, 5, 0), "f");
}

#[test]
fn test_portal_mounts_at_paint_time() {
    let theme = GridTheme::default_dark();
    let layer = OverlayLayer::new();
    let node = Node::Portal {
        target: layer.target(),
        at: GridPoint::new(10, 2),
        child: Box::new(Node::text("picker")),
    };

    let buffer = draw(16, 4, |frame| {
        paint(frame, Rect::new(0, 0, 16, 1), &node, &theme);
    });

    // Nothing painted in place; the content sits on the layer instead.
    assert_eq!(symbol(&buffer, 0, 0), " ");
    assert_eq!(layer.len(), 1);
    let mount = layer.drain().pop().unwrap();
    assert_eq!(mount.at, GridPoint::new(10, 2));
    assert!(layer.is_empty());
}

#[test]
fn test_paint_overlay_translates_content_coordinates() {
    let theme = GridTheme::default_dark();
    let viewport = GridViewport::new();
    viewport.set_scroll(4, 1);
    let mount = OverlayMount {
        at: GridPoint::new(10, 2),
        node: Node::text("picker"),
    };

    let buffer = draw(16, 4, |frame| {
        paint_overlay(frame, Rect::new(0, 0, 16, 4), &mount, &viewport, &theme);
    });

    // Content coordinates minus scroll offsets.
    assert_eq!(symbol(&buffer, 6, 1), "p");
}

#[test]
fn test_paint_overlay_skips_scrolled_out_mounts() {
    let theme = GridTheme::default_dark();
    let viewport = GridViewport::new();
    viewport.set_scroll(20, 0);
    let mount = OverlayMount {
        at: GridPoint::new(10, 2),
        node: Node::text("picker"),
    };

    let buffer = draw(16, 4, |frame| {
        paint_overlay(frame, Rect::new(0, 0, 16, 4), &mount, &viewport, &theme);
    });

    for x in 0..16 {
        for y in 0..4 {
            assert_eq!(symbol(&buffer, x, y), " ");
        }
    }
}

#[test]
fn test_editing_cell_paints_editor_above_content() {
    let layer = OverlayLayer::new();
    let viewport = GridViewport::new();
    let bus = EventBus::new();
    let handlers = CellHandlers::none();
    let theme = GridTheme::default_dark();

    let column: Column<String> = Column::text(0, "Name", 8, |row: &String| row.clone())
        .editor(|mount| Node::text(format!("<{}>", mount.row)));
    let row = "pear".to_string();
    let selection = CellSelection::Editing(EditorSession::new().with_portal_target(layer.target()));

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(0, 1, 8, 1)));
    let props = CellProps {
        column: &column,
        row: &row,
        row_idx: 1,
        selection: &selection,
        flags: CellFlags::default(),
        last_frozen_column_index: None,
        class: None,
        viewport: &viewport,
        bus: &bus,
        handlers: &handlers,
    };
    let node = cell.render(&props);

    let buffer = draw(16, 4, |frame| {
        paint(frame, Rect::new(0, 1, 16, 1), &node, &theme);
        for mount in layer.drain() {
            paint_overlay(frame, Rect::new(0, 0, 16, 4), &mount, &viewport, &theme);
        }
    });

    assert_eq!(symbol(&buffer, 0, 1), "<");
    assert_eq!(symbol(&buffer, 5, 1), ">");
}
