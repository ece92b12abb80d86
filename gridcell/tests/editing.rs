use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ratatui::layout::Rect;

use gridcell::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Fruit {
    name: String,
    qty: u32,
}

fn fruit() -> Fruit {
    Fruit {
        name: "apple".into(),
        qty: 3,
    }
}

fn text_column() -> Column<Fruit> {
    Column::text(0, "Name", 12, |row: &Fruit| row.name.clone())
}

fn recorder(bus: &EventBus) -> (Subscription, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&count);
    let subscription = bus.subscribe(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });
    (subscription, count)
}

struct Fixture {
    column: Column<Fruit>,
    row: Fruit,
    selection: CellSelection,
    handlers: CellHandlers<Fruit>,
    viewport: GridViewport,
    bus: EventBus,
}

impl Fixture {
    fn new(column: Column<Fruit>) -> Self {
        Self {
            column,
            row: fruit(),
            selection: CellSelection::None,
            handlers: CellHandlers::none(),
            viewport: GridViewport::new(),
            bus: EventBus::new(),
        }
    }

    fn editing(mut self, session: EditorSession) -> Self {
        self.selection = CellSelection::Editing(session);
        self
    }

    fn props(&self) -> CellProps<'_, Fruit> {
        CellProps {
            column: &self.column,
            row: &self.row,
            row_idx: 1,
            selection: &self.selection,
            flags: CellFlags::default(),
            last_frozen_column_index: None,
            class: None,
            viewport: &self.viewport,
            bus: &self.bus,
            handlers: &self.handlers,
        }
    }
}

fn first_child(node: &Node) -> &Node {
    node.children().first().expect("cell should have content")
}

// ============================================================================
// Missing root (Scenario D)
// ============================================================================

#[test]
fn test_editing_without_root_renders_empty_content() {
    let fixture =
        Fixture::new(text_column().editor(|mount| Node::text(format!("edit:{}", mount.row.name))))
            .editing(EditorSession::new());
    let (_subscription, commands) = recorder(&fixture.bus);

    let mut cell = Cell::new();
    let node = cell.render(&fixture.props());

    // The shell still renders with its tokens; the content is empty.
    assert!(node.has_class("grid-cell-editing"));
    assert!(node.children().is_empty());
    assert_eq!(commands.load(Ordering::SeqCst), 0);
}

#[test]
fn test_editing_recovers_on_next_render_after_mount() {
    let fixture =
        Fixture::new(text_column().editor(|mount| Node::text(format!("edit:{}", mount.row.name))))
            .editing(EditorSession::new());

    let mut cell = Cell::new();
    assert!(cell.render(&fixture.props()).children().is_empty());

    cell.set_root(Some(Rect::new(4, 2, 12, 1)));
    assert_eq!(cell.root(), Some(Rect::new(4, 2, 12, 1)));
    let node = cell.render(&fixture.props());
    assert_eq!(node.children().len(), 1);
    assert_eq!(first_child(&node).text_content(), "edit:apple");
}

// ============================================================================
// Portal decisions
// ============================================================================

#[test]
fn test_standard_editor_portals_by_default() {
    let layer = OverlayLayer::new();
    let fixture = Fixture::new(text_column().editor(|mount| {
        Node::text(format!("edit:{}", mount.row.name))
    }))
    .editing(EditorSession::new().with_portal_target(layer.target()));

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(4, 2, 12, 1)));
    let node = cell.render(&fixture.props());

    match first_child(&node) {
        Node::Portal { target, at, child } => {
            assert!(target.is_target_of(&layer));
            assert_eq!(*at, GridPoint::new(4, 2));
            assert_eq!(child.text_content(), "edit:apple");
        }
        other => panic!("expected a portal, got {other:?}"),
    }
    // Mounting happens at paint time, not at render time.
    assert!(layer.is_empty());
}

#[test]
fn test_standard_editor_in_place_when_portal_disabled() {
    let layer = OverlayLayer::new();
    let fixture = Fixture::new(
        text_column()
            .editor(|mount| Node::text(format!("edit:{}", mount.row.name)))
            .create_portal(false),
    )
    .editing(EditorSession::new().with_portal_target(layer.target()));

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(4, 2, 12, 1)));
    let node = cell.render(&fixture.props());

    assert!(matches!(first_child(&node), Node::Text { .. }));
}

#[test]
fn test_overlay_editor_renders_in_place_by_default() {
    let layer = OverlayLayer::new();
    let fixture = Fixture::new(
        text_column().overlay_editor(|mount| Node::text(format!("picker@{:?}", mount.at))),
    )
    .editing(EditorSession::new().with_portal_target(layer.target()));

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(4, 2, 12, 1)));
    let node = cell.render(&fixture.props());

    assert!(matches!(first_child(&node), Node::Text { .. }));
}

#[test]
fn test_overlay_editor_portals_on_request() {
    let layer = OverlayLayer::new();
    let fixture = Fixture::new(
        text_column()
            .overlay_editor(|_| Node::text("picker"))
            .create_portal(true),
    )
    .editing(EditorSession::new().with_portal_target(layer.target()));

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(4, 2, 12, 1)));
    let node = cell.render(&fixture.props());

    assert!(matches!(first_child(&node), Node::Portal { .. }));
}

#[test]
fn test_portal_request_without_target_falls_back_in_place() {
    let fixture = Fixture::new(text_column().editor(|_| Node::text("edit")))
        .editing(EditorSession::new());

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(4, 2, 12, 1)));
    let node = cell.render(&fixture.props());

    assert!(matches!(first_child(&node), Node::Text { .. }));
}

// ============================================================================
// Variant selection
// ============================================================================

#[test]
fn test_overlay_variant_wins_over_standard() {
    let standard_calls = Arc::new(AtomicUsize::new(0));
    let overlay_calls = Arc::new(AtomicUsize::new(0));

    let standard = Arc::clone(&standard_calls);
    let overlay = Arc::clone(&overlay_calls);
    let fixture = Fixture::new(
        text_column()
            .editor(move |_| {
                standard.fetch_add(1, Ordering::SeqCst);
                Node::text("standard")
            })
            .overlay_editor(move |_| {
                overlay.fetch_add(1, Ordering::SeqCst);
                Node::text("overlay")
            }),
    )
    .editing(EditorSession::new());

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(0, 0, 12, 1)));
    let node = cell.render(&fixture.props());

    assert_eq!(first_child(&node).text_content(), "overlay");
    assert_eq!(overlay_calls.load(Ordering::SeqCst), 1);
    assert_eq!(standard_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_editing_without_editor_falls_back_to_formatter() {
    let fixture = Fixture::new(text_column()).editing(EditorSession::new());

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(0, 0, 12, 1)));
    let node = cell.render(&fixture.props());

    assert_eq!(node.text_content().trim_end(), "apple");
}

// ============================================================================
// Coordinates
// ============================================================================

#[test]
fn test_overlay_coordinates_include_scroll_offsets() {
    let seen = Arc::new(std::sync::Mutex::new(None));
    let sink = Arc::clone(&seen);
    let fixture = Fixture::new(text_column().overlay_editor(move |mount| {
        *sink.lock().unwrap() = Some(mount.at);
        Node::text("picker")
    }))
    .editing(EditorSession::new());
    fixture.viewport.set_scroll(12, 340);

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(8, 3, 12, 1)));
    cell.render(&fixture.props());

    assert_eq!(*seen.lock().unwrap(), Some(GridPoint::new(20, 343)));
}

// ============================================================================
// Render cache
// ============================================================================

#[test]
fn test_unchanged_inputs_replay_cached_render() {
    let calls = Arc::new(AtomicUsize::new(0));
    let count = Arc::clone(&calls);
    let fixture = Fixture::new(text_column().formatter(move |input: &FormatterInput<'_, Fruit>| {
        count.fetch_add(1, Ordering::SeqCst);
        Node::text(input.row.name.clone())
    }));

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(0, 0, 12, 1)));
    let first = cell.render(&fixture.props());
    let second = cell.render(&fixture.props());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.text_content(), second.text_content());

    // An explicit invalidation forces the next render to recompute.
    cell.invalidate();
    cell.render(&fixture.props());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_changed_row_recomputes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let count = Arc::clone(&calls);
    let mut fixture =
        Fixture::new(text_column().formatter(move |input: &FormatterInput<'_, Fruit>| {
            count.fetch_add(1, Ordering::SeqCst);
            Node::text(input.row.name.clone())
        }));

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(0, 0, 12, 1)));
    cell.render(&fixture.props());
    fixture.row.qty = 4;
    cell.render(&fixture.props());

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_scroll_alone_does_not_reposition_active_editor() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(std::sync::Mutex::new(None));
    let count = Arc::clone(&calls);
    let sink = Arc::clone(&seen);
    let fixture = Fixture::new(text_column().overlay_editor(move |mount| {
        count.fetch_add(1, Ordering::SeqCst);
        *sink.lock().unwrap() = Some(mount.at);
        Node::text("picker")
    }))
    .editing(EditorSession::new());

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(8, 3, 12, 1)));
    cell.render(&fixture.props());
    assert_eq!(*seen.lock().unwrap(), Some(GridPoint::new(8, 3)));

    // A scroll tick while the same session stays active replays the
    // snapshot instead of re-measuring.
    fixture.viewport.set_scroll(0, 10);
    cell.render(&fixture.props());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(*seen.lock().unwrap(), Some(GridPoint::new(8, 3)));
}

#[test]
fn test_new_session_recomputes_coordinates() {
    let seen = Arc::new(std::sync::Mutex::new(None));
    let sink = Arc::clone(&seen);
    let mut fixture = Fixture::new(text_column().overlay_editor(move |mount| {
        *sink.lock().unwrap() = Some(mount.at);
        Node::text("picker")
    }))
    .editing(EditorSession::new());

    let mut cell = Cell::new();
    cell.set_root(Some(Rect::new(8, 3, 12, 1)));
    cell.render(&fixture.props());

    fixture.viewport.set_scroll(0, 10);
    fixture.selection = CellSelection::Editing(EditorSession::new());
    cell.render(&fixture.props());

    assert_eq!(*seen.lock().unwrap(), Some(GridPoint::new(8, 13)));
}
