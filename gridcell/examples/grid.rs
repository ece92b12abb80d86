//! Interactive cell demo.
//!
//! Arrow keys move the selection, Enter opens the editor for the selected
//! cell, Escape closes it, `q` quits. Clicking selects (the Qty column has
//! `edit_on_click`), right-clicking selects without opening an editor. A
//! minimal controller owns the selection state and reacts to bus commands;
//! the cells themselves never touch it.

use std::fs::File;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use simplelog::{Config, LevelFilter, WriteLogger};

use gridcell::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Fruit {
    name: String,
    qty: u32,
}

#[derive(Debug, Clone, Default)]
struct ControllerState {
    selected: Option<CellPosition>,
    session: Option<EditorSession>,
}

fn selection_for(state: &ControllerState, position: CellPosition) -> CellSelection {
    match (state.selected, &state.session) {
        (Some(selected), Some(session)) if selected == position => {
            CellSelection::Editing(session.clone())
        }
        (Some(selected), None) if selected == position => {
            CellSelection::Selected(SelectedCell::new())
        }
        _ => CellSelection::None,
    }
}

fn step(position: CellPosition, key: Key, cols: usize, rows: usize) -> CellPosition {
    let mut position = position;
    match key {
        Key::Up => position.row_idx = position.row_idx.saturating_sub(1),
        Key::Down => position.row_idx = (position.row_idx + 1).min(rows - 1),
        Key::Left => position.idx = position.idx.saturating_sub(1),
        Key::Right => position.idx = (position.idx + 1).min(cols - 1),
        _ => {}
    }
    position
}

fn main() -> io::Result<()> {
    let log_file = File::create("gridcell-demo.log").expect("failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("failed to initialize logger");

    let rows = vec![
        Fruit {
            name: "apple".into(),
            qty: 3,
        },
        Fruit {
            name: "pear".into(),
            qty: 1,
        },
        Fruit {
            name: "cherry".into(),
            qty: 12,
        },
        Fruit {
            name: "plum".into(),
            qty: 2,
        },
    ];

    let columns: Vec<Column<Fruit>> = vec![
        Column::text(0, "Name", 14, |row: &Fruit| row.name.clone()).frozen(),
        Column::text(1, "Qty", 6, |row: &Fruit| row.qty.to_string())
            .left(14)
            .edit_on_click()
            .editor(|mount| {
                Node::text_classed(
                    format!(" {} = {} ", mount.column.name, mount.row.qty),
                    "grid-cell-editing",
                )
            }),
        Column::text(2, "Status", 12, |row: &Fruit| {
            if row.qty > 2 { "plenty".into() } else { "low".into() }
        })
        .left(20)
        .class_fn(|row: &Fruit| (row.qty <= 2).then(|| "low-stock".into()))
        .overlay_editor(|mount| {
            Node::text_classed(
                format!(" status for row {} ", mount.position.row_idx),
                "grid-cell-editing",
            )
        })
        .create_portal(true),
    ];

    let layer = OverlayLayer::new();
    let viewport = GridViewport::new();
    let bus = EventBus::new();
    let theme = GridTheme::default_dark().with(
        "low-stock",
        ratatui::style::Style::default().fg(ratatui::style::Color::Rgb(230, 130, 90)),
    );
    let handlers = CellHandlers::none().with_row_click(|row_idx, row: &Fruit, _column| {
        log::info!("row {row_idx} clicked ({})", row.name);
    });

    let state = Arc::new(Mutex::new(ControllerState {
        selected: Some(CellPosition::new(0, 0)),
        session: None,
    }));
    let _subscription = bus.subscribe({
        let state = Arc::clone(&state);
        let layer = layer.clone();
        move |command| {
            let mut state = state.lock().unwrap();
            match command {
                GridCommand::SelectCell {
                    position,
                    open_editor,
                } => {
                    state.selected = Some(*position);
                    state.session = open_editor
                        .then(|| EditorSession::new().with_portal_target(layer.target()));
                }
                GridCommand::SelectRow {
                    row_idx, checked, ..
                } => {
                    log::info!("row {row_idx} selection toggled to {checked}");
                }
            }
        }
    });

    let mut cells: Vec<Vec<Cell<Fruit>>> = rows
        .iter()
        .map(|_| columns.iter().map(|_| Cell::new()).collect())
        .collect();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    loop {
        let snapshot = state.lock().unwrap().clone();
        terminal.draw(|frame| {
            let screen = frame.area();
            for (row_idx, row) in rows.iter().enumerate() {
                let row_area = Rect::new(0, row_idx as u16, screen.width, 1);
                for column in &columns {
                    let selection =
                        selection_for(&snapshot, CellPosition::new(column.idx, row_idx));
                    let cell = &mut cells[row_idx][column.idx];
                    cell.set_root(Some(Rect::new(column.left, row_area.y, column.width, 1)));
                    let node = cell.render(&CellProps {
                        column,
                        row,
                        row_idx,
                        selection: &selection,
                        flags: CellFlags::default(),
                        last_frozen_column_index: Some(0),
                        class: None,
                        viewport: &viewport,
                        bus: &bus,
                        handlers: &handlers,
                    });
                    paint(frame, row_area, &node, &theme);
                }
            }
            for mount in layer.drain() {
                paint_overlay(frame, screen, &mount, &viewport, &theme);
            }
        })?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let combo = KeyCombo::from(key);
                let mut guard = state.lock().unwrap();
                let editing = guard.session.is_some();
                match combo.key {
                    Key::Char('q') if !editing => break,
                    Key::Escape if editing => guard.session = None,
                    Key::Escape => break,
                    Key::Enter if editing => guard.session = None,
                    Key::Enter => {
                        let selected = guard.selected;
                        drop(guard);
                        if let Some(position) = selected {
                            bus.select_cell(position, true);
                        }
                    }
                    Key::Up | Key::Down | Key::Left | Key::Right if !editing => {
                        let position = guard.selected.unwrap_or(CellPosition::new(0, 0));
                        drop(guard);
                        bus.select_cell(
                            step(position, combo.key, columns.len(), rows.len()),
                            false,
                        );
                    }
                    _ => {}
                }
            }
            Event::Mouse(mouse) => {
                let Some(click) = ClickEvent::from_mouse(&mouse) else {
                    continue;
                };
                let row_idx = usize::from(click.position.y);
                let Some(column) = columns
                    .iter()
                    .find(|c| click.position.x >= c.left && click.position.x < c.left + c.width)
                else {
                    continue;
                };
                if row_idx >= rows.len() {
                    continue;
                }
                let snapshot = state.lock().unwrap().clone();
                let selection = selection_for(&snapshot, CellPosition::new(column.idx, row_idx));
                let props = CellProps {
                    column,
                    row: &rows[row_idx],
                    row_idx,
                    selection: &selection,
                    flags: CellFlags::default(),
                    last_frozen_column_index: Some(0),
                    class: None,
                    viewport: &viewport,
                    bus: &bus,
                    handlers: &handlers,
                };
                let cell = &cells[row_idx][column.idx];
                match click.kind {
                    ClickKind::Primary => cell.on_click(&props, &click),
                    ClickKind::Double => cell.on_double_click(&props, &click),
                    ClickKind::Secondary => cell.on_context_menu(&props, &click),
                }
            }
            _ => {}
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    Ok(())
}
