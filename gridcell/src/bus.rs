//! Synchronous command channel between cells and the grid controller.
//!
//! Cells are publish-only clients: they request selection changes and never
//! mutate selection state themselves. Delivery is synchronous and
//! fire-and-forget; the only feedback a cell ever sees is the selection
//! state it is handed on the next render.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::selection::CellPosition;

/// A command requested by a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum GridCommand {
    /// Request cell selection, optionally entering edit mode immediately.
    SelectCell {
        position: CellPosition,
        open_editor: bool,
    },
    /// Request a row-selection toggle. `is_shift_click` tells the
    /// controller to interpret the toggle as a range-extend gesture.
    SelectRow {
        row_idx: usize,
        checked: bool,
        is_shift_click: bool,
    },
}

impl GridCommand {
    /// Stable command name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectCell { .. } => "SELECT_CELL",
            Self::SelectRow { .. } => "SELECT_ROW",
        }
    }
}

impl fmt::Display for GridCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectCell {
                position,
                open_editor,
            } => write!(
                f,
                "SELECT_CELL idx={} row_idx={} open_editor={}",
                position.idx, position.row_idx, open_editor
            ),
            Self::SelectRow {
                row_idx,
                checked,
                is_shift_click,
            } => write!(
                f,
                "SELECT_ROW row_idx={row_idx} checked={checked} is_shift_click={is_shift_click}"
            ),
        }
    }
}

/// Errors surfaced by command delivery. Dispatch itself stays
/// fire-and-forget; these only reach the log.
#[derive(Debug, Error)]
pub enum BusError {
    /// A subscriber panicked while handling a command.
    #[error("subscriber {subscriber} panicked while handling {command}: {message}")]
    SubscriberPanic {
        subscriber: usize,
        command: &'static str,
        message: String,
    },
}

type Handler = Arc<dyn Fn(&GridCommand) + Send + Sync>;

#[derive(Default)]
struct BusInner {
    subscribers: RwLock<Vec<(usize, Handler)>>,
    next_id: AtomicUsize,
}

/// Shared publish/subscribe channel owned by the grid controller.
///
/// Clones share the same subscriber list. Commands are delivered in
/// subscription order, synchronously, on the dispatching thread.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Delivery stops when the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(
        &self,
        handler: impl Fn(&GridCommand) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut subscribers) = self.inner.subscribers.write() {
            subscribers.push((id, Arc::new(handler)));
        }
        Subscription {
            bus: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver a command to every current subscriber.
    ///
    /// A panicking subscriber is isolated and logged; later subscribers
    /// still receive the command.
    pub fn dispatch(&self, command: GridCommand) {
        log::debug!("dispatch {command}");
        // Snapshot the list so a subscriber can subscribe or unsubscribe
        // while the command is being delivered.
        let subscribers: Vec<(usize, Handler)> = match self.inner.subscribers.read() {
            Ok(subscribers) => subscribers.clone(),
            Err(_) => return,
        };
        for (id, handler) in subscribers {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| handler(&command))) {
                let error = BusError::SubscriberPanic {
                    subscriber: id,
                    command: command.name(),
                    message: extract_panic_message(&panic),
                };
                log::error!("{error}");
            }
        }
    }

    /// Dispatch a `SELECT_CELL` command.
    pub fn select_cell(&self, position: CellPosition, open_editor: bool) {
        self.dispatch(GridCommand::SelectCell {
            position,
            open_editor,
        });
    }

    /// Dispatch a `SELECT_ROW` command.
    pub fn select_row(&self, row_idx: usize, checked: bool, is_shift_click: bool) {
        self.dispatch(GridCommand::SelectRow {
            row_idx,
            checked,
            is_shift_click,
        });
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .read()
            .map(|subscribers| subscribers.len())
            .unwrap_or(0)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Guard for a bus subscription; unsubscribes on drop.
#[must_use = "dropping the subscription immediately unsubscribes"]
pub struct Subscription {
    bus: Weak<BusInner>,
    id: usize,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade()
            && let Ok(mut subscribers) = inner.subscribers.write()
        {
            subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Extract a human-readable message from a panic payload.
fn extract_panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
