//! Input event types for cell interaction.
//!
//! The host grid translates terminal input into these events and routes
//! them to the cell that the hit test resolved. Double clicks are the
//! host's responsibility to detect (terminals only report presses), so
//! `ClickKind` carries the already-classified gesture.

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Shift only.
    pub const fn shift() -> Self {
        Self {
            ctrl: false,
            shift: true,
            alt: false,
        }
    }

    /// Ctrl only.
    pub const fn ctrl() -> Self {
        Self {
            ctrl: true,
            shift: false,
            alt: false,
        }
    }

    /// Alt only.
    pub const fn alt() -> Self {
        Self {
            ctrl: false,
            shift: false,
            alt: true,
        }
    }

    /// Check if any modifier is active.
    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt
    }
}

/// Key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// A key combination (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// The key code
    pub key: Key,
    /// Modifier keys
    pub modifiers: Modifiers,
}

impl KeyCombo {
    /// Create a new key combo.
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a key combo without modifiers.
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Add ctrl modifier.
    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    /// Add shift modifier.
    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    /// Add alt modifier.
    pub const fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }
}

/// Position in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Column (0-indexed)
    pub x: u16,
    /// Row (0-indexed)
    pub y: u16,
}

impl Position {
    /// Create a new position.
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Click gesture kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Primary action (left click)
    Primary,
    /// Primary action repeated within the host's double-click window
    Double,
    /// Secondary action (right click, context menu)
    Secondary,
}

/// Click event from mouse or keyboard activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// Type of click
    pub kind: ClickKind,
    /// Position where the click occurred
    pub position: Position,
    /// Modifier keys held during the click
    pub modifiers: Modifiers,
}

impl ClickEvent {
    /// Create a primary click event.
    pub const fn primary(position: Position, modifiers: Modifiers) -> Self {
        Self {
            kind: ClickKind::Primary,
            position,
            modifiers,
        }
    }

    /// Create a double-click event.
    pub const fn double(position: Position, modifiers: Modifiers) -> Self {
        Self {
            kind: ClickKind::Double,
            position,
            modifiers,
        }
    }

    /// Create a secondary click event.
    pub const fn secondary(position: Position, modifiers: Modifiers) -> Self {
        Self {
            kind: ClickKind::Secondary,
            position,
            modifiers,
        }
    }

    /// Classify a raw mouse press. Returns `None` for moves, drags and
    /// releases, which the cell does not consume.
    pub fn from_mouse(event: &crossterm::event::MouseEvent) -> Option<Self> {
        use crossterm::event::{MouseButton, MouseEventKind};
        let position = Position::new(event.column, event.row);
        let modifiers = Modifiers::from(event.modifiers);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Self::primary(position, modifiers)),
            MouseEventKind::Down(MouseButton::Right) => Some(Self::secondary(position, modifiers)),
            _ => None,
        }
    }
}

// Conversion from crossterm types

impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'),
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            shift: mods.contains(KeyModifiers::SHIFT),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::KeyEvent> for KeyCombo {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        Self {
            key: event.code.into(),
            modifiers: event.modifiers.into(),
        }
    }
}
