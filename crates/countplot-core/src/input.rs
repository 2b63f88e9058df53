//! Input events from the plot widget
//!
//! Two kinds of user input reach an applet:
//! - Clicks on a point of the aggregate scatter, identified by point index
//! - Key presses, of which only the navigation shortcuts are acted on

use countplot_selection::Direction;
use serde::{Deserialize, Serialize};

/// Keyboard key codes relevant to plot navigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,

    // Anything else, by platform key code
    Unknown(u32),
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The key that was pressed/released
    pub key: Key,
    /// Whether the key was pressed (true) or released (false)
    pub pressed: bool,
    /// Whether this is an auto-repeat event
    pub is_repeat: bool,
}

impl KeyEvent {
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            pressed: true,
            is_repeat: false,
        }
    }

    pub fn released(key: Key) -> Self {
        Self {
            key,
            pressed: false,
            is_repeat: false,
        }
    }

    pub fn with_repeat(mut self) -> Self {
        self.is_repeat = true;
        self
    }
}

/// Event reported by the plot sink
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlotEvent {
    /// A point of the aggregate scatter was clicked
    PointClicked { index: usize },
    /// A key was pressed or released while the plot had focus
    Key(KeyEvent),
}

/// Key binding for a navigation step
#[derive(Clone, Debug)]
pub struct Shortcut {
    pub key: Key,
    pub direction: Direction,
}

impl Shortcut {
    pub fn new(key: Key, direction: Direction) -> Self {
        Self { key, direction }
    }

    /// Check if this shortcut matches a key event
    ///
    /// Auto-repeat presses match so that holding a key keeps stepping.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.pressed && event.key == self.key
    }
}

/// Default navigation bindings: Left steps back, Right steps forward
pub fn default_shortcuts() -> Vec<Shortcut> {
    vec![
        Shortcut::new(Key::Left, Direction::Previous),
        Shortcut::new(Key::Right, Direction::Next),
    ]
}

/// Find the navigation direction for a key event
pub fn find_direction(event: &KeyEvent, shortcuts: &[Shortcut]) -> Option<Direction> {
    shortcuts
        .iter()
        .find(|s| s.matches(event))
        .map(|s| s.direction)
}
