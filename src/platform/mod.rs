//! Platform abstraction layer
//!
//! Input arrives as a key-state snapshot polled once per frame by the
//! platform collaborator, before the simulation update runs. Text typed
//! during the frame rides along for the name entry screen.

pub mod headless;

pub use headless::{DrawTally, HeadlessSprites};

/// Game keys the core reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Backspace,
    Return,
}

const KEY_COUNT: usize = 7;

impl Key {
    pub const ALL: [Key; KEY_COUNT] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Fire,
        Key::Backspace,
        Key::Return,
    ];

    fn index(self) -> usize {
        match self {
            Key::Up => 0,
            Key::Down => 1,
            Key::Left => 2,
            Key::Right => 3,
            Key::Fire => 4,
            Key::Backspace => 5,
            Key::Return => 6,
        }
    }
}

/// Boolean key-state lookup
pub trait KeyState {
    fn is_key_held(&self, key: Key) -> bool;

    /// Characters typed since the previous frame
    fn typed_text(&self) -> &str {
        ""
    }
}

/// Plain key-state snapshot, filled by whatever polls the OS
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardSnapshot {
    held: [bool; KEY_COUNT],
    text: String,
}

impl KeyboardSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, held: bool) {
        self.held[key.index()] = held;
    }

    /// Builder-style variant of [`KeyboardSnapshot::set`]
    pub fn with(mut self, key: Key) -> Self {
        self.set(key, true);
        self
    }

    /// Append text typed this frame
    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Builder-style variant of [`KeyboardSnapshot::push_text`]
    pub fn with_text(mut self, text: &str) -> Self {
        self.push_text(text);
        self
    }

    /// Release every key and drop pending text
    pub fn release_all(&mut self) {
        self.held = [false; KEY_COUNT];
        self.text.clear();
    }
}

impl KeyState for KeyboardSnapshot {
    fn is_key_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    fn typed_text(&self) -> &str {
        &self.text
    }
}
