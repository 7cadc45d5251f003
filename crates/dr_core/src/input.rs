//! Keyboard state tracking with both level-triggered and edge-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` is true every tick the key is down.
//!   Movement reads this through [`InputState::move_intent`], which reduces the
//!   held set to four logical directions plus jump.
//!
//! - **Edge-triggered (just_pressed / just_released):** true only for the tick the
//!   transition happened, cleared by `end_frame()`. Used for toggles such as pause.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Escape,
    W,
    A,
    S,
    D,
    P,
    R,
}

/// Logical movement request for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
}

impl MoveIntent {
    /// -1, 0 or +1. Opposing directions cancel.
    pub fn horizontal(&self) -> i8 {
        match (self.left, self.right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    /// -1 (up), 0 or +1 (down). Opposing directions cancel.
    pub fn vertical(&self) -> i8 {
        match (self.up, self.down) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == MoveIntent::default()
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// OS auto-repeat is absorbed: a second `key_down` for a held key is ignored.
    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    pub fn move_intent(&self) -> MoveIntent {
        MoveIntent {
            left: self.is_held(Key::Left) || self.is_held(Key::A),
            right: self.is_held(Key::Right) || self.is_held(Key::D),
            up: self.is_held(Key::Up) || self.is_held(Key::W),
            down: self.is_held(Key::Down) || self.is_held(Key::S),
            jump: self.is_held(Key::Up) || self.is_held(Key::W) || self.is_held(Key::Space),
        }
    }

    /// Forget everything, including held keys. Called when gameplay is suspended
    /// so that no key carries over the pause boundary.
    pub fn clear(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
