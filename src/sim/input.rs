//! Logical input mapping
//!
//! Raw key names never reach game logic. The driver translates key events
//! through a binding table into a closed set of actions; the simulation only
//! ever sees `ActionSet`.

use glam::Vec2;
use std::collections::HashMap;
use std::f32::consts::FRAC_1_SQRT_2;

/// Closed set of logical actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
    PauseToggle,
}

pub const ACTION_COUNT: usize = 6;

impl Action {
    #[inline]
    fn index(self) -> usize {
        match self {
            Action::MoveUp => 0,
            Action::MoveDown => 1,
            Action::MoveLeft => 2,
            Action::MoveRight => 3,
            Action::Fire => 4,
            Action::PauseToggle => 5,
        }
    }
}

/// Pressed/released state per action, "latest state wins"
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionSet {
    pressed: [bool; ACTION_COUNT],
}

impl ActionSet {
    pub fn press(&mut self, action: Action) {
        self.pressed[action.index()] = true;
    }

    pub fn release(&mut self, action: Action) {
        self.pressed[action.index()] = false;
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }

    /// Clear all state, used on game reset
    pub fn clear(&mut self) {
        self.pressed = [false; ACTION_COUNT];
    }

    /// Movement direction from the four cardinal actions. Diagonal input is
    /// scaled by 1/sqrt(2) so diagonal speed equals axis speed.
    pub fn movement(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_pressed(Action::MoveUp) {
            dir.y -= 1.0;
        }
        if self.is_pressed(Action::MoveDown) {
            dir.y += 1.0;
        }
        if self.is_pressed(Action::MoveLeft) {
            dir.x -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            dir.x += 1.0;
        }
        if dir.x != 0.0 && dir.y != 0.0 {
            dir *= FRAC_1_SQRT_2;
        }
        dir
    }
}

/// Key-binding table from lowercase logical key names to actions
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<&'static str, Action>,
}

impl Default for KeyBindings {
    /// Two movement schemes: WASD/ZQSD letters and arrow keys. Space fires,
    /// P toggles pause.
    fn default() -> Self {
        let mut map = HashMap::new();
        for key in ["w", "z", "arrowup"] {
            map.insert(key, Action::MoveUp);
        }
        for key in ["s", "arrowdown"] {
            map.insert(key, Action::MoveDown);
        }
        for key in ["a", "q", "arrowleft"] {
            map.insert(key, Action::MoveLeft);
        }
        for key in ["d", "arrowright"] {
            map.insert(key, Action::MoveRight);
        }
        for key in [" ", "space"] {
            map.insert(key, Action::Fire);
        }
        map.insert("p", Action::PauseToggle);
        Self { map }
    }
}

impl KeyBindings {
    /// Look up the action bound to a key, case-insensitive
    pub fn lookup(&self, key: &str) -> Option<Action> {
        if let Some(&action) = self.map.get(key) {
            return Some(action);
        }
        self.map.get(key.to_lowercase().as_str()).copied()
    }
}
