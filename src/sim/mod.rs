//! Deterministic game simulation
//!
//! No rendering or platform dependencies live here; the whole module runs
//! headless. Given the same seed and input sequence, two runs produce
//! identical states.

pub mod collision;
pub mod input;
pub mod motion;
pub mod spawner;
pub mod state;
pub mod tick;

pub use input::{Action, ActionSet, KeyBindings};
pub use state::{GamePhase, GameState};
pub use tick::{tick, TickInput};
