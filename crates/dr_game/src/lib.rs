//! Death Riddle: a tile platformer where every enemy asks a riddle and a
//! branching story decides how the escape ends.
//!
//! [`session::Session`] owns the player, the story and the game master and
//! knows which screen is up. [`game::Game`] wraps a session with the current
//! level and runs the per-tick simulation on top of it.

pub mod collision;
pub mod config;
pub mod enemy;
pub mod game;
pub mod game_master;
pub mod level;
pub mod levels;
pub mod player;
pub mod replay;
pub mod riddle;
pub mod save;
pub mod session;
pub mod snapshot;
pub mod sprites;
pub mod story;
